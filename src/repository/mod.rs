//! Product persistence.
//!
//! The service only sees [`ProductRepository`]; the concrete store is chosen
//! once at startup and shared behind an `Arc`.

pub mod memory;
pub mod sqlite;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Product, ProductDraft, ProductId};

pub use memory::InMemoryProductRepository;
pub use sqlite::SqliteProductRepository;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("product {0} not found")]
    NotFound(ProductId),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Store for product records. Each operation is atomic for a single record.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Assign a fresh id and persist the draft. Ids are never reused.
    async fn create(&self, draft: ProductDraft) -> Result<Product, RepositoryError>;

    async fn find(&self, id: ProductId) -> Result<Product, RepositoryError>;

    /// All current records, ordered by id.
    async fn list(&self) -> Result<Vec<Product>, RepositoryError>;

    /// Replace every mutable field of an existing record.
    async fn update(&self, id: ProductId, draft: ProductDraft) -> Result<Product, RepositoryError>;

    async fn delete(&self, id: ProductId) -> Result<(), RepositoryError>;
}
