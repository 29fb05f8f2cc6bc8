use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::error;

use super::{ProductRepository, RepositoryError};
use crate::models::{Product, ProductDraft, ProductId};

/// SQLite-backed product store. Each operation is a single statement.
#[derive(Debug, Clone)]
pub struct SqliteProductRepository {
    pool: SqlitePool,
}

impl SqliteProductRepository {
    /// The schema must already exist (see [`crate::database::migrate`]).
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductRepository for SqliteProductRepository {
    async fn create(&self, draft: ProductDraft) -> Result<Product, RepositoryError> {
        sqlx::query_as::<_, Product>(
            "INSERT INTO products (name, description, price, quantity, reorder_threshold)
             VALUES (?1, ?2, ?3, ?4, ?5)
             RETURNING id, name, description, price, quantity, reorder_threshold",
        )
        .bind(&draft.name)
        .bind(draft.description.as_deref())
        .bind(draft.price)
        .bind(draft.quantity)
        .bind(draft.reorder_threshold)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!(?e, "Failed to insert product");
            e.into()
        })
    }

    async fn find(&self, id: ProductId) -> Result<Product, RepositoryError> {
        sqlx::query_as::<_, Product>(
            "SELECT id, name, description, price, quantity, reorder_threshold
             FROM products WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(RepositoryError::NotFound(id))
    }

    async fn list(&self) -> Result<Vec<Product>, RepositoryError> {
        match sqlx::query_as::<_, Product>(
            "SELECT id, name, description, price, quantity, reorder_threshold
             FROM products ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        {
            Ok(products) => Ok(products),
            Err(e) => {
                error!(?e, "Failed to fetch products");
                Err(e.into())
            }
        }
    }

    async fn update(&self, id: ProductId, draft: ProductDraft) -> Result<Product, RepositoryError> {
        sqlx::query_as::<_, Product>(
            "UPDATE products SET
             name = ?1,
             description = ?2,
             price = ?3,
             quantity = ?4,
             reorder_threshold = ?5
             WHERE id = ?6
             RETURNING id, name, description, price, quantity, reorder_threshold",
        )
        .bind(&draft.name)
        .bind(draft.description.as_deref())
        .bind(draft.price)
        .bind(draft.quantity)
        .bind(draft.reorder_threshold)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(RepositoryError::NotFound(id))
    }

    async fn delete(&self, id: ProductId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(id));
        }

        Ok(())
    }
}
