use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use super::{ProductRepository, RepositoryError};
use crate::models::{Product, ProductDraft, ProductId};

#[derive(Debug)]
struct Inner {
    last_id: i64,
    products: BTreeMap<ProductId, Product>,
}

/// In-memory product store for tests/dev.
///
/// Ids come from a monotonic counter, so a deleted id is never handed out again.
#[derive(Debug)]
pub struct InMemoryProductRepository {
    inner: RwLock<Inner>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                last_id: 0,
                products: BTreeMap::new(),
            }),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Inner>, RepositoryError> {
        self.inner
            .read()
            .map_err(|_| RepositoryError::Unavailable("product store lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Inner>, RepositoryError> {
        self.inner
            .write()
            .map_err(|_| RepositoryError::Unavailable("product store lock poisoned".to_string()))
    }
}

impl Default for InMemoryProductRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, draft: ProductDraft) -> Result<Product, RepositoryError> {
        let mut inner = self.write()?;
        inner.last_id += 1;
        let product = draft.into_product(ProductId::new(inner.last_id));
        inner.products.insert(product.id, product.clone());
        Ok(product)
    }

    async fn find(&self, id: ProductId) -> Result<Product, RepositoryError> {
        self.read()?
            .products
            .get(&id)
            .cloned()
            .ok_or(RepositoryError::NotFound(id))
    }

    async fn list(&self) -> Result<Vec<Product>, RepositoryError> {
        Ok(self.read()?.products.values().cloned().collect())
    }

    async fn update(&self, id: ProductId, draft: ProductDraft) -> Result<Product, RepositoryError> {
        let mut inner = self.write()?;
        let slot = inner
            .products
            .get_mut(&id)
            .ok_or(RepositoryError::NotFound(id))?;
        *slot = draft.into_product(id);
        Ok(slot.clone())
    }

    async fn delete(&self, id: ProductId) -> Result<(), RepositoryError> {
        self.write()?
            .products
            .remove(&id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound(id))
    }
}
