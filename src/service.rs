//! Inventory orchestration: validate, persist, derive alert state.

use std::sync::Arc;

use tracing::{info, instrument};

use crate::alerts;
use crate::error::AppError;
use crate::models::{Product, ProductDraft, ProductId, ProductPatch};
use crate::repository::ProductRepository;
use crate::validation::ProductValidator;

/// Stateless between calls; all durable state lives in the repository.
#[derive(Clone)]
pub struct InventoryService {
    repository: Arc<dyn ProductRepository>,
    validator: ProductValidator,
}

impl std::fmt::Debug for InventoryService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InventoryService").finish_non_exhaustive()
    }
}

impl InventoryService {
    pub fn new(repository: Arc<dyn ProductRepository>) -> Self {
        Self {
            repository,
            validator: ProductValidator::new(),
        }
    }

    #[instrument(skip(self, draft), fields(name = %draft.name))]
    pub async fn create_product(&self, draft: ProductDraft) -> Result<Product, AppError> {
        self.validator.validate(&draft)?;
        let product = self.repository.create(draft).await?;
        info!(id = %product.id, "Product created");
        Ok(product)
    }

    #[instrument(skip(self))]
    pub async fn get_product(&self, id: ProductId) -> Result<Product, AppError> {
        Ok(self.repository.find(id).await?)
    }

    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<Product>, AppError> {
        Ok(self.repository.list().await?)
    }

    /// Merge `patch` over the stored record and re-validate the result as a whole.
    #[instrument(skip(self, patch))]
    pub async fn update_product(&self, id: ProductId, patch: ProductPatch) -> Result<Product, AppError> {
        let existing = self.repository.find(id).await?;
        let merged = patch.merge_into(&existing);
        self.write_validated(id, merged).await
    }

    /// Replace every mutable field of an existing product.
    #[instrument(skip(self, draft))]
    pub async fn replace_product(&self, id: ProductId, draft: ProductDraft) -> Result<Product, AppError> {
        self.repository.find(id).await?;
        self.write_validated(id, draft).await
    }

    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: ProductId) -> Result<(), AppError> {
        self.repository.delete(id).await?;
        info!("Product deleted");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn list_low_stock(&self) -> Result<Vec<Product>, AppError> {
        let products = self.list_products().await?;
        Ok(alerts::filter_low_stock(products))
    }

    async fn write_validated(&self, id: ProductId, draft: ProductDraft) -> Result<Product, AppError> {
        self.validator.validate(&draft)?;
        let product = self.repository.update(id, draft).await?;
        info!(low_stock = alerts::is_low_stock(&product), "Product updated");
        Ok(product)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{InMemoryProductRepository, RepositoryError};
    use async_trait::async_trait;

    fn service() -> InventoryService {
        InventoryService::new(Arc::new(InMemoryProductRepository::new()))
    }

    fn draft(name: &str, price: f64, quantity: i64, reorder_threshold: i64) -> ProductDraft {
        ProductDraft {
            name: name.to_string(),
            description: None,
            price,
            quantity,
            reorder_threshold,
        }
    }

    fn low_stock_names(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.name.as_str()).collect()
    }

    /// Repository that always fails, for checking error propagation.
    struct BrokenRepository;

    #[async_trait]
    impl ProductRepository for BrokenRepository {
        async fn create(&self, _draft: ProductDraft) -> Result<Product, RepositoryError> {
            Err(RepositoryError::Unavailable("disk on fire".to_string()))
        }

        async fn find(&self, _id: ProductId) -> Result<Product, RepositoryError> {
            Err(RepositoryError::Unavailable("disk on fire".to_string()))
        }

        async fn list(&self) -> Result<Vec<Product>, RepositoryError> {
            Err(RepositoryError::Unavailable("disk on fire".to_string()))
        }

        async fn update(&self, _id: ProductId, _draft: ProductDraft) -> Result<Product, RepositoryError> {
            Err(RepositoryError::Unavailable("disk on fire".to_string()))
        }

        async fn delete(&self, _id: ProductId) -> Result<(), RepositoryError> {
            Err(RepositoryError::Unavailable("disk on fire".to_string()))
        }
    }

    #[tokio::test]
    async fn create_then_get_round_trips_every_field() {
        let service = service();
        let input = ProductDraft {
            description: Some("zinc plated".to_string()),
            ..draft("Bolt", 0.5, 5, 10)
        };

        let created = service.create_product(input.clone()).await.unwrap();
        let fetched = service.get_product(created.id).await.unwrap();

        assert_eq!(fetched, created);
        assert_eq!(fetched.to_draft(), input);
    }

    #[tokio::test]
    async fn invalid_create_never_reaches_storage() {
        let service = service();
        let err = service
            .create_product(draft("", -1.0, -3, 0))
            .await
            .unwrap_err();

        match err {
            AppError::Validation(v) => {
                assert_eq!(v.fields().collect::<Vec<_>>(), vec!["name", "price", "quantity"]);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
        assert!(service.list_products().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn bolt_scenario_enters_and_leaves_low_stock() {
        let service = service();
        let bolt = service.create_product(draft("Bolt", 0.5, 5, 10)).await.unwrap();
        service.create_product(draft("Crate", 12.0, 100, 10)).await.unwrap();

        let low = service.list_low_stock().await.unwrap();
        assert_eq!(low_stock_names(&low), vec!["Bolt"]);

        let patch = ProductPatch {
            quantity: Some(20),
            ..ProductPatch::default()
        };
        service.update_product(bolt.id, patch).await.unwrap();

        let low = service.list_low_stock().await.unwrap();
        assert!(low_stock_names(&low).is_empty());
    }

    #[tokio::test]
    async fn partial_update_changes_only_supplied_fields() {
        let service = service();
        let created = service.create_product(draft("Bolt", 0.5, 5, 10)).await.unwrap();

        let patch = ProductPatch {
            quantity: Some(20),
            ..ProductPatch::default()
        };
        let updated = service.update_product(created.id, patch).await.unwrap();

        assert_eq!(
            updated,
            Product {
                quantity: 20,
                ..created
            }
        );
    }

    #[tokio::test]
    async fn partial_update_is_validated_after_merge() {
        let service = service();
        let created = service.create_product(draft("Bolt", 0.5, 5, 10)).await.unwrap();

        let patch = ProductPatch {
            name: Some("   ".to_string()),
            reorder_threshold: Some(-1),
            ..ProductPatch::default()
        };
        let err = service.update_product(created.id, patch).await.unwrap_err();
        match err {
            AppError::Validation(v) => {
                assert_eq!(v.fields().collect::<Vec<_>>(), vec!["name", "reorderThreshold"]);
            }
            other => panic!("expected validation error, got {other:?}"),
        }

        assert_eq!(service.get_product(created.id).await.unwrap(), created);
    }

    #[tokio::test]
    async fn update_missing_product_is_not_found() {
        let service = service();
        let err = service
            .update_product(ProductId::new(9), ProductPatch::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(id) if id == ProductId::new(9)));
    }

    #[tokio::test]
    async fn replace_rewrites_all_fields() {
        let service = service();
        let created = service.create_product(draft("Bolt", 0.5, 5, 10)).await.unwrap();

        let replacement = draft("Hex bolt", 0.75, 40, 15);
        let replaced = service
            .replace_product(created.id, replacement.clone())
            .await
            .unwrap();
        assert_eq!(replaced, replacement.into_product(created.id));
    }

    #[tokio::test]
    async fn delete_then_get_is_not_found() {
        let service = service();
        let created = service.create_product(draft("Bolt", 0.5, 5, 10)).await.unwrap();

        service.delete_product(created.id).await.unwrap();
        assert!(matches!(
            service.get_product(created.id).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            service.delete_product(created.id).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn storage_failures_are_not_masked() {
        let service = InventoryService::new(Arc::new(BrokenRepository));

        let err = service.create_product(draft("Bolt", 0.5, 5, 10)).await.unwrap_err();
        assert!(matches!(err, AppError::Storage(RepositoryError::Unavailable(_))));

        let err = service.list_low_stock().await.unwrap_err();
        assert!(matches!(err, AppError::Storage(_)));
    }

    #[tokio::test]
    async fn validation_runs_before_storage_is_touched() {
        let service = InventoryService::new(Arc::new(BrokenRepository));
        let err = service.create_product(draft("", 0.5, 5, 10)).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use crate::database;
        use crate::repository::SqliteProductRepository;
        use proptest::prelude::*;

        fn valid_draft() -> impl Strategy<Value = ProductDraft> {
            (
                "[A-Za-z0-9][A-Za-z0-9 _-]{0,40}",
                proptest::option::of("[a-z ]{0,30}"),
                f64::MIN_POSITIVE..1e12,
                0i64..=i64::MAX,
                0i64..=i64::MAX,
            )
                .prop_map(|(name, description, price, quantity, reorder_threshold)| ProductDraft {
                    name,
                    description,
                    price,
                    quantity,
                    reorder_threshold,
                })
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 64,
                ..ProptestConfig::default()
            })]

            /// Property: whatever valid draft goes in comes back out of SQLite unchanged.
            #[test]
            fn sqlite_create_then_get_returns_the_draft(draft in valid_draft()) {
                let runtime = tokio::runtime::Builder::new_current_thread()
                    .enable_all()
                    .build()
                    .unwrap();

                let fetched = runtime.block_on(async {
                    let pool = database::in_memory_pool().await.unwrap();
                    database::migrate(&pool).await.unwrap();
                    let service = InventoryService::new(Arc::new(SqliteProductRepository::new(pool)));

                    let created = service.create_product(draft.clone()).await.unwrap();
                    service.get_product(created.id).await.unwrap()
                });

                prop_assert_eq!(fetched.to_draft(), draft);
            }
        }
    }
}
