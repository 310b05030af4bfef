use std::sync::Arc;

use tracing::{debug, info, instrument};
use uuid::Uuid;

use super::domain::{Product, ProductDraft, ProductInput};
use super::store::ProductStore;
use crate::errors::ServiceError;
use crate::validation::{join_violations, Validator};

/// Product service configuration
#[derive(Debug, Clone)]
pub struct ProductServiceConfig {
    /// Run the validator on update as well as on create. When off, update
    /// only requires the mandatory fields to be present.
    pub validate_on_update: bool,
}

impl Default for ProductServiceConfig {
    fn default() -> Self { Self { validate_on_update: true } }
}

impl From<&configs::ValidationConfig> for ProductServiceConfig {
    fn from(cfg: &configs::ValidationConfig) -> Self { Self { validate_on_update: cfg.validate_on_update } }
}

/// Validates submissions and drives the store. It is the only place where
/// violation lists become [`ServiceError::InvalidInput`].
pub struct ProductService<S: ProductStore + ?Sized> {
    store: Arc<S>,
    validator: Validator,
    cfg: ProductServiceConfig,
}

impl<S: ProductStore + ?Sized> ProductService<S> {
    pub fn new(store: Arc<S>, validator: Validator, cfg: ProductServiceConfig) -> Self { Self { store, validator, cfg } }

    fn check(&self, input: &ProductInput) -> Result<(), ServiceError> {
        let violations = self.validator.validate(input);
        if violations.is_empty() {
            return Ok(());
        }
        debug!(count = violations.len(), "product input rejected");
        Err(ServiceError::InvalidInput(join_violations(&violations)))
    }

    /// Validate and store a new product. Any `id` on the input is ignored.
    ///
    /// # Examples
    /// ```
    /// use service::product::{InMemoryProductStore, ProductInput, ProductService, ProductServiceConfig};
    /// use service::validation::Validator;
    /// use std::sync::Arc;
    /// let svc = ProductService::new(Arc::new(InMemoryProductStore::new()), Validator::standard(), ProductServiceConfig::default());
    /// let created = tokio_test::block_on(svc.create_product(ProductInput::new("Phone", Some("x"), 300.0, true))).unwrap();
    /// assert_eq!(created.name, "Phone");
    /// assert_eq!(tokio_test::block_on(svc.get_product(created.id)).unwrap(), Some(created));
    /// ```
    #[instrument(skip(self, input))]
    pub async fn create_product(&self, input: ProductInput) -> Result<Product, ServiceError> {
        self.check(&input)?;
        let product = self.store.create(ProductDraft::try_from(input)?).await?;
        info!(id = %product.id, name = %product.name, "product_created");
        Ok(product)
    }

    /// Look up a product; absence is `Ok(None)`.
    pub async fn get_product(&self, id: Uuid) -> Result<Option<Product>, ServiceError> { self.store.get(id).await }

    pub async fn list_products(&self) -> Result<Vec<Product>, ServiceError> { self.store.list().await }

    /// Replace every field of an existing product.
    ///
    /// # Examples
    /// ```
    /// use service::product::{InMemoryProductStore, ProductInput, ProductService, ProductServiceConfig};
    /// use service::{errors::ServiceError, validation::Validator};
    /// use std::sync::Arc;
    /// let svc = ProductService::new(Arc::new(InMemoryProductStore::new()), Validator::standard(), ProductServiceConfig::default());
    /// let missing = tokio_test::block_on(svc.update_product(uuid::Uuid::new_v4(), ProductInput::new("Lamp", None, 1.0, true)));
    /// assert!(matches!(missing, Err(ServiceError::NotFound(_))));
    /// ```
    #[instrument(skip(self, input))]
    pub async fn update_product(&self, id: Uuid, input: ProductInput) -> Result<Product, ServiceError> {
        if self.cfg.validate_on_update {
            self.check(&input)?;
        }
        let product = self.store.update(id, ProductDraft::try_from(input)?).await?;
        info!(id = %product.id, "product_updated");
        Ok(product)
    }

    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: Uuid) -> Result<(), ServiceError> {
        self.store.delete(id).await?;
        info!(id = %id, "product_deleted");
        Ok(())
    }
}
