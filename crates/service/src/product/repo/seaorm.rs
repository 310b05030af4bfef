use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::product::domain::{Product, ProductDraft};
use crate::product::store::ProductStore;

/// SeaORM-backed store. Identity uniqueness is enforced by the primary key;
/// update and delete are single statements, so the database provides the
/// per-row atomicity.
pub struct SeaOrmProductStore {
    pub db: DatabaseConnection,
}

impl SeaOrmProductStore {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait]
impl ProductStore for SeaOrmProductStore {
    async fn create(&self, draft: ProductDraft) -> Result<Product, ServiceError> {
        let row = models::product::insert(&self.db, draft.with_id(Uuid::new_v4()).into()).await?;
        Ok(row.into())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Product>, ServiceError> {
        Ok(models::product::find(&self.db, id).await?.map(Product::from))
    }

    async fn list(&self) -> Result<Vec<Product>, ServiceError> {
        Ok(models::product::all(&self.db).await?.into_iter().map(Product::from).collect())
    }

    async fn update(&self, id: Uuid, draft: ProductDraft) -> Result<Product, ServiceError> {
        models::product::replace(&self.db, draft.with_id(id).into())
            .await?
            .map(Product::from)
            .ok_or_else(|| ServiceError::product_not_found(id))
    }

    async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        if models::product::remove(&self.db, id).await? {
            Ok(())
        } else {
            Err(ServiceError::product_not_found(id))
        }
    }
}
