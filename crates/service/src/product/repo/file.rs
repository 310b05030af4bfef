use std::{path::PathBuf, sync::Arc};

use async_trait::async_trait;
use tracing::info;
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::product::domain::{Product, ProductDraft};
use crate::product::store::{fresh_id, ProductStore};
use crate::storage::json_map_store::JsonMapStore;

/// Products persisted as a JSON object keyed by id.
#[derive(Clone)]
pub struct JsonFileProductStore {
    store: Arc<JsonMapStore<Uuid, Product>>,
}

impl JsonFileProductStore {
    /// Open (or create) the store file.
    pub async fn open<P: Into<PathBuf>>(path: P) -> Result<Self, ServiceError> {
        let path = path.into();
        let store = JsonMapStore::<Uuid, Product>::new(path.clone()).await?;
        info!(path = %path.display(), records = store.len().await, "file product store opened");
        Ok(Self { store })
    }
}

#[async_trait]
impl ProductStore for JsonFileProductStore {
    async fn create(&self, draft: ProductDraft) -> Result<Product, ServiceError> {
        self.store
            .mutate(move |map| {
                let product = draft.with_id(fresh_id(map));
                map.insert(product.id, product.clone());
                Ok(product)
            })
            .await
    }

    async fn get(&self, id: Uuid) -> Result<Option<Product>, ServiceError> { Ok(self.store.get(&id).await) }

    async fn list(&self) -> Result<Vec<Product>, ServiceError> { Ok(self.store.values().await) }

    async fn update(&self, id: Uuid, draft: ProductDraft) -> Result<Product, ServiceError> {
        self.store
            .mutate(move |map| {
                let slot = map.get_mut(&id).ok_or_else(|| ServiceError::product_not_found(id))?;
                *slot = draft.with_id(id);
                Ok(slot.clone())
            })
            .await
    }

    async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        self.store
            .mutate(move |map| map.remove(&id).map(|_| ()).ok_or_else(|| ServiceError::product_not_found(id)))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::store::contract;

    /// Store in a fresh temp directory, removed on drop.
    struct TempStore {
        store: JsonFileProductStore,
        dir: PathBuf,
    }

    impl Drop for TempStore {
        fn drop(&mut self) { let _ = std::fs::remove_dir_all(&self.dir); }
    }

    fn temp_dir() -> PathBuf { std::env::temp_dir().join(format!("file_product_store_{}", Uuid::new_v4())) }

    async fn fresh() -> TempStore {
        let dir = temp_dir();
        let store = JsonFileProductStore::open(dir.join("products.json")).await.expect("store init");
        TempStore { store, dir }
    }

    #[tokio::test]
    async fn round_trip() { contract::round_trip(&fresh().await.store).await; }

    #[tokio::test]
    async fn unique_ids() { contract::unique_ids(&fresh().await.store).await; }

    #[tokio::test]
    async fn update_replaces_and_keeps_id() { contract::update_replaces_and_keeps_id(&fresh().await.store).await; }

    #[tokio::test]
    async fn absent_ids_are_not_found() { contract::absent_ids_are_not_found(&fresh().await.store).await; }

    #[tokio::test]
    async fn delete_is_terminal() { contract::delete_is_terminal(&fresh().await.store).await; }

    #[tokio::test]
    async fn list_reflects_state() { contract::list_reflects_state(&fresh().await.store).await; }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_creates() {
        let tmp = fresh().await;
        contract::concurrent_creates(Arc::new(tmp.store.clone()), 32).await;
    }

    #[tokio::test]
    async fn temp_directory_is_removed_on_drop() {
        let tmp = fresh().await;
        let dir = tmp.dir.clone();
        tmp.store.create(contract::draft("Lamp", 5.0)).await.unwrap();
        assert!(dir.join("products.json").exists());
        drop(tmp);
        assert!(!dir.exists());
    }

    #[tokio::test]
    async fn records_survive_reopen() -> Result<(), anyhow::Error> {
        let tmp = fresh().await;
        let path = tmp.dir.join("products.json");
        let kept = tmp.store.create(contract::draft("Laptop", 1200.0)).await?;
        let gone = tmp.store.create(contract::draft("Cable", 5.0)).await?;
        tmp.store.delete(gone.id).await?;

        let reopened = JsonFileProductStore::open(&path).await?;
        assert_eq!(reopened.list().await?, vec![kept.clone()]);
        assert_eq!(reopened.get(kept.id).await?, Some(kept));
        Ok(())
    }
}
