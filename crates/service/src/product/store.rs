use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::domain::{Product, ProductDraft};
use crate::errors::ServiceError;

/// Authoritative, identity-indexed product collection.
///
/// Implementations mint ids on `create`, report identity absence on
/// `update`/`delete` as [`ServiceError::NotFound`], and report medium faults
/// as [`ServiceError::Internal`]. They never apply business rules.
/// Operations on one id are linearizable and no reader ever observes a
/// partially written record.
#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn create(&self, draft: ProductDraft) -> Result<Product, ServiceError>;
    async fn get(&self, id: Uuid) -> Result<Option<Product>, ServiceError>;
    /// Snapshot of every record, in no particular order.
    async fn list(&self) -> Result<Vec<Product>, ServiceError>;
    async fn update(&self, id: Uuid, draft: ProductDraft) -> Result<Product, ServiceError>;
    async fn delete(&self, id: Uuid) -> Result<(), ServiceError>;
}

/// Mint an id not present in `map`. A v4 collision is practically impossible
/// but uniqueness is a store invariant, so it is checked.
pub(crate) fn fresh_id<V>(map: &HashMap<Uuid, V>) -> Uuid {
    loop {
        let id = Uuid::new_v4();
        if !map.contains_key(&id) {
            return id;
        }
    }
}

/// Process-local store; writers take the whole map exclusively, readers share it.
#[derive(Default)]
pub struct InMemoryProductStore {
    records: RwLock<HashMap<Uuid, Product>>,
}

impl InMemoryProductStore {
    pub fn new() -> Self { Self::default() }
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn create(&self, draft: ProductDraft) -> Result<Product, ServiceError> {
        let mut records = self.records.write().await;
        let product = draft.with_id(fresh_id(&records));
        records.insert(product.id, product.clone());
        Ok(product)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Product>, ServiceError> {
        Ok(self.records.read().await.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<Product>, ServiceError> {
        Ok(self.records.read().await.values().cloned().collect())
    }

    async fn update(&self, id: Uuid, draft: ProductDraft) -> Result<Product, ServiceError> {
        let mut records = self.records.write().await;
        let slot = records.get_mut(&id).ok_or_else(|| ServiceError::product_not_found(id))?;
        *slot = draft.with_id(id);
        Ok(slot.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        match self.records.write().await.remove(&id) {
            Some(_) => Ok(()),
            None => Err(ServiceError::product_not_found(id)),
        }
    }
}

/// Contract checks shared by every store implementation's tests.
#[cfg(test)]
pub(crate) mod contract {
    use std::collections::HashSet;
    use std::sync::Arc;

    use super::*;

    pub fn draft(name: &str, price: f64) -> ProductDraft {
        ProductDraft { name: name.to_string(), description: Some(format!("{name} description")), price, available: true }
    }

    pub async fn round_trip<S: ProductStore>(store: &S) {
        let created = store.create(draft("Phone", 300.0)).await.unwrap();
        assert_eq!(created.name, "Phone");
        assert_eq!(store.get(created.id).await.unwrap(), Some(created));
    }

    pub async fn unique_ids<S: ProductStore>(store: &S) {
        let mut ids = HashSet::new();
        for i in 0..50 {
            let p = store.create(draft(&format!("Item {i}"), i as f64)).await.unwrap();
            assert!(ids.insert(p.id), "duplicate id {}", p.id);
        }
    }

    pub async fn update_replaces_and_keeps_id<S: ProductStore>(store: &S) {
        let original = store.create(draft("Tablet", 200.0)).await.unwrap();
        let replacement = ProductDraft { name: "Tablet Pro".into(), description: None, price: 300.0, available: false };
        let updated = store.update(original.id, replacement.clone()).await.unwrap();
        assert_eq!(updated, replacement.with_id(original.id));
        assert_eq!(store.get(original.id).await.unwrap(), Some(updated));
    }

    pub async fn absent_ids_are_not_found<S: ProductStore>(store: &S) {
        let bystander = store.create(draft("Bystander", 1.0)).await.unwrap();
        let ghost = Uuid::new_v4();
        assert!(matches!(store.update(ghost, draft("Ghost", 1.0)).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(store.delete(ghost).await, Err(ServiceError::NotFound(_))));
        assert!(store.get(ghost).await.unwrap().is_none());
        assert_eq!(store.get(bystander.id).await.unwrap(), Some(bystander));
    }

    pub async fn delete_is_terminal<S: ProductStore>(store: &S) {
        let p = store.create(draft("Mouse", 30.0)).await.unwrap();
        store.delete(p.id).await.unwrap();
        assert!(store.get(p.id).await.unwrap().is_none());
        assert!(matches!(store.delete(p.id).await, Err(ServiceError::NotFound(_))));
    }

    pub async fn list_reflects_state<S: ProductStore>(store: &S) {
        let a = store.create(draft("Monitor", 350.0)).await.unwrap();
        let b = store.create(draft("Keyboard", 100.0)).await.unwrap();
        let listed = store.list().await.unwrap();
        assert_eq!(listed.len(), 2);
        assert!(listed.contains(&a) && listed.contains(&b));
        store.delete(a.id).await.unwrap();
        assert_eq!(store.list().await.unwrap(), vec![b]);
    }

    pub async fn concurrent_creates<S: ProductStore + 'static>(store: Arc<S>, k: usize) {
        let handles: Vec<_> = (0..k)
            .map(|i| {
                let store = Arc::clone(&store);
                tokio::spawn(async move { store.create(draft(&format!("Concurrent {i}"), i as f64)).await })
            })
            .collect();
        let mut ids = HashSet::new();
        for h in handles {
            let p = h.await.unwrap().unwrap();
            // visible to other tasks as soon as create returned
            assert_eq!(store.get(p.id).await.unwrap().as_ref(), Some(&p));
            ids.insert(p.id);
        }
        assert_eq!(ids.len(), k);
        assert_eq!(store.list().await.unwrap().len(), k);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::contract;
    use super::*;

    #[tokio::test]
    async fn round_trip() { contract::round_trip(&InMemoryProductStore::new()).await; }

    #[tokio::test]
    async fn unique_ids() { contract::unique_ids(&InMemoryProductStore::new()).await; }

    #[tokio::test]
    async fn update_replaces_and_keeps_id() { contract::update_replaces_and_keeps_id(&InMemoryProductStore::new()).await; }

    #[tokio::test]
    async fn absent_ids_are_not_found() { contract::absent_ids_are_not_found(&InMemoryProductStore::new()).await; }

    #[tokio::test]
    async fn delete_is_terminal() { contract::delete_is_terminal(&InMemoryProductStore::new()).await; }

    #[tokio::test]
    async fn list_reflects_state() { contract::list_reflects_state(&InMemoryProductStore::new()).await; }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_creates() { contract::concurrent_creates(Arc::new(InMemoryProductStore::new()), 64).await; }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn racing_update_and_delete_never_tear() {
        let store = Arc::new(InMemoryProductStore::new());
        let id = store.create(contract::draft("Contested", 1.0)).await.unwrap().id;
        let upd = {
            let store = Arc::clone(&store);
            tokio::spawn(async move {
                store.update(id, ProductDraft { name: "Winner".into(), description: None, price: 2.0, available: false }).await
            })
        };
        let del = {
            let store = Arc::clone(&store);
            tokio::spawn(async move { store.delete(id).await })
        };
        let upd = upd.await.unwrap();
        del.await.unwrap().unwrap();
        // delete always succeeds; update either ran first or saw the id gone
        match upd {
            Ok(updated) => assert_eq!(updated.name, "Winner"),
            Err(e) => assert!(matches!(e, ServiceError::NotFound(_))),
        }
        assert!(store.get(id).await.unwrap().is_none());
    }
}
