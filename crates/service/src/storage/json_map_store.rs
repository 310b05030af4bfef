use std::{collections::HashMap, hash::Hash, io::ErrorKind, path::{Path, PathBuf}, sync::Arc};
use tokio::{fs, sync::RwLock};
use tracing::debug;
use uuid::Uuid;

use crate::errors::ServiceError;

/// Generic JSON file-backed key-value map store.
///
/// Keeps a `HashMap<K, V>` in memory and mirrors it to a JSON file. Writers
/// are serialized by the lock; each mutation runs against a copy of the map,
/// the copy is written to a uniquely named temp file and renamed over the
/// file, and only then replaces the in-memory map. A failed write therefore
/// changes nothing. The write-and-swap runs in its own task, so dropping the
/// caller's future cannot leave the file and the map disagreeing.
pub struct JsonMapStore<K, V> {
    inner: Arc<RwLock<HashMap<K, V>>>,
    file_path: Arc<PathBuf>,
}

impl<K, V> JsonMapStore<K, V>
where
    K: Eq + Hash + serde::Serialize + serde::de::DeserializeOwned + Clone + Send + Sync + 'static,
    V: serde::Serialize + serde::de::DeserializeOwned + Clone + Send + Sync + 'static,
{
    /// Initialize the store from a path. Creates the file with an empty map if missing.
    /// An unreadable or corrupt file is an error rather than an empty store.
    pub async fn new<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(ServiceError::internal)?;
        }

        let map: HashMap<K, V> = match fs::read(&file_path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => HashMap::new(),
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                ServiceError::Internal(format!("corrupt store file {}: {}", file_path.display(), e))
            })?,
            Err(e) if e.kind() == ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(ServiceError::internal(e)),
        };

        persist(&file_path, &map).await?;
        Ok(Arc::new(Self { inner: Arc::new(RwLock::new(map)), file_path: Arc::new(file_path) }))
    }

    pub async fn len(&self) -> usize { self.inner.read().await.len() }

    /// List all values.
    pub async fn values(&self) -> Vec<V> {
        let map = self.inner.read().await;
        map.values().cloned().collect()
    }

    /// Get value by key.
    pub async fn get(&self, key: &K) -> Option<V> {
        let map = self.inner.read().await;
        map.get(key).cloned()
    }

    /// Apply a mutation and persist it atomically.
    ///
    /// If `f` fails or the file cannot be written, the in-memory map keeps its
    /// previous contents and the error is returned. Once called, the mutation
    /// completes even if the returned future is dropped.
    pub async fn mutate<R, F>(&self, f: F) -> Result<R, ServiceError>
    where
        F: FnOnce(&mut HashMap<K, V>) -> Result<R, ServiceError> + Send + 'static,
        R: Send + 'static,
    {
        let inner = Arc::clone(&self.inner);
        let file_path = Arc::clone(&self.file_path);
        tokio::spawn(async move {
            let mut map = inner.write_owned().await;
            let mut next = map.clone();
            let out = f(&mut next)?;
            persist(&file_path, &next).await?;
            *map = next;
            Ok::<R, ServiceError>(out)
        })
        .await
        .map_err(ServiceError::internal)?
    }
}

async fn persist<K, V>(file_path: &Path, map: &HashMap<K, V>) -> Result<(), ServiceError>
where
    K: Eq + Hash + serde::Serialize,
    V: serde::Serialize,
{
    let data = serde_json::to_vec(map).map_err(ServiceError::internal)?;
    let tmp = file_path.with_extension(format!("json.{}.tmp", Uuid::new_v4().simple()));
    let written = match fs::write(&tmp, data).await {
        Ok(()) => fs::rename(&tmp, file_path).await,
        Err(e) => Err(e),
    };
    if let Err(e) = written {
        let _ = fs::remove_file(&tmp).await;
        return Err(ServiceError::internal(e));
    }
    debug!(path = %file_path.display(), entries = map.len(), "json_map_store_saved");
    Ok(())
}
