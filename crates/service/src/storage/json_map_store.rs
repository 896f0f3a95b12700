use std::{collections::HashMap, hash::Hash, path::PathBuf};
use tokio::{fs, sync::RwLock};
use tracing::debug;

use crate::errors::ServiceError;

/// Generic JSON file-backed key-value map store.
///
/// Persists a `HashMap<K, V>` to a JSON file. Every mutation is applied to a
/// copy of the map, written to disk, and only then published, all while the
/// write lock is held: readers never observe a change that failed to persist.
pub struct JsonMapStore<K, V> {
    inner: RwLock<HashMap<K, V>>,
    file_path: PathBuf,
}

impl<K, V> JsonMapStore<K, V>
where
    K: Eq + Hash + serde::Serialize + serde::de::DeserializeOwned + Clone,
    V: serde::Serialize + serde::de::DeserializeOwned + Clone,
{
    /// Open the store at `path`, creating the file with an empty map if missing.
    /// A file that exists but does not parse is an error, not an empty store.
    pub async fn open<P: Into<PathBuf>>(path: P) -> Result<Self, ServiceError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(storage_err)?;
        }

        let map: HashMap<K, V> = match fs::read(&file_path).await {
            Ok(bytes) if bytes.is_empty() => HashMap::new(),
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                ServiceError::Storage(format!("corrupt store file {}: {e}", file_path.display()))
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let empty = HashMap::new();
                write_json(&file_path, &empty).await?;
                empty
            }
            Err(e) => return Err(storage_err(e)),
        };
        debug!(path = %file_path.display(), entries = map.len(), "json map store opened");

        Ok(Self { inner: RwLock::new(map), file_path })
    }

    /// All values, in no particular order.
    pub async fn values(&self) -> Vec<V> {
        let map = self.inner.read().await;
        map.values().cloned().collect()
    }

    pub async fn get(&self, key: &K) -> Option<V> {
        let map = self.inner.read().await;
        map.get(key).cloned()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }

    /// Apply a mutation and persist it as one step. The closure's return value
    /// is handed back once the new map is on disk.
    pub async fn mutate<F, T>(&self, f: F) -> Result<T, ServiceError>
    where
        F: FnOnce(&mut HashMap<K, V>) -> T,
    {
        let mut map = self.inner.write().await;
        let mut next = map.clone();
        let out = f(&mut next);
        write_json(&self.file_path, &next).await?;
        *map = next;
        Ok(out)
    }
}

fn storage_err(e: std::io::Error) -> ServiceError {
    ServiceError::Storage(e.to_string())
}

/// Write through a sibling temp file and rename so a crash mid-write never
/// leaves a truncated store behind.
async fn write_json<T: serde::Serialize>(path: &PathBuf, value: &T) -> Result<(), ServiceError> {
    let data = serde_json::to_vec_pretty(value).map_err(|e| ServiceError::Storage(e.to_string()))?;
    let mut tmp = path.clone().into_os_string();
    tmp.push(".tmp");
    fs::write(&tmp, data).await.map_err(storage_err)?;
    fs::rename(&tmp, path).await.map_err(storage_err)?;
    Ok(())
}
