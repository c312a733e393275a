use std::collections::HashMap;
use std::path::{Component, Path};
use std::sync::RwLock;

use objstore_types::{Config, ConnectorSpec, Sample};
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::paths::{resolve_within, validate_sample_key};
use crate::traits::ObjStorer;

/// In-memory, HashMap-based storer.
///
/// Intended for tests and embedding. Follows the same key rules as the
/// filesystem backend: sample keys must be single path components and config
/// paths are normalized, so `app/./a.toml` and `app/a.toml` name one entry.
pub struct InMemoryStorer {
    samples: RwLock<HashMap<String, Vec<u8>>>,
    configs: RwLock<HashMap<String, Vec<u8>>>,
}

impl InMemoryStorer {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            samples: RwLock::new(HashMap::new()),
            configs: RwLock::new(HashMap::new()),
        }
    }

    /// Number of samples currently stored.
    pub fn sample_count(&self) -> usize {
        self.samples.read().expect("lock poisoned").len()
    }

    /// Number of config files currently stored.
    pub fn config_count(&self) -> usize {
        self.configs.read().expect("lock poisoned").len()
    }

    /// Sorted list of stored config paths in normalized form.
    pub fn config_paths(&self) -> Vec<String> {
        let map = self.configs.read().expect("lock poisoned");
        let mut paths: Vec<String> = map.keys().cloned().collect();
        paths.sort();
        paths
    }
}

/// Normalized `/`-joined form of a config path.
fn config_key(path: &str) -> StoreResult<String> {
    let resolved = resolve_within(Path::new(""), path)?;
    let parts: Vec<&str> = resolved
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => s.to_str(),
            _ => None,
        })
        .collect();
    Ok(parts.join("/"))
}

impl Default for InMemoryStorer {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjStorer for InMemoryStorer {
    fn initialize(specs: &[ConnectorSpec]) -> StoreResult<Self> {
        debug!(specs = specs.len(), "in-memory storer ignores connector specs");
        Ok(Self::new())
    }

    fn setup(&self) -> StoreResult<()> {
        Ok(())
    }

    fn store_sample(&self, sample: &Sample) -> StoreResult<()> {
        validate_sample_key(sample.key())?;
        let mut map = self.samples.write().expect("lock poisoned");
        map.entry(sample.sha256.clone())
            .or_insert_with(|| sample.data.clone());
        Ok(())
    }

    fn get_sample(&self, key: &str) -> StoreResult<Sample> {
        validate_sample_key(key)?;
        let map = self.samples.read().expect("lock poisoned");
        map.get(key)
            .map(|data| Sample::new(key, data.clone()))
            .ok_or_else(|| StoreError::SampleNotFound {
                key: key.to_string(),
            })
    }

    fn store_config(&self, config: &Config) -> StoreResult<()> {
        let key = config_key(&config.path)?;
        let mut map = self.configs.write().expect("lock poisoned");
        map.insert(key, config.file_contents.clone());
        Ok(())
    }

    fn get_config(&self, path: &str) -> StoreResult<Config> {
        let key = config_key(path)?;
        let map = self.configs.read().expect("lock poisoned");
        map.get(&key)
            .map(|contents| Config::new(path, contents.clone()))
            .ok_or_else(|| StoreError::ConfigNotFound {
                path: path.to_string(),
            })
    }
}

impl std::fmt::Debug for InMemoryStorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryStorer")
            .field("sample_count", &self.sample_count())
            .field("config_count", &self.config_count())
            .finish()
    }
}
