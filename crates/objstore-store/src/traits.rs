use objstore_types::{Config, ConnectorSpec, Sample};

use crate::error::StoreResult;

/// Sample and config storage backend.
///
/// All implementations must satisfy these invariants:
/// - `initialize` returns a backend that has passed its own readiness checks,
///   or an error. There is no partially-initialized success.
/// - Samples are write-once. Storing a key that already exists succeeds and
///   leaves the original bytes in place.
/// - Configs are last-write-wins.
/// - Sample keys and config paths are validated before any I/O happens.
/// - Missing samples and configs are reported as not-found errors, never as
///   empty payloads.
pub trait ObjStorer: Send + Sync {
    /// Build a backend from connector specs.
    ///
    /// Only the first spec is consulted; an empty slice selects the backend's
    /// defaults. Further entries are reserved for multi-endpoint backends.
    fn initialize(specs: &[ConnectorSpec]) -> StoreResult<Self>
    where
        Self: Sized;

    /// Create whatever the backend needs before it can store data.
    ///
    /// Idempotent and non-destructive.
    fn setup(&self) -> StoreResult<()>;

    /// Store a sample under its key. Duplicates are a no-op.
    fn store_sample(&self, sample: &Sample) -> StoreResult<()>;

    /// Fetch a sample by key.
    fn get_sample(&self, key: &str) -> StoreResult<Sample>;

    /// Store a config file, replacing any file at the same path.
    fn store_config(&self, config: &Config) -> StoreResult<()>;

    /// Fetch a config file by path.
    fn get_config(&self, path: &str) -> StoreResult<Config>;
}
