//! Local filesystem backend for objstore.
//!
//! Samples are written one file per key directly under the sample root.
//! Config files mirror their logical paths under the config root:
//!
//! ```text
//! ./objstorage-local-fs/<sha256>
//! ./configstorage-local-fs/<path/to/file>
//! ```
//!
//! Both roots are configurable through [`LocalFsConfig`] or the `bucket` /
//! `config_bucket` fields of a `ConnectorSpec`.
//!
//! The backend holds no locks and no caches. Concurrent writers to one config
//! path race, and the last write wins.

pub mod config;
pub mod storer;

pub use config::{LocalFsConfig, DEFAULT_CONFIG_ROOT, DEFAULT_PROBE_NAME, DEFAULT_SAMPLE_ROOT};
pub use storer::LocalFsStorer;
