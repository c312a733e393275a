//! Entity model for objstore.
//!
//! Plain data carried across the `ObjStorer` boundary. None of these types
//! touch storage; backends live in `objstore-store` and `objstore-localfs`.
//!
//! # Key Types
//!
//! - [`ConnectorSpec`] -- location and connection parameters for a backend
//! - [`Sample`] -- content-addressed binary blob keyed by its SHA-256 hex digest
//! - [`Config`] -- path-addressed configuration file

pub mod config;
pub mod connector;
pub mod sample;

pub use config::Config;
pub use connector::ConnectorSpec;
pub use sample::{sha256_hex, Sample};
