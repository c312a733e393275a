//! Storage contract for objstore.
//!
//! Two logical stores sit behind one trait:
//!
//! - **samples** -- content-addressed blobs keyed by their SHA-256 hex digest.
//!   Write-once: storing a key that already exists succeeds without
//!   touching the stored bytes.
//! - **configs** -- path-addressed files. Last write wins.
//!
//! # Storage Backends
//!
//! All backends implement the [`ObjStorer`] trait:
//!
//! - [`InMemoryStorer`] -- `HashMap`-based store for tests and embedding
//! - `LocalFsStorer` (in `objstore-localfs`) -- one file per object on disk
//!
//! # Design Rules
//!
//! 1. Backends never verify that a sample key matches its payload.
//! 2. Sample keys are a single path component; config paths never resolve
//!    outside the config root. Both are checked before any I/O.
//! 3. Errors are propagated, never retried. The only suppressed condition is
//!    a duplicate sample write.

pub mod error;
pub mod memory;
pub mod paths;
pub mod traits;

pub use error::{InitStage, StoreError, StoreResult};
pub use memory::InMemoryStorer;
pub use paths::{normalize, resolve_within, validate_sample_key};
pub use traits::ObjStorer;
