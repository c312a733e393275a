use std::fmt;
use std::io;

/// Errors from storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No sample is stored under this key.
    #[error("sample not found: {key}")]
    SampleNotFound { key: String },

    /// No config file is stored at this path.
    #[error("config not found: {path}")]
    ConfigNotFound { path: String },

    /// The backend was refused access to the underlying storage.
    #[error("permission denied: {path}")]
    PermissionDenied { path: String },

    /// The requested config path resolves outside the config root.
    #[error("permission denied: path escapes config root: {path}")]
    PathTraversal { path: String },

    /// The sample key cannot be used as a storage key.
    #[error("invalid sample key {key:?}: {reason}")]
    InvalidSampleKey { key: String, reason: String },

    /// The config path does not name a file beneath the config root.
    #[error("invalid config path {path:?}: {reason}")]
    InvalidConfigPath { path: String, reason: String },

    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The backend could not be brought into a usable state.
    #[error("initialization failed during {stage}: {reason}")]
    Initialization { stage: InitStage, reason: String },
}

impl StoreError {
    /// Map an I/O error for a sample operation to the matching variant.
    pub fn from_sample_io(err: io::Error, key: &str) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => Self::SampleNotFound {
                key: key.to_string(),
            },
            io::ErrorKind::PermissionDenied => Self::PermissionDenied {
                path: key.to_string(),
            },
            _ => Self::Io(err),
        }
    }

    /// Map an I/O error for a config operation to the matching variant.
    pub fn from_config_io(err: io::Error, path: &str) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => Self::ConfigNotFound {
                path: path.to_string(),
            },
            io::ErrorKind::PermissionDenied => Self::PermissionDenied {
                path: path.to_string(),
            },
            _ => Self::Io(err),
        }
    }

    /// Map an I/O error from a write or directory creation. Only permission
    /// failures get their own variant; a missing parent is not "not found".
    pub fn from_write_io(err: io::Error, path: &str) -> Self {
        match err.kind() {
            io::ErrorKind::PermissionDenied => Self::PermissionDenied {
                path: path.to_string(),
            },
            _ => Self::Io(err),
        }
    }

    /// Returns `true` for missing samples and configs.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::SampleNotFound { .. } | Self::ConfigNotFound { .. } => true,
            Self::Io(e) => e.kind() == io::ErrorKind::NotFound,
            _ => false,
        }
    }

    /// Returns `true` for filesystem permission failures and rejected
    /// traversal attempts.
    pub fn is_permission_denied(&self) -> bool {
        match self {
            Self::PermissionDenied { .. } | Self::PathTraversal { .. } => true,
            Self::Io(e) => e.kind() == io::ErrorKind::PermissionDenied,
            _ => false,
        }
    }
}

/// Initialization step at which a backend failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InitStage {
    /// Creating or checking the storage roots.
    EnsureDirectories,
    /// Writing, reading back, and removing the probe file.
    SelfTest,
}

impl fmt::Display for InitStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EnsureDirectories => write!(f, "directory setup"),
            Self::SelfTest => write!(f, "self-test"),
        }
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_io_not_found_maps_to_sample_not_found() {
        let err = StoreError::from_sample_io(io::Error::from(io::ErrorKind::NotFound), "abc");
        assert!(matches!(err, StoreError::SampleNotFound { ref key } if key == "abc"));
        assert!(err.is_not_found());
    }

    #[test]
    fn config_io_permission_maps_to_permission_denied() {
        let err =
            StoreError::from_config_io(io::Error::from(io::ErrorKind::PermissionDenied), "a/b");
        assert!(matches!(err, StoreError::PermissionDenied { .. }));
        assert!(err.is_permission_denied());
        assert!(!err.is_not_found());
    }

    #[test]
    fn other_io_errors_pass_through() {
        let err = StoreError::from_config_io(io::Error::other("disk full"), "a");
        assert!(matches!(err, StoreError::Io(_)));
        assert_eq!(err.to_string(), "I/O error: disk full");
    }

    #[test]
    fn traversal_is_permission_class() {
        let err = StoreError::PathTraversal {
            path: "../../etc/passwd".into(),
        };
        assert!(err.is_permission_denied());
        assert!(err.to_string().starts_with("permission denied"));
    }

    #[test]
    fn initialization_display() {
        let err = StoreError::Initialization {
            stage: InitStage::SelfTest,
            reason: "data mismatch".into(),
        };
        assert_eq!(
            err.to_string(),
            "initialization failed during self-test: data mismatch"
        );
    }
}
