use std::fmt;

use serde::{Deserialize, Serialize};

/// A path-addressed configuration file.
///
/// `path` is a logical, `/`-separated path chosen by the caller. Backends
/// resolve it beneath their config root and reject anything that escapes it.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Logical path of the file, e.g. `app/settings.json`.
    pub path: String,
    /// Raw file contents; opaque to the storage layer.
    pub file_contents: Vec<u8>,
}

impl Config {
    /// Create a config file entry.
    pub fn new(path: impl Into<String>, file_contents: impl Into<Vec<u8>>) -> Self {
        Self {
            path: path.into(),
            file_contents: file_contents.into(),
        }
    }

    /// Contents as UTF-8, if valid.
    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.file_contents).ok()
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("path", &self.path)
            .field("len", &self.file_contents.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_accepts_str_contents() {
        let config = Config::new("app/settings.json", "{}");
        assert_eq!(config.path, "app/settings.json");
        assert_eq!(config.file_contents, b"{}");
        assert_eq!(config.as_str(), Some("{}"));
    }

    #[test]
    fn as_str_rejects_invalid_utf8() {
        let config = Config::new("bin", vec![0xff, 0xfe]);
        assert!(config.as_str().is_none());
    }

    #[test]
    fn serde_field_names() {
        let config = Config::new("a/b", "x");
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["path"], "a/b");
        assert!(json.get("file_contents").is_some());
    }
}
