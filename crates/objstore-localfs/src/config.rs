use std::path::PathBuf;

use objstore_types::ConnectorSpec;
use serde::{Deserialize, Serialize};

/// Sample root used when no location is configured.
pub const DEFAULT_SAMPLE_ROOT: &str = "./objstorage-local-fs";

/// Config root used when no location is configured.
pub const DEFAULT_CONFIG_ROOT: &str = "./configstorage-local-fs";

/// File name of the probe written during the initialization self-test.
pub const DEFAULT_PROBE_NAME: &str = ".objstore-selftest";

/// Settings for [`LocalFsStorer`](crate::LocalFsStorer).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalFsConfig {
    /// Directory holding one file per sample.
    pub sample_root: PathBuf,
    /// Directory mirroring config paths. Normalized on open.
    pub config_root: PathBuf,
    /// Probe file name inside `sample_root`. Reserved: no sample may use it.
    pub probe_name: String,
}

impl Default for LocalFsConfig {
    fn default() -> Self {
        Self {
            sample_root: PathBuf::from(DEFAULT_SAMPLE_ROOT),
            config_root: PathBuf::from(DEFAULT_CONFIG_ROOT),
            probe_name: DEFAULT_PROBE_NAME.to_string(),
        }
    }
}

impl LocalFsConfig {
    /// Take the storage locations from a connector spec.
    ///
    /// Empty `bucket` / `config_bucket` fall back to the defaults. Every other
    /// field of the spec is ignored.
    pub fn from_connector(spec: &ConnectorSpec) -> Self {
        let defaults = Self::default();
        Self {
            sample_root: spec
                .sample_location()
                .map(PathBuf::from)
                .unwrap_or(defaults.sample_root),
            config_root: spec
                .config_location()
                .map(PathBuf::from)
                .unwrap_or(defaults.config_root),
            probe_name: defaults.probe_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let c = LocalFsConfig::default();
        assert_eq!(c.sample_root, PathBuf::from("./objstorage-local-fs"));
        assert_eq!(c.config_root, PathBuf::from("./configstorage-local-fs"));
        assert_eq!(c.probe_name, ".objstore-selftest");
    }

    #[test]
    fn empty_connector_uses_defaults() {
        let c = LocalFsConfig::from_connector(&ConnectorSpec::default());
        assert_eq!(c, LocalFsConfig::default());
    }

    #[test]
    fn connector_locations_override_defaults() {
        let c = LocalFsConfig::from_connector(&ConnectorSpec::local("/data/s", ""));
        assert_eq!(c.sample_root, PathBuf::from("/data/s"));
        assert_eq!(c.config_root, PathBuf::from(DEFAULT_CONFIG_ROOT));
    }

    #[test]
    fn network_fields_are_ignored() {
        let spec = ConnectorSpec {
            ip: "10.1.2.3".into(),
            port: 9000,
            secret: "s".into(),
            config_bucket: "cfg".into(),
            ..ConnectorSpec::default()
        };
        let c = LocalFsConfig::from_connector(&spec);
        assert_eq!(c.sample_root, PathBuf::from(DEFAULT_SAMPLE_ROOT));
        assert_eq!(c.config_root, PathBuf::from("cfg"));
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let c: LocalFsConfig = toml::from_str(r#"sample_root = "/var/lib/samples""#).unwrap();
        assert_eq!(c.sample_root, PathBuf::from("/var/lib/samples"));
        assert_eq!(c.config_root, PathBuf::from(DEFAULT_CONFIG_ROOT));
        assert_eq!(c.probe_name, DEFAULT_PROBE_NAME);
    }

    #[test]
    fn json_roundtrip() {
        let c = LocalFsConfig::default();
        let json = serde_json::to_string(&c).unwrap();
        let parsed: LocalFsConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(c, parsed);
    }
}
