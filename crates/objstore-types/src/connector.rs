use std::fmt;

use serde::{Deserialize, Serialize};

/// Location and connection parameters handed to a backend at initialization.
///
/// Network backends use every field. The local filesystem backend reads only
/// `bucket` (sample root) and `config_bucket` (config root); an empty value
/// selects that backend's default.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectorSpec {
    /// Network address of the storage endpoint.
    pub ip: String,
    pub port: u16,
    pub region: String,
    /// Access key.
    pub key: String,
    /// Secret key. Redacted from `Debug` output.
    pub secret: String,
    /// Sample storage location.
    pub bucket: String,
    /// Config storage location.
    pub config_bucket: String,
    pub disable_ssl: bool,
}

impl ConnectorSpec {
    /// A spec that only names the two storage locations.
    pub fn local(bucket: impl Into<String>, config_bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            config_bucket: config_bucket.into(),
            ..Self::default()
        }
    }

    /// `bucket`, or `None` if unset.
    pub fn sample_location(&self) -> Option<&str> {
        non_empty(&self.bucket)
    }

    /// `config_bucket`, or `None` if unset.
    pub fn config_location(&self) -> Option<&str> {
        non_empty(&self.config_bucket)
    }
}

fn non_empty(s: &str) -> Option<&str> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

impl fmt::Debug for ConnectorSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secret = if self.secret.is_empty() { "" } else { "<redacted>" };
        f.debug_struct("ConnectorSpec")
            .field("ip", &self.ip)
            .field("port", &self.port)
            .field("region", &self.region)
            .field("key", &self.key)
            .field("secret", &secret)
            .field("bucket", &self.bucket)
            .field("config_bucket", &self.config_bucket)
            .field("disable_ssl", &self.disable_ssl)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_has_no_locations() {
        let spec = ConnectorSpec::default();
        assert!(spec.sample_location().is_none());
        assert!(spec.config_location().is_none());
        assert!(!spec.disable_ssl);
    }

    #[test]
    fn local_sets_only_locations() {
        let spec = ConnectorSpec::local("samples", "configs");
        assert_eq!(spec.sample_location(), Some("samples"));
        assert_eq!(spec.config_location(), Some("configs"));
        assert!(spec.ip.is_empty());
        assert_eq!(spec.port, 0);
    }

    #[test]
    fn debug_redacts_secret() {
        let spec = ConnectorSpec {
            key: "AKIA".into(),
            secret: "hunter2".into(),
            ..ConnectorSpec::default()
        };
        let debug = format!("{spec:?}");
        assert!(debug.contains("AKIA"));
        assert!(debug.contains("<redacted>"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn deserializes_partial_toml() {
        let spec: ConnectorSpec = toml::from_str(
            r#"
            bucket = "/var/lib/objstore/samples"
            disable_ssl = true
            "#,
        )
        .unwrap();
        assert_eq!(spec.sample_location(), Some("/var/lib/objstore/samples"));
        assert!(spec.config_location().is_none());
        assert!(spec.disable_ssl);
    }

    #[test]
    fn deserializes_full_json() {
        let spec: ConnectorSpec = serde_json::from_str(
            r#"{"ip":"10.0.0.5","port":9000,"region":"eu-1","key":"k","secret":"s",
                "bucket":"samples","config_bucket":"configs","disable_ssl":false}"#,
        )
        .unwrap();
        assert_eq!(spec.port, 9000);
        assert_eq!(spec.region, "eu-1");
        assert_eq!(spec, {
            let mut expected = ConnectorSpec::local("samples", "configs");
            expected.ip = "10.0.0.5".into();
            expected.port = 9000;
            expected.region = "eu-1".into();
            expected.key = "k".into();
            expected.secret = "s".into();
            expected
        });
    }
}
