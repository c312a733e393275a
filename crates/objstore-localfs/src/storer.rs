use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use objstore_store::{
    normalize, resolve_within, validate_sample_key, InitStage, ObjStorer, StoreError, StoreResult,
};
use objstore_types::{Config, ConnectorSpec, Sample};
use tracing::{debug, info, warn};

use crate::config::LocalFsConfig;

/// Payload written and read back by the initialization self-test.
const PROBE_PAYLOAD: &[u8] = b"test content";

/// Filesystem-backed storer.
///
/// Construction runs the full initialization sequence: roots are resolved,
/// both directories are created, and a probe file is written, read back, and
/// removed from the sample root. A `LocalFsStorer` value therefore always
/// refers to storage that was writable when it was opened.
#[derive(Clone, Debug)]
pub struct LocalFsStorer {
    sample_root: PathBuf,
    /// Lexically normalized; the basis for containment checks.
    config_root: PathBuf,
    probe_name: String,
}

impl LocalFsStorer {
    /// Open a storer from explicit settings.
    pub fn open(config: LocalFsConfig) -> StoreResult<Self> {
        validate_sample_key(&config.probe_name)?;
        let storer = Self {
            sample_root: config.sample_root,
            config_root: normalize(&config.config_root),
            probe_name: config.probe_name,
        };
        debug!(
            sample_root = %storer.sample_root.display(),
            config_root = %storer.config_root.display(),
            "storage roots resolved"
        );

        storer.setup()?;
        debug!("storage directories ensured");

        storer.self_test()?;
        info!(
            sample_root = %storer.sample_root.display(),
            config_root = %storer.config_root.display(),
            "local filesystem storer ready"
        );
        Ok(storer)
    }

    /// Directory holding sample files.
    pub fn sample_root(&self) -> &Path {
        &self.sample_root
    }

    /// Normalized directory holding config files.
    pub fn config_root(&self) -> &Path {
        &self.config_root
    }

    /// Resolve a config path beneath the config root.
    ///
    /// Fails with [`StoreError::PathTraversal`] if the path would escape the
    /// root. Callers must not touch the filesystem unless this succeeds.
    pub fn sanitize_path(&self, path: &str) -> StoreResult<PathBuf> {
        resolve_within(&self.config_root, path).inspect_err(|e| {
            if let StoreError::PathTraversal { .. } = e {
                warn!(
                    path,
                    config_root = %self.config_root.display(),
                    "rejected config path outside root"
                );
            }
        })
    }

    /// File path for a sample key.
    fn sample_path(&self, key: &str) -> StoreResult<PathBuf> {
        validate_sample_key(key)?;
        if key == self.probe_name {
            return Err(StoreError::InvalidSampleKey {
                key: key.to_string(),
                reason: "reserved for the storage self-test".into(),
            });
        }
        Ok(self.sample_root.join(key))
    }

    /// Create a sample file that must not exist yet.
    ///
    /// Losing a creation race to another writer counts as a duplicate.
    fn write_new_sample(&self, path: &Path, sample: &Sample) -> StoreResult<()> {
        let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                debug!(key = sample.key(), "sample created concurrently; skipping write");
                return Ok(());
            }
            Err(e) => return Err(StoreError::from_write_io(e, sample.key())),
        };

        if let Err(e) = file.write_all(&sample.data) {
            drop(file);
            remove_best_effort(path);
            return Err(StoreError::from_write_io(e, sample.key()));
        }
        debug!(key = sample.key(), len = sample.len(), "sample stored");
        Ok(())
    }

    /// Write, read back, compare, and delete a probe file in the sample root.
    fn self_test(&self) -> StoreResult<()> {
        let probe = self.sample_root.join(&self.probe_name);
        let fail = |reason: String| StoreError::Initialization {
            stage: InitStage::SelfTest,
            reason,
        };

        if let Err(e) = fs::write(&probe, PROBE_PAYLOAD) {
            remove_best_effort(&probe);
            return Err(fail(format!("write {}: {e}", probe.display())));
        }

        match fs::read(&probe) {
            Ok(data) if data == PROBE_PAYLOAD => {}
            Ok(data) => {
                remove_best_effort(&probe);
                return Err(fail(format!(
                    "probe data mismatch: wrote {} bytes, read back {}",
                    PROBE_PAYLOAD.len(),
                    data.len()
                )));
            }
            Err(e) => {
                remove_best_effort(&probe);
                return Err(fail(format!("read {}: {e}", probe.display())));
            }
        }

        fs::remove_file(&probe).map_err(|e| fail(format!("remove {}: {e}", probe.display())))?;
        debug!(probe = %probe.display(), "self-test passed");
        Ok(())
    }
}

/// Create `dir` and its parents, then confirm it is a directory.
fn ensure_dir(dir: &Path) -> StoreResult<()> {
    let fail = |reason: String| StoreError::Initialization {
        stage: InitStage::EnsureDirectories,
        reason,
    };
    fs::create_dir_all(dir).map_err(|e| fail(format!("create {}: {e}", dir.display())))?;
    let meta = fs::metadata(dir).map_err(|e| fail(format!("stat {}: {e}", dir.display())))?;
    if !meta.is_dir() {
        return Err(fail(format!("{} is not a directory", dir.display())));
    }
    Ok(())
}

fn remove_best_effort(path: &Path) {
    if let Err(e) = fs::remove_file(path) {
        if e.kind() != io::ErrorKind::NotFound {
            warn!(path = %path.display(), error = %e, "failed to clean up file");
        }
    }
}

impl ObjStorer for LocalFsStorer {
    fn initialize(specs: &[ConnectorSpec]) -> StoreResult<Self> {
        if specs.len() > 1 {
            debug!(
                ignored = specs.len() - 1,
                "local filesystem storer uses only the first connector spec"
            );
        }
        let config = specs
            .first()
            .map(LocalFsConfig::from_connector)
            .unwrap_or_default();
        Self::open(config)
    }

    fn setup(&self) -> StoreResult<()> {
        ensure_dir(&self.sample_root)?;
        ensure_dir(&self.config_root)
    }

    fn store_sample(&self, sample: &Sample) -> StoreResult<()> {
        let path = self.sample_path(sample.key())?;
        match fs::metadata(&path) {
            Ok(meta) if meta.is_file() => {
                debug!(key = sample.key(), "sample already stored; skipping write");
                Ok(())
            }
            Ok(_) => {
                warn!(path = %path.display(), "sample path is occupied by a non-file entry");
                Err(StoreError::Io(io::Error::new(
                    io::ErrorKind::AlreadyExists,
                    format!("{} exists and is not a regular file", path.display()),
                )))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => self.write_new_sample(&path, sample),
            Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
                Err(StoreError::PermissionDenied {
                    path: sample.key().to_string(),
                })
            }
            Err(e) => Err(StoreError::Io(e)),
        }
    }

    fn get_sample(&self, key: &str) -> StoreResult<Sample> {
        let path = self.sample_path(key)?;
        let data = fs::read(&path).map_err(|e| StoreError::from_sample_io(e, key))?;
        Ok(Sample::new(key, data))
    }

    fn store_config(&self, config: &Config) -> StoreResult<()> {
        let path = self.sanitize_path(&config.path)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| StoreError::from_write_io(e, &config.path))?;
        }
        fs::write(&path, &config.file_contents)
            .map_err(|e| StoreError::from_write_io(e, &config.path))?;
        debug!(path = %config.path, len = config.file_contents.len(), "config stored");
        Ok(())
    }

    fn get_config(&self, path: &str) -> StoreResult<Config> {
        let file = self.sanitize_path(path)?;
        let contents = fs::read(&file).map_err(|e| StoreError::from_config_io(e, path))?;
        Ok(Config::new(path, contents))
    }
}
