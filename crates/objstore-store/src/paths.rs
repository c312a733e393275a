//! Lexical path handling for storage keys.
//!
//! Nothing here touches the filesystem. Paths are cleaned component by
//! component, so symlinks inside a root are not resolved.

use std::path::{Component, Path, PathBuf};

use crate::error::{StoreError, StoreResult};

/// Characters that may never appear in a sample key.
const FORBIDDEN_KEY_CHARS: &[char] = &['/', '\\', '\0'];

/// Lexically clean a path.
///
/// Drops `.` segments and redundant separators, and folds `name/..` pairs.
/// Leading `..` segments of a relative path are kept; `..` directly above a
/// root directory is dropped. An empty result becomes `.`.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }
    if out.is_empty() {
        return PathBuf::from(".");
    }
    out.iter().collect()
}

/// Resolve `requested` beneath `root` and refuse anything that escapes it.
///
/// `requested` is always treated as relative: a leading `/` or drive prefix
/// is ignored. The joined path is normalized and must lie strictly inside the
/// normalized `root`, compared component by component.
///
/// # Errors
///
/// - [`StoreError::PathTraversal`] if the result is outside `root`.
/// - [`StoreError::InvalidConfigPath`] if the result is `root` itself.
pub fn resolve_within(root: &Path, requested: &str) -> StoreResult<PathBuf> {
    let root = normalize(root);
    let mut joined = root.clone();
    for component in Path::new(requested).components() {
        match component {
            Component::Prefix(_) | Component::RootDir => {}
            other => joined.push(other),
        }
    }
    let resolved = normalize(&joined);

    let root_parts = significant_components(&root);
    let parts = significant_components(&resolved);
    let escapes = !parts.starts_with(&root_parts)
        || parts[root_parts.len()..]
            .iter()
            .any(|c| !matches!(c, Component::Normal(_)));
    if escapes {
        return Err(StoreError::PathTraversal {
            path: requested.to_string(),
        });
    }
    if parts.len() == root_parts.len() {
        return Err(StoreError::InvalidConfigPath {
            path: requested.to_string(),
            reason: "resolves to the config root itself".into(),
        });
    }
    Ok(resolved)
}

fn significant_components(path: &Path) -> Vec<Component<'_>> {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

/// Check that a sample key can be used verbatim as a file name.
///
/// The key must be non-empty, must not be `.` or `..`, and must not contain
/// path separators or NUL. Its content is otherwise not inspected.
pub fn validate_sample_key(key: &str) -> StoreResult<()> {
    let reason = if key.is_empty() {
        "must not be empty"
    } else if key == "." || key == ".." {
        "must not be a relative path segment"
    } else if key.contains(FORBIDDEN_KEY_CHARS) {
        "must be a single path component"
    } else {
        return Ok(());
    };
    Err(StoreError::InvalidSampleKey {
        key: key.to_string(),
        reason: reason.into(),
    })
}
