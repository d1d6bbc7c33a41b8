use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LockError {
    #[error("failed to read lock manifest: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse lock manifest: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Read-only view of the resolver's `package-lock.json`.
///
/// Only the fields the canonicalizer consumes are modeled; everything else
/// in the file is ignored by construction. Absent `packages` or
/// `dependencies` sections are valid and treated as empty. A non-mapping
/// value for either is a parse error — that is an upstream contract
/// violation, not a recoverable case.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LockManifest {
    #[serde(rename = "lockfileVersion")]
    pub lockfile_version: u64,
    #[serde(default)]
    pub packages: BTreeMap<String, PackageEntry>,
    #[serde(default)]
    pub dependencies: serde_json::Map<String, serde_json::Value>,
}

/// One node of the resolved dependency tree, keyed by its install path.
///
/// Entries lacking a name or version (the rootless `""` metadata entry, for
/// instance) are non-package nodes and get dropped during canonicalization.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PackageEntry {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub integrity: Option<String>,
    #[serde(default)]
    pub resolved: Option<String>,
}

pub fn parse_lock_str(input: &str) -> Result<LockManifest, LockError> {
    Ok(serde_json::from_str(input)?)
}

pub fn parse_lock_file(path: impl AsRef<Path>) -> Result<LockManifest, LockError> {
    let content = fs::read_to_string(path)?;
    parse_lock_str(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_lock() {
        let lock = parse_lock_str(r#"{"lockfileVersion": 3}"#).unwrap();
        assert_eq!(lock.lockfile_version, 3);
        assert!(lock.packages.is_empty());
        assert!(lock.dependencies.is_empty());
    }

    #[test]
    fn parses_packages_and_ignores_extra_fields() {
        let lock = parse_lock_str(
            r#"{
                "lockfileVersion": 3,
                "name": "sandbox",
                "packages": {
                    "": {},
                    "node_modules/left-pad": {
                        "name": "left-pad",
                        "version": "1.3.0",
                        "integrity": "sha512-abc",
                        "resolved": "https://registry.npmjs.org/left-pad/-/left-pad-1.3.0.tgz",
                        "license": "WTFPL",
                        "engines": {"node": "*"}
                    }
                }
            }"#,
        )
        .unwrap();

        let entry = &lock.packages["node_modules/left-pad"];
        assert_eq!(entry.name.as_deref(), Some("left-pad"));
        assert_eq!(entry.version.as_deref(), Some("1.3.0"));
        assert_eq!(entry.integrity.as_deref(), Some("sha512-abc"));
        assert!(lock.packages[""].name.is_none());
    }

    #[test]
    fn parses_dependencies_section() {
        let lock = parse_lock_str(
            r#"{
                "lockfileVersion": 2,
                "dependencies": {"left-pad": {"version": "1.3.0"}}
            }"#,
        )
        .unwrap();
        assert_eq!(lock.dependencies.len(), 1);
        assert!(lock.dependencies.contains_key("left-pad"));
    }

    #[test]
    fn non_mapping_packages_is_a_parse_error() {
        assert!(parse_lock_str(r#"{"lockfileVersion": 3, "packages": []}"#).is_err());
        assert!(parse_lock_str(r#"{"lockfileVersion": 3, "dependencies": 7}"#).is_err());
    }

    #[test]
    fn lock_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("package-lock.json");
        fs::write(
            &path,
            r#"{"lockfileVersion": 3, "packages": {"node_modules/a": {"name": "a", "version": "1.0.0"}}}"#,
        )
        .unwrap();

        let lock = parse_lock_file(&path).unwrap();
        assert_eq!(lock.lockfile_version, 3);
        assert_eq!(lock.packages.len(), 1);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = parse_lock_file(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, LockError::Io(_)));
    }
}
