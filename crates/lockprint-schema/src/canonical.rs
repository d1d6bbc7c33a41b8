use crate::lock::LockManifest;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Canonical, sorted projection of a resolved lock manifest.
///
/// Field order is fixed and the package map is keyed in lexicographic byte
/// order. For a given manifest this is a pure function of its content — no
/// wall clock, randomness, or map iteration order leaks in. This is the
/// input to checksum computation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CanonicalTree {
    #[serde(rename = "lockfileVersion")]
    pub lockfile_version: u64,
    pub packages: BTreeMap<String, CanonicalPackage>,
    pub dependencies: serde_json::Map<String, serde_json::Value>,
}

/// The four identity fields of a resolved package.
///
/// Absent integrity/resolved values serialize as explicit `null` so that
/// presence or absence is itself part of the fingerprint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CanonicalPackage {
    pub name: String,
    pub version: String,
    pub integrity: Option<String>,
    pub resolved: Option<String>,
}

impl LockManifest {
    /// Project the manifest into its canonical form.
    ///
    /// Entries missing a name or version are non-package metadata nodes and
    /// are dropped. All other fields an entry may carry (licenses, engines,
    /// scripts) are not part of the dependency-identity contract and never
    /// reach the canonical tree. The resolver's own key order is unspecified;
    /// the sorted rebuild here is what makes checksums reproducible across
    /// machines and runs.
    pub fn canonicalize(&self) -> CanonicalTree {
        let mut packages = BTreeMap::new();
        for (path, entry) in &self.packages {
            let (Some(name), Some(version)) = (&entry.name, &entry.version) else {
                continue;
            };
            packages.insert(
                path.clone(),
                CanonicalPackage {
                    name: name.clone(),
                    version: version.clone(),
                    integrity: entry.integrity.clone(),
                    resolved: entry.resolved.clone(),
                },
            );
        }

        CanonicalTree {
            lockfile_version: self.lockfile_version,
            packages,
            dependencies: self.dependencies.clone(),
        }
    }
}

impl CanonicalTree {
    /// Compact, separator-stable serialization: no insignificant whitespace,
    /// struct fields in declaration order, map keys in sorted order.
    pub fn canonical_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Number of retained package entries.
    pub fn package_count(&self) -> usize {
        self.packages.len()
    }
}

#[cfg(test)]
mod tests {
    use crate::lock::parse_lock_str;

    #[test]
    fn drops_entries_missing_name_or_version() {
        let lock = parse_lock_str(
            r#"{
                "lockfileVersion": 3,
                "packages": {
                    "": {},
                    "node_modules/no-version": {"name": "no-version"},
                    "node_modules/no-name": {"version": "1.0.0"},
                    "node_modules/kept": {"name": "kept", "version": "2.0.0"}
                }
            }"#,
        )
        .unwrap();

        let tree = lock.canonicalize();
        assert_eq!(tree.package_count(), 1);
        assert!(tree.packages.contains_key("node_modules/kept"));
    }

    #[test]
    fn sorts_install_paths_lexicographically() {
        let lock = parse_lock_str(
            r#"{
                "lockfileVersion": 3,
                "packages": {
                    "node_modules/zeta": {"name": "zeta", "version": "1.0.0"},
                    "node_modules/alpha": {"name": "alpha", "version": "1.0.0"},
                    "node_modules/alpha/node_modules/beta": {"name": "beta", "version": "2.0.0"}
                }
            }"#,
        )
        .unwrap();

        let tree = lock.canonicalize();
        let keys: Vec<&str> = tree.packages.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec![
                "node_modules/alpha",
                "node_modules/alpha/node_modules/beta",
                "node_modules/zeta"
            ]
        );
    }

    #[test]
    fn equivalent_manifests_produce_same_canonical_json() {
        let a = parse_lock_str(
            r#"{
                "lockfileVersion": 3,
                "packages": {
                    "node_modules/b": {"name": "b", "version": "2.0.0"},
                    "node_modules/a": {"name": "a", "version": "1.0.0"}
                }
            }"#,
        )
        .unwrap();
        let b = parse_lock_str(
            r#"{
                "lockfileVersion": 3,
                "packages": {
                    "node_modules/a": {"name": "a", "version": "1.0.0"},
                    "node_modules/b": {"name": "b", "version": "2.0.0"}
                }
            }"#,
        )
        .unwrap();

        assert_eq!(
            a.canonicalize().canonical_json().unwrap(),
            b.canonicalize().canonical_json().unwrap()
        );
    }

    #[test]
    fn absent_integrity_serializes_as_null() {
        let lock = parse_lock_str(
            r#"{
                "lockfileVersion": 3,
                "packages": {"node_modules/a": {"name": "a", "version": "1.0.0"}}
            }"#,
        )
        .unwrap();

        let json = lock.canonicalize().canonical_json().unwrap();
        assert!(json.contains(r#""integrity":null"#));
        assert!(json.contains(r#""resolved":null"#));
    }

    #[test]
    fn discarded_fields_do_not_reach_canonical_json() {
        let lock = parse_lock_str(
            r#"{
                "lockfileVersion": 3,
                "packages": {
                    "node_modules/a": {
                        "name": "a",
                        "version": "1.0.0",
                        "license": "MIT",
                        "engines": {"node": ">=10"}
                    }
                }
            }"#,
        )
        .unwrap();

        let json = lock.canonicalize().canonical_json().unwrap();
        assert!(!json.contains("license"));
        assert!(!json.contains("engines"));
    }

    #[test]
    fn absent_sections_become_empty_mappings() {
        let tree = parse_lock_str(r#"{"lockfileVersion": 1}"#).unwrap().canonicalize();
        assert_eq!(tree.lockfile_version, 1);
        assert!(tree.packages.is_empty());
        assert!(tree.dependencies.is_empty());
        assert_eq!(
            tree.canonical_json().unwrap(),
            r#"{"lockfileVersion":1,"packages":{},"dependencies":{}}"#
        );
    }

    #[test]
    fn canonicalize_is_idempotent_on_same_input() {
        let lock = parse_lock_str(
            r#"{
                "lockfileVersion": 3,
                "packages": {"node_modules/a": {"name": "a", "version": "1.0.0", "integrity": "sha512-X"}},
                "dependencies": {"a": {"version": "1.0.0"}}
            }"#,
        )
        .unwrap();

        assert_eq!(lock.canonicalize(), lock.canonicalize());
    }
}
