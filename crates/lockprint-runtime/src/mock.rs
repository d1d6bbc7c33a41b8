use crate::resolver::{Invocation, Resolver};
use crate::RuntimeError;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Deterministic fake resolver for tests.
///
/// Reads the sandbox descriptor and writes a lock manifest whose content is
/// a pure function of the declared dependencies: fake integrity hashes are
/// derived from `name@version`, resolved URLs follow the registry tarball
/// convention. Failure knobs cover both halves of the orchestrator's
/// success gate: a non-zero exit, and a zero exit that leaves no lock
/// manifest behind.
pub struct MockResolver {
    outcome: Outcome,
}

enum Outcome {
    Success,
    FailExit(String),
    SkipLockfile,
}

impl Default for MockResolver {
    fn default() -> Self {
        Self {
            outcome: Outcome::Success,
        }
    }
}

impl MockResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Exit non-zero with the given diagnostic on stderr.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            outcome: Outcome::FailExit(message.into()),
        }
    }

    /// Exit zero without producing a lock manifest.
    pub fn without_lockfile() -> Self {
        Self {
            outcome: Outcome::SkipLockfile,
        }
    }
}

fn fake_integrity(name: &str, version: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(format!("{name}@{version}").as_bytes());
    format!("sha512-{}", hex::encode(hasher.finalize()))
}

impl Resolver for MockResolver {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn available(&self) -> bool {
        true
    }

    fn resolve(&self, sandbox: &Path) -> Result<Invocation, RuntimeError> {
        match &self.outcome {
            Outcome::FailExit(message) => {
                return Ok(Invocation {
                    code: 1,
                    stdout: String::new(),
                    stderr: message.clone(),
                })
            }
            Outcome::SkipLockfile => {
                return Ok(Invocation {
                    code: 0,
                    stdout: "resolved nothing\n".to_owned(),
                    stderr: String::new(),
                })
            }
            Outcome::Success => {}
        }

        let descriptor: serde_json::Value = serde_json::from_str(
            &std::fs::read_to_string(sandbox.join("package.json"))
                .map_err(|e| RuntimeError::Invoke(format!("mock: no package.json: {e}")))?,
        )
        .map_err(|e| RuntimeError::Invoke(format!("mock: bad package.json: {e}")))?;

        let declared = descriptor
            .get("dependencies")
            .and_then(serde_json::Value::as_object)
            .cloned()
            .unwrap_or_default();

        let mut packages = serde_json::Map::new();
        let mut root_deps = serde_json::Map::new();
        let mut dependencies = serde_json::Map::new();
        for (name, version) in &declared {
            let version = version.as_str().unwrap_or_default().to_owned();
            root_deps.insert(name.clone(), serde_json::Value::String(version.clone()));
            packages.insert(
                format!("node_modules/{name}"),
                serde_json::json!({
                    "name": name,
                    "version": version,
                    "integrity": fake_integrity(name, &version),
                    "resolved": format!(
                        "https://registry.npmjs.org/{name}/-/{name}-{version}.tgz"
                    ),
                }),
            );
            dependencies.insert(name.clone(), serde_json::json!({ "version": version }));
        }
        packages.insert("".to_owned(), serde_json::json!({ "dependencies": root_deps }));

        let lock = serde_json::json!({
            "name": descriptor.get("name").cloned().unwrap_or_default(),
            "lockfileVersion": 3,
            "requires": true,
            "packages": packages,
            "dependencies": dependencies,
        });

        std::fs::write(
            sandbox.join("package-lock.json"),
            serde_json::to_string_pretty(&lock)
                .map_err(|e| RuntimeError::Invoke(format!("mock: serialize failed: {e}")))?,
        )?;

        Ok(Invocation {
            code: 0,
            stdout: format!("mock: locked {} dependencies\n", declared.len()),
            stderr: String::new(),
        })
    }
}
