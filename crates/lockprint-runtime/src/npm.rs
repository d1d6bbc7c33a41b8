use crate::resolver::{Invocation, Resolver};
use crate::RuntimeError;
use std::path::Path;
use std::process::Command;
use tracing::debug;

/// The real `npm` invoker.
///
/// Constrained to lockfile-only mode: no package bytes are fetched or
/// extracted, no audit or funding network calls, no lifecycle scripts.
#[derive(Debug, Clone, Default)]
pub struct NpmResolver;

const NPM_ARGS: [&str; 5] = [
    "install",
    "--package-lock-only",
    "--no-audit",
    "--no-fund",
    "--ignore-scripts",
];

impl NpmResolver {
    pub fn new() -> Self {
        Self
    }
}

impl Resolver for NpmResolver {
    fn name(&self) -> &'static str {
        "npm"
    }

    fn available(&self) -> bool {
        Command::new("npm")
            .arg("--version")
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }

    fn resolve(&self, sandbox: &Path) -> Result<Invocation, RuntimeError> {
        debug!("invoking npm in {}", sandbox.display());
        let output = Command::new("npm")
            .args(NPM_ARGS)
            .current_dir(sandbox)
            .output()
            .map_err(|e| RuntimeError::Invoke(format!("npm not found or failed to start: {e}")))?;

        Ok(Invocation {
            code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
