use crate::RuntimeError;

/// Captured outcome of one resolver invocation.
///
/// `code` is the process exit code, `-1` when the process was terminated by
/// a signal. A zero code alone does not prove resolution succeeded — the
/// orchestrator also requires the lock manifest to exist on disk.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl Invocation {
    pub fn success(&self) -> bool {
        self.code == 0
    }

    /// The tool's own diagnostic text, preferring stderr.
    pub fn diagnostics(&self) -> &str {
        if self.stderr.trim().is_empty() {
            &self.stdout
        } else {
            &self.stderr
        }
    }
}

/// Capability interface over the external dependency-resolution tool.
///
/// Given a sandbox directory containing a package descriptor, a resolver
/// computes the dependency graph and serializes it to a lock manifest in
/// that directory. Implementations are swappable so tests run without
/// spawning a real process. The call blocks with no timeout; a hung tool
/// hangs the caller.
pub trait Resolver: Send + Sync {
    fn name(&self) -> &str;

    fn available(&self) -> bool;

    /// Run resolution with the sandbox as working directory.
    fn resolve(&self, sandbox: &std::path::Path) -> Result<Invocation, RuntimeError>;
}

pub fn select_resolver(name: &str) -> Result<Box<dyn Resolver>, RuntimeError> {
    match name {
        "npm" => Ok(Box::new(crate::npm::NpmResolver::new())),
        "mock" => Ok(Box::new(crate::mock::MockResolver::new())),
        other => Err(RuntimeError::Unavailable(other.to_owned())),
    }
}
