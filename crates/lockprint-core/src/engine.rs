use crate::concurrency::SandboxLock;
use crate::lifecycle::{advance, InstallPhase};
use crate::CoreError;
use lockprint_runtime::{Resolver, Sandbox};
use lockprint_schema::{digest, parse_lock_file, verify, CanonicalTree, Checksum, PackageDescriptor, PackageRequest};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Central orchestrator: sequences sandbox setup, descriptor write, external
/// resolution, canonicalization, and checksum computation into a single
/// `install` operation.
///
/// The sandbox root is injected at construction, never inferred from the
/// process location. The resolver is a capability the caller chooses, so
/// tests drive the full sequence without a real external tool.
pub struct Engine {
    sandbox: Sandbox,
    resolver: Box<dyn Resolver>,
}

/// Outcome of one `install` call. Always returned, never thrown: failures
/// carry the original request and a human-readable message.
#[derive(Debug, Clone, Serialize)]
pub struct InstallResult {
    pub success: bool,
    pub package_name: String,
    pub version: String,
    pub checksum: Option<Checksum>,
    pub info: Option<PackageInfo>,
    pub error: Option<String>,
    pub sandbox: String,
}

/// Summary of a resolved lock manifest.
#[derive(Debug, Clone, Serialize)]
pub struct PackageInfo {
    pub lockfile_version: u64,
    pub total_packages: usize,
    pub dependencies: serde_json::Map<String, serde_json::Value>,
}

impl Engine {
    pub fn new(sandbox_root: impl Into<PathBuf>, resolver: Box<dyn Resolver>) -> Self {
        Self {
            sandbox: Sandbox::new(sandbox_root),
            resolver,
        }
    }

    pub fn sandbox_root(&self) -> &Path {
        self.sandbox.root()
    }

    /// Install one pinned package into a fresh sandbox and fingerprint the
    /// resolved tree.
    ///
    /// All errors are caught exactly once here and folded into the failure
    /// shape; the caller checks `success` instead of handling panics or
    /// propagated errors. Holds an exclusive sandbox lock for the whole call
    /// so overlapping installs serialize.
    pub fn install(&self, request: &PackageRequest) -> InstallResult {
        info!("installing {}@{}", request.name, request.version);
        match self.install_inner(request) {
            Ok((checksum, info)) => InstallResult {
                success: true,
                package_name: request.name.clone(),
                version: request.version.clone(),
                checksum: Some(checksum),
                info: Some(info),
                error: None,
                sandbox: self.sandbox.root().display().to_string(),
            },
            Err(e) => InstallResult {
                success: false,
                package_name: request.name.clone(),
                version: request.version.clone(),
                checksum: None,
                info: None,
                error: Some(e.to_string()),
                sandbox: self.sandbox.root().display().to_string(),
            },
        }
    }

    fn install_inner(&self, request: &PackageRequest) -> Result<(Checksum, PackageInfo), CoreError> {
        let _lock = SandboxLock::acquire(&self.lock_path())?;
        let mut phase = InstallPhase::Idle;

        self.sandbox.recreate()?;
        phase = advance(phase, InstallPhase::SandboxReady)?;

        PackageDescriptor::for_request(request).write_to_file(self.sandbox.descriptor_path())?;
        phase = advance(phase, InstallPhase::ManifestWritten)?;

        let invocation = self.resolver.resolve(self.sandbox.root())?;
        if !invocation.success() {
            return Err(CoreError::Resolution(format!(
                "{} exited with code {}: {}",
                self.resolver.name(),
                invocation.code,
                invocation.diagnostics().trim()
            )));
        }
        let lock_path = self.sandbox.lock_manifest_path();
        if !lock_path.exists() {
            // A zero exit alone is not proof of success.
            return Err(CoreError::Resolution(format!(
                "{} exited successfully but produced no lock manifest",
                self.resolver.name()
            )));
        }
        phase = advance(phase, InstallPhase::Resolved)?;

        let manifest = parse_lock_file(&lock_path)?;
        let tree = manifest.canonicalize();
        phase = advance(phase, InstallPhase::Canonicalized)?;
        debug!(
            "canonicalized {} package entries (lockfileVersion {})",
            tree.package_count(),
            tree.lockfile_version
        );

        let checksum = digest(&tree)?;
        phase = advance(phase, InstallPhase::Digested)?;

        let info = summarize(&tree);
        let _ = advance(phase, InstallPhase::Reported)?;
        info!("installed {}@{} checksum {}", request.name, request.version, checksum);
        Ok((checksum, info))
    }

    /// Compute the checksum of the lock manifest currently in the sandbox.
    /// Requires a prior successful resolution; never reuses a cached digest.
    pub fn generate_checksum(&self) -> Result<Checksum, CoreError> {
        let tree = self.read_canonical_tree()?;
        Ok(digest(&tree)?)
    }

    /// Recompute the checksum from the on-disk lock manifest and compare.
    /// A mismatch is a normal `false`; a missing lock manifest is an error.
    pub fn verify_checksum(&self, expected: &Checksum) -> Result<bool, CoreError> {
        let tree = self.read_canonical_tree()?;
        Ok(verify(&tree, expected)?)
    }

    /// Summarize the resolved tree: schema version, retained entry count,
    /// and the top-level dependency mapping.
    pub fn package_info(&self) -> Result<PackageInfo, CoreError> {
        let tree = self.read_canonical_tree()?;
        Ok(summarize(&tree))
    }

    fn read_canonical_tree(&self) -> Result<CanonicalTree, CoreError> {
        let path = self.sandbox.lock_manifest_path();
        if !path.exists() {
            return Err(CoreError::MissingLockManifest(path.display().to_string()));
        }
        Ok(parse_lock_file(&path)?.canonicalize())
    }

    fn lock_path(&self) -> PathBuf {
        let root = self.sandbox.root();
        let name = root
            .file_name()
            .map_or_else(|| "sandbox".to_owned(), |n| n.to_string_lossy().into_owned());
        root.parent()
            .unwrap_or(Path::new("."))
            .join(format!(".{name}.lock"))
    }
}

fn summarize(tree: &CanonicalTree) -> PackageInfo {
    PackageInfo {
        lockfile_version: tree.lockfile_version,
        total_packages: tree.package_count(),
        dependencies: tree.dependencies.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lockprint_runtime::MockResolver;

    fn sample_request() -> PackageRequest {
        PackageRequest::new("left-pad", "1.3.0").unwrap()
    }

    fn mock_engine(dir: &Path) -> Engine {
        Engine::new(dir.join("sandbox"), Box::new(MockResolver::new()))
    }

    #[test]
    fn install_reports_checksum_and_info() {
        let dir = tempfile::tempdir().unwrap();
        let engine = mock_engine(dir.path());

        let result = engine.install(&sample_request());
        assert!(result.success, "{:?}", result.error);
        assert_eq!(result.package_name, "left-pad");
        assert_eq!(result.version, "1.3.0");
        assert!(result.error.is_none());

        let checksum = result.checksum.unwrap();
        assert_eq!(checksum.as_str().len(), 64);

        let info = result.info.unwrap();
        assert_eq!(info.lockfile_version, 3);
        assert_eq!(info.total_packages, 1);
        assert!(info.dependencies.contains_key("left-pad"));
    }

    #[test]
    fn install_is_reproducible() {
        let dir = tempfile::tempdir().unwrap();
        let engine = mock_engine(dir.path());

        let first = engine.install(&sample_request());
        let second = engine.install(&sample_request());
        assert_eq!(first.checksum.unwrap(), second.checksum.unwrap());
    }

    #[test]
    fn install_checksum_matches_standalone_generate() {
        let dir = tempfile::tempdir().unwrap();
        let engine = mock_engine(dir.path());

        let result = engine.install(&sample_request());
        assert_eq!(result.checksum.unwrap(), engine.generate_checksum().unwrap());
    }

    #[test]
    fn install_starts_from_a_clean_sandbox() {
        let dir = tempfile::tempdir().unwrap();
        let engine = mock_engine(dir.path());

        std::fs::create_dir_all(engine.sandbox_root()).unwrap();
        std::fs::write(engine.sandbox_root().join("leftover.txt"), "junk").unwrap();

        let result = engine.install(&sample_request());
        assert!(result.success);
        assert!(!engine.sandbox_root().join("leftover.txt").exists());
    }

    #[test]
    fn resolver_failure_folds_into_result() {
        let dir = tempfile::tempdir().unwrap();
        let engine = Engine::new(
            dir.path().join("sandbox"),
            Box::new(MockResolver::failing("npm ERR! 404 no such package")),
        );

        let result = engine.install(&sample_request());
        assert!(!result.success);
        assert_eq!(result.package_name, "left-pad");
        assert_eq!(result.version, "1.3.0");
        assert!(result.checksum.is_none());
        assert!(result.error.unwrap().contains("404 no such package"));
    }

    #[test]
    fn zero_exit_without_lock_manifest_is_a_failure() {
        let dir = tempfile::tempdir().unwrap();
        let engine = Engine::new(
            dir.path().join("sandbox"),
            Box::new(MockResolver::without_lockfile()),
        );

        let result = engine.install(&sample_request());
        assert!(!result.success);
        assert!(result.error.unwrap().contains("no lock manifest"));
    }

    #[test]
    fn standalone_operations_require_prior_resolution() {
        let dir = tempfile::tempdir().unwrap();
        let engine = mock_engine(dir.path());

        assert!(matches!(
            engine.generate_checksum(),
            Err(CoreError::MissingLockManifest(_))
        ));
        assert!(matches!(
            engine.verify_checksum(&Checksum::new("00")),
            Err(CoreError::MissingLockManifest(_))
        ));
        assert!(matches!(
            engine.package_info(),
            Err(CoreError::MissingLockManifest(_))
        ));
    }

    #[test]
    fn verify_checksum_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let engine = mock_engine(dir.path());

        let checksum = engine.install(&sample_request()).checksum.unwrap();
        assert!(engine.verify_checksum(&checksum).unwrap());

        let corrupted = Checksum::new(format!("{checksum}0"));
        assert!(!engine.verify_checksum(&corrupted).unwrap());
    }

    #[test]
    fn failure_leaves_no_stale_lock_manifest_mistaken_for_valid() {
        let dir = tempfile::tempdir().unwrap();

        // A successful install leaves a lock manifest behind...
        let engine = mock_engine(dir.path());
        assert!(engine.install(&sample_request()).success);

        // ...but a failing retry recreates the sandbox first, so the stale
        // manifest is gone and standalone calls refuse to answer.
        let failing = Engine::new(
            dir.path().join("sandbox"),
            Box::new(MockResolver::failing("registry unreachable")),
        );
        assert!(!failing.install(&sample_request()).success);
        assert!(matches!(
            failing.generate_checksum(),
            Err(CoreError::MissingLockManifest(_))
        ));
    }

    #[test]
    fn sandbox_lock_sits_outside_the_sandbox() {
        let dir = tempfile::tempdir().unwrap();
        let engine = mock_engine(dir.path());

        assert!(engine.install(&sample_request()).success);
        let lock_path = dir.path().join(".sandbox.lock");
        assert!(lock_path.exists());
    }
}
