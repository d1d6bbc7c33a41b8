use crate::RuntimeError;
use std::path::{Path, PathBuf};
use tracing::debug;

/// The throwaway working directory one install runs in.
///
/// Every run starts from a clean slate: `recreate` destroys whatever is at
/// the root and makes a fresh empty directory. Destroying an absent
/// directory is a no-op, so teardown is idempotent.
#[derive(Debug, Clone)]
pub struct Sandbox {
    root: PathBuf,
}

impl Sandbox {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Where the package descriptor is written.
    pub fn descriptor_path(&self) -> PathBuf {
        self.root.join("package.json")
    }

    /// Where the external resolver leaves its lock manifest.
    pub fn lock_manifest_path(&self) -> PathBuf {
        self.root.join("package-lock.json")
    }

    /// Tear down and recreate the sandbox directory, guaranteed empty.
    pub fn recreate(&self) -> Result<(), RuntimeError> {
        self.destroy()?;
        std::fs::create_dir_all(&self.root).map_err(RuntimeError::Setup)?;
        debug!("sandbox recreated at {}", self.root.display());
        Ok(())
    }

    /// Remove the sandbox directory. An absent directory is treated the same
    /// as a just-destroyed one.
    pub fn destroy(&self) -> Result<(), RuntimeError> {
        match std::fs::remove_dir_all(&self.root) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(RuntimeError::Setup(e)),
        }
    }
}
