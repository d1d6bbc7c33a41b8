use crate::request::PackageRequest;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DescriptorError {
    #[error("descriptor I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("descriptor serialize error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// The minimal `package.json` written into the sandbox before resolution.
///
/// Declares exactly one dependency at an exact version; everything else is
/// fixed boilerplate the external resolver expects to find.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PackageDescriptor {
    pub name: String,
    pub version: String,
    pub description: String,
    pub private: bool,
    pub dependencies: BTreeMap<String, String>,
    pub engines: Engines,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Engines {
    pub node: String,
}

impl PackageDescriptor {
    /// Build the sandbox descriptor declaring the requested {name: version}
    /// pair as its sole dependency.
    pub fn for_request(request: &PackageRequest) -> Self {
        let mut dependencies = BTreeMap::new();
        dependencies.insert(request.name.clone(), request.version.clone());

        Self {
            name: "lockprint-sandbox".to_owned(),
            version: "1.0.0".to_owned(),
            description: format!("isolated install of {}@{}", request.name, request.version),
            private: true,
            dependencies,
            engines: Engines {
                node: ">=18".to_owned(),
            },
        }
    }

    /// Write the descriptor durably: tempfile in the target directory,
    /// fsync, atomic rename, then fsync the parent directory.
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> Result<(), DescriptorError> {
        let path = path.as_ref();
        let content = serde_json::to_string_pretty(self)?;
        let dir = path.parent().unwrap_or(Path::new("."));
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        std::io::Write::write_all(&mut tmp, content.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(path).map_err(|e| DescriptorError::Io(e.error))?;
        if let Ok(f) = fs::File::open(dir) {
            let _ = f.sync_all();
        }
        Ok(())
    }
}
