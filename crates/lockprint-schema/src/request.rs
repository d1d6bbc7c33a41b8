use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RequestError {
    #[error("package name must not be empty")]
    EmptyName,
    #[error("invalid package name: '{0}'")]
    InvalidName(String),
    #[error("package version must not be empty")]
    EmptyVersion,
    #[error("version is not pinned: '{0}' (expected an exact version like 1.2.3)")]
    UnpinnedVersion(String),
}

/// A request to install exactly one package at an exact version.
///
/// The version must be a concrete pin, never a range. The whole determinism
/// guarantee rests on pinning the top-level request, not resolving it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PackageRequest {
    pub name: String,
    pub version: String,
}

impl PackageRequest {
    /// Validate and construct a request. Rejects empty or whitespace-bearing
    /// names and any version containing range syntax.
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Result<Self, RequestError> {
        let name = name.into().trim().to_owned();
        let version = version.into().trim().to_owned();

        if name.is_empty() {
            return Err(RequestError::EmptyName);
        }
        if name.contains(char::is_whitespace) || name.contains("..") {
            return Err(RequestError::InvalidName(name));
        }

        if version.is_empty() {
            return Err(RequestError::EmptyVersion);
        }
        if !is_pinned_version(&version) {
            return Err(RequestError::UnpinnedVersion(version));
        }

        Ok(Self { name, version })
    }
}

/// A pinned version has an all-numeric dotted core before any prerelease or
/// build suffix. `1.2.3`, `1.2.3-beta.1` and `1.2.3+build` pass; `^1.2.3`,
/// `~1.2`, `1.x`, `>=1.0.0`, `latest` and `1.0.0 || 2.0.0` do not.
fn is_pinned_version(version: &str) -> bool {
    if version.contains(char::is_whitespace) || version.contains("||") {
        return false;
    }
    let core = version.split(['-', '+']).next().unwrap_or_default();
    core.split('.')
        .all(|part| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit()))
}
