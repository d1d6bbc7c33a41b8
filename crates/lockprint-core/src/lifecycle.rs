use crate::CoreError;
use std::fmt;

/// Phases of one `install` call, in strict sequence with no branching back.
///
/// Any failure transitions directly to the terminal `Failed`; retrying means
/// a fresh call starting over from `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallPhase {
    Idle,
    SandboxReady,
    ManifestWritten,
    Resolved,
    Canonicalized,
    Digested,
    Reported,
    Failed,
}

impl fmt::Display for InstallPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::SandboxReady => "sandbox-ready",
            Self::ManifestWritten => "manifest-written",
            Self::Resolved => "resolved",
            Self::Canonicalized => "canonicalized",
            Self::Digested => "digested",
            Self::Reported => "reported",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

pub fn validate_transition(from: InstallPhase, to: InstallPhase) -> Result<(), CoreError> {
    use InstallPhase::{
        Canonicalized, Digested, Failed, Idle, ManifestWritten, Reported, Resolved, SandboxReady,
    };

    let valid = matches!(
        (from, to),
        (Idle, SandboxReady)
            | (SandboxReady, ManifestWritten)
            | (ManifestWritten, Resolved)
            | (Resolved, Canonicalized)
            | (Canonicalized, Digested)
            | (Digested, Reported)
    ) || (to == Failed && !matches!(from, Reported | Failed));

    if valid {
        Ok(())
    } else {
        Err(CoreError::InvalidTransition {
            from: from.to_string(),
            to: to.to_string(),
        })
    }
}

/// Validate and perform one phase advance.
pub fn advance(from: InstallPhase, to: InstallPhase) -> Result<InstallPhase, CoreError> {
    validate_transition(from, to)?;
    Ok(to)
}
