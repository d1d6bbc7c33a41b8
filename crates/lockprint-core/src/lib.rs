//! Installation orchestrator for lockprint.
//!
//! This crate ties together the schema layer and the runtime layer into the
//! `Engine` — the programmatic surface for `install`, standalone checksum
//! generation/verification, and package info. It also provides the install
//! phase state machine and sandbox file locking.

pub mod concurrency;
pub mod engine;
pub mod lifecycle;

pub use concurrency::{install_signal_handler, shutdown_requested, SandboxLock};
pub use engine::{Engine, InstallResult, PackageInfo};
pub use lifecycle::{validate_transition, InstallPhase};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("request error: {0}")]
    Request(#[from] lockprint_schema::RequestError),
    #[error("descriptor error: {0}")]
    Descriptor(#[from] lockprint_schema::DescriptorError),
    #[error("lock manifest error: {0}")]
    Lock(#[from] lockprint_schema::LockError),
    #[error("runtime error: {0}")]
    Runtime(#[from] lockprint_runtime::RuntimeError),
    #[error("resolution failed: {0}")]
    Resolution(String),
    #[error("no lock manifest at {0}; run install first")]
    MissingLockManifest(String),
    #[error("invalid phase transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
