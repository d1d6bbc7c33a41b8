//! Sandbox lifecycle and resolver invocation for lockprint.
//!
//! This crate implements the side-effect layer: the throwaway sandbox
//! directory (`Sandbox`), the pluggable `Resolver` capability trait with the
//! real `npm` invoker, and a deterministic mock resolver for tests.

pub mod mock;
pub mod npm;
pub mod resolver;
pub mod sandbox;

pub use mock::MockResolver;
pub use npm::NpmResolver;
pub use resolver::{select_resolver, Invocation, Resolver};
pub use sandbox::Sandbox;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("sandbox setup failed: {0}")]
    Setup(std::io::Error),
    #[error("resolver '{0}' is not available on this system")]
    Unavailable(String),
    #[error("failed to invoke resolver: {0}")]
    Invoke(String),
    #[error("runtime I/O error: {0}")]
    Io(#[from] std::io::Error),
}
