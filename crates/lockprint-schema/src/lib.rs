//! Lock manifest parsing, canonicalization, and checksum engine for lockprint.
//!
//! This crate defines the schema layer: the pinned package request
//! (`PackageRequest`), the sandbox descriptor (`PackageDescriptor`), the
//! resolver's lock manifest view (`LockManifest`), its canonical projection
//! (`CanonicalTree`), and the SHA-256 digest/verify contract built on it.

pub mod canonical;
pub mod checksum;
pub mod descriptor;
pub mod lock;
pub mod request;
pub mod types;

pub use canonical::{CanonicalPackage, CanonicalTree};
pub use checksum::{digest, verify};
pub use descriptor::{DescriptorError, Engines, PackageDescriptor};
pub use lock::{parse_lock_file, parse_lock_str, LockError, LockManifest, PackageEntry};
pub use request::{PackageRequest, RequestError};
pub use types::Checksum;
