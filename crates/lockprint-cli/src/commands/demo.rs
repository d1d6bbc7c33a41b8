use super::{EXIT_FAILURE, EXIT_SUCCESS};
use lockprint_core::Engine;

/// The default demonstration sequence: install a pinned package, report the
/// checksum, prove it verifies by recomputation, and print the tree summary.
pub fn run(engine: &Engine, name: &str, version: &str, json: bool) -> Result<u8, String> {
    let code = super::install::run(engine, name, version, json)?;
    if code != EXIT_SUCCESS {
        return Ok(code);
    }

    let checksum = engine.generate_checksum().map_err(|e| e.to_string())?;
    let verified = engine
        .verify_checksum(&checksum)
        .map_err(|e| e.to_string())?;

    if json {
        let payload = serde_json::json!({ "recomputed": checksum, "verified": verified });
        println!("{}", super::json_pretty(&payload)?);
    } else if verified {
        println!("✓ recomputed checksum matches");
    } else {
        println!("✗ recomputed checksum diverged");
    }

    if !verified {
        return Ok(EXIT_FAILURE);
    }

    super::info::run(engine, json)
}
