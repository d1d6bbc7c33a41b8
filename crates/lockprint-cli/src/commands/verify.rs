use super::{json_pretty, EXIT_SUCCESS, EXIT_VERIFY_MISMATCH};
use lockprint_core::Engine;
use lockprint_schema::Checksum;

pub fn run(engine: &Engine, expected: &str, json: bool) -> Result<u8, String> {
    let expected = Checksum::new(expected);
    let matches = engine
        .verify_checksum(&expected)
        .map_err(|e| e.to_string())?;

    if json {
        let payload = serde_json::json!({ "expected": expected, "verified": matches });
        println!("{}", json_pretty(&payload)?);
    } else if matches {
        println!("✓ checksum verified");
    } else {
        println!("✗ checksum mismatch");
    }

    Ok(if matches { EXIT_SUCCESS } else { EXIT_VERIFY_MISMATCH })
}
