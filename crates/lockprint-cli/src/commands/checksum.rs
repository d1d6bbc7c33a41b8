use super::{json_pretty, styled_checksum, EXIT_SUCCESS};
use lockprint_core::Engine;

pub fn run(engine: &Engine, json: bool) -> Result<u8, String> {
    let checksum = engine.generate_checksum().map_err(|e| e.to_string())?;
    if json {
        let payload = serde_json::json!({ "checksum": checksum });
        println!("{}", json_pretty(&payload)?);
    } else {
        println!("{}", styled_checksum(checksum.as_str()));
    }
    Ok(EXIT_SUCCESS)
}
