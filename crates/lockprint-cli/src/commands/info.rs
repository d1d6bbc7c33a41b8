use super::{json_pretty, EXIT_SUCCESS};
use lockprint_core::Engine;

pub fn run(engine: &Engine, json: bool) -> Result<u8, String> {
    let info = engine.package_info().map_err(|e| e.to_string())?;
    if json {
        println!("{}", json_pretty(&info)?);
    } else {
        println!("lockfileVersion: {}", info.lockfile_version);
        println!("packages:        {}", info.total_packages);
        if info.dependencies.is_empty() {
            println!("dependencies:    (none)");
        } else {
            println!("dependencies:");
            for (name, meta) in &info.dependencies {
                let version = meta
                    .get("version")
                    .and_then(serde_json::Value::as_str)
                    .unwrap_or("?");
                println!("  {name} {version}");
            }
        }
    }
    Ok(EXIT_SUCCESS)
}
