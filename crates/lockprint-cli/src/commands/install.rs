use super::{json_pretty, spin_fail, spin_ok, spinner, styled_checksum, EXIT_FAILURE, EXIT_SUCCESS};
use lockprint_core::Engine;
use lockprint_schema::PackageRequest;

pub fn run(engine: &Engine, name: &str, version: &str, json: bool) -> Result<u8, String> {
    let request =
        PackageRequest::new(name, version).map_err(|e| format!("request error: {e}"))?;

    let pb = if json {
        None
    } else {
        Some(spinner(&format!(
            "resolving {}@{}...",
            request.name, request.version
        )))
    };

    let result = engine.install(&request);

    if json {
        println!("{}", json_pretty(&result)?);
        return Ok(if result.success {
            EXIT_SUCCESS
        } else {
            EXIT_FAILURE
        });
    }

    if result.success {
        if let Some(ref pb) = pb {
            spin_ok(pb, &format!("resolved {}@{}", result.package_name, result.version));
        }
        let checksum = result.checksum.as_ref().map_or("", |c| c.as_str());
        println!("checksum: {}", styled_checksum(checksum));
        if let Some(info) = &result.info {
            println!(
                "packages: {} (lockfileVersion {})",
                info.total_packages, info.lockfile_version
            );
        }
        println!("sandbox:  {}", result.sandbox);
        Ok(EXIT_SUCCESS)
    } else {
        if let Some(ref pb) = pb {
            spin_fail(pb, &format!("install of {}@{} failed", result.package_name, result.version));
        }
        Err(result.error.unwrap_or_else(|| "unknown failure".to_owned()))
    }
}
