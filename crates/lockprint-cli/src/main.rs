mod commands;

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use commands::{EXIT_FAILURE, EXIT_REQUEST_ERROR};
use lockprint_core::{install_signal_handler, Engine};
use lockprint_runtime::select_resolver;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "lockprint",
    version,
    about = "Deterministic dependency-tree fingerprinting for sandboxed package installs"
)]
struct Cli {
    /// Sandbox directory the install runs in.
    #[arg(long, default_value = "./lockprint-sandbox", global = true)]
    sandbox: String,

    /// Resolver backend to invoke (npm or mock).
    #[arg(long, default_value = "npm", global = true)]
    resolver: String,

    /// Output results as structured JSON.
    #[arg(long, default_value_t = false, global = true)]
    json: bool,

    /// Enable verbose (debug) logging output.
    #[arg(short, long, default_value_t = false, global = true)]
    verbose: bool,

    /// Enable trace-level logging (more detailed than --verbose).
    #[arg(long, default_value_t = false, global = true)]
    trace: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Install one pinned package into a fresh sandbox and print its
    /// dependency-tree checksum.
    Install {
        /// Package name (e.g. left-pad).
        name: String,
        /// Exact version (e.g. 1.3.0); ranges are rejected.
        version: String,
    },
    /// Compute the checksum of the lock manifest currently in the sandbox.
    Checksum,
    /// Recompute the checksum and compare against an expected value.
    Verify {
        /// Expected 64-character hex checksum.
        expected: String,
    },
    /// Show lock manifest summary: schema version, package count, dependencies.
    Info,
    /// Run the default demonstration sequence: install, checksum, verify, info.
    Demo {
        /// Package name to demonstrate with.
        #[arg(default_value = "left-pad")]
        name: String,
        /// Exact version to demonstrate with.
        #[arg(default_value = "1.3.0")]
        version: String,
    },
    /// Generate shell completions for bash, zsh, fish, elvish, or powershell.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

fn main() -> ExitCode {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let msg = info.to_string();
        if msg.contains("Broken pipe")
            || msg.contains("broken pipe")
            || msg.contains("os error 32")
            || msg.contains("failed printing to stdout")
        {
            std::process::exit(0);
        }
        default_hook(info);
    }));

    let cli = Cli::parse();

    let default_level = if cli.trace {
        "trace"
    } else if cli.verbose {
        "debug"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("LOCKPRINT_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_target(false)
        .without_time()
        .init();

    install_signal_handler();

    let resolver = match select_resolver(&cli.resolver) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::from(EXIT_FAILURE);
        }
    };
    let engine = Engine::new(expand_tilde(&cli.sandbox), resolver);
    let json_output = cli.json;

    let result = match cli.command {
        Commands::Install { name, version } => {
            commands::install::run(&engine, &name, &version, json_output)
        }
        Commands::Checksum => commands::checksum::run(&engine, json_output),
        Commands::Verify { expected } => commands::verify::run(&engine, &expected, json_output),
        Commands::Info => commands::info::run(&engine, json_output),
        Commands::Demo { name, version } => {
            commands::demo::run(&engine, &name, &version, json_output)
        }
        Commands::Completions { shell } => commands::completions::run::<Cli>(shell),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(msg) => {
            eprintln!("error: {msg}");
            let code = if msg.starts_with("request error:") {
                EXIT_REQUEST_ERROR
            } else {
                EXIT_FAILURE
            };
            ExitCode::from(code)
        }
    }
}

fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home).join(stripped);
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn expand_tilde_resolves_home() {
        if let Ok(home) = std::env::var("HOME") {
            assert_eq!(
                expand_tilde("~/boxes"),
                PathBuf::from(home).join("boxes")
            );
        }
        assert_eq!(expand_tilde("/abs/path"), PathBuf::from("/abs/path"));
    }
}
