// Lockbox — Application Entry Point
//
// Parses CLI arguments, initializes structured logging (with a filter
// that never emits key material or plaintext passwords), and dispatches
// to the command handler.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use lockbox::cli::{execute, Cli};

fn main() {
    // Initialize tracing with env filter (RUST_LOG=lockbox=debug for verbose output).
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("lockbox=info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    if let Err(e) = execute(cli.vault_root, cli.command) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
