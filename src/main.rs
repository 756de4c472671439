//! Keysword binary
//!
//! Prints the FileVault 2 individual recovery key of one computer.
//!
//! # Usage
//!
//! ```bash
//! keysword -id 42
//! keysword -name "mbp-alice"
//! ```
//!
//! Only the key is written to stdout. Diagnostics go to stderr and any
//! failure exits with status 1; bad flag combinations exit with status 2.

use keysword::cli::{Cli, run_retrieve_mode};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse_normalized();

    match run_retrieve_mode(&cli).await {
        Ok(key) => {
            println!("{}", key.expose());
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}
