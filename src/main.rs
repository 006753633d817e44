//! # Bikeshare Explorer Entry Point
//!
//! ```text
//! main()
//!   │
//!   ├─> Parse CLI arguments (clap)
//!   ├─> Initialize logging (tracing, rolling file)
//!   ├─> Resolve configuration (file + overrides)
//!   ├─> Install Ctrl+C handler (ctrlc)
//!   └─> Run the interactive session on stdin/stdout
//! ```
//!
//! ```bash
//! bikeshare --data-dir ./data
//! ```

#![warn(clippy::all, rust_2018_idioms)]
#![expect(clippy::print_stderr)] // Logging may not be up yet when reporting its own failure

mod cli;

use anyhow::{Context as _, Result};
use bikeshare::explorer::{self, StdConsole, prompt};
use clap::Parser as _;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    if let Err(e) = bikeshare::logging::init() {
        eprintln!("Logging disabled: {e:#}");
    }

    let config = cli.resolve_config()?;
    tracing::info!(?config, "Starting bikeshare explorer");

    let interrupted =
        prompt::install_interrupt_handler().context("Failed to install Ctrl+C handler")?;
    let mut console = StdConsole::new(interrupted);

    explorer::run(&mut console, &config).context("Session failed")?;
    Ok(())
}
