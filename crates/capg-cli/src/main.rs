//! capg CLI
//!
//! Renders Compute Engine instance descriptors from GCPMachine manifests offline.

use capg_common::telemetry::{init_logging, LogConfig};
use clap::Parser;

use capg_cli::{Cli, Result};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(LogConfig {
        format: cli.log_format,
        filter: None,
    })?;
    cli.run()
}
