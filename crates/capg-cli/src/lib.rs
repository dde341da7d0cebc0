//! capg CLI library

pub mod commands;
pub mod error;
pub mod input;

pub use error::{Error, Result};

use capg_common::telemetry::LogFormat;
use clap::{Parser, Subcommand};

/// capg - render Compute Engine instances from GCPMachine manifests
#[derive(Parser, Debug)]
#[command(name = "capg")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Log output format: text or json
    #[arg(long, env = "CAPG_LOG_FORMAT", default_value = "text", global = true)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the instance creation descriptor for a machine
    Render(commands::render::RenderArgs),
    /// Check an input document without rendering it
    Validate(commands::validate::ValidateArgs),
    /// Print the GCPMachine CustomResourceDefinition
    Crd,
}

impl Cli {
    /// Run the CLI command
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Render(args) => commands::render::run(args),
            Commands::Validate(args) => commands::validate::run(args),
            Commands::Crd => commands::crd::run(),
        }
    }
}
