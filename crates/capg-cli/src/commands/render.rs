//! Render command

use std::path::{Path, PathBuf};

use clap::Args;
use tracing::info;

use super::OutputFormat;
use crate::input::RenderInput;
use crate::Result;

#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Input document with `cluster`, `machine` and `gcpMachine`
    pub file: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    pub output: OutputFormat,
}

pub fn run(args: RenderArgs) -> Result<()> {
    let rendered = render_file(&args.file, args.output)?;
    println!("{}", rendered.trim_end());
    Ok(())
}

/// Load an input document and render its instance descriptor
pub fn render_file(path: &Path, output: OutputFormat) -> Result<String> {
    let input = RenderInput::load(path)?;
    let descriptor = input.build()?;
    info!(
        machine = %descriptor.name,
        zone = %descriptor.zone,
        disks = descriptor.disks.len(),
        "rendered instance descriptor"
    );
    output.serialize(&descriptor)
}
