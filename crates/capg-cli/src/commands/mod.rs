//! CLI commands

use clap::ValueEnum;
use serde::Serialize;

use crate::Result;

pub mod crd;
pub mod render;
pub mod validate;

/// Output format for rendered documents
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON (default)
    #[default]
    Json,
    /// YAML
    Yaml,
}

impl OutputFormat {
    /// Serialize `value` in this format
    pub fn serialize<T: Serialize>(&self, value: &T) -> Result<String> {
        Ok(match self {
            OutputFormat::Json => serde_json::to_string_pretty(value)?,
            OutputFormat::Yaml => serde_yaml::to_string(value)?,
        })
    }
}
