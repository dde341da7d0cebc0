//! Validate command

use std::path::{Path, PathBuf};

use capg_compute::{ProviderId, SubnetReference};
use clap::Args;

use crate::input::RenderInput;
use crate::Result;

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Input document with `cluster`, `machine` and `gcpMachine`
    pub file: PathBuf,
}

pub fn run(args: ValidateArgs) -> Result<()> {
    let report = validate_file(&args.file)?;
    println!("Machine:  {}", report.machine);
    println!("Zone:     {}", display_or_none(&report.zone));
    println!("Subnet:   {}", report.subnet.as_deref().unwrap_or("(cluster network)"));
    println!("Aliases:  {}", report.alias_ranges);
    println!();
    println!("All validations passed");
    Ok(())
}

/// What a successful validation found
#[derive(Debug, PartialEq, Eq)]
pub struct ValidationReport {
    pub machine: String,
    pub zone: String,
    pub subnet: Option<String>,
    pub alias_ranges: usize,
}

/// Parse an input document and check it without rendering
pub fn validate_file(path: &Path) -> Result<ValidationReport> {
    let input = RenderInput::load(path)?;
    validate(&input)
}

pub fn validate(input: &RenderInput) -> Result<ValidationReport> {
    let scope = input.scope();
    let spec = scope.spec();

    if spec.instance_type.is_empty() {
        return Err(capg_common::Error::validation_for_field(
            scope.name(),
            "spec.instanceType",
            "instance type is required",
        )
        .into());
    }
    if let Some(raw) = spec.provider_id.as_deref() {
        ProviderId::parse(raw).map_err(|_| {
            capg_common::Error::validation_for_field(
                scope.name(),
                "spec.providerID",
                format!("'{raw}' is not of the form gce://<project>/<zone>/<name>"),
            )
        })?;
    }

    let subnet = SubnetReference::parse_optional(spec.subnet.as_deref())?;

    Ok(ValidationReport {
        machine: scope.name(),
        zone: scope.zone().to_string(),
        subnet: subnet.as_ref().map(|s| s.locator.as_str().to_string()),
        alias_ranges: subnet.map_or(0, |s| s.alias_ranges.len()),
    })
}

fn display_or_none(value: &str) -> &str {
    if value.is_empty() {
        "(none)"
    } else {
        value
    }
}
