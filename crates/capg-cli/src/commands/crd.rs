//! Crd command - print the GCPMachine CustomResourceDefinition

use capg_common::crd::GcpMachine;
use kube::CustomResourceExt;

use crate::Result;

pub fn run() -> Result<()> {
    print!("{}", crd_yaml()?);
    Ok(())
}

/// The GCPMachine CRD as YAML
pub fn crd_yaml() -> Result<String> {
    Ok(serde_yaml::to_string(&GcpMachine::crd())?)
}
