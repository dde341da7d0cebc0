//! Input document for `render` and `validate`
//!
//! One YAML (or JSON) document bundles the cluster snapshot, the owning
//! Machine facts and the GCPMachine resource:
//!
//! ```yaml
//! cluster:
//!   name: workload
//!   project: workload-proj
//!   region: us-central1
//!   networkName: default
//!   failureDomains:
//!     us-central1-a: {}
//! machine:
//!   version: v1.30.2
//! gcpMachine:
//!   apiVersion: infrastructure.cluster.x-k8s.io/v1beta1
//!   kind: GCPMachine
//!   metadata:
//!     name: workload-md-0-abcde
//!   spec:
//!     instanceType: n2-standard-4
//! ```

use std::path::Path;

use capg_common::crd::GcpMachine;
use capg_common::{ClusterContext, OwnerMachine};
use capg_compute::{InstanceDescriptor, InstanceDescriptorBuilder, MachineScope};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::Result;

/// Everything needed to translate one machine
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderInput {
    /// Cluster snapshot
    pub cluster: ClusterContext,

    /// Owning Machine; a worker without version or zone when omitted
    #[serde(default)]
    pub machine: OwnerMachine,

    /// The GCPMachine resource
    pub gcp_machine: GcpMachine,
}

impl RenderInput {
    /// Read and parse an input document from disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let input = Self::parse(&content)?;
        debug!(path = %path.display(), machine = %input.scope().name(), "loaded render input");
        Ok(input)
    }

    /// Parse an input document; JSON is accepted as a subset of YAML
    pub fn parse(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Scope over this document
    pub fn scope(&self) -> MachineScope<'_> {
        MachineScope::new(&self.cluster, &self.machine, &self.gcp_machine)
    }

    /// Build the instance descriptor
    pub fn build(&self) -> Result<InstanceDescriptor> {
        Ok(InstanceDescriptorBuilder::new(self.scope()).build()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
cluster:
  name: workload
  project: workload-proj
  region: us-central1
  networkName: default
gcpMachine:
  apiVersion: infrastructure.cluster.x-k8s.io/v1beta1
  kind: GCPMachine
  metadata:
    name: worker-0
  spec:
    instanceType: e2-medium
"#;

    #[test]
    fn machine_defaults_to_worker() {
        let input = RenderInput::parse(MINIMAL).expect("minimal input should parse");
        assert_eq!(input.scope().role(), "node");
        assert_eq!(input.machine.version, None);
        assert_eq!(input.scope().zone(), "");
    }

    #[test]
    fn builds_from_parsed_input() {
        let input = RenderInput::parse(MINIMAL).expect("minimal input should parse");
        let desc = input.build().expect("minimal input should build");
        assert_eq!(desc.name, "worker-0");
        assert_eq!(desc.machine_type, "zones/machineTypes/e2-medium");
    }

    #[test]
    fn missing_cluster_is_a_yaml_error() {
        let err = RenderInput::parse("gcpMachine: {}").unwrap_err();
        assert!(matches!(err, crate::Error::Yaml(_)));
    }
}
