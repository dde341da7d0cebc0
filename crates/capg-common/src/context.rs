//! Read-only facts the translator needs from the surrounding cluster
//!
//! These are snapshots taken by the reconciler before translation starts.
//! Nothing in the translator mutates them.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Label Cluster API puts on control plane Machines
pub const CONTROL_PLANE_LABEL: &str = "cluster.x-k8s.io/control-plane";

/// Role string for control plane machines
pub const ROLE_CONTROL_PLANE: &str = "control-plane";

/// Role string for worker machines
pub const ROLE_NODE: &str = "node";

/// A zone the cluster may place machines in
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FailureDomain {
    /// Whether control plane machines may be placed here
    #[serde(default)]
    pub control_plane: bool,

    /// Free-form attributes
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
}

/// Cluster-level scope of a translation
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ClusterContext {
    /// Cluster name
    pub name: String,

    /// Project that owns the instances
    pub project: String,

    /// Region the cluster runs in, e.g. "us-central1"
    pub region: String,

    /// VPC network name
    pub network_name: String,

    /// Zones available to the cluster, keyed by zone name
    #[serde(default)]
    pub failure_domains: BTreeMap<String, FailureDomain>,

    /// Labels the cluster applies to every resource it owns
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub additional_labels: BTreeMap<String, String>,
}

impl ClusterContext {
    /// The lexicographically first failure domain, if any
    pub fn first_failure_domain(&self) -> Option<&str> {
        // BTreeMap iterates in sorted key order
        self.failure_domains.keys().next().map(String::as_str)
    }
}

/// Facts about the Cluster API Machine that owns the GCPMachine
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OwnerMachine {
    /// Labels on the Machine; used to detect control plane membership
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,

    /// Zone requested for this machine
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_domain: Option<String>,

    /// Kubernetes version of the machine, e.g. "v1.30.2"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl OwnerMachine {
    /// Returns true if the Machine belongs to the control plane
    pub fn is_control_plane(&self) -> bool {
        self.labels.contains_key(CONTROL_PLANE_LABEL)
    }

    /// `control-plane` or `node`
    pub fn role(&self) -> &'static str {
        if self.is_control_plane() {
            ROLE_CONTROL_PLANE
        } else {
            ROLE_NODE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_failure_domain_is_sorted() {
        let ctx = ClusterContext {
            failure_domains: BTreeMap::from([
                ("us-central1-c".to_string(), FailureDomain::default()),
                ("us-central1-a".to_string(), FailureDomain::default()),
                ("us-central1-b".to_string(), FailureDomain::default()),
            ]),
            ..Default::default()
        };
        assert_eq!(ctx.first_failure_domain(), Some("us-central1-a"));
        assert_eq!(ClusterContext::default().first_failure_domain(), None);
    }

    #[test]
    fn role_follows_control_plane_label() {
        let mut machine = OwnerMachine::default();
        assert_eq!(machine.role(), "node");

        machine
            .labels
            .insert(CONTROL_PLANE_LABEL.to_string(), String::new());
        assert!(machine.is_control_plane());
        assert_eq!(machine.role(), "control-plane");
    }

    #[test]
    fn cluster_context_from_yaml() {
        let yaml = r#"
name: workload
project: workload-proj
region: us-central1
networkName: default
failureDomains:
  us-central1-a:
    controlPlane: true
"#;
        let ctx: ClusterContext = serde_yaml::from_str(yaml).expect("context should parse");
        assert_eq!(ctx.network_name, "default");
        assert!(ctx.failure_domains["us-central1-a"].control_plane);
        assert!(ctx.additional_labels.is_empty());
    }
}
