//! Machine scope: everything the translator may read for one machine
//!
//! A scope borrows an immutable snapshot of the cluster, the owning Machine
//! and the GCPMachine. Deriving values from it never mutates anything, so
//! one scope per machine can be used from any number of threads.

use capg_common::crd::{GcpMachine, GcpMachineSpec};
use capg_common::{ClusterContext, OwnerMachine, Result};
use kube::ResourceExt;

use crate::constants::API_SERVER_ROLE_TAG_VALUE;
use crate::provider_id::ProviderId;

/// Read-only view of one machine and its cluster
#[derive(Clone, Copy, Debug)]
pub struct MachineScope<'a> {
    cluster: &'a ClusterContext,
    machine: &'a OwnerMachine,
    gcp_machine: &'a GcpMachine,
}

impl<'a> MachineScope<'a> {
    /// Create a scope over the given snapshot
    pub fn new(
        cluster: &'a ClusterContext,
        machine: &'a OwnerMachine,
        gcp_machine: &'a GcpMachine,
    ) -> Self {
        Self {
            cluster,
            machine,
            gcp_machine,
        }
    }

    /// Cluster facts
    pub fn cluster(&self) -> &'a ClusterContext {
        self.cluster
    }

    /// Owning Machine facts
    pub fn machine(&self) -> &'a OwnerMachine {
        self.machine
    }

    /// GCPMachine spec
    pub fn spec(&self) -> &'a GcpMachineSpec {
        &self.gcp_machine.spec
    }

    /// GCPMachine name, also used as the instance name
    pub fn name(&self) -> String {
        self.gcp_machine.name_any()
    }

    /// GCPMachine namespace
    pub fn namespace(&self) -> Option<String> {
        self.gcp_machine.namespace()
    }

    /// Project owning the instance
    pub fn project(&self) -> &'a str {
        &self.cluster.project
    }

    /// Zone for the instance
    ///
    /// The Machine's failure domain if set, else the first of the cluster's
    /// failure domains in sorted order, else empty.
    pub fn zone(&self) -> &'a str {
        self.machine
            .failure_domain
            .as_deref()
            .or_else(|| self.cluster.first_failure_domain())
            .unwrap_or_default()
    }

    /// Returns true if the Machine belongs to the control plane
    pub fn is_control_plane(&self) -> bool {
        self.machine.is_control_plane()
    }

    /// `control-plane` or `node`
    pub fn role(&self) -> &'static str {
        self.machine.role()
    }

    /// Kubernetes version of the Machine
    pub fn version(&self) -> Option<&'a str> {
        self.machine.version.as_deref()
    }

    /// Name of the unmanaged instance group fronting control plane instances in this zone
    pub fn control_plane_group_name(&self) -> String {
        format!(
            "{}-{}-{}",
            self.cluster.name,
            API_SERVER_ROLE_TAG_VALUE,
            self.zone()
        )
    }

    /// Provider ID the instance will be known by
    pub fn provider_id(&self) -> Result<ProviderId> {
        ProviderId::new(self.project(), self.zone(), self.name())
    }

    /// Instance name recorded in the spec's provider ID, if any
    ///
    /// Any `<provider>://...` ID is accepted; the instance is its last path segment.
    pub fn instance_id(&self) -> Option<String> {
        let raw = self.spec().provider_id.as_deref()?;
        let (provider, rest) = raw.split_once("://")?;
        if provider.is_empty() {
            return None;
        }
        rest.rsplit('/')
            .next()
            .filter(|id| !id.is_empty())
            .map(str::to_string)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use capg_common::context::CONTROL_PLANE_LABEL;
    use capg_common::FailureDomain;
    use rstest::rstest;
    use std::collections::BTreeMap;

    pub(crate) fn test_cluster() -> ClusterContext {
        ClusterContext {
            name: "workload".to_string(),
            project: "workload-proj".to_string(),
            region: "us-central1".to_string(),
            network_name: "default".to_string(),
            failure_domains: BTreeMap::from([
                ("us-central1-b".to_string(), FailureDomain::default()),
                ("us-central1-a".to_string(), FailureDomain::default()),
            ]),
            additional_labels: BTreeMap::new(),
        }
    }

    pub(crate) fn test_gcp_machine(name: &str) -> GcpMachine {
        let mut gcp_machine = GcpMachine::new(
            name,
            GcpMachineSpec {
                instance_type: "n2-standard-2".to_string(),
                ..Default::default()
            },
        );
        gcp_machine.metadata.namespace = Some("default".to_string());
        gcp_machine
    }

    #[test]
    fn zone_prefers_machine_failure_domain() {
        let cluster = test_cluster();
        let machine = OwnerMachine {
            failure_domain: Some("us-central1-f".to_string()),
            ..Default::default()
        };
        let gcp_machine = test_gcp_machine("m");
        let scope = MachineScope::new(&cluster, &machine, &gcp_machine);
        assert_eq!(scope.zone(), "us-central1-f");
    }

    #[test]
    fn zone_falls_back_to_first_sorted_domain() {
        let cluster = test_cluster();
        let machine = OwnerMachine::default();
        let gcp_machine = test_gcp_machine("m");
        let scope = MachineScope::new(&cluster, &machine, &gcp_machine);
        assert_eq!(scope.zone(), "us-central1-a");
    }

    #[test]
    fn zone_is_empty_without_domains() {
        let cluster = ClusterContext::default();
        let machine = OwnerMachine::default();
        let gcp_machine = test_gcp_machine("m");
        let scope = MachineScope::new(&cluster, &machine, &gcp_machine);
        assert_eq!(scope.zone(), "");
    }

    #[test]
    fn control_plane_group_and_role() {
        let cluster = test_cluster();
        let machine = OwnerMachine {
            labels: BTreeMap::from([(CONTROL_PLANE_LABEL.to_string(), String::new())]),
            ..Default::default()
        };
        let gcp_machine = test_gcp_machine("cp-0");
        let scope = MachineScope::new(&cluster, &machine, &gcp_machine);
        assert!(scope.is_control_plane());
        assert_eq!(scope.role(), "control-plane");
        assert_eq!(
            scope.control_plane_group_name(),
            "workload-apiserver-us-central1-a"
        );
    }

    #[test]
    fn provider_and_instance_ids() {
        let cluster = test_cluster();
        let machine = OwnerMachine::default();
        let mut gcp_machine = test_gcp_machine("worker-0");
        let scope = MachineScope::new(&cluster, &machine, &gcp_machine);
        assert_eq!(
            scope.provider_id().expect("valid provider id").to_string(),
            "gce://workload-proj/us-central1-a/worker-0"
        );
        assert_eq!(scope.instance_id(), None);
        assert_eq!(scope.namespace().as_deref(), Some("default"));

        gcp_machine.spec.provider_id = Some("gce://workload-proj/us-central1-a/worker-0".into());
        let scope = MachineScope::new(&cluster, &machine, &gcp_machine);
        assert_eq!(scope.instance_id().as_deref(), Some("worker-0"));

        gcp_machine.spec.provider_id = Some("not-a-provider-id".into());
        let scope = MachineScope::new(&cluster, &machine, &gcp_machine);
        assert_eq!(scope.instance_id(), None);
    }

    #[rstest]
    #[case::gce("gce://proj/us-central1-a/worker-0", Some("worker-0"))]
    #[case::other_provider("aws:///us-east-1a/i-0abc", Some("i-0abc"))]
    #[case::single_segment("gce://worker-0", Some("worker-0"))]
    #[case::trailing_slash("gce://proj/zone/", None)]
    #[case::missing_provider("://proj/zone/vm", None)]
    #[case::no_scheme("proj/zone/vm", None)]
    fn instance_id_is_last_segment(#[case] provider_id: &str, #[case] expected: Option<&str>) {
        let cluster = test_cluster();
        let machine = OwnerMachine::default();
        let mut gcp_machine = test_gcp_machine("vm");
        gcp_machine.spec.provider_id = Some(provider_id.to_string());
        let scope = MachineScope::new(&cluster, &machine, &gcp_machine);
        assert_eq!(scope.instance_id().as_deref(), expected);
    }
}
