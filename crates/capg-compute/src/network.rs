//! Network and subnetwork resolution, including Shared VPC
//!
//! In a Shared VPC the subnetwork, and therefore the network, belongs to a
//! host project while the instance lives in the cluster's service project.
//! A subnet path naming another project moves the network path there too.

use capg_common::ClusterContext;

use crate::paths::{network_path, subnetwork_path};
use crate::subnet::{AliasIpRange, SubnetLocator, SubnetReference};

/// Network attachment of the instance's primary interface
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NetworkTopology {
    /// `projects/<project>/global/networks/<network>`
    pub network: String,
    /// Subnetwork path; absent when the machine has no subnet spec
    pub subnetwork: Option<String>,
    /// Alias ranges for the interface
    pub alias_ranges: Vec<AliasIpRange>,
}

/// Resolve the network and subnetwork paths for a machine
pub fn resolve_topology(
    cluster: &ClusterContext,
    subnet: Option<&SubnetReference>,
) -> NetworkTopology {
    let Some(subnet) = subnet else {
        return NetworkTopology {
            network: network_path(&cluster.project, &cluster.network_name),
            subnetwork: None,
            alias_ranges: Vec::new(),
        };
    };

    let network_project = match subnet.project.as_deref() {
        Some(host) if host != cluster.project => host,
        _ => cluster.project.as_str(),
    };

    let subnetwork = match &subnet.locator {
        SubnetLocator::Path(path) => path.clone(),
        SubnetLocator::Name(name) => subnetwork_path(&cluster.region, name),
    };

    NetworkTopology {
        network: network_path(network_project, &cluster.network_name),
        subnetwork: Some(subnetwork),
        alias_ranges: subnet.alias_ranges.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cluster() -> ClusterContext {
        ClusterContext {
            name: "workload".to_string(),
            project: "workload-proj".to_string(),
            region: "us-central1".to_string(),
            network_name: "shared-net".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn no_subnet_uses_cluster_network() {
        let topology = resolve_topology(&cluster(), None);
        assert_eq!(
            topology.network,
            "projects/workload-proj/global/networks/shared-net"
        );
        assert_eq!(topology.subnetwork, None);
        assert!(topology.alias_ranges.is_empty());
    }

    #[test]
    fn shared_vpc_moves_network_to_host_project() {
        let raw = "projects/host-proj/regions/us-central1/subnetworks/my-subnet";
        let subnet = SubnetReference::parse(raw).expect("should parse");
        let topology = resolve_topology(&cluster(), Some(&subnet));
        assert_eq!(topology.network, "projects/host-proj/global/networks/shared-net");
        assert_eq!(topology.subnetwork.as_deref(), Some(raw));
    }

    #[test]
    fn same_project_path_keeps_default_network() {
        let raw = "projects/workload-proj/regions/us-central1/subnetworks/my-subnet";
        let subnet = SubnetReference::parse(raw).expect("should parse");
        let topology = resolve_topology(&cluster(), Some(&subnet));
        assert_eq!(
            topology.network,
            "projects/workload-proj/global/networks/shared-net"
        );
        assert_eq!(topology.subnetwork.as_deref(), Some(raw));
    }

    #[test]
    fn bare_name_is_resolved_in_cluster_region() {
        let subnet = SubnetReference::parse("my-subnet,aliases=rangeA:10.0.0.0/24;10.1.0.0/24")
            .expect("should parse");
        let topology = resolve_topology(&cluster(), Some(&subnet));
        assert_eq!(
            topology.subnetwork.as_deref(),
            Some("regions/us-central1/subnetworks/my-subnet")
        );
        assert_eq!(topology.alias_ranges.len(), 2);
        assert_eq!(topology.alias_ranges[0].name.as_deref(), Some("rangeA"));
        assert_eq!(topology.alias_ranges[1].name, None);
    }

    #[test]
    fn path_without_project_is_used_verbatim() {
        let subnet = SubnetReference::parse("regions/us-east1/subnetworks/edge").expect("parse");
        let topology = resolve_topology(&cluster(), Some(&subnet));
        assert_eq!(
            topology.subnetwork.as_deref(),
            Some("regions/us-east1/subnetworks/edge")
        );
        assert_eq!(
            topology.network,
            "projects/workload-proj/global/networks/shared-net"
        );
    }
}
