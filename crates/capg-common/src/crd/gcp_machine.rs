//! GCPMachine CRD: the declarative description of one Compute Engine instance
//!
//! Reference: <https://github.com/kubernetes-sigs/cluster-api-provider-gcp>

use std::collections::BTreeMap;

use k8s_openapi::api::core::v1::NodeAddress;
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::types::{
    AttachedDiskSpec, DiskType, FeaturePolicy, HostMaintenancePolicy, InstanceStatus,
    MetadataItem, ServiceAccount, ShieldedInstanceConfigSpec,
};

/// GCPMachine describes a single Compute Engine instance backing a Cluster API Machine.
///
/// Example:
/// ```yaml
/// apiVersion: infrastructure.cluster.x-k8s.io/v1beta1
/// kind: GCPMachine
/// metadata:
///   name: workload-md-0-abcde
/// spec:
///   instanceType: n2-standard-4
///   subnet: projects/host-proj/regions/us-central1/subnetworks/nodes,aliases=pods:10.8.0.0/24
///   rootDeviceType: pd-ssd
///   additionalDisks:
///     - deviceType: local-ssd
/// ```
#[derive(CustomResource, Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[kube(
    group = "infrastructure.cluster.x-k8s.io",
    version = "v1beta1",
    kind = "GCPMachine",
    root = "GcpMachine",
    namespaced,
    status = "GcpMachineStatus",
    printcolumn = r#"{"name":"InstanceType","type":"string","jsonPath":".spec.instanceType"}"#,
    printcolumn = r#"{"name":"State","type":"string","jsonPath":".status.instanceState"}"#,
    printcolumn = r#"{"name":"Ready","type":"boolean","jsonPath":".status.ready"}"#,
    printcolumn = r#"{"name":"ProviderID","type":"string","jsonPath":".spec.providerID"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct GcpMachineSpec {
    /// Machine type, e.g. "n2-standard-4"
    pub instance_type: String,

    /// Subnetwork to attach the instance to, with optional alias IP ranges.
    ///
    /// Format: `<name-or-path>[,aliases=<entry>[;<entry>...]]` where each entry
    /// is `<cidr>` or `<range-name>:<cidr>`. A path of the form
    /// `projects/<host-project>/regions/<region>/subnetworks/<name>` selects a
    /// Shared VPC subnetwork owned by another project.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subnet: Option<String>,

    /// Unique identifier of the instance, `gce://<project>/<zone>/<name>`
    #[serde(
        default,
        rename = "providerID",
        skip_serializing_if = "Option::is_none"
    )]
    pub provider_id: Option<String>,

    /// Full reference to an image family; takes precedence over the default image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_family: Option<String>,

    /// Full reference to an image; takes precedence over `imageFamily`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Labels applied to the instance in addition to the cluster's labels
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub additional_labels: BTreeMap<String, String>,

    /// Metadata items exposed through the metadata server, in order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub additional_metadata: Vec<MetadataItem>,

    /// Attach an ephemeral external IP to the instance
    #[serde(default, rename = "publicIP", skip_serializing_if = "Option::is_none")]
    pub public_ip: Option<bool>,

    /// Network tags added after the cluster's own tags
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub additional_network_tags: Vec<String>,

    /// Boot disk size in GB; provider default when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_device_size: Option<i64>,

    /// Boot disk type; `pd-standard` when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_device_type: Option<DiskType>,

    /// Disks attached after the boot disk, in order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub additional_disks: Vec<AttachedDiskSpec>,

    /// Service account for the instance; the project default account otherwise
    #[serde(
        default,
        rename = "serviceAccounts",
        skip_serializing_if = "Option::is_none"
    )]
    pub service_account: Option<ServiceAccount>,

    /// Run the instance as preemptible
    #[serde(default)]
    pub preemptible: bool,

    /// Allow the instance to send and receive packets with non-matching
    /// addresses; enabled when unset
    #[serde(default, rename = "ipForwarding", skip_serializing_if = "Option::is_none")]
    pub ip_forwarding: Option<FeaturePolicy>,

    /// Shielded VM options
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shielded_instance_config: Option<ShieldedInstanceConfigSpec>,

    /// Host maintenance behaviour: `Migrate` or `Terminate`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(with = "Option<String>")]
    pub on_host_maintenance: Option<HostMaintenancePolicy>,

    /// Confidential VM (memory encryption in use)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidential_compute: Option<FeaturePolicy>,
}

/// GCPMachine status
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GcpMachineStatus {
    /// The instance exists and is running
    #[serde(default)]
    pub ready: bool,

    /// Addresses assigned to the instance
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub addresses: Vec<NodeAddress>,

    /// Lifecycle state reported by the provider
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance_state: Option<InstanceStatus>,

    /// Terminal problem reconciling the machine, machine-readable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_reason: Option<String>,

    /// Terminal problem reconciling the machine, human-readable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use kube::CustomResourceExt;

    #[test]
    fn minimal_spec_defaults() {
        let yaml = r#"
instanceType: n2-standard-2
"#;
        let spec: GcpMachineSpec = serde_yaml::from_str(yaml).expect("minimal spec should parse");
        assert_eq!(spec.instance_type, "n2-standard-2");
        assert!(spec.subnet.is_none());
        assert!(spec.root_device_size.is_none());
        assert!(!spec.preemptible);
        assert!(spec.additional_disks.is_empty());
    }

    #[test]
    fn full_spec_uses_api_field_names() {
        let yaml = r#"
instanceType: n2-standard-4
subnet: my-subnet,aliases=pods:10.0.0.0/24
providerID: gce://proj/us-central1-a/m0
publicIP: true
ipForwarding: Disabled
rootDeviceSize: 0
rootDeviceType: pd-ssd
additionalDisks:
  - deviceType: local-ssd
  - size: 100
serviceAccounts:
  email: nodes@proj.iam.gserviceaccount.com
  scopes: ["https://www.googleapis.com/auth/compute"]
onHostMaintenance: Terminate
confidentialCompute: Enabled
shieldedInstanceConfig:
  secureBoot: Enabled
additionalMetadata:
  - key: enable-oslogin
    value: "TRUE"
  - key: flag-only
"#;
        let spec: GcpMachineSpec = serde_yaml::from_str(yaml).expect("full spec should parse");
        assert_eq!(spec.provider_id.as_deref(), Some("gce://proj/us-central1-a/m0"));
        assert_eq!(spec.public_ip, Some(true));
        assert_eq!(spec.ip_forwarding, Some(FeaturePolicy::Disabled));
        // An explicit zero stays distinguishable from an absent size
        assert_eq!(spec.root_device_size, Some(0));
        assert_eq!(spec.additional_disks.len(), 2);
        assert_eq!(spec.additional_disks[0].device_type, Some(DiskType::LocalSsd));
        assert_eq!(spec.additional_disks[1].size, Some(100));
        assert_eq!(
            spec.service_account.as_ref().map(|sa| sa.scopes.len()),
            Some(1)
        );
        assert_eq!(spec.on_host_maintenance, Some(HostMaintenancePolicy::Terminate));
        assert_eq!(spec.additional_metadata[1].value, None);
    }

    #[test]
    fn serialization_round_trips_renamed_fields() {
        let spec = GcpMachineSpec {
            instance_type: "e2-medium".to_string(),
            provider_id: Some("gce://p/z/n".to_string()),
            public_ip: Some(false),
            ..Default::default()
        };
        let value = serde_json::to_value(&spec).expect("serialize spec");
        assert_eq!(value["providerID"], "gce://p/z/n");
        assert_eq!(value["publicIP"], false);
        assert!(value.get("subnet").is_none());
    }

    #[test]
    fn crd_metadata() {
        let crd = GcpMachine::crd();
        assert_eq!(crd.spec.group, "infrastructure.cluster.x-k8s.io");
        assert_eq!(crd.spec.names.kind, "GCPMachine");
        assert_eq!(crd.spec.versions[0].name, "v1beta1");
    }
}
