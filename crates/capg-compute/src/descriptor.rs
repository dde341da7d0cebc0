//! Instance creation descriptor
//!
//! Plain values in the shape of the Compute Engine `instances.insert`
//! request body. They are built once per translation and handed to the API
//! client unmodified.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Instance creation request body
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InstanceDescriptor {
    /// Instance name
    pub name: String,
    /// Zone the instance is created in
    pub zone: String,
    /// `zones/<zone>/machineTypes/<type>`
    pub machine_type: String,
    /// Network tags
    pub tags: Tags,
    /// Resource labels
    pub labels: BTreeMap<String, String>,
    /// Scheduling options
    pub scheduling: Scheduling,
    /// Whether the instance may forward packets it does not own
    pub can_ip_forward: bool,
    /// Shielded VM settings; provider default when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shielded_instance_config: Option<ShieldedInstanceConfig>,
    /// Confidential VM settings; provider default when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidential_instance_config: Option<ConfidentialInstanceConfig>,
    /// Disks, boot disk first
    pub disks: Vec<AttachedDisk>,
    /// Metadata server items
    pub metadata: Metadata,
    /// Service accounts
    pub service_accounts: Vec<ServiceAccount>,
    /// Network interfaces
    pub network_interfaces: Vec<NetworkInterface>,
}

/// Network tags
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct Tags {
    /// Tag values, in order
    pub items: Vec<String>,
}

/// Scheduling options
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Scheduling {
    /// Run as preemptible
    pub preemptible: bool,
    /// `MIGRATE` or `TERMINATE`; provider default when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_host_maintenance: Option<String>,
}

/// Shielded VM settings
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ShieldedInstanceConfig {
    /// Secure boot
    pub enable_secure_boot: bool,
    /// Virtual TPM
    pub enable_vtpm: bool,
    /// Integrity monitoring
    pub enable_integrity_monitoring: bool,
}

impl Default for ShieldedInstanceConfig {
    /// Secure boot off, vTPM and integrity monitoring on
    fn default() -> Self {
        Self {
            enable_secure_boot: false,
            enable_vtpm: true,
            enable_integrity_monitoring: true,
        }
    }
}

/// Confidential VM settings
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ConfidentialInstanceConfig {
    /// Memory encryption in use
    pub enable_confidential_compute: bool,
}

/// Persistence class of a disk
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiskCategory {
    /// Network-attached persistent disk
    Persistent,
    /// Host-local scratch disk
    Scratch,
}

/// Attachment interface of a disk
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiskInterface {
    /// SCSI
    Scsi,
    /// NVMe, required for local SSDs
    Nvme,
}

/// A disk attached at creation time
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AttachedDisk {
    /// Delete the disk together with the instance
    pub auto_delete: bool,
    /// Boot from this disk
    pub boot: bool,
    /// Persistence class; provider default when absent
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub category: Option<DiskCategory>,
    /// Attachment interface; provider default when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interface: Option<DiskInterface>,
    /// Parameters for creating the disk
    pub initialize_params: AttachedDiskInitializeParams,
}

/// Parameters for creating a new disk
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AttachedDiskInitializeParams {
    /// Size in GB; provider default when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disk_size_gb: Option<i64>,
    /// `zones/<zone>/diskTypes/<type>`
    pub disk_type: String,
    /// Image to initialize a boot disk from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_image: Option<String>,
}

/// Instance metadata
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct Metadata {
    /// Items, in spec order
    #[serde(default)]
    pub items: Vec<MetadataItem>,
}

/// One metadata key/value pair
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct MetadataItem {
    /// Key
    pub key: String,
    /// Value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// Service account and the scopes granted to it
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct ServiceAccount {
    /// Account email, or `default`
    pub email: String,
    /// OAuth scopes
    pub scopes: Vec<String>,
}

/// A network interface
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NetworkInterface {
    /// Network path
    pub network: String,
    /// Subnetwork path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subnetwork: Option<String>,
    /// External access; empty for internal-only instances
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub access_configs: Vec<AccessConfig>,
    /// Secondary ranges routed to this interface
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alias_ip_ranges: Vec<AliasIpRange>,
}

/// External access configuration
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct AccessConfig {
    /// Access type, `ONE_TO_ONE_NAT`
    #[serde(rename = "type")]
    pub type_: String,
    /// Display name
    pub name: String,
}

/// Alias IP range on a network interface
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AliasIpRange {
    /// Secondary range name; primary range when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subnetwork_range_name: Option<String>,
    /// CIDR or netmask
    pub ip_cidr_range: String,
}

impl From<&crate::subnet::AliasIpRange> for AliasIpRange {
    fn from(range: &crate::subnet::AliasIpRange) -> Self {
        Self {
            subnetwork_range_name: range.name.clone(),
            ip_cidr_range: range.cidr.clone(),
        }
    }
}
