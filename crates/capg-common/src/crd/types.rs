//! Supporting types for the GCPMachine CRD

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Persistent and local disk types offered by Compute Engine
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq, Eq, Hash)]
pub enum DiskType {
    /// Standard persistent disk (HDD)
    #[default]
    #[serde(rename = "pd-standard")]
    PdStandard,
    /// SSD persistent disk
    #[serde(rename = "pd-ssd")]
    PdSsd,
    /// Balanced persistent disk
    #[serde(rename = "pd-balanced")]
    PdBalanced,
    /// Local SSD attached to the physical host; lost on stop/terminate
    #[serde(rename = "local-ssd")]
    LocalSsd,
}

impl DiskType {
    /// The provider's name for this disk type, as used in `diskTypes/<name>` paths
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PdStandard => "pd-standard",
            Self::PdSsd => "pd-ssd",
            Self::PdBalanced => "pd-balanced",
            Self::LocalSsd => "local-ssd",
        }
    }

    /// Returns true if this disk type is a local-ephemeral device
    pub fn is_local_ephemeral(&self) -> bool {
        matches!(self, Self::LocalSsd)
    }
}

impl std::fmt::Display for DiskType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DiskType {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pd-standard" => Ok(Self::PdStandard),
            "pd-ssd" => Ok(Self::PdSsd),
            "pd-balanced" => Ok(Self::PdBalanced),
            "local-ssd" => Ok(Self::LocalSsd),
            _ => Err(crate::Error::validation(format!(
                "invalid disk type: {s}, expected one of: pd-standard, pd-ssd, pd-balanced, local-ssd"
            ))),
        }
    }
}

/// Two-state switch used by the shielded VM, IP forwarding and
/// confidential compute settings
#[derive(Clone, Copy, Debug, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub enum FeaturePolicy {
    /// Feature explicitly turned on
    Enabled,
    /// Feature explicitly turned off
    Disabled,
}

impl FeaturePolicy {
    /// Returns true for [`FeaturePolicy::Enabled`]
    pub fn is_enabled(&self) -> bool {
        matches!(self, Self::Enabled)
    }
}

/// What the provider does with the instance during host maintenance
///
/// Values outside the two documented ones are preserved verbatim so the
/// translator can report them and still derive a best-effort token.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(from = "String", into = "String")]
pub enum HostMaintenancePolicy {
    /// Live-migrate the instance to another host
    Migrate,
    /// Stop the instance during maintenance
    Terminate,
    /// A value the API does not document
    Unknown(String),
}

impl HostMaintenancePolicy {
    /// The value as written in the resource
    pub fn as_str(&self) -> &str {
        match self {
            Self::Migrate => "Migrate",
            Self::Terminate => "Terminate",
            Self::Unknown(raw) => raw,
        }
    }
}

impl From<String> for HostMaintenancePolicy {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Migrate" => Self::Migrate,
            "Terminate" => Self::Terminate,
            _ => Self::Unknown(value),
        }
    }
}

impl From<HostMaintenancePolicy> for String {
    fn from(value: HostMaintenancePolicy) -> Self {
        match value {
            HostMaintenancePolicy::Unknown(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for HostMaintenancePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An additional disk attached to the instance
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AttachedDiskSpec {
    /// Disk type; `pd-standard` when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_type: Option<DiskType>,

    /// Size in GB; 30 when unset. Ignored for `local-ssd`, which is always 375.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<i64>,
}

/// A key/value pair exposed through the instance metadata server
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub struct MetadataItem {
    /// Metadata key
    pub key: String,

    /// Metadata value; a key without a value is allowed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// Service account attached to the instance
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub struct ServiceAccount {
    /// Service account email
    pub email: String,

    /// OAuth scopes granted to the account
    #[serde(default)]
    pub scopes: Vec<String>,
}

/// Shielded VM options
///
/// Each unset sub-setting keeps the baseline: secure boot off, vTPM on,
/// integrity monitoring on.
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ShieldedInstanceConfigSpec {
    /// Verify the digital signature of all boot components
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secure_boot: Option<FeaturePolicy>,

    /// Virtualized trusted platform module for measured boot
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub virtualized_trusted_platform_module: Option<FeaturePolicy>,

    /// Compare boot measurements against the integrity policy baseline
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub integrity_monitoring: Option<FeaturePolicy>,
}

/// Lifecycle state reported by Compute Engine for an instance
#[derive(Clone, Copy, Debug, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InstanceStatus {
    /// Resources are being allocated
    Provisioning,
    /// Resources are acquired and the instance is preparing for first boot
    Staging,
    /// The instance is booting up or running
    Running,
    /// The instance is being stopped
    Stopping,
    /// The instance is being suspended
    Suspending,
    /// The instance is suspended
    Suspended,
    /// The instance was shut down or encountered a failure
    Terminated,
}
