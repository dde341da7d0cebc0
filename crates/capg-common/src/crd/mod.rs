//! Custom Resource Definitions consumed by the translator
//!
//! Only the infrastructure machine resource is modelled here; cluster-level
//! facts arrive through [`crate::context::ClusterContext`].

mod gcp_machine;
mod types;

pub use gcp_machine::{GcpMachine, GcpMachineSpec, GcpMachineStatus};
pub use types::{
    AttachedDiskSpec, DiskType, FeaturePolicy, HostMaintenancePolicy, InstanceStatus,
    MetadataItem, ServiceAccount, ShieldedInstanceConfigSpec,
};
