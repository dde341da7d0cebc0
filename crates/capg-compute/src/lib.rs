//! Translation of GCPMachine specs into Compute Engine instance descriptors
//!
//! The crate is a pure function of its inputs: a [`MachineScope`] over an
//! immutable cluster/machine snapshot goes in, an [`InstanceDescriptor`]
//! comes out. Nothing here talks to the Compute Engine API.
//!
//! ```text
//! GCPMachine.spec.subnet ──► SubnetReference ──► NetworkTopology ─┐
//! image / imageFamily / version ──► source image ──► boot disk ───┼─► InstanceDescriptor
//! additionalDisks, labels, tags, scheduling, shielded, ... ───────┘
//! ```

#![deny(missing_docs)]

pub mod builder;
pub mod constants;
pub mod descriptor;
pub mod disks;
pub mod image;
pub mod network;
pub mod paths;
pub mod provider_id;
pub mod scope;
pub mod subnet;

pub use builder::InstanceDescriptorBuilder;
pub use descriptor::InstanceDescriptor;
pub use image::{SemverMajorMinor, VersionNormalizer};
pub use network::{resolve_topology, NetworkTopology};
pub use paths::ResourcePath;
pub use provider_id::ProviderId;
pub use scope::MachineScope;
pub use subnet::{AliasIpRange, SubnetLocator, SubnetReference};
