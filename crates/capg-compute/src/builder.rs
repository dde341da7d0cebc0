//! Instance descriptor assembly
//!
//! [`InstanceDescriptorBuilder`] turns one [`MachineScope`] into the
//! Compute Engine instance creation request. Building reads the scope only;
//! calling [`InstanceDescriptorBuilder::build`] twice yields equal
//! descriptors.

use std::collections::BTreeMap;

use capg_common::crd::HostMaintenancePolicy;
use capg_common::labels::{build_labels, merge_labels, LabelParams};
use capg_common::Result;
use tracing::{debug, debug_span, warn};

use crate::constants::{
    CLOUD_PLATFORM_SCOPE, DEFAULT_SERVICE_ACCOUNT_EMAIL, EXTERNAL_NAT_NAME, ONE_TO_ONE_NAT,
};
use crate::descriptor::{
    AccessConfig, AliasIpRange, AttachedDisk, ConfidentialInstanceConfig, InstanceDescriptor,
    Metadata, MetadataItem, NetworkInterface, Scheduling, ServiceAccount, ShieldedInstanceConfig,
    Tags,
};
use crate::disks::{additional_disks, boot_disk};
use crate::image::{source_image, SemverMajorMinor, VersionNormalizer};
use crate::network::resolve_topology;
use crate::paths::machine_type_path;
use crate::scope::MachineScope;
use crate::subnet::SubnetReference;

static DEFAULT_NORMALIZER: SemverMajorMinor = SemverMajorMinor;

/// Builds the instance creation descriptor for one machine
pub struct InstanceDescriptorBuilder<'a> {
    scope: MachineScope<'a>,
    normalizer: &'a dyn VersionNormalizer,
}

impl<'a> InstanceDescriptorBuilder<'a> {
    /// Create a builder using the semantic-version normalizer for default images
    pub fn new(scope: MachineScope<'a>) -> Self {
        Self {
            scope,
            normalizer: &DEFAULT_NORMALIZER,
        }
    }

    /// Replace the version normalizer used for the default image family
    pub fn with_version_normalizer(mut self, normalizer: &'a dyn VersionNormalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    /// The scope this builder reads from
    pub fn scope(&self) -> &MachineScope<'a> {
        &self.scope
    }

    /// Assemble the full descriptor
    ///
    /// Fails only when the subnet spec cannot be parsed.
    pub fn build(&self) -> Result<InstanceDescriptor> {
        let name = self.scope.name();
        let zone = self.scope.zone();
        let span = debug_span!("build_instance", machine = %name, zone = %zone);
        let _enter = span.enter();

        let network_interface = self.network_interface()?;
        let machine_type = machine_type_path(zone, &self.scope.spec().instance_type);
        debug!(machine_type = %machine_type, "resolved machine type");

        let mut disks = vec![self.image_disk()];
        disks.extend(self.additional_disks());

        Ok(InstanceDescriptor {
            name,
            zone: zone.to_string(),
            machine_type,
            tags: self.tags(),
            labels: self.labels(),
            scheduling: self.scheduling(),
            can_ip_forward: self.can_ip_forward(),
            shielded_instance_config: self.shielded_instance_config(),
            confidential_instance_config: self.confidential_instance_config(),
            disks,
            metadata: self.metadata(),
            service_accounts: vec![self.service_account()],
            network_interfaces: vec![network_interface],
        })
    }

    /// Boot disk with the selected source image
    pub fn image_disk(&self) -> AttachedDisk {
        let spec = self.scope.spec();
        let image = source_image(
            self.scope.project(),
            spec,
            self.scope.version(),
            self.normalizer,
        );
        debug!(image = %image, "selected boot image");
        boot_disk(self.scope.zone(), spec, image)
    }

    /// Additional disks, in spec order
    pub fn additional_disks(&self) -> Vec<AttachedDisk> {
        additional_disks(self.scope.zone(), &self.scope.spec().additional_disks)
    }

    /// Primary network interface
    ///
    /// A malformed subnet spec is an error; no partial interface is returned.
    pub fn network_interface(&self) -> Result<NetworkInterface> {
        let spec = self.scope.spec();
        let subnet = SubnetReference::parse_optional(spec.subnet.as_deref())?;
        let topology = resolve_topology(self.scope.cluster(), subnet.as_ref());
        debug!(
            network = %topology.network,
            subnetwork = ?topology.subnetwork,
            aliases = topology.alias_ranges.len(),
            "resolved network topology"
        );

        let access_configs = if spec.public_ip.unwrap_or(false) {
            vec![AccessConfig {
                type_: ONE_TO_ONE_NAT.to_string(),
                name: EXTERNAL_NAT_NAME.to_string(),
            }]
        } else {
            Vec::new()
        };

        Ok(NetworkInterface {
            network: topology.network,
            subnetwork: topology.subnetwork,
            access_configs,
            alias_ip_ranges: topology.alias_ranges.iter().map(AliasIpRange::from).collect(),
        })
    }

    /// Service account from the spec, else `default` with the cloud-platform scope
    pub fn service_account(&self) -> ServiceAccount {
        match &self.scope.spec().service_account {
            Some(sa) => ServiceAccount {
                email: sa.email.clone(),
                scopes: sa.scopes.clone(),
            },
            None => ServiceAccount {
                email: DEFAULT_SERVICE_ACCOUNT_EMAIL.to_string(),
                scopes: vec![CLOUD_PLATFORM_SCOPE.to_string()],
            },
        }
    }

    /// Metadata items, in spec order
    pub fn metadata(&self) -> Metadata {
        Metadata {
            items: self
                .scope
                .spec()
                .additional_metadata
                .iter()
                .map(|item| MetadataItem {
                    key: item.key.clone(),
                    value: item.value.clone(),
                })
                .collect(),
        }
    }

    /// Preemptibility and host maintenance behaviour
    pub fn scheduling(&self) -> Scheduling {
        let spec = self.scope.spec();
        let on_host_maintenance = spec.on_host_maintenance.as_ref().map(|policy| match policy {
            HostMaintenancePolicy::Migrate => "MIGRATE".to_string(),
            HostMaintenancePolicy::Terminate => "TERMINATE".to_string(),
            HostMaintenancePolicy::Unknown(raw) => {
                warn!(
                    machine = %self.scope.name(),
                    value = %raw,
                    "unknown onHostMaintenance value, passing it through upper-cased"
                );
                raw.to_uppercase()
            }
        });
        Scheduling {
            preemptible: spec.preemptible,
            on_host_maintenance,
        }
    }

    /// Shielded VM settings, or `None` to leave the provider default
    pub fn shielded_instance_config(&self) -> Option<ShieldedInstanceConfig> {
        let cfg = self.scope.spec().shielded_instance_config.as_ref()?;
        let mut shielded = ShieldedInstanceConfig::default();
        if cfg.secure_boot.is_some_and(|p| p.is_enabled()) {
            shielded.enable_secure_boot = true;
        }
        if cfg
            .virtualized_trusted_platform_module
            .is_some_and(|p| !p.is_enabled())
        {
            shielded.enable_vtpm = false;
        }
        if cfg.integrity_monitoring.is_some_and(|p| !p.is_enabled()) {
            shielded.enable_integrity_monitoring = false;
        }
        Some(shielded)
    }

    /// Confidential VM settings, or `None` to leave the provider default
    pub fn confidential_instance_config(&self) -> Option<ConfidentialInstanceConfig> {
        self.scope
            .spec()
            .confidential_compute
            .map(|policy| ConfidentialInstanceConfig {
                enable_confidential_compute: policy.is_enabled(),
            })
    }

    /// IP forwarding is on unless explicitly disabled
    pub fn can_ip_forward(&self) -> bool {
        self.scope
            .spec()
            .ip_forwarding
            .map_or(true, |p| p.is_enabled())
    }

    /// Additional tags, then `<cluster>-<role>`, then `<cluster>`
    pub fn tags(&self) -> Tags {
        let cluster = &self.scope.cluster().name;
        let mut items = self.scope.spec().additional_network_tags.clone();
        items.push(format!("{}-{}", cluster, self.scope.role()));
        items.push(cluster.clone());
        Tags { items }
    }

    /// Cluster and machine labels with the cluster-owned keys on top
    pub fn labels(&self) -> BTreeMap<String, String> {
        let additional = merge_labels(
            &self.scope.cluster().additional_labels,
            &self.scope.spec().additional_labels,
        );
        build_labels(&LabelParams {
            cluster_name: &self.scope.cluster().name,
            role: self.scope.role(),
            additional: &additional,
        })
    }
}
