//! Boot and additional disk specs

use capg_common::crd::{AttachedDiskSpec, DiskType, GcpMachineSpec};

use crate::constants::{DEFAULT_ADDITIONAL_DISK_SIZE_GB, LOCAL_SSD_DISK_SIZE_GB};
use crate::descriptor::{AttachedDisk, AttachedDiskInitializeParams, DiskCategory, DiskInterface};
use crate::paths::disk_type_path;

/// Boot disk, initialized from `source_image` and deleted with the instance
pub fn boot_disk(zone: &str, spec: &GcpMachineSpec, source_image: String) -> AttachedDisk {
    let disk_type = spec.root_device_type.unwrap_or_default();
    AttachedDisk {
        auto_delete: true,
        boot: true,
        category: None,
        interface: None,
        initialize_params: AttachedDiskInitializeParams {
            disk_size_gb: spec.root_device_size,
            disk_type: disk_type_path(zone, disk_type.as_str()),
            source_image: Some(source_image),
        },
    }
}

/// One additional disk
///
/// Local SSDs ignore the requested size and are always attached as
/// 375 GB NVMe scratch disks.
pub fn additional_disk(zone: &str, spec: &AttachedDiskSpec) -> AttachedDisk {
    let disk_type: DiskType = spec.device_type.unwrap_or_default();
    let mut disk = AttachedDisk {
        auto_delete: true,
        boot: false,
        category: None,
        interface: None,
        initialize_params: AttachedDiskInitializeParams {
            disk_size_gb: Some(spec.size.unwrap_or(DEFAULT_ADDITIONAL_DISK_SIZE_GB)),
            disk_type: disk_type_path(zone, disk_type.as_str()),
            source_image: None,
        },
    };

    if disk_type.is_local_ephemeral() {
        disk.category = Some(DiskCategory::Scratch);
        disk.interface = Some(DiskInterface::Nvme);
        disk.initialize_params.disk_size_gb = Some(LOCAL_SSD_DISK_SIZE_GB);
    }
    disk
}

/// All additional disks, in spec order
pub fn additional_disks(zone: &str, specs: &[AttachedDiskSpec]) -> Vec<AttachedDisk> {
    specs.iter().map(|spec| additional_disk(zone, spec)).collect()
}
