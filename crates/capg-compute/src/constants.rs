//! Centralized constants for the capg-compute crate
//!
//! Provider literals and defaults live here so the builder, the subnet
//! grammar and the tests agree on them.

// =============================================================================
// Disk Defaults
// =============================================================================

/// Size of an additional disk when the spec leaves it unset
pub const DEFAULT_ADDITIONAL_DISK_SIZE_GB: i64 = 30;

/// Fixed size of a local SSD partition; requested sizes are ignored
pub const LOCAL_SSD_DISK_SIZE_GB: i64 = 375;

// =============================================================================
// Image Defaults
// =============================================================================

/// Image family prefix for the default node image; the version token follows
pub const DEFAULT_IMAGE_FAMILY_PREFIX: &str = "capi-ubuntu-1804-k8s-";

// =============================================================================
// Service Accounts
// =============================================================================

/// Email selecting the project's default compute service account
pub const DEFAULT_SERVICE_ACCOUNT_EMAIL: &str = "default";

/// Scope granting access to all Google Cloud APIs
pub const CLOUD_PLATFORM_SCOPE: &str = "https://www.googleapis.com/auth/cloud-platform";

// =============================================================================
// Networking
// =============================================================================

/// Marker introducing the alias block inside a subnet spec
pub const ALIAS_MARKER: &str = ",aliases=";

/// Separator between alias entries
pub const ALIAS_ENTRY_SEPARATOR: char = ';';

/// Separator between an alias range name and its CIDR
pub const ALIAS_NAME_SEPARATOR: char = ':';

/// Access config type for an ephemeral external address
pub const ONE_TO_ONE_NAT: &str = "ONE_TO_ONE_NAT";

/// Access config name for an ephemeral external address
pub const EXTERNAL_NAT_NAME: &str = "External NAT";

// =============================================================================
// Naming
// =============================================================================

/// Role segment used in control plane instance group names
pub const API_SERVER_ROLE_TAG_VALUE: &str = "apiserver";

/// Scheme of Compute Engine provider IDs
pub const PROVIDER_ID_SCHEME: &str = "gce://";
