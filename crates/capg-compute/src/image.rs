//! Boot image selection
//!
//! An explicit image wins over an image family; without either the machine
//! boots the default node image family for its Kubernetes minor version.

use std::borrow::Cow;

use capg_common::crd::GcpMachineSpec;
use semver::Version;

use crate::constants::DEFAULT_IMAGE_FAMILY_PREFIX;
use crate::paths::image_family_path;

/// Reduces a version string to its `vMAJOR.MINOR` prefix
///
/// Injected into the builder so image selection can be tested without
/// depending on a particular version parser.
pub trait VersionNormalizer {
    /// `vMAJOR.MINOR`, or `None` if the version is not understood
    fn major_minor(&self, version: &str) -> Option<String>;
}

impl<F> VersionNormalizer for F
where
    F: Fn(&str) -> Option<String>,
{
    fn major_minor(&self, version: &str) -> Option<String> {
        self(version)
    }
}

/// Semantic version normalizer with a mandatory `v` prefix
///
/// `v1.30.2` and `v1.30.2-rc.1+build.5` give `v1.30`; the shorthands `v1`
/// and `v1.30` are accepted and give `v1.0` and `v1.30`.
#[derive(Clone, Copy, Debug, Default)]
pub struct SemverMajorMinor;

impl VersionNormalizer for SemverMajorMinor {
    fn major_minor(&self, version: &str) -> Option<String> {
        let rest = version.strip_prefix('v')?;
        let parsed = Version::parse(&pad_shorthand(rest)).ok()?;
        Some(format!("v{}.{}", parsed.major, parsed.minor))
    }
}

/// Expand `N` and `N.M` to `N.0.0` and `N.M.0`
///
/// Only a bare numeric core is padded; `1.30-rc.1` stays as is and fails to parse.
fn pad_shorthand(core: &str) -> Cow<'_, str> {
    if !core.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return Cow::Borrowed(core);
    }
    match core.matches('.').count() {
        0 => Cow::Owned(format!("{core}.0.0")),
        1 => Cow::Owned(format!("{core}.0")),
        _ => Cow::Borrowed(core),
    }
}

/// Default image family name for a Kubernetes version
///
/// Dots in the normalized version become hyphens: `v1.30.2` gives
/// `capi-ubuntu-1804-k8s-v1-30`. A missing or unparsable version leaves the
/// version token empty.
pub fn default_image_family(version: Option<&str>, normalizer: &dyn VersionNormalizer) -> String {
    let token = version
        .and_then(|v| normalizer.major_minor(v))
        .unwrap_or_default()
        .replace('.', "-");
    format!("{DEFAULT_IMAGE_FAMILY_PREFIX}{token}")
}

/// Source image for the boot disk
pub fn source_image(
    project: &str,
    spec: &GcpMachineSpec,
    version: Option<&str>,
    normalizer: &dyn VersionNormalizer,
) -> String {
    if let Some(image) = &spec.image {
        return image.clone();
    }
    if let Some(family) = &spec.image_family {
        return family.clone();
    }
    image_family_path(project, &default_image_family(version, normalizer))
}
