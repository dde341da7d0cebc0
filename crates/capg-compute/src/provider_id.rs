//! Compute Engine provider IDs: `gce://<project>/<zone>/<instance>`

use capg_common::{Error, Result};

use crate::constants::PROVIDER_ID_SCHEME;

/// Identifies an instance to Kubernetes and Cluster API
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProviderId {
    /// Project owning the instance
    pub project: String,
    /// Zone of the instance
    pub zone: String,
    /// Instance name
    pub name: String,
}

impl ProviderId {
    /// Build a provider ID, rejecting empty parts
    pub fn new(
        project: impl Into<String>,
        zone: impl Into<String>,
        name: impl Into<String>,
    ) -> Result<Self> {
        let id = Self {
            project: project.into(),
            zone: zone.into(),
            name: name.into(),
        };
        for (part, value) in [("project", &id.project), ("zone", &id.zone), ("name", &id.name)] {
            if value.is_empty() {
                return Err(Error::validation(format!("provider ID requires a {part}")));
            }
        }
        Ok(id)
    }

    /// Parse `gce://<project>/<zone>/<instance>`
    pub fn parse(s: &str) -> Result<Self> {
        let rest = s.strip_prefix(PROVIDER_ID_SCHEME).ok_or_else(|| {
            Error::validation(format!(
                "invalid provider ID '{s}': expected prefix {PROVIDER_ID_SCHEME}"
            ))
        })?;
        match rest.split('/').collect::<Vec<_>>().as_slice() {
            [project, zone, name] => Self::new(*project, *zone, *name),
            _ => Err(Error::validation(format!(
                "invalid provider ID '{s}': expected {PROVIDER_ID_SCHEME}<project>/<zone>/<name>"
            ))),
        }
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{PROVIDER_ID_SCHEME}{}/{}/{}",
            self.project, self.zone, self.name
        )
    }
}

impl std::str::FromStr for ProviderId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
