//! Subnet spec grammar
//!
//! A GCPMachine names its subnetwork, and optionally the alias IP ranges of
//! its network interface, in a single string:
//!
//! ```text
//! subnet      = locator [ ",aliases=" alias-block ]
//! locator     = name | "projects/" project "/regions/" region "/subnetworks/" name
//! alias-block = entry *( ";" entry )
//! entry       = cidr | range-name ":" cidr
//! ```
//!
//! Any other text after a `,` in the locator is dropped.
//! Parsing either yields a complete [`SubnetReference`] or one of the subnet
//! grammar errors; there is no partial result.

use capg_common::{Error, Result};

use crate::constants::{ALIAS_ENTRY_SEPARATOR, ALIAS_MARKER, ALIAS_NAME_SEPARATOR};

/// A secondary range attached to the network interface
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AliasIpRange {
    /// Name of the subnetwork secondary range; the primary range when `None`
    pub name: Option<String>,
    /// CIDR, or a bare netmask such as `/24` to let the provider allocate
    pub cidr: String,
}

/// How the subnetwork was named
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubnetLocator {
    /// Bare subnetwork name, resolved against the cluster's region
    Name(String),
    /// Path containing `/`, used verbatim
    Path(String),
}

impl SubnetLocator {
    /// The locator text
    pub fn as_str(&self) -> &str {
        match self {
            Self::Name(s) | Self::Path(s) => s,
        }
    }
}

/// Parsed form of a GCPMachine subnet spec
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubnetReference {
    /// Project named by a `projects/<project>/...` path
    pub project: Option<String>,
    /// Subnetwork name or path, alias block removed
    pub locator: SubnetLocator,
    /// Alias ranges in the order written
    pub alias_ranges: Vec<AliasIpRange>,
}

impl SubnetReference {
    /// Parse an optional subnet spec
    ///
    /// An absent or empty spec means the machine uses the cluster network
    /// without a custom subnetwork.
    pub fn parse_optional(raw: Option<&str>) -> Result<Option<Self>> {
        match raw {
            None | Some("") => Ok(None),
            Some(raw) => Self::parse(raw).map(Some),
        }
    }

    /// Parse a subnet spec
    pub fn parse(raw: &str) -> Result<Self> {
        if raw.matches(ALIAS_MARKER).count() > 1 {
            return Err(Error::malformed_subnet(
                raw,
                "contains multiple alias range definitions",
            ));
        }

        let (locator, alias_block) = match raw.split_once(ALIAS_MARKER) {
            Some((locator, block)) => (locator, Some(block)),
            None => (raw, None),
        };

        // The bare name or path ends at the first ','
        let locator = locator.split_once(',').map_or(locator, |(head, _)| head);
        if locator.is_empty() {
            return Err(Error::malformed_subnet(raw, "missing subnetwork name"));
        }

        let (locator, project) = if locator.contains('/') {
            (
                SubnetLocator::Path(locator.to_string()),
                project_from_path(locator),
            )
        } else {
            (SubnetLocator::Name(locator.to_string()), None)
        };

        let alias_ranges = match alias_block {
            Some(block) => parse_alias_block(raw, block)?,
            None => Vec::new(),
        };

        Ok(Self {
            project,
            locator,
            alias_ranges,
        })
    }
}

impl std::str::FromStr for SubnetReference {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Project segment of `projects/<project>/...`, if the path starts that way
fn project_from_path(path: &str) -> Option<String> {
    let mut parts = path.split('/');
    match (parts.next(), parts.next()) {
        (Some("projects"), Some(project)) if !project.is_empty() => Some(project.to_string()),
        _ => None,
    }
}

fn parse_alias_block(raw: &str, block: &str) -> Result<Vec<AliasIpRange>> {
    // Anything after the alias block would otherwise be read as part of the last CIDR
    if block.contains(',') {
        return Err(Error::malformed_subnet(
            raw,
            "unexpected ',' after alias range definitions",
        ));
    }

    let ranges = block
        .split(ALIAS_ENTRY_SEPARATOR)
        .filter(|entry| !entry.is_empty())
        .map(|entry| parse_alias_entry(raw, entry))
        .collect::<Result<Vec<_>>>()?;

    if ranges.is_empty() {
        return Err(Error::empty_alias_result(raw));
    }
    Ok(ranges)
}

fn parse_alias_entry(raw: &str, entry: &str) -> Result<AliasIpRange> {
    let parts: Vec<&str> = entry.split(ALIAS_NAME_SEPARATOR).collect();
    let (name, cidr) = match parts.as_slice() {
        [cidr] => (None, *cidr),
        [name, cidr] => ((!name.is_empty()).then(|| name.to_string()), *cidr),
        _ => {
            return Err(Error::malformed_alias(
                raw,
                entry,
                "expected '<cidr>' or '<name>:<cidr>'",
            ))
        }
    };

    if cidr.is_empty() {
        return Err(Error::malformed_alias(raw, entry, "missing CIDR"));
    }

    Ok(AliasIpRange {
        name,
        cidr: cidr.to_string(),
    })
}
