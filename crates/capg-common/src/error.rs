//! Error types for GCP machine translation
//!
//! Errors are structured with fields to aid debugging in production.
//! Every variant is a locally detected validation failure: none of them is
//! transient, so callers decide whether to retry the whole reconciliation.

use thiserror::Error;

/// Default context value when no specific context is available
pub const UNKNOWN_CONTEXT: &str = "unknown";

/// Main error type for machine translation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// The subnet spec contains more than one alias block, or content the
    /// grammar does not allow around the alias block
    #[error("invalid subnet spec '{subnet}': {message}")]
    MalformedSubnetGrammar {
        /// The raw subnet spec as written on the GCPMachine
        subnet: String,
        /// Description of the grammar violation
        message: String,
    },

    /// A single alias range entry is not of the form `[name:]cidr`
    #[error("invalid IP alias range definition '{entry}' in subnet spec '{subnet}': {message}")]
    MalformedAliasEntry {
        /// The raw subnet spec as written on the GCPMachine
        subnet: String,
        /// The offending alias entry
        entry: String,
        /// Description of what's wrong with the entry
        message: String,
    },

    /// The alias marker was present but no ranges were parsed
    #[error("unable to parse alias IP ranges from subnet spec '{subnet}'")]
    EmptyAliasResult {
        /// The raw subnet spec as written on the GCPMachine
        subnet: String,
    },

    /// Validation error for GCPMachine specs
    #[error("validation error for {machine}: {message}")]
    Validation {
        /// Name of the machine with invalid configuration
        machine: String,
        /// Description of what's invalid
        message: String,
        /// The invalid field path (e.g., "spec.providerID")
        field: Option<String>,
    },
}

impl Error {
    /// Create a grammar error for a subnet spec
    pub fn malformed_subnet(subnet: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::MalformedSubnetGrammar {
            subnet: subnet.into(),
            message: msg.into(),
        }
    }

    /// Create an alias entry error for a subnet spec
    pub fn malformed_alias(
        subnet: impl Into<String>,
        entry: impl Into<String>,
        msg: impl Into<String>,
    ) -> Self {
        Self::MalformedAliasEntry {
            subnet: subnet.into(),
            entry: entry.into(),
            message: msg.into(),
        }
    }

    /// Create an empty alias result error for a subnet spec
    pub fn empty_alias_result(subnet: impl Into<String>) -> Self {
        Self::EmptyAliasResult {
            subnet: subnet.into(),
        }
    }

    /// Create a validation error with the given message
    ///
    /// For simple validation errors without machine context.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            machine: UNKNOWN_CONTEXT.to_string(),
            message: msg.into(),
            field: None,
        }
    }

    /// Create a validation error with machine context and field path
    pub fn validation_for_field(
        machine: impl Into<String>,
        field: impl Into<String>,
        msg: impl Into<String>,
    ) -> Self {
        Self::Validation {
            machine: machine.into(),
            message: msg.into(),
            field: Some(field.into()),
        }
    }

    /// Returns true for errors raised by the subnet grammar
    pub fn is_subnet_error(&self) -> bool {
        matches!(
            self,
            Error::MalformedSubnetGrammar { .. }
                | Error::MalformedAliasEntry { .. }
                | Error::EmptyAliasResult { .. }
        )
    }

    /// Get the raw subnet spec if this error came from the subnet grammar
    pub fn subnet(&self) -> Option<&str> {
        match self {
            Error::MalformedSubnetGrammar { subnet, .. }
            | Error::MalformedAliasEntry { subnet, .. }
            | Error::EmptyAliasResult { subnet } => Some(subnet),
            Error::Validation { .. } => None,
        }
    }
}
