//! Common types for the GCP machine translator: CRDs, cluster context, labels, errors

#![deny(missing_docs)]

pub mod context;
pub mod crd;
pub mod error;
pub mod labels;
pub mod telemetry;

pub use context::{ClusterContext, FailureDomain, OwnerMachine};
pub use error::Error;

/// Result type alias using our custom Error type
pub type Result<T> = std::result::Result<T, Error>;
