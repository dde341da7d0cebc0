//! Label sets applied to provider resources
//!
//! Keys owned by the cluster are always written last, so user-supplied
//! labels can never take them over.

use std::collections::BTreeMap;

/// Prefix for every label key this provider owns
pub const LABEL_PREFIX: &str = "capg-";

/// Label key recording the machine role
pub const ROLE_LABEL_KEY: &str = "capg-role";

/// Value of the cluster label on resources the cluster created and deletes
pub const OWNED_LIFECYCLE: &str = "owned";

/// Label key marking ownership by a given cluster
pub fn cluster_label_key(cluster_name: &str) -> String {
    format!("{LABEL_PREFIX}cluster-{cluster_name}")
}

/// Overlay `overrides` on top of `base`; keys in `overrides` win
pub fn merge_labels(
    base: &BTreeMap<String, String>,
    overrides: &BTreeMap<String, String>,
) -> BTreeMap<String, String> {
    let mut merged = base.clone();
    merged.extend(overrides.iter().map(|(k, v)| (k.clone(), v.clone())));
    merged
}

/// Inputs for [`build_labels`]
#[derive(Clone, Debug)]
pub struct LabelParams<'a> {
    /// Owning cluster name
    pub cluster_name: &'a str,
    /// Machine role
    pub role: &'a str,
    /// User-supplied labels
    pub additional: &'a BTreeMap<String, String>,
}

/// Build the full label set for a resource
///
/// Provider label values must be lower case, so user input is lower-cased
/// before the cluster-owned keys are written over it.
pub fn build_labels(params: &LabelParams<'_>) -> BTreeMap<String, String> {
    let mut labels: BTreeMap<String, String> = params
        .additional
        .iter()
        .map(|(k, v)| (k.to_lowercase(), v.to_lowercase()))
        .collect();

    labels.insert(
        cluster_label_key(params.cluster_name),
        OWNED_LIFECYCLE.to_string(),
    );
    labels.insert(ROLE_LABEL_KEY.to_string(), params.role.to_lowercase());
    labels
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_cluster_owned_keys() {
        let additional = BTreeMap::new();
        let labels = build_labels(&LabelParams {
            cluster_name: "prod",
            role: "node",
            additional: &additional,
        });
        assert_eq!(labels.len(), 2);
        assert_eq!(labels["capg-cluster-prod"], "owned");
        assert_eq!(labels["capg-role"], "node");
    }

    #[test]
    fn user_labels_cannot_override_cluster_keys() {
        let additional = BTreeMap::from([
            ("capg-role".to_string(), "bastion".to_string()),
            ("capg-cluster-prod".to_string(), "shared".to_string()),
            ("Team".to_string(), "Infra".to_string()),
        ]);
        let labels = build_labels(&LabelParams {
            cluster_name: "prod",
            role: "control-plane",
            additional: &additional,
        });
        assert_eq!(labels["capg-role"], "control-plane");
        assert_eq!(labels["capg-cluster-prod"], "owned");
        assert_eq!(labels["team"], "infra");
    }

    #[test]
    fn merge_prefers_overrides() {
        let base = BTreeMap::from([
            ("env".to_string(), "dev".to_string()),
            ("team".to_string(), "infra".to_string()),
        ]);
        let overrides = BTreeMap::from([("env".to_string(), "prod".to_string())]);
        let merged = merge_labels(&base, &overrides);
        assert_eq!(merged["env"], "prod");
        assert_eq!(merged["team"], "infra");
    }
}
