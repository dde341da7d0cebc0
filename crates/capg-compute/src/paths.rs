//! Compute Engine resource paths
//!
//! Paths are `/`-joined `(collection, id)` pairs such as
//! `zones/us-central1-a/diskTypes/pd-ssd`. Nothing here validates segment
//! names; empty segments are dropped the way a path join would drop them.

/// Builder for a `/`-joined resource path
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResourcePath {
    segments: Vec<String>,
}

impl ResourcePath {
    /// Start an empty path
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a `collection/id` pair
    pub fn segment(mut self, collection: &str, id: &str) -> Self {
        self.push(collection);
        self.push(id);
        self
    }

    /// Append a single literal segment
    pub fn literal(mut self, segment: &str) -> Self {
        self.push(segment);
        self
    }

    fn push(&mut self, segment: &str) {
        let trimmed = segment.trim_matches('/');
        if !trimmed.is_empty() {
            self.segments.push(trimmed.to_string());
        }
    }

    /// Render the path
    pub fn build(&self) -> String {
        self.segments.join("/")
    }
}

impl std::fmt::Display for ResourcePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.build())
    }
}

/// Join `(collection, id)` pairs into a path
pub fn join_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> String {
    pairs
        .into_iter()
        .fold(ResourcePath::new(), |path, (collection, id)| {
            path.segment(collection, id)
        })
        .build()
}

/// `zones/<zone>/diskTypes/<disk_type>`
pub fn disk_type_path(zone: &str, disk_type: &str) -> String {
    join_pairs([("zones", zone), ("diskTypes", disk_type)])
}

/// `zones/<zone>/machineTypes/<machine_type>`
pub fn machine_type_path(zone: &str, machine_type: &str) -> String {
    join_pairs([("zones", zone), ("machineTypes", machine_type)])
}

/// `projects/<project>/global/networks/<network>`
pub fn network_path(project: &str, network: &str) -> String {
    ResourcePath::new()
        .segment("projects", project)
        .literal("global")
        .segment("networks", network)
        .build()
}

/// `regions/<region>/subnetworks/<subnetwork>`
pub fn subnetwork_path(region: &str, subnetwork: &str) -> String {
    join_pairs([("regions", region), ("subnetworks", subnetwork)])
}

/// `projects/<project>/global/images/family/<family>`
pub fn image_family_path(project: &str, family: &str) -> String {
    ResourcePath::new()
        .segment("projects", project)
        .literal("global")
        .segment("images", "family")
        .literal(family)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zone_scoped_paths() {
        assert_eq!(
            disk_type_path("us-central1-a", "pd-ssd"),
            "zones/us-central1-a/diskTypes/pd-ssd"
        );
        assert_eq!(
            machine_type_path("europe-west3-b", "n2-standard-4"),
            "zones/europe-west3-b/machineTypes/n2-standard-4"
        );
    }

    #[test]
    fn region_and_project_scoped_paths() {
        assert_eq!(
            subnetwork_path("us-central1", "my-subnet"),
            "regions/us-central1/subnetworks/my-subnet"
        );
        assert_eq!(
            network_path("workload-proj", "default"),
            "projects/workload-proj/global/networks/default"
        );
        assert_eq!(
            image_family_path("p", "capi-ubuntu-1804-k8s-v1-30"),
            "projects/p/global/images/family/capi-ubuntu-1804-k8s-v1-30"
        );
    }

    #[test]
    fn empty_segments_are_dropped() {
        assert_eq!(disk_type_path("", "pd-standard"), "zones/diskTypes/pd-standard");
        assert_eq!(join_pairs([]), "");
    }

    #[test]
    fn builder_matches_join() {
        let path = ResourcePath::new()
            .segment("zones", "z")
            .segment("instances", "vm-1");
        assert_eq!(path.to_string(), join_pairs([("zones", "z"), ("instances", "vm-1")]));
    }
}
