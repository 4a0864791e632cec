use serde::{Deserialize, Serialize};

/// Identifier-only projection returned by list calls.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ClusterRef {
    pub arn: String,
}

/// A cluster as described by the remote service.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Cluster {
    pub cluster_arn: Option<String>,
    pub cluster_name: Option<String>,
    pub status: Option<String>,
    pub registered_container_instances_count: Option<i64>,
    pub running_tasks_count: Option<i64>,
    pub pending_tasks_count: Option<i64>,
    pub active_services_count: Option<i64>,
}
