use shared::api::{
    CreateClusterRequest, DeleteClusterRequest, DescribeClustersRequest, ListClustersRequest,
    PAGE_SIZE,
};
use shared::models::{Cluster, ClusterRef};

use super::{PilotError, collect_pages};
use crate::client::{ApiError, EcsApi};

pub async fn create_cluster(ecs: &dyn EcsApi, name: &str) -> Result<Cluster, PilotError> {
    let resp = ecs
        .create_cluster(CreateClusterRequest {
            cluster_name: name.to_string(),
        })
        .await?;
    tracing::info!(cluster=%name, "Created cluster");
    resp.cluster
        .ok_or_else(|| ApiError::Decode("CreateCluster returned no cluster".to_string()).into())
}

pub async fn delete_cluster(ecs: &dyn EcsApi, name: &str) -> Result<Cluster, PilotError> {
    let resp = ecs
        .delete_cluster(DeleteClusterRequest {
            cluster: name.to_string(),
        })
        .await?;
    tracing::info!(cluster=%name, "Deleted cluster");
    resp.cluster
        .ok_or_else(|| ApiError::Decode("DeleteCluster returned no cluster".to_string()).into())
}

pub async fn get_clusters(ecs: &dyn EcsApi) -> Result<Vec<ClusterRef>, PilotError> {
    let arns = collect_pages(move |next_token| {
        ecs.list_clusters(ListClustersRequest {
            max_results: Some(PAGE_SIZE),
            next_token,
        })
    })
    .await?;
    Ok(arns.into_iter().map(|arn| ClusterRef { arn }).collect())
}

/// Describes a single cluster by short name or ARN.
pub async fn describe_cluster(ecs: &dyn EcsApi, name: &str) -> Result<Cluster, PilotError> {
    let resp = ecs
        .describe_clusters(DescribeClustersRequest {
            clusters: vec![name.to_string()],
        })
        .await?;

    match resp.clusters.into_iter().next() {
        Some(cluster) => Ok(cluster),
        None => Err(PilotError::NotFound {
            kind: "cluster",
            id: name.to_string(),
            reason: resp
                .failures
                .first()
                .and_then(|f| f.reason.clone())
                .unwrap_or_else(|| "no description returned".to_string()),
        }),
    }
}
