use shared::api::{
    DescribeContainerInstancesRequest, ListContainerInstancesRequest, PAGE_SIZE,
    RunInstancesRequest, RunInstancesResponse, TerminateInstancesResponse,
};
use shared::models::{ContainerInstance, ContainerInstanceMap};

use super::{DESCRIBE_BATCH, PilotError, collect_pages, merge_described, merge_into};
use crate::client::{Ec2Api, EcsApi};
use crate::config::LaunchConfig;

pub async fn get_container_instances(
    ecs: &dyn EcsApi,
    cluster: &str,
) -> Result<Vec<String>, PilotError> {
    let arns = collect_pages(move |next_token| {
        ecs.list_container_instances(ListContainerInstancesRequest {
            cluster: cluster.to_string(),
            max_results: Some(PAGE_SIZE),
            next_token,
        })
    })
    .await?;
    Ok(arns)
}

pub async fn get_container_instance_description(
    ecs: &dyn EcsApi,
    cluster: &str,
    container_arn: &str,
) -> Result<ContainerInstanceMap, PilotError> {
    let resp = ecs
        .describe_container_instances(DescribeContainerInstancesRequest {
            cluster: cluster.to_string(),
            container_instances: vec![container_arn.to_string()],
        })
        .await?;
    Ok(merge_described(resp.container_instances, resp.failures))
}

/// Describes every container instance of a cluster.
///
/// An empty cluster yields an empty map without a describe call, which the remote
/// rejects when given no identifiers.
pub async fn get_all_container_instance_descriptions(
    ecs: &dyn EcsApi,
    cluster: &str,
) -> Result<ContainerInstanceMap, PilotError> {
    let arns = get_container_instances(ecs, cluster).await?;

    let mut map = ContainerInstanceMap::new();
    for batch in arns.chunks(DESCRIBE_BATCH) {
        let resp = ecs
            .describe_container_instances(DescribeContainerInstancesRequest {
                cluster: cluster.to_string(),
                container_instances: batch.to_vec(),
            })
            .await?;
        merge_into(&mut map, resp.container_instances, resp.failures);
    }
    Ok(map)
}

/// Host instance ids of every successfully described container instance.
pub fn ec2_instance_ids(map: &ContainerInstanceMap) -> Vec<String> {
    map.values()
        .filter_map(|d| d.record.as_ref())
        .filter_map(|ci| ci.ec2_instance_id.clone())
        .collect()
}

fn find_instance_id(instances: &[ContainerInstance], container_arn: &str) -> Option<String> {
    instances
        .iter()
        .filter(|ci| ci.container_instance_arn.as_deref() == Some(container_arn))
        .find_map(|ci| ci.ec2_instance_id.clone())
}

/// Terminates the host behind a container instance.
///
/// The host id is resolved with a describe call first; when it cannot be resolved no
/// termination is attempted.
pub async fn terminate_container_instance(
    ecs: &dyn EcsApi,
    ec2: &dyn Ec2Api,
    cluster: &str,
    container_arn: &str,
) -> Result<TerminateInstancesResponse, PilotError> {
    let resp = ecs
        .describe_container_instances(DescribeContainerInstancesRequest {
            cluster: cluster.to_string(),
            container_instances: vec![container_arn.to_string()],
        })
        .await?;

    let Some(instance_id) = find_instance_id(&resp.container_instances, container_arn) else {
        return Err(PilotError::InstanceIdNotFound {
            container_arn: container_arn.to_string(),
        });
    };

    tracing::info!(%container_arn, %instance_id, "Terminating container instance host");
    Ok(ec2.terminate_instances(vec![instance_id]).await?)
}

/// Launches one host that registers itself into `cluster` on boot.
pub async fn launch_container_instance(
    ec2: &dyn Ec2Api,
    cluster: &str,
    launch: &LaunchConfig,
) -> Result<RunInstancesResponse, PilotError> {
    let image_id = launch.image_id.clone().ok_or_else(|| {
        PilotError::Config(
            "no image configured for new container instances, set ECS_PILOT_AMI".to_string(),
        )
    })?;

    let req = RunInstancesRequest {
        image_id,
        instance_type: launch.instance_type.clone(),
        iam_instance_profile: launch.instance_profile.clone(),
        key_name: launch.key_name.clone(),
        security_group_ids: launch.security_group.iter().cloned().collect(),
        user_data: Some(format!(
            "#!/bin/bash\necho ECS_CLUSTER={} >> /etc/ecs/ecs.config\n",
            cluster
        )),
    };
    let resp = ec2.run_instances(req).await?;
    tracing::info!(%cluster, instances=?resp.instance_ids, "Launched container instance");
    Ok(resp)
}
