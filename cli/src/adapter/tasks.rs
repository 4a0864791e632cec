use std::sync::Arc;

use shared::api::{
    DescribeTasksRequest, ListTasksRequest, PAGE_SIZE, RunTaskRequest, RunTaskResponse,
    StopTaskRequest,
};
use shared::models::{Task, TaskMap};

use super::waiter::{TaskState, WaitHandle, WaitPolicy};
use super::{DESCRIBE_BATCH, PilotError, collect_pages, merge_into};
use crate::client::{ApiError, EcsApi};

pub async fn list_tasks(ecs: &dyn EcsApi, cluster: &str) -> Result<Vec<String>, PilotError> {
    let arns = collect_pages(move |next_token| {
        ecs.list_tasks(ListTasksRequest {
            cluster: cluster.to_string(),
            max_results: Some(PAGE_SIZE),
            next_token,
        })
    })
    .await?;
    Ok(arns)
}

/// Describes the given tasks in batches. No call is made for an empty list.
pub async fn describe_tasks(
    ecs: &dyn EcsApi,
    cluster: &str,
    task_arns: &[String],
) -> Result<TaskMap, PilotError> {
    let mut map = TaskMap::new();
    for batch in task_arns.chunks(DESCRIBE_BATCH) {
        let resp = ecs
            .describe_tasks(DescribeTasksRequest {
                cluster: cluster.to_string(),
                tasks: batch.to_vec(),
            })
            .await?;
        merge_into(&mut map, resp.tasks, resp.failures);
    }
    Ok(map)
}

pub async fn get_all_task_descriptions(
    ecs: &dyn EcsApi,
    cluster: &str,
) -> Result<TaskMap, PilotError> {
    let arns = list_tasks(ecs, cluster).await?;
    describe_tasks(ecs, cluster, &arns).await
}

/// Starts one copy of `task_definition` on `cluster`.
pub async fn run_task(
    ecs: &dyn EcsApi,
    cluster: &str,
    task_definition: &str,
) -> Result<RunTaskResponse, PilotError> {
    let resp = ecs
        .run_task(RunTaskRequest {
            cluster: cluster.to_string(),
            task_definition: task_definition.to_string(),
            count: 1,
        })
        .await?;
    tracing::info!(
        %cluster,
        %task_definition,
        started = resp.tasks.len(),
        failed = resp.failures.len(),
        "Ran task"
    );
    Ok(resp)
}

pub async fn stop_task(ecs: &dyn EcsApi, cluster: &str, task_arn: &str) -> Result<Task, PilotError> {
    let resp = ecs
        .stop_task(StopTaskRequest {
            cluster: cluster.to_string(),
            task: task_arn.to_string(),
            reason: None,
        })
        .await?;
    tracing::info!(%cluster, %task_arn, "Stop requested");
    resp.task
        .ok_or_else(|| ApiError::Decode("StopTask returned no task".to_string()).into())
}

pub fn on_task_running(
    ecs: Arc<dyn EcsApi>,
    cluster: &str,
    task_arns: Vec<String>,
    policy: WaitPolicy,
) -> WaitHandle {
    WaitHandle::spawn(ecs, cluster, task_arns, TaskState::Running, policy)
}

pub fn on_task_stopped(
    ecs: Arc<dyn EcsApi>,
    cluster: &str,
    task_arns: Vec<String>,
    policy: WaitPolicy,
) -> WaitHandle {
    WaitHandle::spawn(ecs, cluster, task_arns, TaskState::Stopped, policy)
}
