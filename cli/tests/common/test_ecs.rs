//! Recording fake of the remote API. Holds clusters, instances, tasks and task
//! definitions in memory and logs every call so tests can assert on traffic.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use ecs_pilot::client::{ApiError, Ec2Api, EcsApi};
use futures_util::lock::Mutex;
use shared::api::{
    ClusterResponse, CreateClusterRequest, DeleteClusterRequest, DescribeClustersRequest,
    DescribeClustersResponse, DescribeContainerInstancesRequest,
    DescribeContainerInstancesResponse, DescribeTaskDefinitionRequest, DescribeTasksRequest,
    DescribeTasksResponse, InstanceStateChange, ListClustersRequest, ListClustersResponse,
    ListContainerInstancesRequest, ListContainerInstancesResponse, ListTaskDefinitionsRequest,
    ListTaskDefinitionsResponse, ListTasksRequest, ListTasksResponse,
    RegisterTaskDefinitionRequest, RunInstancesRequest, RunInstancesResponse, RunTaskRequest,
    RunTaskResponse, StopTaskRequest, StopTaskResponse, TaskDefinitionResponse,
    TerminateInstancesResponse,
};
use shared::models::{Cluster, ContainerInstance, Failure, Task, TaskDefinition};

#[derive(Debug, Clone, Default)]
pub struct TestEcs {
    pub clusters: Arc<Mutex<Vec<String>>>,
    pub instances: Arc<Mutex<Vec<ContainerInstance>>>,
    pub tasks: Arc<Mutex<BTreeMap<String, Task>>>,
    pub task_definitions: Arc<Mutex<BTreeMap<String, TaskDefinition>>>,
    /// Status newly run tasks report.
    pub run_status: Option<String>,
    pub fail_list: bool,
    /// Stop requests leave the task running until `set_task_status` moves it.
    pub slow_stop: bool,

    pub calls: Arc<Mutex<Vec<String>>>,
    pub list_tokens: Arc<Mutex<Vec<Option<String>>>>,
    pub describe_instance_calls: Arc<Mutex<Vec<Vec<String>>>>,
    pub describe_task_calls: Arc<Mutex<Vec<Vec<String>>>>,
    pub terminate_calls: Arc<Mutex<Vec<Vec<String>>>>,
    pub run_instances_calls: Arc<Mutex<Vec<RunInstancesRequest>>>,
}

pub fn cluster_arn(name: &str) -> String {
    format!("arn:aws:ecs:us-east-1:123456789012:cluster/{}", name)
}

pub fn task(arn: &str, status: &str) -> Task {
    Task {
        task_arn: Some(arn.to_string()),
        last_status: Some(status.to_string()),
        desired_status: Some("RUNNING".to_string()),
        ..Default::default()
    }
}

pub fn instance(arn: &str, host: Option<&str>) -> ContainerInstance {
    ContainerInstance {
        container_instance_arn: Some(arn.to_string()),
        ec2_instance_id: host.map(str::to_string),
        status: Some("ACTIVE".to_string()),
        ..Default::default()
    }
}

fn missing(arn: &str) -> Failure {
    Failure {
        arn: Some(arn.to_string()),
        reason: Some("MISSING".to_string()),
        detail: None,
    }
}

/// Pages `items` using the item offset as continuation token.
fn page(items: Vec<String>, max: Option<i32>, token: Option<String>) -> (Vec<String>, Option<String>) {
    let start = token.and_then(|t| t.parse::<usize>().ok()).unwrap_or(0);
    let size = max.map(|m| m as usize).unwrap_or(items.len().max(1));
    let end = (start + size).min(items.len());
    let next = (end < items.len()).then(|| end.to_string());
    (items[start.min(end)..end].to_vec(), next)
}

impl TestEcs {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn with_clusters(self, names: &[&str]) -> Self {
        *self.clusters.lock().await = names.iter().map(|n| cluster_arn(n)).collect();
        self
    }

    pub async fn with_tasks(self, tasks: Vec<Task>) -> Self {
        {
            let mut map = self.tasks.lock().await;
            for t in tasks {
                map.insert(t.task_arn.clone().unwrap_or_default(), t);
            }
        }
        self
    }

    pub async fn with_instances(self, instances: Vec<ContainerInstance>) -> Self {
        *self.instances.lock().await = instances;
        self
    }

    pub async fn set_task_status(&self, arn: &str, status: &str) {
        if let Some(t) = self.tasks.lock().await.get_mut(arn) {
            t.last_status = Some(status.to_string());
        }
    }

    async fn record(&self, op: &str) {
        self.calls.lock().await.push(op.to_string());
    }

    pub async fn count(&self, op: &str) -> usize {
        self.calls.lock().await.iter().filter(|c| *c == op).count()
    }

    fn forced() -> ApiError {
        ApiError::Service {
            status: 400,
            code: "ClientException".to_string(),
            message: "Forced error".to_string(),
        }
    }
}

#[async_trait]
impl EcsApi for TestEcs {
    async fn create_cluster(&self, req: CreateClusterRequest) -> Result<ClusterResponse, ApiError> {
        self.record("CreateCluster").await;
        let arn = cluster_arn(&req.cluster_name);
        self.clusters.lock().await.push(arn.clone());
        Ok(ClusterResponse {
            cluster: Some(Cluster {
                cluster_arn: Some(arn),
                cluster_name: Some(req.cluster_name),
                status: Some("ACTIVE".to_string()),
                ..Default::default()
            }),
        })
    }

    async fn delete_cluster(&self, req: DeleteClusterRequest) -> Result<ClusterResponse, ApiError> {
        self.record("DeleteCluster").await;
        let arn = cluster_arn(&req.cluster);
        let mut clusters = self.clusters.lock().await;
        if !clusters.contains(&arn) {
            return Err(ApiError::Service {
                status: 400,
                code: "ClusterNotFoundException".to_string(),
                message: "Cluster not found.".to_string(),
            });
        }
        clusters.retain(|c| *c != arn);
        Ok(ClusterResponse {
            cluster: Some(Cluster {
                cluster_arn: Some(arn),
                cluster_name: Some(req.cluster),
                status: Some("INACTIVE".to_string()),
                ..Default::default()
            }),
        })
    }

    async fn list_clusters(
        &self,
        req: ListClustersRequest,
    ) -> Result<ListClustersResponse, ApiError> {
        self.record("ListClusters").await;
        self.list_tokens.lock().await.push(req.next_token.clone());
        if self.fail_list {
            return Err(Self::forced());
        }
        let all = self.clusters.lock().await.clone();
        let (cluster_arns, next_token) = page(all, req.max_results, req.next_token);
        Ok(ListClustersResponse {
            cluster_arns,
            next_token,
        })
    }

    async fn describe_clusters(
        &self,
        req: DescribeClustersRequest,
    ) -> Result<DescribeClustersResponse, ApiError> {
        self.record("DescribeClusters").await;
        let known = self.clusters.lock().await.clone();
        let mut resp = DescribeClustersResponse::default();
        for name in req.clusters {
            let arn = cluster_arn(&name);
            if known.contains(&arn) {
                resp.clusters.push(Cluster {
                    cluster_arn: Some(arn),
                    cluster_name: Some(name),
                    status: Some("ACTIVE".to_string()),
                    registered_container_instances_count: Some(0),
                    ..Default::default()
                });
            } else {
                resp.failures.push(missing(&arn));
            }
        }
        Ok(resp)
    }

    async fn list_container_instances(
        &self,
        req: ListContainerInstancesRequest,
    ) -> Result<ListContainerInstancesResponse, ApiError> {
        self.record("ListContainerInstances").await;
        if self.fail_list {
            return Err(Self::forced());
        }
        let all = self
            .instances
            .lock()
            .await
            .iter()
            .filter_map(|i| i.container_instance_arn.clone())
            .collect();
        let (container_instance_arns, next_token) = page(all, req.max_results, req.next_token);
        Ok(ListContainerInstancesResponse {
            container_instance_arns,
            next_token,
        })
    }

    async fn describe_container_instances(
        &self,
        req: DescribeContainerInstancesRequest,
    ) -> Result<DescribeContainerInstancesResponse, ApiError> {
        self.record("DescribeContainerInstances").await;
        self.describe_instance_calls
            .lock()
            .await
            .push(req.container_instances.clone());

        let known = self.instances.lock().await.clone();
        let mut resp = DescribeContainerInstancesResponse::default();
        for arn in req.container_instances {
            match known
                .iter()
                .find(|i| i.container_instance_arn.as_deref() == Some(arn.as_str()))
            {
                Some(i) => resp.container_instances.push(i.clone()),
                None => resp.failures.push(missing(&arn)),
            }
        }
        Ok(resp)
    }

    async fn list_tasks(&self, req: ListTasksRequest) -> Result<ListTasksResponse, ApiError> {
        self.record("ListTasks").await;
        if self.fail_list {
            return Err(Self::forced());
        }
        let all = self.tasks.lock().await.keys().cloned().collect();
        let (task_arns, next_token) = page(all, req.max_results, req.next_token);
        Ok(ListTasksResponse {
            task_arns,
            next_token,
        })
    }

    async fn describe_tasks(
        &self,
        req: DescribeTasksRequest,
    ) -> Result<DescribeTasksResponse, ApiError> {
        self.record("DescribeTasks").await;
        self.describe_task_calls.lock().await.push(req.tasks.clone());

        let known = self.tasks.lock().await;
        let mut resp = DescribeTasksResponse::default();
        for arn in req.tasks {
            match known.get(&arn) {
                Some(t) => resp.tasks.push(t.clone()),
                None => resp.failures.push(missing(&arn)),
            }
        }
        Ok(resp)
    }

    async fn run_task(&self, req: RunTaskRequest) -> Result<RunTaskResponse, ApiError> {
        self.record("RunTask").await;
        let mut tasks = self.tasks.lock().await;
        let arn = format!("arn:task:{}", tasks.len() + 1);
        let mut started = task(
            &arn,
            self.run_status.as_deref().unwrap_or("RUNNING"),
        );
        started.cluster_arn = Some(cluster_arn(&req.cluster));
        started.task_definition_arn = Some(req.task_definition);
        tasks.insert(arn, started.clone());
        Ok(RunTaskResponse {
            tasks: vec![started],
            failures: vec![],
        })
    }

    async fn stop_task(&self, req: StopTaskRequest) -> Result<StopTaskResponse, ApiError> {
        self.record("StopTask").await;
        let mut tasks = self.tasks.lock().await;
        let Some(t) = tasks.get_mut(&req.task) else {
            return Err(ApiError::Service {
                status: 400,
                code: "InvalidParameterException".to_string(),
                message: "The referenced task was not found.".to_string(),
            });
        };
        t.desired_status = Some("STOPPED".to_string());
        if !self.slow_stop {
            t.last_status = Some("STOPPED".to_string());
        }
        Ok(StopTaskResponse {
            task: Some(t.clone()),
        })
    }

    async fn list_task_definitions(
        &self,
        req: ListTaskDefinitionsRequest,
    ) -> Result<ListTaskDefinitionsResponse, ApiError> {
        self.record("ListTaskDefinitions").await;
        let all = self.task_definitions.lock().await.keys().cloned().collect();
        let (task_definition_arns, next_token) = page(all, req.max_results, req.next_token);
        Ok(ListTaskDefinitionsResponse {
            task_definition_arns,
            next_token,
        })
    }

    async fn describe_task_definition(
        &self,
        req: DescribeTaskDefinitionRequest,
    ) -> Result<TaskDefinitionResponse, ApiError> {
        self.record("DescribeTaskDefinition").await;
        Ok(TaskDefinitionResponse {
            task_definition: self
                .task_definitions
                .lock()
                .await
                .get(&req.task_definition)
                .cloned(),
        })
    }

    async fn register_task_definition(
        &self,
        req: RegisterTaskDefinitionRequest,
    ) -> Result<TaskDefinitionResponse, ApiError> {
        self.record("RegisterTaskDefinition").await;
        let mut defs = self.task_definitions.lock().await;
        let arn = format!("arn:task-definition/{}:{}", req.family, defs.len() + 1);
        let def = TaskDefinition {
            task_definition_arn: Some(arn.clone()),
            family: Some(req.family),
            revision: Some(defs.len() as i64 + 1),
            container_definitions: req.container_definitions,
            volumes: req.volumes,
            status: Some("ACTIVE".to_string()),
            ..Default::default()
        };
        defs.insert(arn, def.clone());
        Ok(TaskDefinitionResponse {
            task_definition: Some(def),
        })
    }
}

#[async_trait]
impl Ec2Api for TestEcs {
    async fn terminate_instances(
        &self,
        instance_ids: Vec<String>,
    ) -> Result<TerminateInstancesResponse, ApiError> {
        self.record("TerminateInstances").await;
        self.terminate_calls.lock().await.push(instance_ids.clone());
        Ok(TerminateInstancesResponse {
            instances: instance_ids
                .into_iter()
                .map(|instance_id| InstanceStateChange {
                    instance_id,
                    previous_state: Some("running".to_string()),
                    current_state: Some("shutting-down".to_string()),
                })
                .collect(),
        })
    }

    async fn run_instances(
        &self,
        req: RunInstancesRequest,
    ) -> Result<RunInstancesResponse, ApiError> {
        self.record("RunInstances").await;
        self.run_instances_calls.lock().await.push(req);
        Ok(RunInstancesResponse {
            reservation_id: Some("r-1234".to_string()),
            instance_ids: vec!["i-0abc".to_string()],
        })
    }
}
