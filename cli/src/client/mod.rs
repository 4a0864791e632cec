//! # Remote Client
//!
//! The seams between the adapter and the remote service. [`EcsApi`] covers the
//! orchestration API, [`Ec2Api`] the host lifecycle calls. [`AwsClient`] implements
//! both over signed HTTP; tests substitute recording fakes.

pub mod ec2;
pub mod errors;
pub mod http;
pub mod sigv4;

use async_trait::async_trait;
use shared::api::{
    ClusterResponse, CreateClusterRequest, DeleteClusterRequest, DescribeClustersRequest,
    DescribeClustersResponse, DescribeContainerInstancesRequest,
    DescribeContainerInstancesResponse, DescribeTaskDefinitionRequest, DescribeTasksRequest,
    DescribeTasksResponse, ListClustersRequest, ListClustersResponse,
    ListContainerInstancesRequest, ListContainerInstancesResponse, ListTaskDefinitionsRequest,
    ListTaskDefinitionsResponse, ListTasksRequest, ListTasksResponse,
    RegisterTaskDefinitionRequest, RunInstancesRequest, RunInstancesResponse, RunTaskRequest,
    RunTaskResponse, StopTaskRequest, StopTaskResponse, TaskDefinitionResponse,
    TerminateInstancesResponse,
};

pub use errors::ApiError;
pub use http::AwsClient;

/// Operations of the container orchestration API.
#[async_trait]
pub trait EcsApi: Send + Sync {
    async fn create_cluster(&self, req: CreateClusterRequest) -> Result<ClusterResponse, ApiError>;

    async fn delete_cluster(&self, req: DeleteClusterRequest) -> Result<ClusterResponse, ApiError>;

    async fn list_clusters(
        &self,
        req: ListClustersRequest,
    ) -> Result<ListClustersResponse, ApiError>;

    async fn describe_clusters(
        &self,
        req: DescribeClustersRequest,
    ) -> Result<DescribeClustersResponse, ApiError>;

    async fn list_container_instances(
        &self,
        req: ListContainerInstancesRequest,
    ) -> Result<ListContainerInstancesResponse, ApiError>;

    async fn describe_container_instances(
        &self,
        req: DescribeContainerInstancesRequest,
    ) -> Result<DescribeContainerInstancesResponse, ApiError>;

    async fn list_tasks(&self, req: ListTasksRequest) -> Result<ListTasksResponse, ApiError>;

    async fn describe_tasks(
        &self,
        req: DescribeTasksRequest,
    ) -> Result<DescribeTasksResponse, ApiError>;

    async fn run_task(&self, req: RunTaskRequest) -> Result<RunTaskResponse, ApiError>;

    async fn stop_task(&self, req: StopTaskRequest) -> Result<StopTaskResponse, ApiError>;

    async fn list_task_definitions(
        &self,
        req: ListTaskDefinitionsRequest,
    ) -> Result<ListTaskDefinitionsResponse, ApiError>;

    async fn describe_task_definition(
        &self,
        req: DescribeTaskDefinitionRequest,
    ) -> Result<TaskDefinitionResponse, ApiError>;

    async fn register_task_definition(
        &self,
        req: RegisterTaskDefinitionRequest,
    ) -> Result<TaskDefinitionResponse, ApiError>;
}

/// Host lifecycle operations backing container instances.
#[async_trait]
pub trait Ec2Api: Send + Sync {
    async fn terminate_instances(
        &self,
        instance_ids: Vec<String>,
    ) -> Result<TerminateInstancesResponse, ApiError>;

    async fn run_instances(&self, req: RunInstancesRequest)
    -> Result<RunInstancesResponse, ApiError>;
}
