//! Signed HTTP transport for the JSON and query protocols.

use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Client, StatusCode};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
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
use url::Url;

use super::{
    Ec2Api, EcsApi, ec2,
    errors::ApiError,
    sigv4::{self, SignableRequest, SigningParams},
};
use crate::config::Config;

const ECS_TARGET_PREFIX: &str = "AmazonEC2ContainerServiceV20141113";
const JSON_CONTENT_TYPE: &str = "application/x-amz-json-1.1";
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded; charset=utf-8";

/// Client for the live service, configured from [`Config`].
#[derive(Debug, Clone)]
pub struct AwsClient {
    http: Client,
    config: Config,
}

impl AwsClient {
    pub fn new(config: Config) -> Self {
        AwsClient {
            http: Client::new(),
            config,
        }
    }

    /// Calls one JSON protocol operation of the orchestration API.
    async fn call_ecs<Req, Resp>(&self, operation: &str, req: &Req) -> Result<Resp, ApiError>
    where
        Req: Serialize + Sync,
        Resp: DeserializeOwned,
    {
        let body = serde_json::to_vec(req).map_err(|e| ApiError::Decode(e.to_string()))?;
        let target = format!("{}.{}", ECS_TARGET_PREFIX, operation);
        tracing::debug!(%operation, endpoint=%self.config.ecs_endpoint, "Calling ecs");

        let (status, text) = self
            .send(
                "ecs",
                &self.config.ecs_endpoint,
                &[("content-type", JSON_CONTENT_TYPE), ("x-amz-target", target.as_str())],
                body,
            )
            .await?;

        if !status.is_success() {
            let err = parse_json_error(status, &text);
            tracing::debug!(%operation, error=%err, "Remote call failed");
            return Err(err);
        }
        serde_json::from_str(&text).map_err(|e| ApiError::Decode(format!("{}: {}", operation, e)))
    }

    /// Calls one query protocol operation of the host API and returns the XML body.
    async fn call_ec2(&self, body: String) -> Result<String, ApiError> {
        tracing::debug!(endpoint=%self.config.ec2_endpoint, "Calling ec2");
        let (status, text) = self
            .send(
                "ec2",
                &self.config.ec2_endpoint,
                &[("content-type", FORM_CONTENT_TYPE)],
                body.into_bytes(),
            )
            .await?;

        if !status.is_success() {
            return Err(ec2::parse_error(status.as_u16(), &text));
        }
        Ok(text)
    }

    async fn send(
        &self,
        service: &str,
        endpoint: &str,
        headers: &[(&str, &str)],
        body: Vec<u8>,
    ) -> Result<(StatusCode, String), ApiError> {
        let credentials = self
            .config
            .credentials
            .as_ref()
            .ok_or(ApiError::MissingCredentials)?;

        let url = Url::parse(endpoint)
            .map_err(|e| ApiError::Transport(format!("invalid endpoint {}: {}", endpoint, e)))?;
        let host = match (url.host_str(), url.port()) {
            (Some(host), Some(port)) => format!("{}:{}", host, port),
            (Some(host), None) => host.to_string(),
            (None, _) => return Err(ApiError::Transport(format!("endpoint {} has no host", endpoint))),
        };

        let params = SigningParams {
            credentials,
            region: &self.config.region,
            service,
            time: Utc::now(),
        };
        let request = SignableRequest {
            method: "POST",
            host: &host,
            path: url.path(),
            headers,
            body: &body,
        };
        let signed = sigv4::sign(&params, &request)
            .ok_or_else(|| ApiError::Transport("failed to sign request".to_string()))?;

        let mut builder = self.http.post(url);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        for (name, value) in signed {
            builder = builder.header(name, value);
        }

        let resp = builder.body(body).send().await?;
        let status = resp.status();
        let text = resp.text().await?;
        Ok((status, text))
    }
}

/// Maps a JSON protocol error body to [`ApiError::Service`].
///
/// The error type may be namespaced (`prefix#Name`); only the name is kept.
fn parse_json_error(status: StatusCode, text: &str) -> ApiError {
    let value: Value = serde_json::from_str(text).unwrap_or(Value::Null);
    let code = value
        .get("__type")
        .and_then(Value::as_str)
        .map(|t| t.rsplit('#').next().unwrap_or(t).to_string())
        .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
    let message = value
        .get("message")
        .or_else(|| value.get("Message"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| text.trim().to_string());
    ApiError::Service {
        status: status.as_u16(),
        code,
        message,
    }
}

#[async_trait]
impl EcsApi for AwsClient {
    async fn create_cluster(&self, req: CreateClusterRequest) -> Result<ClusterResponse, ApiError> {
        self.call_ecs("CreateCluster", &req).await
    }

    async fn delete_cluster(&self, req: DeleteClusterRequest) -> Result<ClusterResponse, ApiError> {
        self.call_ecs("DeleteCluster", &req).await
    }

    async fn list_clusters(
        &self,
        req: ListClustersRequest,
    ) -> Result<ListClustersResponse, ApiError> {
        self.call_ecs("ListClusters", &req).await
    }

    async fn describe_clusters(
        &self,
        req: DescribeClustersRequest,
    ) -> Result<DescribeClustersResponse, ApiError> {
        self.call_ecs("DescribeClusters", &req).await
    }

    async fn list_container_instances(
        &self,
        req: ListContainerInstancesRequest,
    ) -> Result<ListContainerInstancesResponse, ApiError> {
        self.call_ecs("ListContainerInstances", &req).await
    }

    async fn describe_container_instances(
        &self,
        req: DescribeContainerInstancesRequest,
    ) -> Result<DescribeContainerInstancesResponse, ApiError> {
        self.call_ecs("DescribeContainerInstances", &req).await
    }

    async fn list_tasks(&self, req: ListTasksRequest) -> Result<ListTasksResponse, ApiError> {
        self.call_ecs("ListTasks", &req).await
    }

    async fn describe_tasks(
        &self,
        req: DescribeTasksRequest,
    ) -> Result<DescribeTasksResponse, ApiError> {
        self.call_ecs("DescribeTasks", &req).await
    }

    async fn run_task(&self, req: RunTaskRequest) -> Result<RunTaskResponse, ApiError> {
        self.call_ecs("RunTask", &req).await
    }

    async fn stop_task(&self, req: StopTaskRequest) -> Result<StopTaskResponse, ApiError> {
        self.call_ecs("StopTask", &req).await
    }

    async fn list_task_definitions(
        &self,
        req: ListTaskDefinitionsRequest,
    ) -> Result<ListTaskDefinitionsResponse, ApiError> {
        self.call_ecs("ListTaskDefinitions", &req).await
    }

    async fn describe_task_definition(
        &self,
        req: DescribeTaskDefinitionRequest,
    ) -> Result<TaskDefinitionResponse, ApiError> {
        self.call_ecs("DescribeTaskDefinition", &req).await
    }

    async fn register_task_definition(
        &self,
        req: RegisterTaskDefinitionRequest,
    ) -> Result<TaskDefinitionResponse, ApiError> {
        self.call_ecs("RegisterTaskDefinition", &req).await
    }
}

#[async_trait]
impl Ec2Api for AwsClient {
    async fn terminate_instances(
        &self,
        instance_ids: Vec<String>,
    ) -> Result<TerminateInstancesResponse, ApiError> {
        let xml = self
            .call_ec2(ec2::terminate_instances_body(&instance_ids))
            .await?;
        ec2::parse_terminate_instances(&xml)
    }

    async fn run_instances(
        &self,
        req: RunInstancesRequest,
    ) -> Result<RunInstancesResponse, ApiError> {
        let xml = self.call_ec2(ec2::run_instances_body(&req)).await?;
        ec2::parse_run_instances(&xml)
    }
}
