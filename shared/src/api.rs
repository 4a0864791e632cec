//! Request and response shapes of the remote API.
//!
//! Field names follow the service's camelCase JSON. Optional request fields are
//! omitted from the body when unset.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::{
    Cluster, ContainerDefinition, ContainerInstance, Failure, HostEntry, HostVolumeProperties,
    KeyValuePair, LogConfiguration, MountPoint, PortMapping, Task, TaskDefinition, Ulimit, Volume,
    VolumeFrom,
};

/// Page size requested from every list operation.
pub const PAGE_SIZE: i32 = 100;

/// List responses that may carry a continuation token.
pub trait Page {
    fn items(self) -> (Vec<String>, Option<String>);
}

// ============================= CLUSTERS

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateClusterRequest {
    pub cluster_name: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeleteClusterRequest {
    pub cluster: String,
}

/// Body of CreateCluster and DeleteCluster responses.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClusterResponse {
    pub cluster: Option<Cluster>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ListClustersRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_results: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ListClustersResponse {
    #[serde(default)]
    pub cluster_arns: Vec<String>,
    pub next_token: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DescribeClustersRequest {
    pub clusters: Vec<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DescribeClustersResponse {
    #[serde(default)]
    pub clusters: Vec<Cluster>,
    #[serde(default)]
    pub failures: Vec<Failure>,
}

// ============================= CONTAINER INSTANCES

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ListContainerInstancesRequest {
    pub cluster: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_results: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ListContainerInstancesResponse {
    #[serde(default)]
    pub container_instance_arns: Vec<String>,
    pub next_token: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DescribeContainerInstancesRequest {
    pub cluster: String,
    pub container_instances: Vec<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DescribeContainerInstancesResponse {
    #[serde(default)]
    pub container_instances: Vec<ContainerInstance>,
    #[serde(default)]
    pub failures: Vec<Failure>,
}

// ============================= TASKS

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ListTasksRequest {
    pub cluster: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_results: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ListTasksResponse {
    #[serde(default)]
    pub task_arns: Vec<String>,
    pub next_token: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DescribeTasksRequest {
    pub cluster: String,
    pub tasks: Vec<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DescribeTasksResponse {
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub failures: Vec<Failure>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RunTaskRequest {
    pub cluster: String,
    pub task_definition: String,
    pub count: i32,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RunTaskResponse {
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub failures: Vec<Failure>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StopTaskRequest {
    pub cluster: String,
    pub task: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StopTaskResponse {
    pub task: Option<Task>,
}

// ============================= TASK DEFINITIONS

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ListTaskDefinitionsRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_results: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ListTaskDefinitionsResponse {
    #[serde(default)]
    pub task_definition_arns: Vec<String>,
    pub next_token: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DescribeTaskDefinitionRequest {
    pub task_definition: String,
}

/// Body of DescribeTaskDefinition and RegisterTaskDefinition responses.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TaskDefinitionResponse {
    pub task_definition: Option<TaskDefinition>,
}

/// Registration input. This is also the schema of the local task definition file.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RegisterTaskDefinitionRequest {
    pub family: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_role_arn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_mode: Option<String>,
    pub container_definitions: Vec<ContainerDefinition>,
    #[serde(default)]
    pub volumes: Vec<Volume>,
}

impl RegisterTaskDefinitionRequest {
    /// A minimal but runnable definition with placeholder names.
    pub fn example() -> Self {
        RegisterTaskDefinitionRequest {
            family: "Family".to_string(),
            container_definitions: vec![ContainerDefinition {
                name: Some("Task Definition Name".to_string()),
                image: Some("IMAGE REFERENCE".to_string()),
                memory: Some(500),
                cpu: Some(0),
                command: vec!["CMD".to_string()],
                entry_point: vec!["ENTRYPOINT".to_string()],
                essential: Some(true),
                disable_networking: Some(false),
                port_mappings: vec![PortMapping {
                    container_port: Some(25565),
                    host_port: Some(25565),
                    protocol: Some("tcp".to_string()),
                }],
                readonly_root_filesystem: Some(false),
                privileged: Some(false),
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    /// Every supported field populated with an empty value, for scaffolding.
    pub fn complete_empty() -> Self {
        let empty = String::new;
        RegisterTaskDefinitionRequest {
            family: empty(),
            task_role_arn: None,
            network_mode: None,
            container_definitions: vec![ContainerDefinition {
                name: Some(empty()),
                image: Some(empty()),
                memory: Some(0),
                cpu: Some(0),
                command: vec![empty()],
                entry_point: vec![empty()],
                docker_labels: BTreeMap::from([("Key".to_string(), "Value".to_string())]),
                essential: Some(true),
                working_directory: Some(empty()),
                environment: vec![KeyValuePair {
                    name: Some(empty()),
                    value: Some(empty()),
                }],
                disable_networking: Some(false),
                port_mappings: vec![PortMapping {
                    container_port: Some(1),
                    host_port: Some(1),
                    protocol: Some("tcp".to_string()),
                }],
                hostname: Some(empty()),
                dns_servers: vec![empty()],
                dns_search_domains: vec![empty()],
                extra_hosts: vec![HostEntry {
                    hostname: Some(empty()),
                    ip_address: Some(empty()),
                }],
                readonly_root_filesystem: Some(false),
                mount_points: vec![MountPoint {
                    container_path: Some(empty()),
                    read_only: Some(false),
                    source_volume: Some(empty()),
                }],
                volumes_from: vec![VolumeFrom {
                    read_only: Some(false),
                    source_container: Some(empty()),
                }],
                log_configuration: Some(LogConfiguration {
                    log_driver: Some("LogDriver".to_string()),
                    options: BTreeMap::from([("Key".to_string(), empty())]),
                }),
                privileged: Some(false),
                user: Some(empty()),
                docker_security_options: vec![empty()],
                ulimits: vec![Ulimit {
                    name: Some(empty()),
                    hard_limit: Some(1),
                    soft_limit: Some(1),
                }],
            }],
            volumes: vec![Volume {
                name: Some(empty()),
                host: Some(HostVolumeProperties {
                    source_path: Some(empty()),
                }),
            }],
        }
    }
}

// ============================= HOSTS

/// Launch parameters for a new container instance host.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct RunInstancesRequest {
    pub image_id: String,
    pub instance_type: String,
    pub iam_instance_profile: Option<String>,
    pub key_name: Option<String>,
    pub security_group_ids: Vec<String>,
    /// Plain text; the transport encodes it.
    pub user_data: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct RunInstancesResponse {
    pub reservation_id: Option<String>,
    pub instance_ids: Vec<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct TerminateInstancesResponse {
    pub instances: Vec<InstanceStateChange>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct InstanceStateChange {
    pub instance_id: String,
    pub previous_state: Option<String>,
    pub current_state: Option<String>,
}

// ============================= PAGES

impl Page for ListClustersResponse {
    fn items(self) -> (Vec<String>, Option<String>) {
        (self.cluster_arns, self.next_token)
    }
}

impl Page for ListContainerInstancesResponse {
    fn items(self) -> (Vec<String>, Option<String>) {
        (self.container_instance_arns, self.next_token)
    }
}

impl Page for ListTasksResponse {
    fn items(self) -> (Vec<String>, Option<String>) {
        (self.task_arns, self.next_token)
    }
}

impl Page for ListTaskDefinitionsResponse {
    fn items(self) -> (Vec<String>, Option<String>) {
        (self.task_definition_arns, self.next_token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_request_fields_are_omitted() {
        let req = ListTasksRequest {
            cluster: "default".to_string(),
            max_results: Some(PAGE_SIZE),
            next_token: None,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json, serde_json::json!({"cluster": "default", "maxResults": 100}));
    }

    #[test]
    fn example_definition_survives_yaml() {
        let yaml = serde_yaml::to_string(&RegisterTaskDefinitionRequest::example()).unwrap();
        assert!(yaml.contains("containerDefinitions:"));
        assert!(yaml.contains("containerPort: 25565"));
        assert!(!yaml.contains("dnsServers"));

        let back: RegisterTaskDefinitionRequest = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back, RegisterTaskDefinitionRequest::example());
    }

    #[test]
    fn complete_empty_populates_every_container_field() {
        let value = serde_json::to_value(RegisterTaskDefinitionRequest::complete_empty()).unwrap();
        let container = &value["containerDefinitions"][0];
        for field in [
            "dockerLabels",
            "environment",
            "extraHosts",
            "mountPoints",
            "volumesFrom",
            "logConfiguration",
            "dockerSecurityOptions",
            "ulimits",
        ] {
            assert!(container.get(field).is_some(), "missing {field}");
        }
        assert_eq!(value["volumes"][0]["host"]["sourcePath"], "");
    }

    #[test]
    fn describe_response_tolerates_missing_lists() {
        let resp: DescribeTasksResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.tasks.is_empty());
        assert!(resp.failures.is_empty());
    }
}
