use serde::{Deserialize, Serialize};

use super::Keyed;

/// One scheduled unit of work.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub task_arn: Option<String>,
    pub cluster_arn: Option<String>,
    pub container_instance_arn: Option<String>,
    pub task_definition_arn: Option<String>,
    pub last_status: Option<String>,
    pub desired_status: Option<String>,
    pub started_by: Option<String>,
    pub stopped_reason: Option<String>,
    #[serde(default)]
    pub containers: Vec<Container>,
}

impl Keyed for Task {
    fn key(&self) -> Option<&str> {
        self.task_arn.as_deref()
    }
}

impl Task {
    pub fn status(&self) -> Option<TaskStatus> {
        self.last_status.as_deref().map(TaskStatus::parse)
    }

    /// Space separated names of the task's containers.
    pub fn container_names(&self) -> String {
        self.containers
            .iter()
            .filter_map(|c| c.name.as_deref())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Lifecycle states the waiters care about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    Pending,
    Running,
    Stopped,
    Other,
}

impl TaskStatus {
    pub fn parse(s: &str) -> Self {
        match s {
            "PROVISIONING" | "PENDING" | "ACTIVATING" => TaskStatus::Pending,
            "RUNNING" => TaskStatus::Running,
            "STOPPED" => TaskStatus::Stopped,
            _ => TaskStatus::Other,
        }
    }
}

/// A container running as part of a task.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Container {
    pub container_arn: Option<String>,
    pub task_arn: Option<String>,
    pub name: Option<String>,
    pub last_status: Option<String>,
    pub exit_code: Option<i32>,
    pub reason: Option<String>,
    #[serde(default)]
    pub network_bindings: Vec<NetworkBinding>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkBinding {
    #[serde(rename = "bindIP")]
    pub bind_ip: Option<String>,
    pub container_port: Option<i64>,
    pub host_port: Option<i64>,
    pub protocol: Option<String>,
}
