//! View models for every record type the shell prints.
//!
//! Each view is built from the remote records, is serializable on its own, and renders
//! to text through `Display`. Rendering never fails: absent values print as
//! [`EMPTY`] or [`NIL`].

use std::borrow::Cow;
use std::fmt;

use serde::Serialize;
use tabled::{Table, Tabled, settings::Style};

use crate::api::{RunInstancesResponse, RunTaskResponse, TerminateInstancesResponse};
use crate::models::{
    Attribute, Cluster, Container, ContainerDefinition, ContainerInstance, Described, DescribedMap,
    NetworkBinding, Resource, ResourceValue, Task, TaskDefinition,
};

pub const EMPTY: &str = "<empty>";
pub const NIL: &str = "nil";

fn text(value: Option<&str>) -> String {
    value.unwrap_or(EMPTY).to_string()
}

fn number<N: ToString>(value: Option<N>) -> String {
    value.map(|n| n.to_string()).unwrap_or_else(|| EMPTY.to_string())
}

// ============================= LISTS

/// `There are N clusters` followed by the enumerated ARNs.
#[derive(Debug, Clone, Serialize)]
pub struct ClusterListView {
    pub arns: Vec<String>,
}

impl fmt::Display for ClusterListView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "There are {} clusters", self.arns.len())?;
        for (i, arn) in self.arns.iter().enumerate() {
            writeln!(f, "{}: {}", i + 1, arn)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ContainerInstanceListView {
    pub cluster: String,
    pub arns: Vec<String>,
}

impl fmt::Display for ContainerInstanceListView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} instances for cluster \"{}\"", self.arns.len(), self.cluster)?;
        for (i, arn) in self.arns.iter().enumerate() {
            writeln!(f, "{}: {}", i + 1, arn)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TaskListEntry {
    pub arn: String,
    pub containers: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TaskListView {
    pub cluster: String,
    pub tasks: Vec<TaskListEntry>,
}

impl TaskListView {
    /// Pairs each listed ARN with the container names from its description, if any.
    pub fn new(cluster: &str, arns: &[String], described: &DescribedMap<Task>) -> Self {
        let tasks = arns
            .iter()
            .map(|arn| TaskListEntry {
                arn: arn.clone(),
                containers: described
                    .get(arn)
                    .and_then(|d| d.record.as_ref())
                    .map(Task::container_names)
                    .unwrap_or_default(),
            })
            .collect();
        TaskListView {
            cluster: cluster.to_string(),
            tasks,
        }
    }
}

impl fmt::Display for TaskListView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "There are ({}) tasks for cluster: {}", self.tasks.len(), self.cluster)?;
        for (i, task) in self.tasks.iter().enumerate() {
            writeln!(f, "{}: {}", i + 1, task.containers)?;
            writeln!(f, "\t{}.", task.arn)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TaskDefinitionListView {
    pub arns: Vec<String>,
}

impl fmt::Display for TaskDefinitionListView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "There are ({}) task definitions.", self.arns.len())?;
        for (i, arn) in self.arns.iter().enumerate() {
            writeln!(f, "{}: {}.", i + 1, arn)?;
        }
        Ok(())
    }
}

// ============================= CLUSTERS

#[derive(Debug, Clone, Serialize)]
pub struct ClusterView {
    pub name: String,
    pub arn: String,
    pub registered_instances: String,
    pub pending_tasks: String,
    pub running_tasks: String,
    pub active_services: String,
    pub status: String,
}

impl From<&Cluster> for ClusterView {
    fn from(c: &Cluster) -> Self {
        ClusterView {
            name: text(c.cluster_name.as_deref()),
            arn: text(c.cluster_arn.as_deref()),
            registered_instances: number(c.registered_container_instances_count),
            pending_tasks: number(c.pending_tasks_count),
            running_tasks: number(c.running_tasks_count),
            active_services: number(c.active_services_count),
            status: text(c.status.as_deref()),
        }
    }
}

impl fmt::Display for ClusterView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Name: \"{}\"", self.name)?;
        writeln!(f, "ARN: {}", self.arn)?;
        writeln!(f, "Registered instances count: {}", self.registered_instances)?;
        writeln!(f, "Pending tasks count: {}", self.pending_tasks)?;
        writeln!(f, "Running tasks count: {}", self.running_tasks)?;
        writeln!(f, "Active services count: {}", self.active_services)?;
        writeln!(f, "Status: {}", self.status)
    }
}

// ============================= CONTAINER INSTANCES

#[derive(Debug, Clone, Serialize)]
pub struct ResourceView {
    pub name: String,
    pub value: String,
}

impl From<&Resource> for ResourceView {
    fn from(r: &Resource) -> Self {
        let value = match r.value() {
            Some(ResourceValue::Integer(v)) | Some(ResourceValue::Long(v)) => v.to_string(),
            Some(ResourceValue::Double(v)) => v.to_string(),
            Some(ResourceValue::StringSet(values)) => values.join(", "),
            None => NIL.to_string(),
        };
        ResourceView {
            name: text(r.name.as_deref()),
            value,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AttributeView {
    pub name: String,
    pub value: String,
}

impl From<&Attribute> for AttributeView {
    fn from(a: &Attribute) -> Self {
        AttributeView {
            name: text(a.name.as_deref()),
            value: a.value.clone().unwrap_or_else(|| NIL.to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ContainerInstanceView {
    pub arn: String,
    pub ec2_instance_id: String,
    pub status: String,
    pub running_tasks: String,
    pub pending_tasks: String,
    pub registered_resources: Vec<ResourceView>,
    pub remaining_resources: Vec<ResourceView>,
    pub agent_connected: String,
    pub agent_update_status: String,
    pub attributes: Vec<AttributeView>,
}

impl From<&ContainerInstance> for ContainerInstanceView {
    fn from(ci: &ContainerInstance) -> Self {
        ContainerInstanceView {
            arn: text(ci.container_instance_arn.as_deref()),
            ec2_instance_id: text(ci.ec2_instance_id.as_deref()),
            status: text(ci.status.as_deref()),
            running_tasks: number(ci.running_tasks_count),
            pending_tasks: number(ci.pending_tasks_count),
            registered_resources: ci.registered_resources.iter().map(Into::into).collect(),
            remaining_resources: ci.remaining_resources.iter().map(Into::into).collect(),
            agent_connected: number(ci.agent_connected),
            agent_update_status: ci
                .agent_update_status
                .clone()
                .unwrap_or_else(|| "never requested.".to_string()),
            attributes: ci.attributes.iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for ContainerInstanceView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Container ARN: {}", self.arn)?;
        writeln!(f, "EC2-ID: {}", self.ec2_instance_id)?;
        writeln!(f, "Status: {}", self.status)?;
        writeln!(f, "Running Task Count: {}", self.running_tasks)?;
        writeln!(f, "Pending Task Count: {}", self.pending_tasks)?;
        writeln!(
            f,
            "There are ({}) registered resources.",
            self.registered_resources.len()
        )?;
        for (i, r) in self.registered_resources.iter().enumerate() {
            writeln!(f, "\t {}. {}: {}", i + 1, r.name, r.value)?;
        }
        writeln!(
            f,
            "There are ({}) remaining resources.",
            self.remaining_resources.len()
        )?;
        for (i, r) in self.remaining_resources.iter().enumerate() {
            writeln!(f, "\t {}. {}: {}", i + 1, r.name, r.value)?;
        }
        writeln!(f, "Agent connected: {}", self.agent_connected)?;
        writeln!(f, "Agent updated status: {}", self.agent_update_status)?;
        writeln!(f, "There are ({}) attributes.", self.attributes.len())?;
        for (i, a) in self.attributes.iter().enumerate() {
            writeln!(f, "\t{}.  {}: {}", i + 1, a.name, a.value)?;
        }
        Ok(())
    }
}

/// One entry of a describe result: the record view and/or the failure text.
#[derive(Debug, Clone, Serialize)]
pub struct DescribedView<V> {
    pub key: String,
    pub record: Option<V>,
    pub failure: Option<String>,
}

impl<'a, T, V> From<(&'a String, &'a Described<T>)> for DescribedView<V>
where
    V: From<&'a T>,
{
    fn from((key, described): (&'a String, &'a Described<T>)) -> Self {
        DescribedView {
            key: key.clone(),
            record: described.record.as_ref().map(V::from),
            failure: described.failure.as_ref().map(ToString::to_string),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ContainerInstanceMapView {
    pub entries: Vec<DescribedView<ContainerInstanceView>>,
}

impl From<&DescribedMap<ContainerInstance>> for ContainerInstanceMapView {
    fn from(map: &DescribedMap<ContainerInstance>) -> Self {
        ContainerInstanceMapView {
            entries: map.iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for ContainerInstanceMapView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            match &entry.record {
                Some(view) => write!(f, "{}", view)?,
                None => writeln!(f, "No instance description for {}", entry.key)?,
            }
            if let Some(failure) = &entry.failure {
                writeln!(f, "Failure: {}", failure)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

// ============================= TASKS

#[derive(Debug, Clone, Serialize)]
pub struct NetworkBindingView {
    pub bind_ip: String,
    pub container_port: String,
    pub host_port: String,
    pub protocol: String,
}

impl From<&NetworkBinding> for NetworkBindingView {
    fn from(n: &NetworkBinding) -> Self {
        NetworkBindingView {
            bind_ip: text(n.bind_ip.as_deref()),
            container_port: number(n.container_port),
            host_port: number(n.host_port),
            protocol: text(n.protocol.as_deref()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ContainerView {
    pub name: String,
    pub container_arn: String,
    pub task_arn: String,
    pub reason: String,
    pub last_status: String,
    pub exit_code: String,
    pub network_bindings: Vec<NetworkBindingView>,
}

impl From<&Container> for ContainerView {
    fn from(c: &Container) -> Self {
        ContainerView {
            name: text(c.name.as_deref()),
            container_arn: text(c.container_arn.as_deref()),
            task_arn: text(c.task_arn.as_deref()),
            reason: text(c.reason.as_deref()),
            last_status: text(c.last_status.as_deref()),
            exit_code: number(c.exit_code),
            network_bindings: c.network_bindings.iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TaskView {
    pub task_arn: String,
    pub cluster_arn: String,
    pub container_instance_arn: String,
    pub task_definition_arn: String,
    pub last_status: String,
    pub desired_status: String,
    pub containers: Vec<ContainerView>,
}

impl From<&Task> for TaskView {
    fn from(t: &Task) -> Self {
        TaskView {
            task_arn: text(t.task_arn.as_deref()),
            cluster_arn: text(t.cluster_arn.as_deref()),
            container_instance_arn: text(t.container_instance_arn.as_deref()),
            task_definition_arn: text(t.task_definition_arn.as_deref()),
            last_status: text(t.last_status.as_deref()),
            desired_status: text(t.desired_status.as_deref()),
            containers: t.containers.iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for TaskView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Task ARN: {}", self.task_arn)?;
        writeln!(f, "Cluster ARN: {}", self.cluster_arn)?;
        writeln!(f, "Container ARN: {}", self.container_instance_arn)?;
        writeln!(f, "Task Definition: {}", self.task_definition_arn)?;
        writeln!(
            f,
            "Last Status: {} (desired {})",
            self.last_status, self.desired_status
        )?;
        writeln!(
            f,
            "There are ({}) associated containers.",
            self.containers.len()
        )?;
        for (i, c) in self.containers.iter().enumerate() {
            writeln!(f, "\t{}. Name: {}", i + 1, c.name)?;
            writeln!(f, "\tContainer Arn: {}", c.container_arn)?;
            writeln!(f, "\tTask Arn: {}", c.task_arn)?;
            writeln!(f, "\tReason: {}", c.reason)?;
            writeln!(f, "\tLast Status: {}", c.last_status)?;
            writeln!(f, "\tExit Code: {}", c.exit_code)?;
            writeln!(f, "\tContainer Network Bindings:")?;
            for (j, n) in c.network_bindings.iter().enumerate() {
                writeln!(
                    f,
                    "\t\t{}. IP: {} Container Port: {} -> Host Port: {}  ({})",
                    j + 1,
                    n.bind_ip,
                    n.container_port,
                    n.host_port,
                    n.protocol
                )?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TaskMapView {
    pub entries: Vec<DescribedView<TaskView>>,
}

impl From<&DescribedMap<Task>> for TaskMapView {
    fn from(map: &DescribedMap<Task>) -> Self {
        TaskMapView {
            entries: map.iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for TaskMapView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut count = 1;
        for entry in &self.entries {
            match &entry.record {
                Some(view) => {
                    write!(f, "{}: {}", count, view)?;
                    count += 1;
                }
                None => writeln!(f, "No task description for {}", entry.key)?,
            }
            if let Some(failure) = &entry.failure {
                writeln!(f, "Failure: {}", failure)?;
            }
        }
        Ok(())
    }
}

/// Result of a run request: per-placement failures and the created tasks.
#[derive(Debug, Clone, Serialize)]
pub struct RunTaskView {
    pub failures: Vec<String>,
    pub tasks: Vec<TaskView>,
}

impl From<&RunTaskResponse> for RunTaskView {
    fn from(resp: &RunTaskResponse) -> Self {
        RunTaskView {
            failures: resp.failures.iter().map(ToString::to_string).collect(),
            tasks: resp.tasks.iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for RunTaskView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "There were ({}) failures running the task.",
            self.failures.len()
        )?;
        for (i, failure) in self.failures.iter().enumerate() {
            writeln!(f, "{}: {}.", i + 1, failure)?;
        }
        writeln!(f, "There were ({}) Tasks created.", self.tasks.len())?;
        for (i, task) in self.tasks.iter().enumerate() {
            write!(f, "{}: {}", i + 1, task)?;
        }
        Ok(())
    }
}

// ============================= TASK DEFINITIONS

/// One row of the container summary table.
#[derive(Debug, Clone, Serialize)]
pub struct ContainerDefinitionRow {
    pub name: String,
    pub image: String,
    pub memory: String,
    pub cpu: String,
    pub ports: String,
    pub essential: String,
}

impl From<&ContainerDefinition> for ContainerDefinitionRow {
    fn from(c: &ContainerDefinition) -> Self {
        let ports = c
            .port_mappings
            .iter()
            .map(|p| {
                format!(
                    "{}:{}/{}",
                    number(p.host_port),
                    number(p.container_port),
                    p.protocol.as_deref().unwrap_or("tcp")
                )
            })
            .collect::<Vec<_>>()
            .join(",");
        ContainerDefinitionRow {
            name: text(c.name.as_deref()),
            image: text(c.image.as_deref()),
            memory: number(c.memory),
            cpu: number(c.cpu),
            ports,
            essential: number(c.essential),
        }
    }
}

impl Tabled for ContainerDefinitionRow {
    const LENGTH: usize = 6;

    fn fields(&self) -> Vec<Cow<'_, str>> {
        vec![
            Cow::Borrowed(self.name.as_str()),
            Cow::Borrowed(self.image.as_str()),
            Cow::Borrowed(self.memory.as_str()),
            Cow::Borrowed(self.cpu.as_str()),
            Cow::Borrowed(self.ports.as_str()),
            Cow::Borrowed(self.essential.as_str()),
        ]
    }

    fn headers() -> Vec<Cow<'static, str>> {
        vec![
            Cow::Borrowed("NAME"),
            Cow::Borrowed("IMAGE"),
            Cow::Borrowed("MEMORY"),
            Cow::Borrowed("CPU"),
            Cow::Borrowed("PORTS"),
            Cow::Borrowed("ESSENTIAL"),
        ]
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TaskDefinitionView {
    pub arn: String,
    pub family: String,
    pub revision: String,
    pub status: String,
    pub network_mode: String,
    pub containers: Vec<ContainerDefinitionRow>,
    pub volumes: Vec<String>,
}

impl From<&TaskDefinition> for TaskDefinitionView {
    fn from(td: &TaskDefinition) -> Self {
        TaskDefinitionView {
            arn: text(td.task_definition_arn.as_deref()),
            family: text(td.family.as_deref()),
            revision: number(td.revision),
            status: text(td.status.as_deref()),
            network_mode: text(td.network_mode.as_deref()),
            containers: td.container_definitions.iter().map(Into::into).collect(),
            volumes: td
                .volumes
                .iter()
                .map(|v| {
                    let source = v.host.as_ref().and_then(|h| h.source_path.as_deref());
                    format!("{} -> {}", text(v.name.as_deref()), text(source))
                })
                .collect(),
        }
    }
}

impl fmt::Display for TaskDefinitionView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Task Definition ARN: {}", self.arn)?;
        writeln!(f, "Family: {} (revision {})", self.family, self.revision)?;
        writeln!(f, "Status: {}", self.status)?;
        writeln!(f, "Network mode: {}", self.network_mode)?;
        writeln!(
            f,
            "There are ({}) container definitions.",
            self.containers.len()
        )?;
        if !self.containers.is_empty() {
            let mut table = Table::new(&self.containers);
            table.with(Style::blank());
            writeln!(f, "{}", table)?;
        }
        writeln!(f, "There are ({}) volumes.", self.volumes.len())?;
        for (i, v) in self.volumes.iter().enumerate() {
            writeln!(f, "\t{}. {}", i + 1, v)?;
        }
        Ok(())
    }
}

// ============================= HOSTS

#[derive(Debug, Clone, Serialize)]
pub struct TerminateView {
    pub container_arn: String,
    pub changes: Vec<String>,
}

impl TerminateView {
    pub fn new(container_arn: &str, resp: &TerminateInstancesResponse) -> Self {
        TerminateView {
            container_arn: container_arn.to_string(),
            changes: resp
                .instances
                .iter()
                .map(|c| {
                    format!(
                        "{}: {} -> {}",
                        c.instance_id,
                        text(c.previous_state.as_deref()),
                        text(c.current_state.as_deref())
                    )
                })
                .collect(),
        }
    }
}

impl fmt::Display for TerminateView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Terminated container instance {}.", self.container_arn)?;
        for change in &self.changes {
            writeln!(f, "{}", change)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LaunchView {
    pub cluster: String,
    pub reservation_id: String,
    pub instance_ids: Vec<String>,
}

impl LaunchView {
    pub fn new(cluster: &str, resp: &RunInstancesResponse) -> Self {
        LaunchView {
            cluster: cluster.to_string(),
            reservation_id: text(resp.reservation_id.as_deref()),
            instance_ids: resp.instance_ids.clone(),
        }
    }
}

impl fmt::Display for LaunchView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Launched ({}) instances for cluster \"{}\" (reservation {}).",
            self.instance_ids.len(),
            self.cluster,
            self.reservation_id
        )?;
        for (i, id) in self.instance_ids.iter().enumerate() {
            writeln!(f, "{}: {}", i + 1, id)?;
        }
        Ok(())
    }
}
