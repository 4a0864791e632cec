use serde::{Deserialize, Serialize};

use super::Keyed;

/// A registered host machine in a cluster.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerInstance {
    pub container_instance_arn: Option<String>,
    pub ec2_instance_id: Option<String>,
    pub status: Option<String>,
    pub running_tasks_count: Option<i64>,
    pub pending_tasks_count: Option<i64>,
    #[serde(default)]
    pub registered_resources: Vec<Resource>,
    #[serde(default)]
    pub remaining_resources: Vec<Resource>,
    pub agent_connected: Option<bool>,
    pub agent_update_status: Option<String>,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
}

impl Keyed for ContainerInstance {
    fn key(&self) -> Option<&str> {
        self.container_instance_arn.as_deref()
    }
}

/// CPU, memory, ports and similar capacity entries of an instance.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub integer_value: Option<i64>,
    pub double_value: Option<f64>,
    pub long_value: Option<i64>,
    #[serde(default)]
    pub string_set_value: Vec<String>,
}

/// The typed value of a [`Resource`], selected by its `type` field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResourceValue {
    Integer(i64),
    Double(f64),
    Long(i64),
    StringSet(Vec<String>),
}

impl Resource {
    pub fn value(&self) -> Option<ResourceValue> {
        match self.kind.as_deref()? {
            "INTEGER" => self.integer_value.map(ResourceValue::Integer),
            "DOUBLE" => self.double_value.map(ResourceValue::Double),
            "LONG" => self.long_value.map(ResourceValue::Long),
            "STRINGSET" => Some(ResourceValue::StringSet(self.string_set_value.clone())),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Attribute {
    pub name: Option<String>,
    pub value: Option<String>,
}
