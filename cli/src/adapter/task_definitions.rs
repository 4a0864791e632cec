use std::path::{Path, PathBuf};

use shared::api::{
    DescribeTaskDefinitionRequest, ListTaskDefinitionsRequest, PAGE_SIZE,
    RegisterTaskDefinitionRequest,
};
use shared::models::TaskDefinition;

use super::{PilotError, collect_pages};
use crate::client::EcsApi;

const CONFIG_EXTENSIONS: [&str; 3] = ["yaml", "yml", "json"];

pub async fn list_task_definitions(ecs: &dyn EcsApi) -> Result<Vec<String>, PilotError> {
    let arns = collect_pages(move |next_token| {
        ecs.list_task_definitions(ListTaskDefinitionsRequest {
            max_results: Some(PAGE_SIZE),
            next_token,
        })
    })
    .await?;
    Ok(arns)
}

pub async fn get_task_definition(
    ecs: &dyn EcsApi,
    arn: &str,
) -> Result<TaskDefinition, PilotError> {
    let resp = ecs
        .describe_task_definition(DescribeTaskDefinitionRequest {
            task_definition: arn.to_string(),
        })
        .await?;
    resp.task_definition.ok_or_else(|| PilotError::NotFound {
        kind: "task definition",
        id: arn.to_string(),
        reason: "no description returned".to_string(),
    })
}

/// Finds the config file for `name`, trying the known extensions for a bare name.
fn resolve_config_path(name: &str) -> Option<PathBuf> {
    let path = Path::new(name);
    if path.is_file() {
        return Some(path.to_path_buf());
    }
    if path.extension().is_some() {
        return None;
    }
    CONFIG_EXTENSIONS
        .iter()
        .map(|ext| path.with_extension(ext))
        .find(|candidate| candidate.is_file())
}

/// Reads a registration request from a YAML or JSON file.
pub async fn load_task_definition(name: &str) -> Result<RegisterTaskDefinitionRequest, PilotError> {
    let path = resolve_config_path(name)
        .ok_or_else(|| PilotError::Config(format!("can't find task definition config {}", name)))?;

    let raw = tokio::fs::read_to_string(&path)
        .await
        .map_err(|e| PilotError::Config(format!("can't read {}: {}", path.display(), e)))?;

    // YAML is a superset of JSON, one parser covers both.
    serde_yaml::from_str(&raw)
        .map_err(|e| PilotError::Config(format!("can't parse {}: {}", path.display(), e)))
}

/// Registers the task definition described by the config file `name`.
pub async fn register_task_definition(
    ecs: &dyn EcsApi,
    name: &str,
) -> Result<TaskDefinition, PilotError> {
    let req = load_task_definition(name).await?;
    tracing::debug!(family=%req.family, containers=req.container_definitions.len(), "Registering task definition");

    let family = req.family.clone();
    let resp = ecs.register_task_definition(req).await?;
    resp.task_definition.ok_or_else(|| PilotError::NotFound {
        kind: "task definition",
        id: family,
        reason: "registration returned no definition".to_string(),
    })
}

pub fn default_task_definition() -> RegisterTaskDefinitionRequest {
    RegisterTaskDefinitionRequest::example()
}

pub fn complete_empty_task_definition() -> RegisterTaskDefinitionRequest {
    RegisterTaskDefinitionRequest::complete_empty()
}
