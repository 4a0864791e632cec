use clap::Subcommand;
use shared::view::{TaskDefinitionListView, TaskDefinitionView};

use crate::adapter::{PilotError, task_definitions};
use crate::client::{Ec2Api, EcsApi};
use crate::shell::Shell;

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum TaskDefinitionCommand {
    /// List task definition ARNs
    List,
    /// Describe a task definition
    Describe { arn: String },
    /// Register a task definition from a YAML or JSON file
    Register { config_file: String },
    /// Print a task definition file to start from
    Template {
        /// Include every supported field
        #[arg(long)]
        complete: bool,
    },
}

pub async fn handle<A>(shell: &mut Shell<A>, cmd: TaskDefinitionCommand) -> Result<(), PilotError>
where
    A: EcsApi + Ec2Api + 'static,
{
    match cmd {
        TaskDefinitionCommand::List => {
            let arns = task_definitions::list_task_definitions(shell.ecs()).await?;
            shell.show(&TaskDefinitionListView { arns });
        }
        TaskDefinitionCommand::Describe { arn } => {
            let definition = task_definitions::get_task_definition(shell.ecs(), &arn).await?;
            shell.show(&TaskDefinitionView::from(&definition));
        }
        TaskDefinitionCommand::Register { config_file } => {
            let definition =
                task_definitions::register_task_definition(shell.ecs(), &config_file).await?;
            shell.say("Registered task definition.");
            shell.show(&TaskDefinitionView::from(&definition));
        }
        TaskDefinitionCommand::Template { complete } => {
            let template = if complete {
                task_definitions::complete_empty_task_definition()
            } else {
                task_definitions::default_task_definition()
            };
            let yaml = serde_yaml::to_string(&template)
                .map_err(|e| PilotError::Config(format!("can't render template: {}", e)))?;
            shell.show(&yaml);
        }
    }
    Ok(())
}
