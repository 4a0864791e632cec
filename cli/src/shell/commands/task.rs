use clap::Subcommand;
use shared::view::{RunTaskView, TaskListView, TaskMapView, TaskView};

use crate::adapter::{PilotError, tasks, waiter::WaitPolicy};
use crate::client::{Ec2Api, EcsApi};
use crate::shell::Shell;

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum TaskCommand {
    /// List the tasks of a cluster with their containers
    List { cluster: String },
    /// Describe every task of a cluster
    DescribeAll { cluster: String },
    /// Run one copy of a task definition and report when it is running
    Run {
        cluster: String,
        task_definition: String,
    },
    /// Stop a task and report when it has stopped
    Stop { cluster: String, task_arn: String },
}

pub async fn handle<A>(shell: &mut Shell<A>, cmd: TaskCommand) -> Result<(), PilotError>
where
    A: EcsApi + Ec2Api + 'static,
{
    match cmd {
        TaskCommand::List { cluster } => {
            let arns = tasks::list_tasks(shell.ecs(), &cluster).await?;
            let described = tasks::describe_tasks(shell.ecs(), &cluster, &arns).await?;
            shell.show(&TaskListView::new(&cluster, &arns, &described));
        }
        TaskCommand::DescribeAll { cluster } => {
            let map = tasks::get_all_task_descriptions(shell.ecs(), &cluster).await?;
            if map.is_empty() {
                shell.say(&format!("No tasks for {}.", cluster));
            } else {
                shell.show(&TaskMapView::from(&map));
            }
        }
        TaskCommand::Run {
            cluster,
            task_definition,
        } => {
            let resp = tasks::run_task(shell.ecs(), &cluster, &task_definition).await?;
            shell.show(&RunTaskView::from(&resp));

            let started: Vec<String> = resp
                .tasks
                .iter()
                .filter_map(|t| t.task_arn.clone())
                .collect();
            if started.is_empty() {
                return Ok(());
            }

            let policy = WaitPolicy::from(shell.config());
            let wait = tasks::on_task_running(shell.shared_ecs(), &cluster, started, policy);
            shell.track(wait, |cluster, task_arns, outcome| {
                let arns = task_arns.join(", ");
                match outcome {
                    Ok(()) => format!("Task: {} is now running on cluster {}.", arns, cluster),
                    Err(e) => format!(
                        "Problem waiting for task: {} on cluster {} to start. Error: {}.",
                        arns, cluster, e
                    ),
                }
            });
        }
        TaskCommand::Stop { cluster, task_arn } => {
            shell.say(&format!("Stopping the task: {}.", task_arn));
            let task = tasks::stop_task(shell.ecs(), &cluster, &task_arn).await?;
            shell.say("This task is scheduled to stop.");
            shell.show(&TaskView::from(&task));

            let arn = task.task_arn.clone().unwrap_or(task_arn);
            let policy = WaitPolicy::from(shell.config());
            let wait = tasks::on_task_stopped(shell.shared_ecs(), &cluster, vec![arn], policy);
            shell.track(wait, |cluster, task_arns, outcome| {
                let arns = task_arns.join(", ");
                match outcome {
                    Ok(()) => format!("Task: {} on cluster {} is now stopped.", arns, cluster),
                    Err(e) => format!(
                        "There was a problem waiting for task {} on cluster {} to stop. Error: {}.",
                        arns, cluster, e
                    ),
                }
            });
        }
    }
    Ok(())
}
