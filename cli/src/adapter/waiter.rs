use std::{fmt, sync::Arc, time::Duration};

use shared::api::DescribeTasksRequest;
use shared::models::{Failure, Task, TaskStatus};
use tokio::task::JoinHandle;

use super::PilotError;
use crate::client::EcsApi;
use crate::config::Config;

/// Condition a wait polls for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    Running,
    Stopped,
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskState::Running => write!(f, "running"),
            TaskState::Stopped => write!(f, "stopped"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitPolicy {
    pub delay: Duration,
    pub max_attempts: u32,
}

impl Default for WaitPolicy {
    fn default() -> Self {
        WaitPolicy {
            delay: Duration::from_secs(6),
            max_attempts: 100,
        }
    }
}

impl From<&Config> for WaitPolicy {
    fn from(config: &Config) -> Self {
        WaitPolicy {
            delay: config.wait_delay,
            max_attempts: config.wait_max_attempts,
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Poll {
    Done,
    Pending,
    Failed(String),
}

fn evaluate(target: TaskState, tasks: &[Task], failures: &[Failure]) -> Poll {
    let statuses: Vec<Option<TaskStatus>> = tasks.iter().map(Task::status).collect();

    match target {
        TaskState::Running => {
            if let Some(f) = failures
                .iter()
                .find(|f| f.reason.as_deref() == Some("MISSING"))
            {
                return Poll::Failed(format!("task {} is missing", f.arn.as_deref().unwrap_or("")));
            }
            if statuses.contains(&Some(TaskStatus::Stopped)) {
                return Poll::Failed("task stopped before reaching running".to_string());
            }
            if !statuses.is_empty() && statuses.iter().all(|s| *s == Some(TaskStatus::Running)) {
                return Poll::Done;
            }
        }
        TaskState::Stopped => {
            if !statuses.is_empty() && statuses.iter().all(|s| *s == Some(TaskStatus::Stopped)) {
                return Poll::Done;
            }
        }
    }
    Poll::Pending
}

/// Polls DescribeTasks until every task reaches `target`.
///
/// The first probe is immediate, later ones are spaced by `policy.delay`. Exhausting
/// `policy.max_attempts` fails the wait.
pub async fn wait_until(
    ecs: &dyn EcsApi,
    cluster: &str,
    task_arns: &[String],
    target: TaskState,
    policy: WaitPolicy,
) -> Result<(), PilotError> {
    for attempt in 1..=policy.max_attempts {
        if attempt > 1 {
            tokio::time::sleep(policy.delay).await;
        }

        let resp = ecs
            .describe_tasks(DescribeTasksRequest {
                cluster: cluster.to_string(),
                tasks: task_arns.to_vec(),
            })
            .await?;

        match evaluate(target, &resp.tasks, &resp.failures) {
            Poll::Done => {
                tracing::debug!(%cluster, ?task_arns, %target, attempt, "Wait complete");
                return Ok(());
            }
            Poll::Failed(reason) => return Err(PilotError::Wait(reason)),
            Poll::Pending => {
                tracing::debug!(%cluster, ?task_arns, %target, attempt, "Still waiting");
            }
        }
    }

    Err(PilotError::Wait(format!(
        "exceeded {} attempts waiting for tasks to be {}",
        policy.max_attempts, target
    )))
}

/// A wait running in the background.
pub struct WaitHandle {
    pub target: TaskState,
    pub cluster: String,
    pub task_arns: Vec<String>,
    handle: JoinHandle<Result<(), PilotError>>,
}

impl WaitHandle {
    pub fn spawn(
        ecs: Arc<dyn EcsApi>,
        cluster: &str,
        task_arns: Vec<String>,
        target: TaskState,
        policy: WaitPolicy,
    ) -> Self {
        let (c, arns) = (cluster.to_string(), task_arns.clone());
        let handle =
            tokio::spawn(async move { wait_until(ecs.as_ref(), &c, &arns, target, policy).await });

        WaitHandle {
            target,
            cluster: cluster.to_string(),
            task_arns,
            handle,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Awaits the wait's result.
    pub async fn outcome(self) -> Result<(), PilotError> {
        match self.handle.await {
            Ok(result) => result,
            Err(e) => Err(PilotError::Wait(e.to_string())),
        }
    }
}
