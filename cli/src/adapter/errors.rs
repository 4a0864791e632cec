use thiserror::Error;

use crate::client::ApiError;

/// Everything an adapter call can fail with. The shell prints these and carries on.
#[derive(Debug, Error)]
pub enum PilotError {
    #[error(transparent)]
    Api(#[from] ApiError),
    /// The container instance was not in the describe response, so its host is unknown.
    #[error("can't find the EC2 instance id for container instance {container_arn}")]
    InstanceIdNotFound { container_arn: String },
    #[error("{kind} {id} not found: {reason}")]
    NotFound {
        kind: &'static str,
        id: String,
        reason: String,
    },
    #[error("{0}")]
    Config(String),
    #[error("{0}")]
    Wait(String),
}
