use clap::Subcommand;
use shared::view::{ClusterListView, ClusterView};

use crate::adapter::{PilotError, clusters};
use crate::client::{Ec2Api, EcsApi};
use crate::shell::Shell;

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum ClusterCommand {
    /// List cluster ARNs
    List,
    /// Describe a cluster
    Describe { name: String },
    /// Create an empty cluster
    Create { name: String },
    /// Delete a cluster with no instances or services
    Delete { name: String },
}

pub async fn handle<A>(shell: &mut Shell<A>, cmd: ClusterCommand) -> Result<(), PilotError>
where
    A: EcsApi + Ec2Api + 'static,
{
    let ecs = shell.ecs();
    match cmd {
        ClusterCommand::List => {
            let clusters = clusters::get_clusters(ecs).await?;
            shell.show(&ClusterListView {
                arns: clusters.into_iter().map(|c| c.arn).collect(),
            });
        }
        ClusterCommand::Describe { name } => {
            let cluster = clusters::describe_cluster(ecs, &name).await?;
            shell.show(&ClusterView::from(&cluster));
        }
        ClusterCommand::Create { name } => {
            let cluster = clusters::create_cluster(ecs, &name).await?;
            shell.say(&format!("Created cluster \"{}\".", name));
            shell.show(&ClusterView::from(&cluster));
        }
        ClusterCommand::Delete { name } => {
            let cluster = clusters::delete_cluster(ecs, &name).await?;
            shell.say(&format!("Deleted cluster \"{}\".", name));
            shell.show(&ClusterView::from(&cluster));
        }
    }
    Ok(())
}
