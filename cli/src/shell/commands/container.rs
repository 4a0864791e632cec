use clap::Subcommand;
use shared::view::{
    ContainerInstanceListView, ContainerInstanceMapView, LaunchView, TerminateView,
};

use crate::adapter::{PilotError, instances};
use crate::client::{Ec2Api, EcsApi};
use crate::shell::Shell;

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum ContainerCommand {
    /// List container instance ARNs of a cluster
    List { cluster: String },
    /// Describe one container instance
    Describe {
        cluster: String,
        instance_arn: String,
    },
    /// Describe every container instance of a cluster
    DescribeAll { cluster: String },
    /// Launch a new host that joins the cluster
    New { cluster: String },
    /// Terminate the host behind a container instance
    Stop {
        cluster: String,
        instance_arn: String,
    },
}

pub async fn handle<A>(shell: &mut Shell<A>, cmd: ContainerCommand) -> Result<(), PilotError>
where
    A: EcsApi + Ec2Api + 'static,
{
    match cmd {
        ContainerCommand::List { cluster } => {
            let arns = instances::get_container_instances(shell.ecs(), &cluster).await?;
            shell.show(&ContainerInstanceListView { cluster, arns });
        }
        ContainerCommand::Describe {
            cluster,
            instance_arn,
        } => {
            let map =
                instances::get_container_instance_description(shell.ecs(), &cluster, &instance_arn)
                    .await?;
            shell.show(&ContainerInstanceMapView::from(&map));
        }
        ContainerCommand::DescribeAll { cluster } => {
            let map = instances::get_all_container_instance_descriptions(shell.ecs(), &cluster)
                .await?;
            if map.is_empty() {
                shell.say(&format!("There are no containers for: {}.", cluster));
            } else {
                shell.show(&ContainerInstanceMapView::from(&map));
            }
        }
        ContainerCommand::New { cluster } => {
            let launch = shell.config().launch.clone();
            let resp = instances::launch_container_instance(shell.ec2(), &cluster, &launch).await?;
            shell.show(&LaunchView::new(&cluster, &resp));
        }
        ContainerCommand::Stop {
            cluster,
            instance_arn,
        } => {
            let resp = instances::terminate_container_instance(
                shell.ecs(),
                shell.ec2(),
                &cluster,
                &instance_arn,
            )
            .await?;
            shell.show(&TerminateView::new(&instance_arn, &resp));
        }
    }
    Ok(())
}
