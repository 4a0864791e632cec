pub mod cluster;
pub mod described;
pub mod failure;
pub mod instance;
pub mod task;
pub mod task_definition;

pub use cluster::{Cluster, ClusterRef};
pub use described::{Described, DescribedMap};
pub use failure::Failure;
pub use instance::{Attribute, ContainerInstance, Resource, ResourceValue};
pub use task::{Container, NetworkBinding, Task, TaskStatus};
pub use task_definition::{
    ContainerDefinition, HostEntry, HostVolumeProperties, KeyValuePair, LogConfiguration,
    MountPoint, PortMapping, TaskDefinition, Ulimit, Volume, VolumeFrom,
};

/// Records that are addressed by an ARN-like identifier in describe responses.
pub trait Keyed {
    fn key(&self) -> Option<&str>;
}

pub type ContainerInstanceMap = DescribedMap<ContainerInstance>;
pub type TaskMap = DescribedMap<Task>;
