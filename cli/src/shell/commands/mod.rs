pub mod cluster;
pub mod container;
pub mod task;
pub mod task_definition;
