#![allow(dead_code)]

pub mod test_ecs;
pub mod utils;
