pub mod adapter;
pub mod client;
pub mod config;
pub mod logging;
pub mod shell;
