use clap::{Parser, Subcommand, error::ErrorKind};

use super::commands::{
    cluster::ClusterCommand, container::ContainerCommand, task::TaskCommand,
    task_definition::TaskDefinitionCommand,
};

/// One line typed at the prompt.
#[derive(Parser, Debug, PartialEq, Eq)]
#[command(
    name = "ecs-pilot",
    no_binary_name = true,
    disable_version_flag = true,
    help_template = "{all-args}"
)]
pub struct Line {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Toggle debug logging
    Verbose,
    /// Leave the shell
    Exit,
    /// Leave the shell
    Quit,
    /// Manage clusters
    #[command(subcommand)]
    Cluster(ClusterCommand),
    /// Manage container instances
    #[command(subcommand)]
    Container(ContainerCommand),
    /// Manage tasks
    #[command(subcommand)]
    Task(TaskCommand),
    /// Manage task definitions
    #[command(subcommand)]
    TaskDefinition(TaskDefinitionCommand),
}

/// Result of parsing a line.
#[derive(Debug)]
pub enum Parsed {
    Blank,
    Command(Command),
    /// Help text requested with `help` or `--help`.
    Help(String),
    Invalid(String),
}

/// Parses a raw input line into a fresh command value.
pub fn parse(input: &str) -> Parsed {
    let words: Vec<&str> = input.split_whitespace().collect();
    if words.is_empty() {
        return Parsed::Blank;
    }

    match Line::try_parse_from(words) {
        Ok(line) => Parsed::Command(line.command),
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp
            | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
            | ErrorKind::DisplayVersion => Parsed::Help(e.to_string()),
            _ => Parsed::Invalid(error_message(&e)),
        },
    }
}

// First line of clap's rendering, without its "error: " prefix.
fn error_message(e: &clap::Error) -> String {
    let rendered = e.to_string();
    let first = rendered.lines().next().unwrap_or_default();
    first.strip_prefix("error: ").unwrap_or(first).trim().to_string()
}
