use std::sync::Arc;

use clap::Parser;
use ecs_pilot::client::AwsClient;
use ecs_pilot::config::Config;
use ecs_pilot::logging;
use ecs_pilot::shell::{Shell, console::StdoutConsole};
use tokio::io::BufReader;

/// Interactive client for the ECS container orchestration API: inspect and manage
/// clusters, container instances, tasks and task definitions.
#[derive(Parser, Debug)]
#[command(name = "ecs-pilot", version, about, long_about = None)]
struct Cli {
    /// Region to talk to, overriding AWS_REGION
    #[arg(long)]
    region: Option<String>,

    /// A single shell command to run instead of starting the prompt
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    words: Vec<String>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let verbosity = logging::init();

    let mut config = Config::from_env();
    if let Some(region) = &cli.region {
        config.set_region(region);
    }
    tracing::debug!(region=%config.region, ecs=%config.ecs_endpoint, "Loaded configuration");

    let client = Arc::new(AwsClient::new(config.clone()));
    let mut shell = Shell::new(client, config, verbosity, Arc::new(StdoutConsole));

    if cli.words.is_empty() {
        shell.run(BufReader::new(tokio::io::stdin())).await;
    } else {
        shell.execute(&cli.words.join(" ")).await;
    }
    shell.wait_pending().await;
}
