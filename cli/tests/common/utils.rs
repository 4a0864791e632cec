use std::sync::Arc;
use std::time::Duration;

use ecs_pilot::client::AwsClient;
use ecs_pilot::config::{Config, Credentials};
use ecs_pilot::logging::Verbosity;
use ecs_pilot::shell::{Shell, console::BufferConsole};
use wiremock::MockServer;

use super::test_ecs::TestEcs;

/// Fast waits so background reporters resolve within a test.
pub fn test_config() -> Config {
    Config {
        wait_delay: Duration::from_millis(10),
        wait_max_attempts: 5,
        ..Default::default()
    }
}

pub fn new_shell(ecs: &TestEcs) -> (Shell<TestEcs>, BufferConsole) {
    new_shell_with(ecs, test_config())
}

pub fn new_shell_with(ecs: &TestEcs, config: Config) -> (Shell<TestEcs>, BufferConsole) {
    let console = BufferConsole::default();
    let shell = Shell::new(
        Arc::new(ecs.clone()),
        config,
        Verbosity::default(),
        Arc::new(console.clone()),
    );
    (shell, console)
}

/// A client pointing both endpoints at the mock server, with fixed credentials.
pub fn client_for(server: &MockServer) -> AwsClient {
    AwsClient::new(Config {
        credentials: Some(Credentials {
            access_key_id: "AKIDEXAMPLE".to_string(),
            secret_access_key: "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY".to_string(),
            session_token: None,
        }),
        ecs_endpoint: server.uri(),
        ec2_endpoint: server.uri(),
        ..test_config()
    })
}
