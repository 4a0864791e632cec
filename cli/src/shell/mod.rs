//! # Command Shell
//!
//! Reads one line at a time, parses it into a fresh command, runs it through the
//! adapter and prints the result. Errors are printed and the loop carries on; only
//! end-of-input, `exit` and `quit` end it.
//!
//! Task waits run in the background. For each one a reporter prints the completion
//! message whenever it resolves, interleaving with whatever is in the foreground.

pub mod commands;
pub mod console;
pub mod parser;

use std::{fmt, sync::Arc};

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::task::JoinHandle;

use crate::adapter::{PilotError, waiter::WaitHandle};
use crate::client::{Ec2Api, EcsApi};
use crate::config::Config;
use crate::logging::Verbosity;
use console::Console;
use parser::{Command, Parsed};

const PROMPT: &str = "> ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Continue,
    Terminate,
}

pub struct Shell<A> {
    api: Arc<A>,
    config: Config,
    verbosity: Verbosity,
    console: Arc<dyn Console>,
    reporters: Vec<JoinHandle<()>>,
}

impl<A> Shell<A>
where
    A: EcsApi + Ec2Api + 'static,
{
    pub fn new(api: Arc<A>, config: Config, verbosity: Verbosity, console: Arc<dyn Console>) -> Self {
        Shell {
            api,
            config,
            verbosity,
            console,
            reporters: Vec::new(),
        }
    }

    pub fn ecs(&self) -> &dyn EcsApi {
        self.api.as_ref()
    }

    pub fn ec2(&self) -> &dyn Ec2Api {
        self.api.as_ref()
    }

    pub(crate) fn shared_ecs(&self) -> Arc<dyn EcsApi> {
        self.api.clone()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn verbosity(&self) -> &Verbosity {
        &self.verbosity
    }

    /// Prints a rendered view as is.
    pub fn show<V: fmt::Display + ?Sized>(&self, view: &V) {
        self.console.print(&view.to_string());
    }

    /// Prints a single message line.
    pub fn say(&self, message: &str) {
        self.console.println(message);
    }

    /// Hands a wait to a background reporter that prints `report`'s message once the
    /// wait resolves.
    pub fn track<F>(&mut self, wait: WaitHandle, report: F)
    where
        F: FnOnce(&str, &[String], Result<(), PilotError>) -> String + Send + 'static,
    {
        let console = self.console.clone();
        let cluster = wait.cluster.clone();
        let task_arns = wait.task_arns.clone();
        let target = wait.target;

        self.reporters.retain(|r| !r.is_finished());
        self.reporters.push(tokio::spawn(async move {
            let outcome = wait.outcome().await;
            if let Err(e) = &outcome {
                tracing::error!(%cluster, ?task_arns, %target, error=%e, "Wait failed");
            }
            console.println(&report(cluster.as_str(), task_arns.as_slice(), outcome));
        }));
    }

    /// Waits for every background reporter to print its message.
    pub async fn wait_pending(&mut self) {
        for reporter in self.reporters.drain(..) {
            if let Err(e) = reporter.await {
                tracing::warn!(error=%e, "Wait reporter panicked");
            }
        }
    }

    /// Runs one input line.
    pub async fn execute(&mut self, input: &str) -> Step {
        match parser::parse(input) {
            Parsed::Blank => Step::Continue,
            Parsed::Help(text) => {
                self.show(&text);
                Step::Continue
            }
            Parsed::Invalid(message) => {
                self.say(&format!("Command error: {}.", message));
                self.say("Type help for a list of commands.");
                Step::Continue
            }
            Parsed::Command(command) => self.dispatch(command).await,
        }
    }

    async fn dispatch(&mut self, command: Command) -> Step {
        tracing::debug!(?command, "Executing");
        let result = match command {
            Command::Exit | Command::Quit => return Step::Terminate,
            Command::Verbose => {
                if self.verbosity.toggle() {
                    self.say("Verbose is on.");
                } else {
                    self.say("Verbose is off.");
                }
                Ok(())
            }
            Command::Cluster(cmd) => commands::cluster::handle(self, cmd).await,
            Command::Container(cmd) => commands::container::handle(self, cmd).await,
            Command::Task(cmd) => commands::task::handle(self, cmd).await,
            Command::TaskDefinition(cmd) => commands::task_definition::handle(self, cmd).await,
        };

        if let Err(e) = result {
            let message = e.to_string();
            self.say(&format!("Error - {}.", message.trim_end_matches('.')));
        }
        Step::Continue
    }

    /// The read-eval-print loop. Returns when input ends or the user leaves.
    ///
    /// Lines are decoded lossily, so bytes that are not UTF-8 reach the parser as
    /// replacement characters. A failed read is reported and the loop carries on.
    pub async fn run<R>(&mut self, mut input: R)
    where
        R: AsyncBufRead + Unpin,
    {
        let mut buf = Vec::new();
        loop {
            self.console.print(PROMPT);
            buf.clear();
            match input.read_until(b'\n', &mut buf).await {
                Ok(0) => {
                    self.console.println("");
                    break;
                }
                Ok(_) => {
                    let line = String::from_utf8_lossy(&buf);
                    let line = line.trim_end_matches(['\n', '\r']);
                    if self.execute(line).await == Step::Terminate {
                        break;
                    }
                }
                Err(e) => {
                    tracing::warn!(error=%e, "Failed to read input");
                    self.say(&format!("Error - {}.", e));
                }
            }
        }
    }
}
