//! Logging setup and the runtime verbosity switch used by the `verbose` command.

use tracing_subscriber::{
    EnvFilter, Registry, fmt, layer::SubscriberExt, reload, util::SubscriberInitExt,
};

const QUIET: &str = "error";
const VERBOSE: &str = "debug";

pub type FilterHandle = reload::Handle<EnvFilter, Registry>;

/// Installs the global subscriber and returns the switch controlling its filter.
///
/// The starting filter comes from `RUST_LOG`, or `error` when unset.
pub fn init() -> Verbosity {
    let quiet = std::env::var("RUST_LOG").unwrap_or_else(|_| QUIET.to_string());
    let (filter, handle) = reload::Layer::new(EnvFilter::new(&quiet));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    Verbosity {
        verbose: false,
        quiet,
        handle: Some(handle),
    }
}

/// Flips the log filter between its starting directive and `debug`.
#[derive(Debug)]
pub struct Verbosity {
    verbose: bool,
    quiet: String,
    handle: Option<FilterHandle>,
}

impl Verbosity {
    /// A switch that is not attached to any subscriber.
    pub fn detached(quiet: &str) -> Self {
        Verbosity {
            verbose: false,
            quiet: quiet.to_string(),
            handle: None,
        }
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// The filter directive currently in effect.
    pub fn directive(&self) -> &str {
        if self.verbose { VERBOSE } else { &self.quiet }
    }

    /// Toggles verbose mode and returns the new state.
    pub fn toggle(&mut self) -> bool {
        self.verbose = !self.verbose;
        if let Some(handle) = &self.handle {
            if let Err(err) = handle.reload(EnvFilter::new(self.directive())) {
                tracing::warn!(error=%err, "Failed to reload log filter");
            }
        }
        self.verbose
    }
}

impl Default for Verbosity {
    fn default() -> Self {
        Verbosity::detached(QUIET)
    }
}
