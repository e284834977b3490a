//! Logging setup.
//!
//! All diagnostics go to stderr; stdout carries only the include lines.
//! `INCBOT_LOG` takes an `EnvFilter` directive and overrides the
//! verbosity chosen on the command line, e.g.
//! `INCBOT_LOG=incbot::scan=trace`.

use std::sync::Once;

use tracing_subscriber::{prelude::*, EnvFilter};
use tracing_tree::HierarchicalLayer;

/// Environment variable holding a filter directive.
pub const LOG_ENV: &str = "INCBOT_LOG";

/// Target of per-identifier trace events (`--trace`).
pub const TRACE_TARGET: &str = "incbot::trace";

static TRACING_INIT: Once = Once::new();

/// How much to log when `INCBOT_LOG` is unset.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    /// Warnings, plus traced identifiers.
    #[default]
    Quiet,
    /// Table and file names.
    Verbose,
    /// Every identifier lookup.
    Debug,
}

impl Verbosity {
    /// Filter directive for this level.
    pub fn directive(self) -> String {
        let level = match self {
            Verbosity::Quiet => "warn",
            Verbosity::Verbose => "info",
            Verbosity::Debug => "debug",
        };
        format!("{level},{TRACE_TARGET}=info")
    }
}

/// Install the stderr subscriber.
///
/// Call this once at startup. Later calls do nothing.
pub fn init_tracing(verbosity: Verbosity) {
    TRACING_INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV)
            .unwrap_or_else(|_| EnvFilter::new(verbosity.directive()));
        let layer = HierarchicalLayer::new(2)
            .with_writer(std::io::stderr)
            .with_targets(true)
            .with_bracketed_fields(true);
        tracing_subscriber::registry().with(filter).with(layer).init();
    });
}
