//! Tally command-line driver.
//!
//! The binary (`tally`) is a thin argument dispatcher; everything it does is
//! reachable through this library so it can be tested without spawning a
//! process.

pub mod commands;
pub mod reporting;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Environment variable holding the tracing filter (`RUST_LOG` syntax).
pub const LOG_ENV: &str = "TALLY_LOG";

/// When set, log output is indented by span to show evaluation recursion.
pub const LOG_TREE_ENV: &str = "TALLY_LOG_TREE";

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Enable with `TALLY_LOG=tally_eval=trace`
/// (or `RUST_LOG`); add `TALLY_LOG_TREE=1` for hierarchical output.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if a filter is set
        let Ok(filter) =
            EnvFilter::try_from_env(LOG_ENV).or_else(|_| EnvFilter::try_from_default_env())
        else {
            return;
        };

        let tree = std::env::var_os(LOG_TREE_ENV).is_some();
        let result = tracing_subscriber::registry()
            .with(filter)
            .with(tree.then(|| {
                tracing_tree::HierarchicalLayer::new(2)
                    .with_targets(true)
                    .with_bracketed_fields(true)
            }))
            .with((!tree).then(|| {
                fmt::layer()
                    .with_target(true)
                    .with_level(true)
                    .with_writer(std::io::stderr)
            }))
            .try_init();

        if let Err(err) = result {
            eprintln!("warning: tracing already initialized: {err}");
        }
    });
}
