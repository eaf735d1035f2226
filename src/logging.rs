//! Logging setup
//! Global tracing subscriber; `RUST_LOG` overrides the verbosity flag.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber. `RUST_LOG` takes precedence over `verbose`.
pub fn init_logger(verbose: bool) {
    let default_filter = if verbose {
        "tourism_explorer=debug,info"
    } else {
        "tourism_explorer=info,warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}
