use tracing_subscriber::Layer;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt as _, util::SubscriberInitExt as _};

/// Filter used when `RUST_LOG` is unset
fn default_directive(debug: bool) -> &'static str {
    if debug { "lictl=debug" } else { "lictl=warn" }
}

/// Build the log filter; `RUST_LOG` wins over the `--debug` flag
fn env_filter(debug: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive(debug)))
}

// Logs go to stderr so rendered output on stdout stays clean
pub fn init_tracing_subscriber(debug: bool) {
    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(env_filter(debug));

    tracing_subscriber::registry().with(console_layer).init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive() {
        assert_eq!(default_directive(false), "lictl=warn");
        assert_eq!(default_directive(true), "lictl=debug");
    }
}
