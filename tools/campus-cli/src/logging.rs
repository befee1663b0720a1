//! Tracing subscriber setup.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{LogFormat, LoggingConfig};

/// Filter used when neither `RUST_LOG` nor the config names a level.
pub const DEFAULT_DIRECTIVES: &str = "campus=info,campus_commerce=info";

/// Build the filter directives for a configured level.
///
/// A bare level such as `debug` is scoped to this CLI and the commerce
/// crate; anything containing `=` or `,` is taken as a full directive.
pub fn directives(level: &str, verbose: bool) -> String {
    let level = level.trim();
    if verbose {
        return "campus=debug,campus_commerce=debug".to_string();
    }
    if level.is_empty() {
        return DEFAULT_DIRECTIVES.to_string();
    }
    if level.contains('=') || level.contains(',') {
        return level.to_string();
    }
    format!("campus={level},campus_commerce={level}")
}

/// Install the global subscriber. Logs go to stderr so command output on
/// stdout stays machine-readable.
pub fn init(config: &LoggingConfig, verbose: bool) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(directives(&config.level, verbose)))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));

    let json = config.format == LogFormat::Json;
    let json_layer = json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let text_layer = (!json).then(|| {
        tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr)
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}
