use barnlog_core::Config;
use tracing_subscriber::{
    fmt::format::Format, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

const LOG_TARGETS: [&str; 5] = [
    "barnlog_api",
    "barnlog_storage",
    "barnlog_processing",
    "barnlog_core",
    "tower_http",
];

/// Default filter directives when `RUST_LOG` is unset.
fn default_directives(level: tracing::Level) -> String {
    let level = level.as_str().to_ascii_lowercase();
    LOG_TARGETS
        .iter()
        .map(|target| format!("{}={}", target, level))
        .collect::<Vec<_>>()
        .join(",")
}

/// Initialize tracing.
///
/// Local and dev environments log in the compact text format; everything else emits JSON lines.
pub fn init_telemetry(config: &Config) -> Result<(), anyhow::Error> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(config.log_level())));

    let (console_fmt, json_fmt) = if config.is_local() {
        let console_fmt = tracing_subscriber::fmt::layer()
            .event_format(Format::default().compact().with_target(false));
        (Some(console_fmt), None)
    } else {
        let json_fmt = tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_current_span(true);
        (None, Some(json_fmt))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console_fmt)
        .with(json_fmt)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))?;

    tracing::info!(
        environment = config.environment(),
        log_level = %config.log_level(),
        "Telemetry initialized"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives() {
        let directives = default_directives(tracing::Level::WARN);
        assert!(directives.contains("barnlog_api=warn"));
        assert!(directives.contains("tower_http=warn"));
        assert!(directives.parse::<EnvFilter>().is_ok());
    }
}
