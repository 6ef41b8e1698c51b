use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Map a user-supplied level name to an `EnvFilter` directive.
///
/// Accepts the usual aliases (`WARNING`, `CRITICAL`) in any case; anything
/// else is passed through so full directives like `plantar_processing=debug`
/// keep working.
fn normalise_level(log_level: &str) -> String {
    match log_level.to_uppercase().as_str() {
        "TRACE" => "trace".to_string(),
        "DEBUG" => "debug".to_string(),
        "INFO" => "info".to_string(),
        "WARN" | "WARNING" => "warn".to_string(),
        "ERROR" | "CRITICAL" => "error".to_string(),
        _ => log_level.to_string(),
    }
}

/// Initialise the global `tracing` subscriber on stderr.
///
/// `RUST_LOG` wins over `log_level` when set. Falls back to `info` if neither
/// yields a valid filter.
pub fn setup_logging(log_level: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(normalise_level(log_level)))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(subscriber)
        .try_init()?;

    Ok(())
}
