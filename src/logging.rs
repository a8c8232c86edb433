use std::io::IsTerminal;
use tracing::Level;
use tracing_subscriber::{
    fmt::{format::FmtSpan, time::UtcTime},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Initialize the logging and error reporting infrastructure
pub fn init(verbosity: u8) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    #[cfg(feature = "cli")]
    color_eyre::install()?;

    let log_level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    // RUST_LOG overrides the verbosity flags
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("fbmg={}", log_level)));

    let is_terminal = std::io::stdout().is_terminal();

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_ansi(is_terminal)
        .with_timer(UtcTime::rfc_3339())
        .with_span_events(FmtSpan::CLOSE);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    Ok(())
}

/// Format output for CLI with colors
#[cfg(feature = "cli")]
pub mod output {
    use console::{style, Emoji};
    use std::fmt::Display;

    static CHECKMARK: Emoji<'_, '_> = Emoji("✓ ", "[OK] ");
    static CROSS: Emoji<'_, '_> = Emoji("✗ ", "[FAIL] ");
    static WARNING: Emoji<'_, '_> = Emoji("⚠ ", "[WARN] ");
    static INFO: Emoji<'_, '_> = Emoji("ℹ ", "[INFO] ");

    pub fn success(message: impl Display) {
        println!("{} {}", style(CHECKMARK).green(), message);
    }

    pub fn error(message: impl Display) {
        eprintln!("{} {}", style(CROSS).red(), style(message).red());
    }

    pub fn warning(message: impl Display) {
        println!("{} {}", style(WARNING).yellow(), style(message).yellow());
    }

    pub fn info(message: impl Display) {
        println!("{} {}", style(INFO).blue(), message);
    }
}
