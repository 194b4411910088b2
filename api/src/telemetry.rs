//! Tracing subscriber setup

use tracing_subscriber::EnvFilter;

use otp_shared::{LogFormat, LoggingConfig};

/// Install the global subscriber described by `config`
///
/// `config.level` accepts anything `EnvFilter` does, from a bare level to a
/// full `RUST_LOG` directive list. An invalid directive falls back to `info`.
pub fn init_tracing(config: &LoggingConfig) {
    let filter = EnvFilter::try_new(&config.level).unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_ansi(config.colored)
        .with_file(config.source_location)
        .with_line_number(config.source_location);

    let result = match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
    };

    if let Err(e) = result {
        eprintln!("Tracing subscriber already installed: {e}");
    }
}
