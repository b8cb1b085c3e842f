use anyhow::Result;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Timestamp format for every log line: `YYYY-MM-DD HH:MM:SS`.
struct WallClock;

impl FormatTime for WallClock {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S"))
    }
}

/// Initialize tracing with timestamped lines on stdout.
///
/// `debug` raises the default filter so every underlying API call is traced;
/// RUST_LOG still takes precedence when set.
pub fn init_telemetry(debug: bool) -> Result<()> {
    let default_level = if debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_timer(WallClock)
                .with_target(false)
                .with_writer(std::io::stdout),
        )
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()))
        .init();

    Ok(())
}
