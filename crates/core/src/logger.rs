use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    fmt::{format::Writer, time::FormatTime},
    EnvFilter,
};

/// Environment variable holding extra filter directives, e.g.
/// `TB_LOG=trueblocks_sdk=debug`.
const LOG_ENV_VAR: &str = "TB_LOG";

/// Timestamps as "DD Month - HH:MM:SS.micros" in local time.
struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, writer: &mut Writer<'_>) -> std::fmt::Result {
        let now = chrono::Local::now();
        write!(writer, "{} - {}", now.format("%d %B"), now.format("%H:%M:%S%.6f"))
    }
}

/// Installs the global tracing subscriber.
///
/// `log_level` is the floor; directives in `TB_LOG` are layered on top of it.
/// If a global subscriber is already installed this does nothing, so tests
/// and embedding binaries may call it freely.
pub fn setup_logger(log_level: LevelFilter) {
    let filter = EnvFilter::builder()
        .with_default_directive(log_level.into())
        .with_env_var(LOG_ENV_VAR)
        .from_env_lossy();

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(LocalTimer)
        .with_level(true)
        .with_target(false)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}

pub fn setup_info_logger() {
    setup_logger(LevelFilter::INFO);
}
