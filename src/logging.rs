//! Tracing subscriber setup used by the application.

use std::{env, io, sync::OnceLock};

use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{
    fmt::{time::ChronoLocal, writer::MakeWriterExt},
    EnvFilter,
};

/// Keeps the non-blocking file writer alive so buffered logs flush on exit.
static LOG_GUARD: OnceLock<non_blocking::WorkerGuard> = OnceLock::new();

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Console logging at `RUST_LOG` (default `info`), plus daily-rolling files
/// under `LOG_DIR` when set.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(ChronoLocal::new(TIMESTAMP_FORMAT.to_string()))
        .with_target(false);

    match env::var("LOG_DIR") {
        Ok(dir) => {
            let console = io::stdout.with_max_level(tracing::Level::INFO);
            builder.with_writer(console.and(file_writer(&dir))).init();
        }
        Err(_) => builder.init(),
    }

    tracing::info!("logger initialized");
}

fn file_writer(dir: &str) -> non_blocking::NonBlocking {
    let mut builder = rolling::RollingFileAppender::builder()
        .rotation(rolling::Rotation::DAILY)
        .filename_prefix("warhorn.log");

    if let Some(max) = env::var("LOG_MAX_FILES")
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
    {
        builder = builder.max_log_files(max);
    }

    let appender = builder.build(dir).expect("failed to create log file");
    let (writer, guard) = non_blocking(appender);

    LOG_GUARD.set(guard).expect("LOG_GUARD already set");

    writer
}
