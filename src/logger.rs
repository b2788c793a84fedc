use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_PATH: &str = "logs/gambit.log";

/// Route `tracing` output to an append-only log file.
///
/// `path` overrides [`DEFAULT_LOG_PATH`]; the REPL passes its first CLI
/// argument here. The filter comes from `RUST_LOG`, falling back to `info`,
/// so runtime tweaking works without recompiling:
/// `RUST_LOG="gambit::search=debug"`.
///
/// The returned guard owns the background writer; hold it for as long as
/// records should keep flushing. If a global subscriber is already installed
/// the earlier one wins and this call only opens the file.
pub fn init(path: Option<&str>) -> io::Result<WorkerGuard> {
    let path = Path::new(path.unwrap_or(DEFAULT_LOG_PATH));
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let (writer, guard) = tracing_appender::non_blocking(file);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_target(true)
        .with_writer(writer)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    Ok(guard)
}
