use std::{
    fs::{self, File},
    path::{Path, PathBuf},
    sync::Arc,
};

use eyre::Context;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initializes console and file logging for the whole process.
///
/// One log file is created per run, suffixed with the start timestamp.
/// Must be called exactly once, before any other component runs.
/// Returns the path of the log file.
pub fn init(log_dir: &Path) -> eyre::Result<PathBuf> {
    fs::create_dir_all(log_dir)
        .wrap_err_with(|| format!("failed to create log directory {}", log_dir.display()))?;

    let timestamp = chrono::Local::now().format("%Y%m%d%H%M%S");
    let path = log_dir.join(format!("github-user-sync_{timestamp}.log"));
    let file = File::create(&path)
        .wrap_err_with(|| format!("failed to create log file {}", path.display()))?;

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(fmt::layer().with_ansi(false).with_writer(Arc::new(file)))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    Ok(path)
}
