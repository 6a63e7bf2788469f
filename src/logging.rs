use std::fs::{self, File};
use std::io;
use std::path::Path;
use std::sync::{Mutex, Once};
use tracing_subscriber::{fmt, EnvFilter};

static TRACING_INIT: Once = Once::new();

const DEFAULT_DIRECTIVE: &str = "ledger_explorer=info";

/// Installs the global tracing subscriber. Diagnostics go to `log_file` when
/// given, otherwise to stderr, so they never mix with query output on
/// stdout. `RUST_LOG` replaces the default level when it is set and valid.
///
/// Only the first call has any effect; later calls leave an existing log
/// file untouched.
pub fn init_tracing(log_file: Option<&Path>) -> io::Result<()> {
    if TRACING_INIT.is_completed() {
        return Ok(());
    }

    let file = match log_file {
        Some(path) => Some(create_log_file(path)?),
        None => None,
    };

    TRACING_INIT.call_once(|| {
        let builder = fmt().with_env_filter(build_filter(std::env::var("RUST_LOG").ok()));

        match file {
            Some(file) => builder.with_ansi(false).with_writer(Mutex::new(file)).init(),
            None => builder.with_writer(io::stderr).init(),
        }
    });

    Ok(())
}

fn create_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    File::create(path)
}

/// Uses the directives in `env` when they parse, the default otherwise.
fn build_filter(env: Option<String>) -> EnvFilter {
    env.and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVE))
}
