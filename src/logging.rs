use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_FILTER: &str = "info";
const DEFAULT_LOG_FILE_PATH: &str = "./logs/dirpatch.log";
const DEFAULT_LOG_FILE_NAME: &str = "dirpatch.log";

/// Console plus file logging, configured from the environment:
///
/// - `TRACING_LEVEL`: an `EnvFilter` directive, `info` when unset or invalid
/// - `LOG_FILE_PATH`: the log file, `./logs/dirpatch.log` by default
///
/// The file layer writes through a background thread; keep the returned
/// guard alive for the whole run so buffered lines are flushed.
pub fn init_logger() -> WorkerGuard {
    let directive = env::var("TRACING_LEVEL").ok();
    let (filter_layer, rejected) = build_filter(directive.as_deref());

    let log_file_path =
        env::var("LOG_FILE_PATH").unwrap_or_else(|_| DEFAULT_LOG_FILE_PATH.to_string());
    let (log_dir, log_file) = split_log_path(Path::new(&log_file_path));
    let (file_writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never(&log_dir, &log_file));

    let console_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .pretty()
        .with_target(false)
        .with_file(false)
        .with_line_number(false)
        .without_time();
    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_thread_names(true);

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .with(filter_layer)
        .init();

    if let Some(directive) = rejected {
        warn!("Ignoring invalid TRACING_LEVEL '{}', using '{}'", directive, DEFAULT_FILTER);
    }
    debug!("Log file: {}", log_dir.join(&log_file).display());

    guard
}

/// Parse the filter directive, falling back to the default. The rejected
/// directive is returned so it can be reported once logging is up.
fn build_filter(directive: Option<&str>) -> (EnvFilter, Option<String>) {
    match directive {
        None => (EnvFilter::new(DEFAULT_FILTER), None),
        Some(directive) => match EnvFilter::try_new(directive) {
            Ok(filter) => (filter, None),
            Err(_) => (EnvFilter::new(DEFAULT_FILTER), Some(directive.to_string())),
        },
    }
}

/// The appender wants a directory and a file name. A bare name logs into the
/// working directory.
fn split_log_path(path: &Path) -> (PathBuf, OsString) {
    match path.file_name() {
        Some(name) => {
            let dir = match path.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
                _ => PathBuf::from("."),
            };
            (dir, name.to_os_string())
        }
        // `..`, `/` and similar name a directory
        None => (path.to_path_buf(), OsString::from(DEFAULT_LOG_FILE_NAME)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_default_log_path() {
        let (dir, file) = split_log_path(Path::new(DEFAULT_LOG_FILE_PATH));
        assert_eq!(dir, PathBuf::from("./logs"));
        assert_eq!(file, OsString::from("dirpatch.log"));
    }

    #[test]
    fn test_split_bare_file_name() {
        let (dir, file) = split_log_path(Path::new("run.log"));
        assert_eq!(dir, PathBuf::from("."));
        assert_eq!(file, OsString::from("run.log"));
    }

    #[test]
    fn test_split_directory_only_path() {
        let (dir, file) = split_log_path(Path::new("/var/log/.."));
        assert_eq!(dir, PathBuf::from("/var/log/.."));
        assert_eq!(file, OsString::from(DEFAULT_LOG_FILE_NAME));
    }

    #[test]
    fn test_build_filter_accepts_directives() {
        let (_, rejected) = build_filter(Some("dirpatch=debug,warn"));
        assert!(rejected.is_none());
    }

    #[test]
    fn test_build_filter_falls_back_on_garbage() {
        let (filter, rejected) = build_filter(Some("dirpatch=loud"));
        assert_eq!(rejected.as_deref(), Some("dirpatch=loud"));
        assert_eq!(filter.to_string(), EnvFilter::new(DEFAULT_FILTER).to_string());
    }

    #[test]
    fn test_build_filter_defaults_when_unset() {
        let (filter, rejected) = build_filter(None);
        assert!(rejected.is_none());
        assert_eq!(filter.to_string(), EnvFilter::new(DEFAULT_FILTER).to_string());
    }
}
