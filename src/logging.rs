//! Tracing setup: compact stderr output, optional rolling JSON file log.

use std::path::{Path, PathBuf};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global subscriber.
///
/// `RUST_LOG` wins when set; otherwise the crate logs at info, or debug
/// with `verbose`. With a file path, a daily-rolling JSON log is written in
/// addition to stderr.
pub fn init(verbose: bool, log_file: Option<PathBuf>) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer);

    match log_file {
        Some(path) => {
            let directory = path.parent().unwrap_or_else(|| Path::new("."));
            let _ = std::fs::create_dir_all(directory);
            let file_name = path
                .file_name()
                .unwrap_or_else(|| std::ffi::OsStr::new("lifemap.log"));

            let file_layer = fmt::layer()
                .with_writer(tracing_appender::rolling::daily(directory, file_name))
                .with_ansi(false)
                .json();

            subscriber.with(file_layer).init();
        }
        None => subscriber.init(),
    }
}

fn default_directive(verbose: bool) -> String {
    let level = if verbose { "debug" } else { "info" };
    format!("lifemap={}", level)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive_follows_verbose_flag() {
        assert_eq!(default_directive(false), "lifemap=info");
        assert_eq!(default_directive(true), "lifemap=debug");
    }

    #[test]
    fn test_default_directive_parses_as_a_filter() {
        let directive = default_directive(true);
        assert!(directive.parse::<EnvFilter>().is_ok());
    }
}
