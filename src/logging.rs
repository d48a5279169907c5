// Conditional logging macros - only active in debug builds

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use log::LevelFilter;

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        log::debug!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {{}};
}

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        log::info!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {{}};
}

/// Maps the number of `-v` flags to a level filter.
pub fn level_for_verbosity(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Where log records end up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget<'a> {
    Stderr,
    File(&'a Path),
    /// Nothing is written; used while the full-screen UI owns the terminal.
    Discard,
}

/// Builds the `env_logger` configuration without installing it.
///
/// `RUST_LOG` wins over `verbosity` when set, except for `Discard`, which
/// turns logging off regardless.
pub fn build_logger(verbosity: u8, target: LogTarget<'_>) -> io::Result<env_logger::Builder> {
    let mut builder = env_logger::Builder::new();
    builder.format(|buf, record| {
        writeln!(
            buf,
            "{} {:<5} {}: {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
            record.level(),
            record.target(),
            record.args()
        )
    });

    match target {
        LogTarget::Discard => {
            builder
                .filter_level(LevelFilter::Off)
                .target(env_logger::Target::Pipe(Box::new(io::sink())));
        }
        LogTarget::Stderr => {
            builder
                .filter_level(level_for_verbosity(verbosity))
                .parse_default_env();
        }
        LogTarget::File(path) => {
            let file = File::create(path)?;
            builder
                .filter_level(level_for_verbosity(verbosity))
                .parse_default_env()
                .target(env_logger::Target::Pipe(Box::new(file)));
        }
    }
    Ok(builder)
}

/// Sets up `env_logger` once for the process.
pub fn init_logger(verbosity: u8, target: LogTarget<'_>) -> io::Result<()> {
    // A second init (e.g. from tests) keeps the first logger.
    let _ = build_logger(verbosity, target)?.try_init();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_for_verbosity() {
        assert_eq!(level_for_verbosity(0), LevelFilter::Warn);
        assert_eq!(level_for_verbosity(1), LevelFilter::Info);
        assert_eq!(level_for_verbosity(2), LevelFilter::Debug);
        assert_eq!(level_for_verbosity(7), LevelFilter::Trace);
    }

    #[test]
    fn test_init_logger_twice_is_harmless() {
        assert!(init_logger(0, LogTarget::Stderr).is_ok());
        assert!(init_logger(2, LogTarget::Stderr).is_ok());
    }

    #[test]
    fn test_discard_target_logs_nothing() {
        // Off even at the highest verbosity, whatever RUST_LOG says.
        let logger = build_logger(3, LogTarget::Discard).unwrap().build();
        assert_eq!(logger.filter(), LevelFilter::Off);
    }

    #[test]
    fn test_file_target_creates_file() {
        let path = std::env::temp_dir().join("wordle_assistant_log_target.log");
        build_logger(1, LogTarget::File(&path)).unwrap();
        assert!(path.exists());
        std::fs::remove_file(&path).unwrap();
    }
}
