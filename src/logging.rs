//! File logging for every invocation.
//!
//! All `log` records are appended to the state directory's log file as
//! `[yyyy-mm-dd hh:mm:ss] [LEVEL] message`. The file is never rotated.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use env_logger::{Builder, Env, Target};

/// Default filter when `RUST_LOG` is unset
const DEFAULT_FILTER: &str = "jekyll_docker=info";

/// Format one log line.
pub fn format_line(timestamp: &chrono::DateTime<chrono::Local>, level: log::Level, message: &str) -> String {
    format!(
        "[{}] [{}] {}",
        timestamp.format("%Y-%m-%d %H:%M:%S"),
        level,
        message
    )
}

/// Route the `log` facade into `log_file`.
///
/// Falls back to env_logger's stderr output if the file cannot be opened, so
/// a read-only state directory never blocks a command.
pub fn init(log_file: &Path) {
    let mut builder = Builder::from_env(Env::default().default_filter_or(DEFAULT_FILTER));

    match OpenOptions::new().create(true).append(true).open(log_file) {
        Ok(file) => {
            builder
                .target(Target::Pipe(Box::new(file)))
                .format(|buf, record| {
                    writeln!(
                        buf,
                        "{}",
                        format_line(&chrono::Local::now(), record.level(), &record.args().to_string())
                    )
                });
        }
        Err(e) => {
            eprintln!(
                "Warning: cannot open log file {}: {}",
                log_file.display(),
                e
            );
        }
    }

    if let Err(e) = builder.try_init() {
        log::debug!("Logger already installed, keeping it: {}", e);
    }
}
