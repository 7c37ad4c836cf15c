//! Logger initialization.
//!
//! Logs always go to stderr; stdout carries scan results only.

use std::io::{IsTerminal, Write};

use crate::config::LogFormat;
use crate::error_handling::InitializationError;
use colored::*;
use log::{Level, LevelFilter};

/// Initializes the logger with the specified level and format.
///
/// The logger reads `RUST_LOG` first and `level` overrides it, so `RUST_LOG=debug`
/// works for quick debugging while `--log-level` stays authoritative. HTTP client
/// internals are capped at `info`.
///
/// Plain lines are colored only when stderr is a terminal.
///
/// # Errors
///
/// Returns `InitializationError::LoggerError` if a logger is already installed.
///
/// # Examples
///
/// ```bash
/// RUST_LOG=debug redirect_checker urls.txt
/// RUST_LOG=redirect_checker=debug,reqwest=info redirect_checker urls.txt --log-format json
/// ```
pub fn init_logger_with(level: LevelFilter, format: LogFormat) -> Result<(), InitializationError> {
    let mut builder = env_logger::Builder::from_default_env();

    builder.filter_level(level);
    builder.filter_module("reqwest", LevelFilter::Info);
    builder.filter_module("hyper", LevelFilter::Info);
    builder.filter_module("hyper_util", LevelFilter::Info);
    builder.filter_module("redirect_checker", level);
    builder.target(env_logger::Target::Stderr);

    match format {
        LogFormat::Json => {
            builder.format(|buf, record| {
                writeln!(
                    buf,
                    "{}",
                    json_line(
                        chrono::Utc::now().timestamp_millis(),
                        record.level(),
                        record.target(),
                        &record.args().to_string(),
                    )
                )
            });
        }
        LogFormat::Plain => {
            let color = std::io::stderr().is_terminal();
            builder.format(move |buf, record| {
                writeln!(
                    buf,
                    "{}",
                    plain_line(
                        record.level(),
                        record.target(),
                        &record.args().to_string(),
                        color
                    )
                )
            });
        }
    }

    builder.try_init().map_err(InitializationError::from)?;

    Ok(())
}

/// One JSON object per record: `ts` (epoch millis), `level`, `target`, `msg`.
fn json_line(ts_millis: i64, level: Level, target: &str, msg: &str) -> String {
    serde_json::json!({
        "ts": ts_millis,
        "level": level.as_str(),
        "target": target,
        "msg": msg,
    })
    .to_string()
}

/// `target [LEVEL] message`, with target and level colored when `color` is set.
fn plain_line(level: Level, target: &str, msg: &str, color: bool) -> String {
    if !color {
        return format!("{target} [{level}] {msg}");
    }

    let label = level.to_string();
    let label = match level {
        Level::Error => label.red(),
        Level::Warn => label.yellow(),
        Level::Info => label.green(),
        Level::Debug => label.blue(),
        Level::Trace => label.purple(),
    };
    format!("{} [{}] {}", target.cyan(), label, msg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_line_fields() {
        let line = json_line(
            1_700_000_000_000,
            Level::Warn,
            "redirect_checker::fetch",
            "Hop limit (10) reached",
        );
        assert!(!line.contains('\n'));

        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["ts"], 1_700_000_000_000i64);
        assert_eq!(value["level"], "WARN");
        assert_eq!(value["target"], "redirect_checker::fetch");
        assert_eq!(value["msg"], "Hop limit (10) reached");
    }

    #[test]
    fn test_json_line_escapes_message() {
        let msg = "Unusable Location \"http://[broken\"\nnext line";
        let line = json_line(0, Level::Debug, "t", msg);
        assert_eq!(line.lines().count(), 1);

        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["msg"], msg);
    }

    #[test]
    fn test_plain_line_without_color_has_no_escapes() {
        let line = plain_line(Level::Error, "redirect_checker", "Failed to fetch", false);
        assert_eq!(line, "redirect_checker [ERROR] Failed to fetch");
        assert!(!line.contains('\u{1b}'));
    }

    #[test]
    fn test_init_logger_only_once() {
        let _ = init_logger_with(LevelFilter::Info, LogFormat::Plain);
        let second = init_logger_with(LevelFilter::Debug, LogFormat::Json);
        assert!(matches!(second, Err(InitializationError::LoggerError(_))));
    }
}
