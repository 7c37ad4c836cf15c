//! Writing batch results to stdout.

use std::io::Write;

use colored::*;

use crate::batch::BatchEntry;
use crate::config::OutputFormat;
use crate::models::{ScanResult, ScanStatus};

/// Writes one batch entry as a table row or a JSON line.
///
/// `color` only affects table rows; callers pass `true` when the destination
/// is a terminal.
///
/// # Errors
///
/// Returns an error if writing to `writer` fails.
pub fn write_entry<W: Write>(
    writer: &mut W,
    entry: &BatchEntry,
    format: OutputFormat,
    color: bool,
) -> std::io::Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer(&mut *writer, entry)?;
            writeln!(writer)
        }
        OutputFormat::Table => writeln!(writer, "{}", table_row(entry, color)),
    }
}

fn table_row(entry: &BatchEntry, color: bool) -> String {
    let result = &entry.result;
    let status = format!("{:>5}", result.status.to_string());
    let status = if color {
        paint_status(result.status, &status).to_string()
    } else {
        status
    };

    if result.is_degraded() {
        return format!(
            "{:>4}  {}  {:<12}  {}: {}",
            entry.index + 1,
            status,
            result.classification.as_ref(),
            entry.input,
            result.destination,
        );
    }

    format!(
        "{:>4}  {}  {:<12}  {} -> {}{}",
        entry.index + 1,
        status,
        result.classification.as_ref(),
        entry.input,
        result.destination,
        hop_suffix(result),
    )
}

fn paint_status(status: ScanStatus, text: &str) -> ColoredString {
    match status {
        _ if status.is_success() => text.green(),
        _ if status.is_redirect() => text.yellow(),
        ScanStatus::Code(_) => text.red(),
        ScanStatus::NoResponse => text.dimmed(),
        ScanStatus::Error => text.red().bold(),
    }
}

fn hop_suffix(result: &ScanResult) -> String {
    match result.hops.len() {
        0 => String::new(),
        1 => " (1 hop)".to_string(),
        n => format!(" ({n} hops)"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Classification, Hop, Termination};
    use std::collections::BTreeMap;

    fn redirected_entry() -> BatchEntry {
        BatchEntry {
            index: 0,
            input: "example.com".to_string(),
            url: Some("http://example.com".to_string()),
            result: ScanResult {
                status: ScanStatus::Code(200),
                initial_status: ScanStatus::Code(301),
                destination: "https://example.com/".to_string(),
                classification: Classification::Permanently,
                headers: BTreeMap::from([("server".to_string(), "test".to_string())]),
                hops: vec![Hop {
                    url: "http://example.com".to_string(),
                    status: Some(301),
                    location: Some("https://example.com/".to_string()),
                }],
                termination: Termination::Final,
            },
        }
    }

    #[test]
    fn test_write_entry_json_line() {
        let mut out = Vec::new();
        write_entry(&mut out, &redirected_entry(), OutputFormat::Json, false).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.ends_with('\n'));
        assert_eq!(text.lines().count(), 1);

        let value: serde_json::Value = serde_json::from_str(text.trim()).unwrap();
        assert_eq!(value["index"], 0);
        assert_eq!(value["input"], "example.com");
        assert_eq!(value["status"], 200);
        assert_eq!(value["initialStatus"], 301);
        assert_eq!(value["type"], "Permanently");
        assert_eq!(value["destination"], "https://example.com/");
        assert_eq!(value["hops"][0]["status"], 301);
        assert!(value.get("termination").is_none());
    }

    #[test]
    fn test_write_entry_table_row() {
        let mut out = Vec::new();
        write_entry(&mut out, &redirected_entry(), OutputFormat::Table, false).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("200"));
        assert!(text.contains("Permanently"));
        assert!(text.contains("example.com -> https://example.com/"));
        assert!(text.contains("(1 hop)"));
        assert!(!text.contains('\u{1b}'), "uncolored row carries escapes: {text:?}");
    }

    #[test]
    fn test_write_entry_degraded_row() {
        let entry = BatchEntry {
            index: 3,
            input: "unreachable.test".to_string(),
            url: Some("http://unreachable.test".to_string()),
            result: ScanResult::degraded("connection refused"),
        };

        let mut out = Vec::new();
        write_entry(&mut out, &entry, OutputFormat::Json, false).unwrap();
        let value: serde_json::Value =
            serde_json::from_str(String::from_utf8(out).unwrap().trim()).unwrap();
        assert_eq!(value["status"], "error");
        assert_eq!(value["initialStatus"], "—");
        assert_eq!(value["type"], "Error");
        assert_eq!(value["destination"], "connection refused");
        assert_eq!(value["hops"], serde_json::json!([]));

        let mut out = Vec::new();
        write_entry(&mut out, &entry, OutputFormat::Table, false).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("error"));
        assert!(text.contains("unreachable.test: connection refused"));
        assert!(!text.contains("->"));
        assert!(!text.contains('\u{1b}'));
    }
}
