//! Reading scan requests from a file or stdin.

use std::path::Path;

use anyhow::{Context, Result};
use tokio::io::AsyncReadExt;

/// Splits pasted text into scan requests.
///
/// Lines are split on `\n` or `\r\n` and trimmed; blank lines and `#` comments
/// are dropped. Lines are otherwise kept verbatim, normalization happens later.
pub fn parse_input_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Reads scan requests from `path`, or from stdin when `path` is `-`.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or read.
pub async fn read_inputs(path: &Path) -> Result<Vec<String>> {
    if path.as_os_str() == "-" {
        log::info!("Reading URLs from stdin");
        let mut text = String::new();
        tokio::io::stdin()
            .read_to_string(&mut text)
            .await
            .context("Failed to read URLs from stdin")?;
        Ok(parse_input_lines(&text))
    } else {
        let text = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to open input file {}", path.display()))?;
        let inputs = parse_input_lines(&text);
        log::info!("Total URLs in {}: {}", path.display(), inputs.len());
        Ok(inputs)
    }
}
