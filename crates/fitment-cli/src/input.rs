//! Batch input files.

use std::path::Path;

use anyhow::{Context, Result};

/// Reads one application per line, skipping blank lines and `#` comments.
pub fn read_applications(path: &Path) -> Result<Vec<String>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read applications from {}", path.display()))?;
    Ok(parse_applications(&contents))
}

pub fn parse_applications(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}
