use std::path::Path;

use anyhow::{Context, Result};

/// One address per line, surrounding whitespace and blank lines ignored.
pub fn parse_addresses(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

pub async fn read_addresses(path: &Path) -> Result<Vec<String>> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read addresses from {}", path.display()))?;
    Ok(parse_addresses(&content))
}
