use std::path::Path;

use anyhow::Context;

/// Read a one-entry-per-line file.
pub fn read_lines(path: &Path) -> anyhow::Result<Vec<String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    Ok(parse_lines(&content))
}

/// Trailing whitespace is stripped and blank lines are skipped.
pub fn parse_lines(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
