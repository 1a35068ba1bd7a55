use std::fs;
use std::io;
use std::path::Path;

use anyhow::{Context, Result};

/// Cut a line at its first `#` and trim trailing whitespace. Leading
/// whitespace is preserved.
pub fn strip_comment(line: &str) -> &str {
    let code = match line.find('#') {
        Some(idx) => &line[..idx],
        None => line,
    };
    code.trim_end()
}

/// Read dependency names from a spec file, one per line. Lines that are
/// empty after comment stripping are dropped. A missing file yields an
/// empty list rather than an error.
pub fn read_spec_file(path: &Path) -> Result<Vec<String>> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(err) => {
            return Err(err)
                .with_context(|| format!("failed to read dependency spec: {}", path.display()));
        }
    };

    Ok(raw
        .lines()
        .map(strip_comment)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}
