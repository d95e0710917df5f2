//! Ignore-file maintenance.
//!
//! Appends path patterns to the generated project's ignore file, one per
//! line. Appending (rather than rewriting) preserves whatever the template
//! already shipped.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use crate::error::Result;

/// Append each pattern plus a newline to the ignore file, creating the file
/// if the template did not ship one.
pub fn append_patterns(ignore_path: &Path, patterns: &[&str]) -> Result<()> {
    if patterns.is_empty() {
        return Ok(());
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(ignore_path)?;
    for pattern in patterns {
        writeln!(file, "{}", pattern)?;
    }

    log::debug!(
        "appended {} pattern(s) to {}",
        patterns.len(),
        ignore_path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_append_to_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".gitignore");
        fs::write(&path, "target/\n").unwrap();

        append_patterns(&path, &[".env", ".envs/*"]).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "target/\n.env\n.envs/*\n");
    }

    #[test]
    fn test_creates_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".gitignore");

        append_patterns(&path, &["!.envs/.local/"]).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "!.envs/.local/\n");
    }

    #[test]
    fn test_empty_pattern_list_is_a_noop() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".gitignore");

        append_patterns(&path, &[]).unwrap();
        assert!(!path.exists());
    }
}
