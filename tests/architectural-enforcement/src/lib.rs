//! Architectural Enforcement Integration Tests
//!
//! This package contains integration tests that enforce architectural principles:
//! - The panel core stays free of terminal UI crates
//! - No blocking I/O or sleeps on the event loop
//! - No `unwrap()`/`expect()` in production code
//!
//! The helpers here load production sources (test modules stripped) so each
//! policy test only has to say what it forbids.

use std::fs;
use std::path::{Path, PathBuf};

/// A production source file, cut before its `#[cfg(test)]` module
pub struct SourceFile {
    /// Path relative to the workspace root
    pub path: PathBuf,
    /// Lines up to the first test module
    pub lines: Vec<String>,
}

impl SourceFile {
    /// Lines with trailing `//` comments removed, numbered from 1
    pub fn code_lines(&self) -> impl Iterator<Item = (usize, &str)> {
        self.lines.iter().enumerate().filter_map(|(idx, line)| {
            let code = line.split("//").next().unwrap_or(line);
            if code.trim().is_empty() {
                None
            } else {
                Some((idx + 1, code))
            }
        })
    }

    /// Format a violation for this file
    pub fn violation(&self, line_number: usize, kind: &str) -> String {
        let line = self
            .lines
            .get(line_number - 1)
            .map(|l| l.trim())
            .unwrap_or_default();
        format!("{}:{} - {}: {}", self.path.display(), line_number, kind, line)
    }
}

/// Workspace root, two levels above this package
pub fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../..")
}

/// Load every `.rs` file under `dir` (relative to the workspace root)
///
/// Panics if the directory is missing so a moved crate cannot silently pass.
pub fn production_sources(dir: &str) -> Vec<SourceFile> {
    let root = workspace_root();
    let base = root.join(dir);
    assert!(base.exists(), "source directory not found: {}", base.display());

    let mut files = Vec::new();
    for entry in walkdir::WalkDir::new(&base)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        if entry.path().extension().and_then(|s| s.to_str()) != Some("rs") {
            continue;
        }
        let Ok(content) = fs::read_to_string(entry.path()) else {
            continue;
        };
        let lines = content
            .lines()
            .take_while(|line| line.trim() != "#[cfg(test)]")
            .map(str::to_string)
            .collect();
        let path = entry
            .path()
            .strip_prefix(&root)
            .unwrap_or(entry.path())
            .to_path_buf();
        files.push(SourceFile { path, lines });
    }
    files
}

/// Line indexes (0-based) that sit inside an `async fn` body
pub fn async_body_lines(lines: &[String]) -> Vec<bool> {
    let mut inside = vec![false; lines.len()];
    let mut depth: i32 = 0;
    let mut in_async = false;
    let mut seen_open = false;

    for (idx, line) in lines.iter().enumerate() {
        let code = line.split("//").next().unwrap_or(line);

        if !in_async && code.contains("async fn ") && !code.trim_end().ends_with(';') {
            in_async = true;
            depth = 0;
            seen_open = false;
        }

        if in_async {
            inside[idx] = true;
            for ch in code.chars() {
                match ch {
                    '{' => {
                        depth += 1;
                        seen_open = true;
                    }
                    '}' => depth -= 1,
                    _ => {}
                }
            }
            if seen_open && depth <= 0 {
                in_async = false;
            }
        }
    }

    inside
}

/// Report violations and fail
pub fn fail_on(violations: &[String], title: &str, advice: &[&str]) {
    if violations.is_empty() {
        return;
    }

    eprintln!("\n❌ {title}\n");
    for violation in violations {
        eprintln!("  ❌ {violation}");
    }
    eprintln!();
    for line in advice {
        eprintln!("  {line}");
    }

    panic!(
        "\nFound {} violation(s) in production code.\nFix these before merging!",
        violations.len()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_async_body_detection() {
        let lines: Vec<String> = [
            "fn sync() {",
            "    read();",
            "}",
            "async fn run(&self) {",
            "    if x {",
            "        go();",
            "    }",
            "}",
            "fn after() {}",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();

        let inside = async_body_lines(&lines);
        assert_eq!(
            inside,
            vec![false, false, false, true, true, true, true, true, false]
        );
    }

    #[test]
    fn test_trait_declarations_are_not_bodies() {
        let lines: Vec<String> = ["    async fn query(&self, q: &str) -> R;", "fn other() {}"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(async_body_lines(&lines), vec![false, false]);
    }
}
