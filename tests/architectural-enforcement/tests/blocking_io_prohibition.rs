//! Integration Test: Blocking I/O Prohibition
//!
//! **Policy**: Code that runs on the event loop (any `async fn` body) MUST NOT
//! use blocking I/O or sleep.
//! **Required**: Use `tokio::fs`, `tokio::time::interval`, and async `reqwest`.
//!
//! Synchronous setup code that runs before the loop starts (config loading,
//! log file creation) is allowed to block.

use architectural_enforcement::{async_body_lines, fail_on, production_sources};

const SOURCE_DIRS: &[&str] = &["panel/core/src", "tui/src"];

/// Forbidden patterns inside async bodies, with a label
const BLOCKING: &[(&str, &str)] = &[
    ("std::fs::", "Blocking file I/O"),
    ("fs::read_to_string", "Blocking file I/O"),
    ("File::open", "Blocking file I/O"),
    ("File::create", "Blocking file I/O"),
    ("std::net::", "Blocking network I/O"),
    ("std::process::Command", "Blocking process I/O"),
    ("reqwest::blocking", "Blocking HTTP client"),
    ("thread::sleep", "Blocking sleep"),
];

#[test]
fn test_no_blocking_io_in_async_code() {
    let mut violations = Vec::new();

    for dir in SOURCE_DIRS {
        for file in production_sources(dir) {
            let inside = async_body_lines(&file.lines);
            for (line_number, code) in file.code_lines() {
                if !inside[line_number - 1] {
                    continue;
                }
                for (pattern, kind) in BLOCKING {
                    if code.contains(pattern) {
                        violations.push(file.violation(line_number, kind));
                    }
                }
            }
        }
    }

    fail_on(
        &violations,
        "CRITICAL: Blocking I/O calls found in async code!",
        &[
            "✅ REQUIRED async I/O:",
            "  - tokio::fs::read().await",
            "  - reqwest::Client::post(..).send().await",
            "  - tokio::time::interval() for periodic work",
        ],
    );
}

#[test]
fn test_no_sleep_in_production_code() {
    let mut violations = Vec::new();

    for dir in SOURCE_DIRS {
        for file in production_sources(dir) {
            for (line_number, code) in file.code_lines() {
                if code.contains("thread::sleep") || code.contains("time::sleep(") {
                    violations.push(file.violation(line_number, "Sleep call"));
                }
            }
        }
    }

    fail_on(
        &violations,
        "CRITICAL: Sleep calls found in production code!",
        &[
            "❌ FORBIDDEN: sleep in polling loops or as synchronization.",
            "✅ Wait on the event stream, the completion channel, or an interval.",
        ],
    );
}
