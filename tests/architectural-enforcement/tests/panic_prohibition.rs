//! Integration Test: Panic Prohibition
//!
//! **Policy**: Production code MUST propagate errors instead of calling
//! `unwrap()` or `expect()`. Test modules are exempt.

use architectural_enforcement::{fail_on, production_sources};

#[test]
fn test_no_unwrap_or_expect_in_production_code() {
    let mut violations = Vec::new();

    for dir in ["panel/core/src", "tui/src"] {
        for file in production_sources(dir) {
            for (line_number, code) in file.code_lines() {
                if code.contains(".unwrap()") || code.contains(".expect(") {
                    violations.push(file.violation(line_number, "Panicking call"));
                }
            }
        }
    }

    fail_on(
        &violations,
        "CRITICAL: unwrap()/expect() found in production code!",
        &[
            "✅ Use `?` with thiserror/anyhow, or a fallback such as unwrap_or_default().",
        ],
    );
}
