//! Integration Test: Core/Surface Separation
//!
//! **Policy**: `panel/core` MUST NOT depend on any terminal UI crate. Surfaces
//! depend on the core, never the other way around.

use std::fs;

use architectural_enforcement::{fail_on, production_sources, workspace_root};

const UI_CRATES: &[&str] = &["ratatui", "crossterm", "hrquery_tui", "hrquery-tui"];

#[test]
fn test_core_sources_have_no_ui_imports() {
    let mut violations = Vec::new();

    for file in production_sources("panel/core/src") {
        for (line_number, code) in file.code_lines() {
            if UI_CRATES.iter().any(|krate| code.contains(&format!("{krate}::"))) {
                violations.push(file.violation(line_number, "UI import in core"));
            }
        }
    }

    fail_on(
        &violations,
        "CRITICAL: panel core imports a UI crate!",
        &["Move rendering into the surface and expose data through PanelView."],
    );
}

#[test]
fn test_core_manifest_has_no_ui_dependencies() {
    let manifest = fs::read_to_string(workspace_root().join("panel/core/Cargo.toml"))
        .expect("panel/core/Cargo.toml should exist");

    let violations: Vec<String> = manifest
        .lines()
        .filter(|line| {
            UI_CRATES
                .iter()
                .any(|krate| line.trim_start().starts_with(krate))
        })
        .map(|line| format!("panel/core/Cargo.toml: {}", line.trim()))
        .collect();

    fail_on(
        &violations,
        "CRITICAL: panel core depends on a UI crate!",
        &["The core must stay headless."],
    );
}
