//! Report rendering for the secret-sync check.

use crate::checker::{CheckOutcome, Classification};
use crate::config::Verbosity;
use crate::paths;
use std::fmt::Write as _;

/// Render `outcome` at the requested verbosity. An empty string means
/// "print nothing".
pub fn render(outcome: &CheckOutcome, verbosity: Verbosity) -> String {
    match outcome {
        CheckOutcome::NoSettings { path } => notice(
            verbosity,
            format!("No AI settings found at {} — nothing to check.", path.display()),
        ),
        CheckOutcome::NoPatterns => notice(
            verbosity,
            "No file patterns configured — nothing to check.".to_string(),
        ),
        CheckOutcome::NoCompose { path } => notice(
            verbosity,
            format!("Compose file not found at {} — nothing to check.", path.display()),
        ),
        CheckOutcome::Report(classification) => render_report(classification, verbosity),
    }
}

/// No-op notices are informational; quiet mode suppresses them.
fn notice(verbosity: Verbosity, message: String) -> String {
    match verbosity {
        Verbosity::Quiet => String::new(),
        Verbosity::Summary | Verbosity::Verbose => message,
    }
}

fn render_report(c: &Classification, verbosity: Verbosity) -> String {
    let mut out = String::new();

    if c.missing.is_empty() {
        if verbosity != Verbosity::Quiet {
            let _ = writeln!(
                out,
                "✓ Secret files: all configured ({} checked, {} ignored)",
                c.checked(),
                c.ignored.len()
            );
        }
    } else {
        let _ = writeln!(out, "{} files missing from {}", c.missing.len(), c.compose_file);
        for file in &c.missing {
            let _ = writeln!(out, "  - {}", file.display());
        }
        if verbosity != Verbosity::Quiet {
            out.push('\n');
            remediation(&mut out, &c.compose_file);
        }
    }

    if verbosity == Verbosity::Verbose && !c.ignored.is_empty() {
        let _ = writeln!(
            out,
            "\nIgnored ({} via {}):",
            c.ignored.len(),
            paths::SYNC_IGNORE_FILE
        );
        for file in &c.ignored {
            let _ = writeln!(out, "  - {} (intentionally visible)", file.display());
        }
    }

    out.trim_end().to_string()
}

fn remediation(out: &mut String, compose_file: &str) {
    let _ = writeln!(out, "To hide a file from the container, add a volume entry to {compose_file}:");
    let _ = writeln!(out, "  - /dev/null:{}/<path>:ro", paths::CONTAINER_WORKSPACE);
    let _ = writeln!(out, "or mount its parent directory read-only:");
    let _ = writeln!(out, "  - <dir>:ro");
    let _ = writeln!(
        out,
        "Files that are intentionally visible can be listed in {}.",
        paths::SYNC_IGNORE_FILE
    );
}
