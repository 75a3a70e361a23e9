//! Pattern extraction from the AI policy document and ignore files.
//!
//! The policy document is JSON with a `permissions.deny` array; only entries
//! of the shape `Read(<pattern>)` contribute. Ignore files are gitignore
//! style, one pattern per line.

use crate::paths;
use regex::Regex;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::path::Path;
use std::sync::OnceLock;

#[derive(Debug, Default, Deserialize)]
struct Settings {
    #[serde(default)]
    permissions: Permissions,
}

#[derive(Debug, Default, Deserialize)]
struct Permissions {
    #[serde(default)]
    deny: Vec<String>,
}

static READ_ENTRY_RE: OnceLock<Regex> = OnceLock::new();
static READ_SCAN_RE: OnceLock<Regex> = OnceLock::new();

fn read_entry_re() -> &'static Regex {
    READ_ENTRY_RE.get_or_init(|| Regex::new(r"^Read\(([^)]+)\)$").unwrap())
}

fn read_scan_re() -> &'static Regex {
    READ_SCAN_RE.get_or_init(|| Regex::new(r"Read\(([^)]+)\)").unwrap())
}

/// Deny-list entries of the shape `Read(<pattern>)`, wrapper stripped and
/// the pattern kept verbatim. Entries of any other shape are skipped.
///
/// Malformed JSON falls back to a plain-text scan for `Read(...)` rather
/// than failing the run.
pub fn deny_patterns(raw: &str) -> Vec<String> {
    match serde_json::from_str::<Settings>(raw) {
        Ok(settings) => settings
            .permissions
            .deny
            .iter()
            .filter_map(|entry| read_entry_re().captures(entry))
            .map(|caps| caps[1].to_string())
            .collect(),
        Err(err) => {
            tracing::debug!("settings JSON did not parse ({err}); using text scan");
            read_scan_re()
                .captures_iter(raw)
                .map(|caps| caps[1].to_string())
                .collect()
        }
    }
}

/// Non-comment, non-blank lines of a gitignore-style file, verbatim.
pub fn ignore_patterns(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect()
}

/// Merge deny-list and ignore-file patterns for `root`, deduplicated.
///
/// Returns `None` when the settings file is absent or unreadable — a valid
/// nothing-to-check state, not an error.
pub fn collect_patterns(root: &Path) -> Option<BTreeSet<String>> {
    let settings_path = paths::settings_path(root);
    let raw = match std::fs::read_to_string(&settings_path) {
        Ok(raw) => raw,
        Err(err) => {
            tracing::debug!("no settings at {}: {err}", settings_path.display());
            return None;
        }
    };
    let mut patterns: BTreeSet<String> = deny_patterns(&raw).into_iter().collect();
    for path in paths::ignore_file_paths(root) {
        if let Ok(raw) = std::fs::read_to_string(&path) {
            patterns.extend(ignore_patterns(&raw));
        }
    }
    Some(patterns)
}

/// Allow-list patterns from `.sync-ignore`; empty when the file is absent.
pub fn sync_ignore_patterns(root: &Path) -> Vec<String> {
    match std::fs::read_to_string(paths::sync_ignore_path(root)) {
        Ok(raw) => ignore_patterns(&raw),
        Err(_) => Vec::new(),
    }
}
