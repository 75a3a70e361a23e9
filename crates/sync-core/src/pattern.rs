//! The three pattern shapes and their matching semantics.

use regex::Regex;

/// A file-matching pattern from the deny list or an ignore file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pattern {
    /// `**/<name>/**` — every file under any directory named `<name>`.
    RecursiveDir(String),
    /// `**/<glob>` — every file whose name matches `<glob>`, anywhere.
    RecursiveFile(String),
    /// Workspace-relative literal path or single-level glob.
    Relative(String),
}

impl Pattern {
    pub fn parse(raw: &str) -> Pattern {
        if let Some(middle) = raw.strip_prefix("**/").and_then(|r| r.strip_suffix("/**")) {
            if !middle.is_empty() && !middle.contains('/') {
                return Pattern::RecursiveDir(middle.to_string());
            }
        }
        if let Some(rest) = raw.strip_prefix("**/") {
            if !rest.is_empty() && !rest.contains('/') {
                return Pattern::RecursiveFile(rest.to_string());
            }
        }
        Pattern::Relative(raw.to_string())
    }
}

/// Compile a single-segment shell glob: `*` spans any run of characters
/// within one path component, `?` exactly one. Returns `None` for globs
/// that do not compile; callers treat that as zero matches.
pub fn compile_glob(glob: &str) -> Option<Regex> {
    let mut re = String::with_capacity(glob.len() + 8);
    re.push('^');
    for ch in glob.chars() {
        match ch {
            '*' => re.push_str("[^/]*"),
            '?' => re.push_str("[^/]"),
            c => re.push_str(&regex::escape(&c.to_string())),
        }
    }
    re.push('$');
    Regex::new(&re).ok()
}

/// Whether `name` (one path component) matches `glob`.
pub fn name_matches(glob: &str, name: &str) -> bool {
    compile_glob(glob).is_some_and(|re| re.is_match(name))
}
