//! Pattern expansion against the real filesystem.
//!
//! All returned paths are workspace-relative. Traversal prunes
//! `node_modules`, `.git`, and the sandbox tooling directory, and never
//! follows symlinks, so a link cycle cannot alias the same file under many
//! paths. A failed or empty expansion for one pattern contributes zero
//! matches and never aborts the remaining patterns.

use crate::pattern::{self, Pattern};
use crate::paths;
use regex::Regex;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Expand every pattern against `root` and return the deduplicated set of
/// matched regular files, as workspace-relative paths.
pub fn expand_patterns<'a, I>(root: &Path, patterns: I) -> BTreeSet<PathBuf>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut matched = BTreeSet::new();
    for raw in patterns {
        expand_one(root, raw, &mut matched);
    }
    matched
}

fn expand_one(root: &Path, raw: &str, out: &mut BTreeSet<PathBuf>) {
    match Pattern::parse(raw) {
        Pattern::RecursiveDir(name) => {
            let mut dirs = Vec::new();
            collect_dirs_named(root, &name, &mut dirs);
            for dir in dirs {
                collect_files(root, &dir, out);
            }
        }
        Pattern::RecursiveFile(glob) => {
            let Some(re) = pattern::compile_glob(&glob) else {
                tracing::debug!("glob '{glob}' did not compile; zero matches");
                return;
            };
            collect_files_matching(root, root, &re, out);
        }
        Pattern::Relative(raw) => expand_relative(root, &raw, out),
    }
}

/// Shape 3: resolve `<root>/<raw>` directly. Existing file → include;
/// directory → recurse; a `*` in the final segment → single-level
/// shell-style expansion against its parent directory.
fn expand_relative(root: &Path, raw: &str, out: &mut BTreeSet<PathBuf>) {
    if raw.contains('*') || raw.contains('?') {
        let (parent, leaf) = match raw.rsplit_once('/') {
            Some((dir, leaf)) => (root.join(dir), leaf),
            None => (root.to_path_buf(), raw),
        };
        let Some(re) = pattern::compile_glob(leaf) else {
            return;
        };
        let entries = match std::fs::read_dir(&parent) {
            Ok(entries) => entries,
            Err(err) => {
                tracing::debug!("pattern '{raw}' matched nothing: {err}");
                return;
            }
        };
        for entry in entries.flatten() {
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            if !re.is_match(name) {
                continue;
            }
            let Ok(file_type) = entry.file_type() else {
                continue;
            };
            if file_type.is_symlink() {
                continue;
            }
            let path = entry.path();
            if file_type.is_dir() {
                if !paths::is_pruned_dir(name) {
                    collect_files(root, &path, out);
                }
            } else if file_type.is_file() {
                push_rel(root, &path, out);
            }
        }
        return;
    }

    let full = root.join(raw.trim_end_matches('/'));
    if full.is_file() {
        push_rel(root, &full, out);
    } else if full.is_dir() {
        collect_files(root, &full, out);
    }
}

/// All regular files beneath `dir`, recursively, pruned.
fn collect_files(root: &Path, dir: &Path, out: &mut BTreeSet<PathBuf>) {
    walk(dir, &mut |path, is_dir| {
        if !is_dir && path.is_file() {
            push_rel(root, path, out);
        }
    });
}

/// All regular files beneath `dir` whose file name matches `re`.
fn collect_files_matching(root: &Path, dir: &Path, re: &Regex, out: &mut BTreeSet<PathBuf>) {
    walk(dir, &mut |path, is_dir| {
        if is_dir || !path.is_file() {
            return;
        }
        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            if re.is_match(name) {
                push_rel(root, path, out);
            }
        }
    });
}

/// Every non-pruned directory named `name` anywhere under `root`.
fn collect_dirs_named(root: &Path, name: &str, found: &mut Vec<PathBuf>) {
    walk(root, &mut |path, is_dir| {
        if is_dir && !is_pruned(path) && path.file_name().and_then(|n| n.to_str()) == Some(name) {
            found.push(path.to_path_buf());
        }
    });
}

/// Depth-first walk under `dir`, invoking `visit(path, is_dir)` for every
/// entry and recursing into non-pruned directories. Symlinks are skipped
/// entirely; `entry.file_type()` does not traverse the link, so a cycle
/// like `app/loop -> <root>` terminates. Unreadable directories are logged
/// at debug and skipped.
fn walk(dir: &Path, visit: &mut dyn FnMut(&Path, bool)) {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            tracing::debug!("cannot read {}: {err}", dir.display());
            return;
        }
    };
    for entry in entries.flatten() {
        let Ok(file_type) = entry.file_type() else {
            continue;
        };
        if file_type.is_symlink() {
            continue;
        }
        let path = entry.path();
        visit(&path, file_type.is_dir());
        if file_type.is_dir() && !is_pruned(&path) {
            walk(&path, visit);
        }
    }
}

fn is_pruned(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(paths::is_pruned_dir)
}

fn push_rel(root: &Path, path: &Path, out: &mut BTreeSet<PathBuf>) {
    if let Ok(rel) = path.strip_prefix(root) {
        out.insert(rel.to_path_buf());
    }
}
