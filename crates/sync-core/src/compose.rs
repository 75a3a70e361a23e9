//! Mount-rule scan of the container definition.
//!
//! The compose file is scanned line-wise for the two rule forms rather than
//! parsed as YAML; callers only see `is_path_covered`, so a structural parse
//! could replace this without touching them.
//!
//! Recognized rules:
//!   `- /dev/null:<path>[:ro]`  hides a single file behind the null device
//!   `- <dir>:ro`               mounts a directory read-only (single-colon
//!                              form only; `src:dst:ro` lines expose content
//!                              rather than hiding it)

use crate::error::Result;
use crate::paths;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComposeConfig {
    null_mounts: BTreeSet<PathBuf>,
    ro_dirs: BTreeSet<PathBuf>,
}

impl ComposeConfig {
    pub fn load(path: &Path) -> Result<Self> {
        Ok(Self::parse(&std::fs::read_to_string(path)?))
    }

    pub fn parse(content: &str) -> Self {
        let mut config = ComposeConfig::default();
        for line in content.lines() {
            let Some(item) = line.trim().strip_prefix("- ") else {
                continue;
            };
            let item = item.trim().trim_matches('"').trim_matches('\'');
            if let Some(target) = item.strip_prefix("/dev/null:") {
                let target = target.strip_suffix(":ro").unwrap_or(target);
                config.null_mounts.insert(normalize_target(target));
            } else if let Some(dir) = item.strip_suffix(":ro") {
                if !dir.contains(':') {
                    config.ro_dirs.insert(normalize_target(dir));
                }
            }
        }
        config
    }

    /// Whether `rel` (a workspace-relative file path) is hidden by this
    /// compose file: an exact `/dev/null` mount, or any ancestor directory
    /// mounted `:ro`.
    ///
    /// The ancestor walk stops at the workspace root; a rule naming a
    /// directory outside the root is never matched. Known limitation,
    /// preserved deliberately.
    pub fn is_path_covered(&self, rel: &Path) -> bool {
        if self.null_mounts.contains(rel) {
            return true;
        }
        let mut ancestor = rel.parent();
        while let Some(dir) = ancestor {
            if dir.as_os_str().is_empty() {
                break;
            }
            if self.ro_dirs.contains(dir) {
                return true;
            }
            ancestor = dir.parent();
        }
        false
    }
}

/// Mount targets may be written container-absolute (`/workspace/...`) or
/// workspace-relative (`./x` or `x`). Reduce all three to a relative path;
/// absolute targets outside the container workspace are kept as-is and
/// therefore never match.
fn normalize_target(target: &str) -> PathBuf {
    let target = target.trim().trim_end_matches('/');
    let prefix = format!("{}/", paths::CONTAINER_WORKSPACE);
    let stripped = if let Some(rest) = target.strip_prefix(&prefix) {
        rest
    } else if target == paths::CONTAINER_WORKSPACE {
        ""
    } else {
        target.trim_start_matches("./")
    };
    PathBuf::from(stripped)
}
