use crate::config::SandboxEnv;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// File and directory constants
// ---------------------------------------------------------------------------

/// AI assistant policy document holding the `permissions.deny` list.
pub const SETTINGS_FILE: &str = ".claude/settings.json";

/// Gitignore-style files whose patterns are merged into the deny set.
pub const IGNORE_FILES: [&str; 2] = [".claudeignore", ".aiignore"];

/// Allow-list of patterns exempt from the "must be hidden" requirement.
pub const SYNC_IGNORE_FILE: &str = ".sync-ignore";

pub const COMPOSE_FILE: &str = "docker-compose.yml";
pub const COMPOSE_DEV_FILE: &str = "docker-compose.dev.yml";

/// The sandbox tooling's own directory. Never traversed, so the checker
/// does not flag its own configuration.
pub const SANDBOX_DIR: &str = ".sandbox";

pub const UPDATE_STATE_FILE: &str = ".sandbox/update-state";

/// Prefix under which the workspace is mounted inside the container.
pub const CONTAINER_WORKSPACE: &str = "/workspace";

/// Directory names pruned from every filesystem traversal.
pub const PRUNED_DIRS: [&str; 3] = ["node_modules", ".git", SANDBOX_DIR];

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn settings_path(root: &Path) -> PathBuf {
    root.join(SETTINGS_FILE)
}

pub fn ignore_file_paths(root: &Path) -> Vec<PathBuf> {
    IGNORE_FILES.iter().map(|name| root.join(name)).collect()
}

pub fn sync_ignore_path(root: &Path) -> PathBuf {
    root.join(SYNC_IGNORE_FILE)
}

pub fn compose_path(root: &Path, env: SandboxEnv) -> PathBuf {
    root.join(env.compose_file_name())
}

pub fn update_state_path(root: &Path) -> PathBuf {
    root.join(UPDATE_STATE_FILE)
}

pub fn is_pruned_dir(name: &str) -> bool {
    PRUNED_DIRS.contains(&name)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
