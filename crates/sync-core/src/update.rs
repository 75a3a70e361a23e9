//! Persistent state for the template update checker.
//!
//! A single-line record `<unix-timestamp>:<version>`, created on the first
//! successful check and overwritten on every subsequent one, never deleted.
//! Concurrent runs can race on the file; the record is advisory and no
//! locking is used.

use crate::error::Result;
use crate::{io, paths};
use std::path::Path;

/// Poll at most once per day.
pub const CHECK_INTERVAL_SECS: i64 = 24 * 60 * 60;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateState {
    pub checked_at: i64,
    pub version: String,
}

impl UpdateState {
    pub fn parse(line: &str) -> Option<Self> {
        let (ts, version) = line.trim().split_once(':')?;
        let checked_at = ts.parse().ok()?;
        if version.is_empty() {
            return None;
        }
        Some(UpdateState {
            checked_at,
            version: version.to_string(),
        })
    }

    pub fn to_line(&self) -> String {
        format!("{}:{}", self.checked_at, self.version)
    }

    /// Load the record; a missing or malformed file is simply no state.
    pub fn load(root: &Path) -> Option<Self> {
        let raw = std::fs::read_to_string(paths::update_state_path(root)).ok()?;
        Self::parse(&raw)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        io::atomic_write(&paths::update_state_path(root), self.to_line().as_bytes())
    }

    /// Whether the last check is recent enough to skip polling.
    pub fn is_fresh(&self, now: i64) -> bool {
        now - self.checked_at < CHECK_INTERVAL_SECS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn parse_roundtrip() {
        let state = UpdateState {
            checked_at: 1_700_000_000,
            version: "1.4.2".to_string(),
        };
        assert_eq!(UpdateState::parse(&state.to_line()), Some(state));
    }

    #[test]
    fn parse_rejects_malformed() {
        assert!(UpdateState::parse("").is_none());
        assert!(UpdateState::parse("no-separator").is_none());
        assert!(UpdateState::parse("notanumber:1.0.0").is_none());
        assert!(UpdateState::parse("1700000000:").is_none());
    }

    #[test]
    fn parse_tolerates_trailing_newline() {
        assert!(UpdateState::parse("1700000000:1.0.0\n").is_some());
    }

    #[test]
    fn load_missing_is_none() {
        let dir = TempDir::new().unwrap();
        assert!(UpdateState::load(dir.path()).is_none());
    }

    #[test]
    fn save_then_load() {
        let dir = TempDir::new().unwrap();
        let state = UpdateState {
            checked_at: 42,
            version: "0.9.0".to_string(),
        };
        state.save(dir.path()).unwrap();
        assert_eq!(UpdateState::load(dir.path()), Some(state));
    }

    #[test]
    fn save_overwrites_previous_record() {
        let dir = TempDir::new().unwrap();
        UpdateState {
            checked_at: 1,
            version: "0.1.0".to_string(),
        }
        .save(dir.path())
        .unwrap();
        UpdateState {
            checked_at: 2,
            version: "0.2.0".to_string(),
        }
        .save(dir.path())
        .unwrap();
        assert_eq!(
            UpdateState::load(dir.path()).unwrap().version,
            "0.2.0"
        );
    }

    #[test]
    fn freshness_window() {
        let state = UpdateState {
            checked_at: 1_000_000,
            version: "1.0.0".to_string(),
        };
        assert!(state.is_fresh(1_000_000 + CHECK_INTERVAL_SECS - 1));
        assert!(!state.is_fresh(1_000_000 + CHECK_INTERVAL_SECS));
    }
}
