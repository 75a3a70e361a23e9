//! The secret-sync check: are all AI-denied files also hidden from the
//! container?
//!
//! Stateless and advisory. Every outcome, including "nothing to check", is
//! a success; the worst failure mode is an under-reported missing list.

use crate::compose::ComposeConfig;
use crate::config::SandboxEnv;
use crate::{expand, paths, settings};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Result of one check run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    /// No AI settings file. Nothing to check.
    NoSettings { path: PathBuf },
    /// Settings present but no file patterns configured.
    NoPatterns,
    /// No compose file for the selected sandbox env. Nothing to check.
    NoCompose { path: PathBuf },
    Report(Classification),
}

/// Partition of the matched files. Every matched file lands in exactly one
/// of the three sets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    /// File name of the compose variant that was checked.
    pub compose_file: String,
    /// Exempted via the `.sync-ignore` allow-list.
    pub ignored: BTreeSet<PathBuf>,
    /// Hidden by a compose mount rule.
    pub covered: BTreeSet<PathBuf>,
    /// Denied to the AI but still visible in the container.
    pub missing: BTreeSet<PathBuf>,
}

impl Classification {
    /// Files that went through the compose coverage test.
    pub fn checked(&self) -> usize {
        self.covered.len() + self.missing.len()
    }
}

pub fn run_check(root: &Path, env: SandboxEnv) -> CheckOutcome {
    let Some(patterns) = settings::collect_patterns(root) else {
        return CheckOutcome::NoSettings {
            path: paths::settings_path(root),
        };
    };
    if patterns.is_empty() {
        return CheckOutcome::NoPatterns;
    }

    let compose_path = paths::compose_path(root, env);
    let compose = match ComposeConfig::load(&compose_path) {
        Ok(compose) => compose,
        Err(err) => {
            tracing::debug!("compose file unavailable: {err}");
            return CheckOutcome::NoCompose { path: compose_path };
        }
    };

    let matched = expand::expand_patterns(root, patterns.iter().map(String::as_str));
    let allow = settings::sync_ignore_patterns(root);
    let allowed = expand::expand_patterns(root, allow.iter().map(String::as_str));

    let mut classification = Classification {
        compose_file: env.compose_file_name().to_string(),
        ..Classification::default()
    };
    for file in matched {
        // A file that vanished between expansion and classification is
        // dropped, not reported.
        if !root.join(&file).is_file() {
            continue;
        }
        if allowed.contains(&file) {
            classification.ignored.insert(file);
        } else if compose.is_path_covered(&file) {
            classification.covered.insert(file);
        } else {
            classification.missing.insert(file);
        }
    }
    CheckOutcome::Report(classification)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, b"x").unwrap();
    }

    fn write_settings(root: &Path, deny: &[&str]) {
        let entries: Vec<String> = deny.iter().map(|d| format!("\"{d}\"")).collect();
        let raw = format!(
            "{{\"permissions\":{{\"deny\":[{}]}}}}",
            entries.join(",")
        );
        std::fs::create_dir_all(root.join(".claude")).unwrap();
        std::fs::write(root.join(".claude/settings.json"), raw).unwrap();
    }

    fn write_compose(root: &Path, volumes: &[&str]) {
        let mut content = String::from("services:\n  sandbox:\n    volumes:\n");
        for volume in volumes {
            content.push_str("      - ");
            content.push_str(volume);
            content.push('\n');
        }
        std::fs::write(root.join("docker-compose.yml"), content).unwrap();
    }

    fn report(outcome: CheckOutcome) -> Classification {
        match outcome {
            CheckOutcome::Report(c) => c,
            other => panic!("expected report, got {other:?}"),
        }
    }

    #[test]
    fn no_settings_outcome() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            run_check(dir.path(), SandboxEnv::Default),
            CheckOutcome::NoSettings { .. }
        ));
    }

    #[test]
    fn no_patterns_outcome() {
        let dir = TempDir::new().unwrap();
        write_settings(dir.path(), &["Bash(rm -rf /)"]);
        write_compose(dir.path(), &[]);
        assert_eq!(
            run_check(dir.path(), SandboxEnv::Default),
            CheckOutcome::NoPatterns
        );
    }

    #[test]
    fn no_compose_outcome() {
        let dir = TempDir::new().unwrap();
        write_settings(dir.path(), &["Read(.env)"]);
        touch(dir.path(), ".env");
        assert!(matches!(
            run_check(dir.path(), SandboxEnv::Default),
            CheckOutcome::NoCompose { .. }
        ));
    }

    #[test]
    fn classifies_covered_and_missing() {
        let dir = TempDir::new().unwrap();
        write_settings(dir.path(), &["Read(.env)", "Read(config/db.env)"]);
        touch(dir.path(), ".env");
        touch(dir.path(), "config/db.env");
        write_compose(dir.path(), &["/dev/null:/workspace/.env:ro"]);

        let c = report(run_check(dir.path(), SandboxEnv::Default));
        assert!(c.covered.contains(Path::new(".env")));
        assert!(c.missing.contains(Path::new("config/db.env")));
        assert!(c.ignored.is_empty());
    }

    #[test]
    fn allow_list_wins_over_missing() {
        let dir = TempDir::new().unwrap();
        write_settings(dir.path(), &["Read(.env.example)"]);
        touch(dir.path(), ".env.example");
        write_compose(dir.path(), &[]);
        std::fs::write(dir.path().join(".sync-ignore"), ".env.example\n").unwrap();

        let c = report(run_check(dir.path(), SandboxEnv::Default));
        assert!(c.ignored.contains(Path::new(".env.example")));
        assert!(c.missing.is_empty());
    }

    #[test]
    fn allow_list_wins_over_covered() {
        let dir = TempDir::new().unwrap();
        write_settings(dir.path(), &["Read(.env)"]);
        touch(dir.path(), ".env");
        write_compose(dir.path(), &["/dev/null:/workspace/.env:ro"]);
        std::fs::write(dir.path().join(".sync-ignore"), ".env\n").unwrap();

        let c = report(run_check(dir.path(), SandboxEnv::Default));
        // Exactly one bucket, even when both would match
        assert!(c.ignored.contains(Path::new(".env")));
        assert!(!c.covered.contains(Path::new(".env")));
    }

    #[test]
    fn partition_is_exact() {
        let dir = TempDir::new().unwrap();
        write_settings(dir.path(), &["Read(secrets/**)", "Read(**/*.pem)"]);
        touch(dir.path(), "secrets/a.txt");
        touch(dir.path(), "secrets/b.txt");
        touch(dir.path(), "certs/server.pem");
        touch(dir.path(), "certs/exempt.pem");
        write_compose(dir.path(), &["secrets:ro"]);
        std::fs::write(dir.path().join(".sync-ignore"), "certs/exempt.pem\n").unwrap();

        let c = report(run_check(dir.path(), SandboxEnv::Default));
        let total = c.ignored.len() + c.covered.len() + c.missing.len();
        assert_eq!(total, 4);
        for file in c.ignored.iter() {
            assert!(!c.covered.contains(file) && !c.missing.contains(file));
        }
        for file in c.covered.iter() {
            assert!(!c.missing.contains(file));
        }
        assert_eq!(c.covered.len(), 2);
        assert_eq!(c.missing.len(), 1);
        assert_eq!(c.ignored.len(), 1);
    }

    #[test]
    fn idempotent_across_runs() {
        let dir = TempDir::new().unwrap();
        write_settings(dir.path(), &["Read(secrets/**)"]);
        touch(dir.path(), "secrets/a.txt");
        touch(dir.path(), "secrets/b.txt");
        write_compose(dir.path(), &["secrets:ro"]);

        let first = run_check(dir.path(), SandboxEnv::Default);
        let second = run_check(dir.path(), SandboxEnv::Default);
        assert_eq!(first, second);
    }

    #[test]
    fn dev_env_reads_dev_compose() {
        let dir = TempDir::new().unwrap();
        write_settings(dir.path(), &["Read(.env)"]);
        touch(dir.path(), ".env");
        std::fs::write(
            dir.path().join("docker-compose.dev.yml"),
            "services:\n  sandbox:\n    volumes:\n      - /dev/null:/workspace/.env:ro\n",
        )
        .unwrap();

        let c = report(run_check(dir.path(), SandboxEnv::Dev));
        assert_eq!(c.compose_file, "docker-compose.dev.yml");
        assert!(c.covered.contains(Path::new(".env")));

        // The default variant is absent, so the default env is a no-op
        assert!(matches!(
            run_check(dir.path(), SandboxEnv::Default),
            CheckOutcome::NoCompose { .. }
        ));
    }

    #[test]
    fn ignore_file_patterns_are_checked_too() {
        let dir = TempDir::new().unwrap();
        write_settings(dir.path(), &[]);
        std::fs::write(dir.path().join(".claudeignore"), "*.pem\n").unwrap();
        touch(dir.path(), "server.pem");
        write_compose(dir.path(), &[]);

        let c = report(run_check(dir.path(), SandboxEnv::Default));
        assert!(c.missing.contains(Path::new("server.pem")));
    }
}
