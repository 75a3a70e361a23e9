use anyhow::Context;
use chrono::Utc;
use std::path::Path;
use std::time::Duration;
use sync_core::update::UpdateState;

pub const DEFAULT_TEMPLATE_REPO: &str = "sandboxkit/ai-sandbox-template";

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
const OVERALL_TIMEOUT: Duration = Duration::from_secs(10);

/// `secret-sync update-check` — poll GitHub for a newer template release.
///
/// One attempt with bounded timeouts; any network or parse failure is a
/// silent skip. The state record is only rewritten after a successful poll.
pub fn run(root: &Path, repo: &str, force: bool) -> anyhow::Result<()> {
    let now = Utc::now().timestamp();
    let state = UpdateState::load(root);

    if !force {
        if let Some(state) = &state {
            if state.is_fresh(now) {
                tracing::debug!("last update check is recent; skipping poll");
                return Ok(());
            }
        }
    }

    let Some(latest) = fetch_latest_tag(repo) else {
        tracing::debug!("update check skipped: no release information");
        return Ok(());
    };

    let current = state
        .map(|s| s.version)
        .unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string());

    if latest != current {
        println!("Template update available: {current} → {latest}");
        println!("  https://github.com/{repo}/releases/latest");
    } else {
        println!("Template is up to date ({current}).");
    }

    UpdateState {
        checked_at: now,
        version: latest,
    }
    .save(root)
    .context("failed to write update state")?;
    Ok(())
}

/// Latest release tag for `repo`, with any leading `v` stripped.
fn fetch_latest_tag(repo: &str) -> Option<String> {
    let agent = ureq::AgentBuilder::new()
        .timeout_connect(CONNECT_TIMEOUT)
        .timeout(OVERALL_TIMEOUT)
        .build();
    let url = format!("https://api.github.com/repos/{repo}/releases/latest");
    let response = match agent.get(&url).set("User-Agent", "secret-sync").call() {
        Ok(response) => response,
        Err(err) => {
            tracing::debug!("release poll failed: {err}");
            return None;
        }
    };
    let body = response.into_string().ok()?;
    let release: serde_json::Value = serde_json::from_str(&body).ok()?;
    release
        .get("tag_name")?
        .as_str()
        .map(|tag| tag.trim_start_matches('v').to_string())
}
