use std::path::Path;
use sync_core::config::{SandboxEnv, Verbosity};
use sync_core::{checker, report};

/// `secret-sync check` — audit AI-denied files against the compose file.
///
/// Always exits 0: findings are advisory, and every "nothing to check"
/// state is a valid success.
pub fn run(root: &Path, env: SandboxEnv, verbosity: Verbosity) -> anyhow::Result<()> {
    let outcome = checker::run_check(root, env);
    let text = report::render(&outcome, verbosity);
    if !text.is_empty() {
        println!("{text}");
    }
    Ok(())
}
