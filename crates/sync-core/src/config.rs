use crate::error::{Result, SyncError};
use crate::paths;
use std::str::FromStr;

/// Report verbosity, threaded explicitly through rendering rather than held
/// as process-wide state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    Quiet,
    Summary,
    #[default]
    Verbose,
}

impl FromStr for Verbosity {
    type Err = SyncError;
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "quiet" => Ok(Verbosity::Quiet),
            "summary" => Ok(Verbosity::Summary),
            "verbose" | "default" => Ok(Verbosity::Verbose),
            _ => Err(SyncError::InvalidOutputMode(s.to_string())),
        }
    }
}

/// Which container-definition variant to audit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SandboxEnv {
    #[default]
    Default,
    Dev,
}

impl SandboxEnv {
    pub fn compose_file_name(self) -> &'static str {
        match self {
            SandboxEnv::Default => paths::COMPOSE_FILE,
            SandboxEnv::Dev => paths::COMPOSE_DEV_FILE,
        }
    }
}

impl FromStr for SandboxEnv {
    type Err = SyncError;
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "" | "default" => Ok(SandboxEnv::Default),
            "dev" | "development" => Ok(SandboxEnv::Dev),
            _ => Err(SyncError::InvalidSandboxEnv(s.to_string())),
        }
    }
}
