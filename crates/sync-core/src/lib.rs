pub mod checker;
pub mod compose;
pub mod config;
pub mod error;
pub mod expand;
pub mod io;
pub mod paths;
pub mod pattern;
pub mod report;
pub mod settings;
pub mod update;

pub use error::{Result, SyncError};
