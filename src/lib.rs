pub mod assistant;
pub mod branch;
pub mod cleanup;
pub mod config;
pub mod error;
pub mod git;
pub mod proc;
pub mod prompt;
pub mod provision;

pub use config::Config;
pub use error::{Result, WtxError};
pub use provision::WorktreeRequest;
