//! revive-utils: Common utilities shared across revive crates
//!
//! This crate provides:
//! - Unified error types ([`ReviveError`], [`Result`])
//! - Logging infrastructure ([`init_logging`], [`LogConfig`])
//! - Known-folder and file probing helpers ([`paths`] module)

pub mod error;
pub mod logging;
pub mod paths;

// Re-export main types at crate root for convenience
pub use error::{ReviveError, Result};
pub use logging::{init_logging, init_logging_with_config, LogConfig, LogOutput};

pub use paths::{documents_dir, is_file, log_dir, state_dir};
