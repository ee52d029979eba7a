//! PitchPilot Common Library
//!
//! Shared code for the PitchPilot answer engine including:
//! - Error types and handling
//! - Configuration management
//! - Industry/scenario label dictionaries
//! - Telemetry bootstrap

pub mod config;
pub mod errors;
pub mod labels;
pub mod telemetry;

// Re-export commonly used types
pub use config::AppConfig;
pub use errors::{AppError, ErrorCode, ErrorResponse, Result};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default completion model
pub const DEFAULT_COMPLETION_MODEL: &str = "gpt-4o-mini";
