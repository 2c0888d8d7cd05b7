// Common module - shared types and utilities across all modules

pub mod config;
pub mod error;
pub mod helpers;
pub mod state;
pub mod validation;

// Re-export commonly used types for convenience
pub use config::{ClientConfig, ConfigError, ExercisePolicy, ServerConfig};
pub use error::ApiError;
pub use helpers::safe_email_log;
pub use state::ClientContext;
pub use validation::{validate_date_format, ValidationError, ValidationResult, Validator};
