//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → StatusConfig (validated, immutable)
//!     → operation budget to the coordinator, scripts to the sources
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{ObservabilityConfig, OperationConfig, ScriptStep, SourceScriptConfig, StatusConfig};
pub use validation::ValidationError;
