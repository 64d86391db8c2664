//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → MonitorConfig (validated, immutable)
//!     → handed to startup, which splits it per task
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
pub use schema::{
    AlertConfig, AlertDirection, DigestConfig, HeartbeatConfig, MonitorConfig, NotifierConfig,
    ObservabilityConfig, ProbeConfig, ReportConfig, TargetConfig,
};
pub use validation::{validate_config, ValidationError};
