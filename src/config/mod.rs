//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! .env file (optional)
//!     → merged into process environment (best-effort)
//! environment variables
//!     → resolver.rs (required/default rules, type coercion)
//!     → schema.rs typed aggregates (SecretConfig, VrfParams, GasReportConfig)
//!     → consumed read-only by the deployment pipeline
//! ```
//!
//! # Design Decisions
//! - All fallible environment handling lives in one reviewable place
//! - Resolution happens exactly once at startup and is fatal on error
//! - Aggregates are immutable after construction

pub mod resolver;
pub mod schema;

pub use resolver::{merge_env_file, ConfigError, EnvSource, ProcessEnv};
pub use schema::{GasReportConfig, SecretConfig, VrfParams};
