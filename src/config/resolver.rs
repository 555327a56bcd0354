//! Environment resolution.
//!
//! # Responsibilities
//! - Look up schema fields against an environment source
//! - Apply required/default rules and type coercion
//! - Merge a local `.env` file into the process environment (best-effort)
//!
//! # Design Decisions
//! - Resolution is a pure function over an [`EnvSource`], so tests run
//!   against plain maps instead of mutating process state
//! - Resolution runs once at startup; any failure is fatal before network
//!   activity begins

use std::collections::HashMap;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::{Coercion, ConfigField};

/// Errors raised while resolving the environment schema.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required variable with no default is absent.
    #[error("required environment variable {0} is not set")]
    Missing(&'static str),

    /// A value failed integer coercion or range conversion.
    #[error("environment variable {name} is not a valid integer: {value:?}")]
    InvalidInt { name: &'static str, value: String },

    /// A value failed boolean coercion.
    #[error("environment variable {name} is not a valid boolean: {value:?}")]
    InvalidBool { name: &'static str, value: String },

    /// A value failed address parsing.
    #[error("environment variable {name} is not a valid address: {value:?}")]
    InvalidAddress { name: &'static str, value: String },

    /// A value failed 32-byte hash parsing.
    #[error("environment variable {name} is not a valid 32-byte hash: {value:?}")]
    InvalidHash { name: &'static str, value: String },

    /// A field was read back with a type other than its schema coercion.
    #[error("environment variable {0} accessed with mismatched type")]
    WrongType(&'static str),

    /// The configured contract build artifact could not be loaded.
    #[error("contract artifact {path} could not be loaded: {reason}")]
    Artifact { path: String, reason: String },
}

/// Source of raw environment values.
pub trait EnvSource {
    fn var(&self, name: &str) -> Option<String>;
}

/// The process environment.
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

impl EnvSource for HashMap<String, String> {
    fn var(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

/// A coerced value produced by resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedValue {
    Str(String),
    Int(i64),
    Bool(bool),
}

/// The typed output of resolving one schema table.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResolvedConfig {
    values: HashMap<&'static str, ResolvedValue>,
}

impl ResolvedConfig {
    /// A required or defaulted string field.
    pub fn str(&self, name: &'static str) -> Result<String, ConfigError> {
        match self.values.get(name) {
            Some(ResolvedValue::Str(value)) => Ok(value.clone()),
            Some(_) => Err(ConfigError::WrongType(name)),
            None => Err(ConfigError::Missing(name)),
        }
    }

    /// An optional string field; `None` when the variable was unset.
    pub fn opt_str(&self, name: &'static str) -> Option<String> {
        match self.values.get(name) {
            Some(ResolvedValue::Str(value)) => Some(value.clone()),
            _ => None,
        }
    }

    /// An integer field.
    pub fn int(&self, name: &'static str) -> Result<i64, ConfigError> {
        match self.values.get(name) {
            Some(ResolvedValue::Int(value)) => Ok(*value),
            Some(_) => Err(ConfigError::WrongType(name)),
            None => Err(ConfigError::Missing(name)),
        }
    }

    /// A boolean field.
    pub fn bool(&self, name: &'static str) -> Result<bool, ConfigError> {
        match self.values.get(name) {
            Some(ResolvedValue::Bool(value)) => Ok(*value),
            Some(_) => Err(ConfigError::WrongType(name)),
            None => Err(ConfigError::Missing(name)),
        }
    }
}

/// Resolve a schema table against an environment source.
///
/// For each field: absent with a default uses the default, absent and
/// required fails naming the variable, absent and optional stays unset.
/// The field's coercion then applies to whichever raw value was chosen.
pub fn resolve<S: EnvSource>(
    schema: &[ConfigField],
    source: &S,
) -> Result<ResolvedConfig, ConfigError> {
    let mut values = HashMap::with_capacity(schema.len());

    for field in schema {
        let raw = match source.var(field.name) {
            Some(value) => value,
            None => match field.default {
                Some(default) => default.to_string(),
                None if field.required => return Err(ConfigError::Missing(field.name)),
                None => continue,
            },
        };

        values.insert(field.name, coerce(field, raw)?);
    }

    Ok(ResolvedConfig { values })
}

fn coerce(field: &ConfigField, raw: String) -> Result<ResolvedValue, ConfigError> {
    match field.coercion {
        Coercion::Str => Ok(ResolvedValue::Str(raw)),
        Coercion::Int => raw
            .parse::<i64>()
            .map(ResolvedValue::Int)
            .map_err(|_| ConfigError::InvalidInt {
                name: field.name,
                value: raw,
            }),
        Coercion::Bool => match raw.to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Ok(ResolvedValue::Bool(true)),
            "false" | "0" | "no" => Ok(ResolvedValue::Bool(false)),
            _ => Err(ConfigError::InvalidBool {
                name: field.name,
                value: raw,
            }),
        },
    }
}

/// Merge a `.env` file into the process environment before resolution.
///
/// Missing files are not an error; variables already present in the
/// process environment win over file entries.
pub fn merge_env_file(path: Option<&Path>) {
    let loaded = match path {
        Some(path) => dotenvy::from_path(path).map(|_| path.display().to_string()),
        None => dotenvy::dotenv().map(|found| found.display().to_string()),
    };

    match loaded {
        Ok(path) => tracing::debug!(path = %path, "Merged environment file"),
        Err(_) => tracing::debug!("No environment file found"),
    }
}
