//! Runtime configuration.
//!
//! Two independent knobs: how operators treat unsupported operands
//! (`OperatorPolicy`) and what happens when a narrowing accessor or call
//! hits the wrong variant (`MismatchPolicy`). Presets cover the common
//! combinations; `from_env` lets a host pick them without recompiling.

use std::fmt;
use std::str::FromStr;

use sl_value::{OperatorPolicy, ParsePolicyError};
use thiserror::Error;

/// What a type mismatch does to the host.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum MismatchPolicy {
    /// Return the mismatch as an `EvalError` for the caller to handle.
    #[default]
    Propagate,
    /// Print a diagnostic and terminate the process with exit status 1.
    Abort,
}

impl MismatchPolicy {
    pub const fn as_str(self) -> &'static str {
        match self {
            MismatchPolicy::Propagate => "propagate",
            MismatchPolicy::Abort => "abort",
        }
    }

    /// Whether `err` terminates the process under this policy.
    pub fn is_fatal(self, err: &sl_value::EvalError) -> bool {
        self == MismatchPolicy::Abort && err.is_type_mismatch()
    }
}

impl FromStr for MismatchPolicy {
    type Err = ParsePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "propagate" => Ok(MismatchPolicy::Propagate),
            "abort" => Ok(MismatchPolicy::Abort),
            _ => Err(ParsePolicyError::new(s)),
        }
    }
}

impl fmt::Display for MismatchPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error loading a `RuntimeConfig`.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid value `{value}` for {key} (expected one of: {expected})")]
    InvalidValue {
        key: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// Policies a `Runtime` is built with.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub operators: OperatorPolicy,
    pub on_mismatch: MismatchPolicy,
}

impl RuntimeConfig {
    /// Selects a preset: `default`, `legacy` or `strict`.
    pub const MODE_VAR: &'static str = "SL_MODE";
    /// Overrides the operator policy: `lenient` or `strict`.
    pub const OPERATORS_VAR: &'static str = "SL_OPERATORS";
    /// Overrides the mismatch policy: `propagate` or `abort`.
    pub const ON_MISMATCH_VAR: &'static str = "SL_ON_MISMATCH";

    /// Lenient operators, process exit on type mismatch.
    pub fn legacy() -> Self {
        RuntimeConfig {
            operators: OperatorPolicy::Lenient,
            on_mismatch: MismatchPolicy::Abort,
        }
    }

    /// Every unsupported operation and mismatch is an error value.
    pub fn strict() -> Self {
        RuntimeConfig {
            operators: OperatorPolicy::Strict,
            on_mismatch: MismatchPolicy::Propagate,
        }
    }

    #[must_use]
    pub fn with_operators(mut self, operators: OperatorPolicy) -> Self {
        self.operators = operators;
        self
    }

    #[must_use]
    pub fn with_on_mismatch(mut self, on_mismatch: MismatchPolicy) -> Self {
        self.on_mismatch = on_mismatch;
        self
    }

    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup.
    ///
    /// `SL_MODE` picks the starting preset, then `SL_OPERATORS` and
    /// `SL_ON_MISMATCH` override individual policies. Unset or empty
    /// variables are ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let mut config = match get(Self::MODE_VAR) {
            None => RuntimeConfig::default(),
            Some(mode) => Self::preset(&mode).ok_or_else(|| ConfigError::InvalidValue {
                key: Self::MODE_VAR,
                value: mode,
                expected: "default, legacy, strict",
            })?,
        };

        if let Some(value) = get(Self::OPERATORS_VAR) {
            config.operators = value.parse().map_err(|_| ConfigError::InvalidValue {
                key: Self::OPERATORS_VAR,
                value,
                expected: "lenient, strict",
            })?;
        }
        if let Some(value) = get(Self::ON_MISMATCH_VAR) {
            config.on_mismatch = value.parse().map_err(|_| ConfigError::InvalidValue {
                key: Self::ON_MISMATCH_VAR,
                value,
                expected: "propagate, abort",
            })?;
        }

        tracing::debug!(
            operators = config.operators.as_str(),
            on_mismatch = config.on_mismatch.as_str(),
            "loaded runtime config"
        );
        Ok(config)
    }

    fn preset(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "default" => Some(RuntimeConfig::default()),
            "legacy" => Some(RuntimeConfig::legacy()),
            "strict" => Some(RuntimeConfig::strict()),
            _ => None,
        }
    }
}
