//! Run configuration and output naming.
//!
//! A [`RunConfig`] replaces the interactive platform/target selectors: it is
//! the only input besides the table itself.

use crate::classifier::ColumnRole;
use crate::error::{HashifyError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Suffix of the first-name column derived from a name column.
pub const FIRST_NAME_SUFFIX: &str = "_FIRST_NAME";
/// Suffix of the last-name column derived from a name column.
pub const LAST_NAME_SUFFIX: &str = "_LAST_NAME";
/// Suffix of a normalized phone or email column.
pub const FORMATTED_SUFFIX: &str = "_FORMATADO";
/// Suffix appended to a formatted column's name in the hashed table.
pub const HASHED_SUFFIX: &str = "_HASHED";

/// Target ad platform, which decides the output layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Row-aligned output, names split into first and last.
    Google,
    /// One deduplicated column of a single PII type.
    Meta,
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Google => f.write_str("Google"),
            Self::Meta => f.write_str("Meta"),
        }
    }
}

/// The PII type a Meta upload carries. Names are not supported there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetaTarget {
    Phone,
    Email,
}

impl MetaTarget {
    pub fn role(self) -> ColumnRole {
        match self {
            Self::Phone => ColumnRole::Phone,
            Self::Email => ColumnRole::Email,
        }
    }

    /// Header stem of the Meta output columns.
    pub fn label(self) -> &'static str {
        match self {
            Self::Phone => "TELEFONE",
            Self::Email => "EMAIL",
        }
    }
}

/// Validated form of a [`RunConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Google,
    Meta(MetaTarget),
}

/// What to produce from one input table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    pub platform: Platform,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_target: Option<MetaTarget>,
}

impl RunConfig {
    pub fn google() -> Self {
        Self {
            platform: Platform::Google,
            meta_target: None,
        }
    }

    pub fn meta(target: MetaTarget) -> Self {
        Self {
            platform: Platform::Meta,
            meta_target: Some(target),
        }
    }

    /// Resolve the run mode.
    ///
    /// # Errors
    ///
    /// Returns [`HashifyError::Config`] if Meta is selected without a target.
    pub fn mode(&self) -> Result<RunMode> {
        match (self.platform, self.meta_target) {
            (Platform::Google, target) => {
                if let Some(target) = target {
                    tracing::warn!("Ignoring Meta target {target:?} for a Google run");
                }
                Ok(RunMode::Google)
            }
            (Platform::Meta, Some(target)) => Ok(RunMode::Meta(target)),
            (Platform::Meta, None) => Err(HashifyError::Config(
                "Meta runs need a target: phone or email".to_owned(),
            )),
        }
    }

    /// # Errors
    ///
    /// See [`RunConfig::mode`].
    pub fn validate(&self) -> Result<()> {
        self.mode().map(|_| ())
    }
}

/// `<header>_HASHED`
pub fn hashed_name(formatted_name: &str) -> String {
    format!("{formatted_name}{HASHED_SUFFIX}")
}
