use crate::error::{HashifyError, Result, ResultExt as _};
use crate::hasher::EmptyValuePolicy;
use crate::io::{DEFAULT_NA_VALUES, ReadOptions};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// User-tunable settings. Every field has a default, so a config file only
/// needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Field separator of the uploaded table
    pub input_delimiter: char,
    /// Field separator of the produced files
    pub output_delimiter: char,
    /// Cell contents read as absent, in addition to the empty field
    pub na_values: Vec<String>,
    /// Whether an empty canonical value gets a digest
    pub empty_value_policy: EmptyValuePolicy,
    /// Rows shown in the hashed preview (default: 10)
    pub preview_rows: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            input_delimiter: ';',
            output_delimiter: ',',
            na_values: DEFAULT_NA_VALUES.iter().map(|&s| s.to_owned()).collect(),
            empty_value_policy: EmptyValuePolicy::default(),
            preview_rows: 10,
        }
    }
}

impl Settings {
    /// Check values that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`HashifyError::Config`] if a delimiter is not ASCII, or is a
    /// quote or line break.
    pub fn validate(&self) -> Result<()> {
        delimiter_byte(self.input_delimiter, "input_delimiter")?;
        delimiter_byte(self.output_delimiter, "output_delimiter")?;
        Ok(())
    }

    /// Reader options derived from these settings.
    ///
    /// # Errors
    ///
    /// Returns [`HashifyError::Config`] if the input delimiter is invalid.
    pub fn read_options(&self) -> Result<ReadOptions> {
        Ok(ReadOptions {
            delimiter: delimiter_byte(self.input_delimiter, "input_delimiter")?,
            na_values: self.na_values.clone(),
        })
    }

    /// Output delimiter as a byte.
    ///
    /// # Errors
    ///
    /// Returns [`HashifyError::Config`] if the output delimiter is invalid.
    pub fn output_delimiter_byte(&self) -> Result<u8> {
        delimiter_byte(self.output_delimiter, "output_delimiter")
    }
}

fn delimiter_byte(c: char, field: &str) -> Result<u8> {
    if !c.is_ascii() || c == '\n' || c == '\r' || c == '"' {
        return Err(HashifyError::Config(format!(
            "{field} must be a single ASCII character other than a quote or line break, got {c:?}"
        )));
    }
    u8::try_from(c).map_err(|e| HashifyError::Config(format!("{field}: {e}")))
}

pub fn get_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("hashify").join("config.json"))
}

/// Load settings from `path`, or from the default location when `None`.
///
/// An explicit path must exist. A missing default file yields defaults.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not valid JSON, or fails
/// [`Settings::validate`].
pub fn load_settings(path: Option<&Path>) -> Result<Settings> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => match get_config_path() {
            Some(p) if p.exists() => p,
            _ => {
                tracing::debug!("No config file found, using default settings");
                return Ok(Settings::default());
            }
        },
    };

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let settings: Settings = serde_json::from_str(&content)?;
    settings.validate()?;
    tracing::debug!("Loaded settings from {}", path.display());
    Ok(settings)
}

/// Write `settings` as pretty JSON, creating parent directories.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be written.
pub fn save_settings(settings: &Settings, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let content = serde_json::to_string_pretty(settings)?;
    std::fs::write(path, content)?;
    Ok(())
}
