//! Download artifacts for a finished run.
//!
//! A successful run yields two files named after the uploaded one:
//! `"<base> - hashado.csv"` with the digests and `"<base> - formatado.csv"`
//! with the normalized values.

use crate::error::{Result, ResultExt as _};
use crate::io::to_delimited_string;
use crate::pipeline::RunOutput;
use std::path::{Path, PathBuf};

pub const HASHED_LABEL: &str = "Download hashed CSV";
pub const FORMATTED_LABEL: &str = "Download formatted CSV (unhashed)";

/// Suggested output file names for an uploaded file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputNames {
    pub hashed: String,
    pub formatted: String,
}

impl OutputNames {
    /// Strip the final extension of `source_name` and append the suffixes.
    pub fn for_source(source_name: &str) -> Self {
        let path = Path::new(source_name);
        let base = path
            .file_stem()
            .map_or_else(|| source_name.to_owned(), |s| s.to_string_lossy().into_owned());
        Self {
            hashed: format!("{base} - hashado.csv"),
            formatted: format!("{base} - formatado.csv"),
        }
    }
}

/// One downloadable file: a button label, a file name, and its contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub label: String,
    pub file_name: String,
    pub contents: String,
}

/// Render both output tables. The hashed file comes first.
///
/// # Errors
///
/// Returns an error if a table cannot be serialized.
pub fn build_artifacts(source_name: &str, output: &RunOutput, delimiter: u8) -> Result<Vec<Artifact>> {
    let names = OutputNames::for_source(source_name);
    Ok(vec![
        Artifact {
            label: HASHED_LABEL.to_owned(),
            file_name: names.hashed,
            contents: to_delimited_string(&output.hashed, delimiter)?,
        },
        Artifact {
            label: FORMATTED_LABEL.to_owned(),
            file_name: names.formatted,
            contents: to_delimited_string(&output.formatted, delimiter)?,
        },
    ])
}

/// Write artifacts into `dir`, creating it if needed. Returns the paths written.
///
/// # Errors
///
/// Returns an error if the directory or a file cannot be written.
pub fn write_artifacts(dir: &Path, artifacts: &[Artifact]) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;

    let mut written = Vec::with_capacity(artifacts.len());
    for artifact in artifacts {
        let path = dir.join(&artifact.file_name);
        std::fs::write(&path, &artifact.contents)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::info!("Wrote {}", path.display());
        written.push(path);
    }
    Ok(written)
}
