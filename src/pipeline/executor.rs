//! Pipeline execution and the run boundary.
//!
//! [`run_pipeline`] is the pure transform: table in, tables out. The
//! `process_*` functions wrap it with parsing and export and turn every
//! internal failure into a [`RunStatus`], so callers never see an `Err`.

use super::google::run_google;
use super::meta::run_meta;
use super::spec::{Platform, RunConfig, RunMode};
use crate::config::Settings;
use crate::error::Result;
use crate::export::{Artifact, build_artifacts};
use crate::io::read_table;
use crate::table::Table;
use std::io::Read;
use std::path::Path;
use std::time::{Duration, Instant};

/// Why a run produced nothing to export. Not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoDataReason {
    /// No header matched any PII keyword.
    NoMatchingColumns,
    /// Columns matched, but every row was empty after normalization.
    NoSurvivingRows,
    /// No normalized value of the requested type was found.
    NoValues,
}

impl NoDataReason {
    pub fn message(self) -> &'static str {
        match self {
            Self::NoMatchingColumns => {
                "No column with a valid name, phone or email header was found."
            }
            Self::NoSurvivingRows => "No row with a valid name, phone or email was found.",
            Self::NoValues => "No valid data was found to hash.",
        }
    }
}

/// Report generated after a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub platform: Platform,

    /// Rows in the input table
    pub rows_in: usize,

    /// Rows in each output table (distinct values for Meta)
    pub rows_out: usize,

    /// Input columns that fed the output
    pub columns_classified: usize,

    /// Time taken, filled in by [`run_pipeline`]
    pub duration: Duration,
}

impl RunReport {
    pub fn new(platform: Platform, rows_in: usize, rows_out: usize, columns_classified: usize) -> Self {
        Self {
            platform,
            rows_in,
            rows_out,
            columns_classified,
            duration: Duration::ZERO,
        }
    }

    /// Create a summary message
    pub fn summary(&self) -> String {
        let unit = match self.platform {
            Platform::Google => "rows",
            Platform::Meta => "distinct values",
        };
        format!(
            "{} run completed: {} {unit} from {} input rows, {} columns used, {:.2}s",
            self.platform,
            self.rows_out,
            self.rows_in,
            self.columns_classified,
            self.duration.as_secs_f64()
        )
    }
}

/// The two output tables of a run. Row `i` of `hashed` is the digest of
/// row `i` of `formatted`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutput {
    pub formatted: Table,
    pub hashed: Table,
    pub report: RunReport,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Processed(RunOutput),
    NoValidData(NoDataReason),
}

/// Run the transform selected by `config` over `input`.
///
/// # Errors
///
/// Returns an error if `config` is invalid or an output table cannot be built.
pub fn run_pipeline(input: &Table, config: &RunConfig, settings: &Settings) -> Result<RunOutcome> {
    let start = Instant::now();
    let mode = config.mode()?;
    tracing::info!(
        "Starting {} run over {} rows and {} columns",
        config.platform,
        input.height(),
        input.width()
    );

    let policy = settings.empty_value_policy;
    let mut outcome = match mode {
        RunMode::Google => run_google(input, policy)?,
        RunMode::Meta(target) => run_meta(input, target, policy)?,
    };

    match &mut outcome {
        RunOutcome::Processed(output) => {
            output.report.duration = start.elapsed();
            tracing::info!("{}", output.report.summary());
        }
        RunOutcome::NoValidData(reason) => {
            tracing::warn!("{} run found no data: {reason:?}", config.platform);
        }
    }
    Ok(outcome)
}

/// Surfaced result of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunStatus {
    Success {
        message: String,
        /// Surviving rows (Google) or distinct values (Meta)
        count: usize,
        output: RunOutput,
        /// Hashed file first, then formatted.
        artifacts: Vec<Artifact>,
    },
    /// Nothing to export. No artifacts are produced.
    Warning { message: String },
    /// The run was aborted; nothing was produced.
    Failed { error: String },
}

impl RunStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// Parse `reader`, run the pipeline, and build download artifacts named
/// after `source_name`.
pub fn process_reader<R: Read>(
    reader: R,
    source_name: &str,
    config: &RunConfig,
    settings: &Settings,
) -> RunStatus {
    match try_process(reader, source_name, config, settings) {
        Ok(status) => status,
        Err(e) => {
            tracing::error!("Failed to process {source_name}: {e}");
            RunStatus::Failed {
                error: e.to_string(),
            }
        }
    }
}

/// [`process_reader`] over a file on disk.
pub fn process_file(path: &Path, config: &RunConfig, settings: &Settings) -> RunStatus {
    let source_name = path
        .file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());

    match std::fs::File::open(path) {
        Ok(file) => process_reader(std::io::BufReader::new(file), &source_name, config, settings),
        Err(e) => {
            tracing::error!("Failed to open {}: {e}", path.display());
            RunStatus::Failed {
                error: format!("Failed to open {}: {e}", path.display()),
            }
        }
    }
}

fn try_process<R: Read>(
    reader: R,
    source_name: &str,
    config: &RunConfig,
    settings: &Settings,
) -> Result<RunStatus> {
    config.validate()?;
    let table = read_table(reader, &settings.read_options()?)?;

    match run_pipeline(&table, config, settings)? {
        RunOutcome::Processed(output) => {
            let artifacts =
                build_artifacts(source_name, &output, settings.output_delimiter_byte()?)?;
            let count = output.report.rows_out;
            let message = match output.report.platform {
                Platform::Google => format!("Data processed successfully: {count} rows."),
                Platform::Meta => format!("Data processed successfully: {count} distinct values."),
            };
            Ok(RunStatus::Success {
                message,
                count,
                output,
                artifacts,
            })
        }
        RunOutcome::NoValidData(reason) => Ok(RunStatus::Warning {
            message: reason.message().to_owned(),
        }),
    }
}
