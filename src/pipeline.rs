//! Column-driven normalization and hashing pipeline.
//!
//! A run takes one input [`Table`](crate::table::Table) and a [`RunConfig`]
//! and produces two tables: the normalized ("formatted") values and their
//! SHA-256 digests.
//!
//! ```text
//! input table ─> classify headers ─> normalize cells ─> shape per platform ─> hash
//! ```
//!
//! # Layouts
//!
//! - **Google**: row-aligned. Name columns split into `<h>_FIRST_NAME` and
//!   `<h>_LAST_NAME`; phone and email columns become `<h>_FORMATADO`. Each has a
//!   `_HASHED` twin. Rows with no value left in any formatted column are dropped.
//! - **Meta**: a single column (`TELEFONE_*` or `EMAIL_*`) holding every
//!   distinct normalized value of the chosen type, across all matching columns.
//!
//! # Example
//!
//! ```no_run
//! use hashify::config::Settings;
//! use hashify::pipeline::{RunConfig, RunStatus, process_file};
//! use std::path::Path;
//!
//! match process_file(Path::new("clientes.csv"), &RunConfig::google(), &Settings::default()) {
//!     RunStatus::Success { message, artifacts, .. } => {
//!         println!("{message}");
//!         for artifact in artifacts {
//!             println!("{} -> {}", artifact.label, artifact.file_name);
//!         }
//!     }
//!     RunStatus::Warning { message } => println!("warning: {message}"),
//!     RunStatus::Failed { error } => eprintln!("error: {error}"),
//! }
//! ```

pub mod executor;
pub mod google;
pub mod meta;
pub mod spec;

pub use executor::{
    NoDataReason, RunOutcome, RunOutput, RunReport, RunStatus, process_file, process_reader,
    run_pipeline,
};
pub use spec::{MetaTarget, Platform, RunConfig, RunMode};
