//! # Hashify - PII normalization and hashing for customer-match uploads
//!
//! Hashify turns a table of raw contact data (names, phone numbers, emails)
//! into the canonical, SHA-256 hashed form that ad platforms accept for
//! customer-match audiences.
//!
//! ## Quick Start
//!
//! ```no_run
//! use hashify::config::Settings;
//! use hashify::io::{ReadOptions, read_table_from_path};
//! use hashify::pipeline::{RunConfig, RunOutcome, run_pipeline};
//! use std::path::Path;
//!
//! # fn example() -> hashify::error::Result<()> {
//! let table = read_table_from_path(Path::new("clientes.csv"), &ReadOptions::default())?;
//! if let RunOutcome::Processed(output) =
//!     run_pipeline(&table, &RunConfig::google(), &Settings::default())?
//! {
//!     println!("{}", output.report.summary());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Core Modules
//!
//! - [`normalize`]: per-class canonicalization (email, phone, name)
//! - [`hasher`]: SHA-256 digests with an explicit empty-value policy
//! - [`classifier`]: header → PII role by keyword
//! - [`pipeline`]: Google and Meta layouts and the run boundary
//! - [`table`]: the typed table every stage passes around
//! - [`io`] and [`export`]: delimited text in, download artifacts out
//! - [`config`], [`logging`], [`error`]: ambient plumbing
//!
//! ## Absence
//!
//! An absent cell (`None`) and an empty one (`Some("")`) are different
//! things everywhere in this crate. Absent input normalizes to absent output
//! and hashes to an absent digest. Whether an empty value gets a digest is
//! decided by [`hasher::EmptyValuePolicy`].

#![warn(clippy::all, rust_2018_idioms)]

pub mod classifier;
pub mod config;
pub mod error;
pub mod export;
pub mod hasher;
pub mod io;
pub mod logging;
pub mod normalize;
pub mod pipeline;
pub mod table;
