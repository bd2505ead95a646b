//! Meta customer-match layout: one deduplicated column of a single PII type.

use super::executor::{NoDataReason, RunOutcome, RunOutput, RunReport};
use super::spec::{FORMATTED_SUFFIX, MetaTarget, Platform, hashed_name};
use crate::error::Result;
use crate::hasher::{EmptyValuePolicy, hash_with_policy};
use crate::normalize::{normalize_email, normalize_phone};
use crate::table::{Column, Table};
use std::collections::HashSet;

/// Collect every normalized `target` value from all matching columns,
/// deduplicate, and hash.
///
/// Only `target`'s keywords are checked, so a header like `nome_email` counts
/// as an email column here even though it is a name column in the Google
/// layout. Distinct values keep first-occurrence order, and hashes are
/// computed in that same order so row `i` of both tables is the same value.
///
/// # Errors
///
/// Returns [`HashifyError::Table`](crate::error::HashifyError::Table) if the
/// output tables cannot be assembled.
pub fn run_meta(input: &Table, target: MetaTarget, policy: EmptyValuePolicy) -> Result<RunOutcome> {
    let role = target.role();
    let normalize: fn(Option<&str>) -> Option<String> = match target {
        MetaTarget::Phone => normalize_phone,
        MetaTarget::Email => normalize_email,
    };

    let mut seen = HashSet::new();
    let mut distinct = Vec::new();
    let mut collected = 0_usize;
    let mut columns_matched = 0_usize;

    for column in input.columns().iter().filter(|c| role.matches(c.name())) {
        columns_matched += 1;
        for value in column.cells().iter().filter_map(|c| normalize(c.as_deref())) {
            collected += 1;
            if seen.insert(value.clone()) {
                distinct.push(value);
            }
        }
    }

    tracing::debug!(
        "{columns_matched} {role} columns, {collected} values, {} distinct",
        distinct.len()
    );
    if distinct.is_empty() {
        return Ok(RunOutcome::NoValidData(NoDataReason::NoValues));
    }

    let hashes = distinct
        .iter()
        .map(|value| hash_with_policy(Some(value.as_str()), policy))
        .collect();
    let formatted_name = format!("{}{FORMATTED_SUFFIX}", target.label());
    let hashed = Table::from_columns(vec![Column::new(hashed_name(target.label()), hashes)])?;
    let count = distinct.len();
    let formatted = Table::from_columns(vec![Column::new(
        formatted_name,
        distinct.into_iter().map(Some).collect(),
    )])?;

    let report = RunReport::new(Platform::Meta, input.height(), count, columns_matched);
    Ok(RunOutcome::Processed(RunOutput {
        formatted,
        hashed,
        report,
    }))
}
