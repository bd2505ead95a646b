//! Google customer-match layout.
//!
//! Output stays row-aligned with the input: every classified column yields one
//! or two formatted columns plus matching hashed columns, and rows without any
//! usable value are dropped from both tables together.

use super::executor::{NoDataReason, RunOutcome, RunOutput, RunReport};
use super::spec::{
    FIRST_NAME_SUFFIX, FORMATTED_SUFFIX, LAST_NAME_SUFFIX, Platform, hashed_name,
};
use crate::classifier::ColumnRole;
use crate::error::Result;
use crate::hasher::{EmptyValuePolicy, hash_with_policy};
use crate::normalize::{normalize_email, normalize_name, normalize_phone};
use crate::table::{Cell, Column, Table};

/// Derive formatted and hashed columns from every classified input column,
/// then drop rows that ended up with no value at all.
///
/// ```
/// use hashify::hasher::EmptyValuePolicy;
/// use hashify::pipeline::RunOutcome;
/// use hashify::pipeline::google::run_google;
/// use hashify::table::{Column, Table};
///
/// let input = Table::from_columns(vec![Column::from_strs("Nome", &[Some("José Silva")])])?;
/// let RunOutcome::Processed(output) = run_google(&input, EmptyValuePolicy::Absent)? else {
///     panic!("a named row should survive");
/// };
/// assert_eq!(output.formatted.headers(), ["Nome_FIRST_NAME", "Nome_LAST_NAME"]);
/// # Ok::<(), hashify::error::HashifyError>(())
/// ```
///
/// # Errors
///
/// Returns [`HashifyError::Table`](crate::error::HashifyError::Table) if the
/// derived columns cannot be assembled into a table.
pub fn run_google(input: &Table, policy: EmptyValuePolicy) -> Result<RunOutcome> {
    let mut formatted = Table::new();
    let mut hashed = Table::new();
    let mut columns_classified = 0;

    for column in input.columns() {
        let role = ColumnRole::classify(column.name());
        let derived = match role {
            ColumnRole::Name => split_name_column(column),
            ColumnRole::Phone => vec![normalized_column(column, normalize_phone)],
            ColumnRole::Email => vec![normalized_column(column, normalize_email)],
            ColumnRole::Unclassified => {
                tracing::debug!("Skipping unclassified column '{}'", column.name());
                continue;
            }
        };
        tracing::debug!("Column '{}' classified as {role}", column.name());
        columns_classified += 1;

        for formatted_column in derived {
            hashed.push_column(hash_column(&formatted_column, policy))?;
            formatted.push_column(formatted_column)?;
        }
    }

    if hashed.width() == 0 {
        return Ok(RunOutcome::NoValidData(NoDataReason::NoMatchingColumns));
    }

    let keep: Vec<bool> = formatted
        .records()
        .iter()
        .map(|record| !record.is_all_absent())
        .collect();
    let formatted = formatted.retain_rows(&keep)?;
    let hashed = hashed.retain_rows(&keep)?;
    tracing::debug!(
        "Dropped {} rows without usable values",
        input.height() - formatted.height()
    );

    if hashed.is_empty() {
        return Ok(RunOutcome::NoValidData(NoDataReason::NoSurvivingRows));
    }

    let report = RunReport::new(Platform::Google, input.height(), hashed.height(), columns_classified);
    Ok(RunOutcome::Processed(RunOutput {
        formatted,
        hashed,
        report,
    }))
}

fn split_name_column(column: &Column) -> Vec<Column> {
    let (first, last): (Vec<Cell>, Vec<Cell>) = column
        .cells()
        .iter()
        .map(|cell| match normalize_name(cell.as_deref()) {
            Some(parts) => (Some(parts.first), Some(parts.last)),
            None => (None, None),
        })
        .unzip();

    vec![
        Column::new(format!("{}{FIRST_NAME_SUFFIX}", column.name()), first),
        Column::new(format!("{}{LAST_NAME_SUFFIX}", column.name()), last),
    ]
}

fn normalized_column(column: &Column, normalize: fn(Option<&str>) -> Option<String>) -> Column {
    Column::new(
        format!("{}{FORMATTED_SUFFIX}", column.name()),
        column.cells().iter().map(|c| normalize(c.as_deref())).collect(),
    )
}

fn hash_column(column: &Column, policy: EmptyValuePolicy) -> Column {
    Column::new(
        hashed_name(column.name()),
        column
            .cells()
            .iter()
            .map(|c| hash_with_policy(c.as_deref(), policy))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hasher::sha256_hex;

    fn processed(outcome: RunOutcome) -> RunOutput {
        match outcome {
            RunOutcome::Processed(output) => output,
            RunOutcome::NoValidData(reason) => panic!("expected output, got {reason:?}"),
        }
    }

    #[test]
    fn test_derived_columns_in_input_order() {
        let input = Table::from_columns(vec![
            Column::from_strs("Nome", &[Some("José  Da Silva")]),
            Column::from_strs("cidade", &[Some("Recife")]),
            Column::from_strs("telefone1", &[Some("011987654321")]),
            Column::from_strs("EMAIL", &[Some(" Foo@Bar.COM ")]),
        ])
        .unwrap();

        let output = processed(run_google(&input, EmptyValuePolicy::Absent).unwrap());
        assert_eq!(
            output.formatted.headers(),
            vec![
                "Nome_FIRST_NAME",
                "Nome_LAST_NAME",
                "telefone1_FORMATADO",
                "EMAIL_FORMATADO"
            ]
        );
        assert_eq!(
            output.hashed.headers(),
            vec![
                "Nome_FIRST_NAME_HASHED",
                "Nome_LAST_NAME_HASHED",
                "telefone1_FORMATADO_HASHED",
                "EMAIL_FORMATADO_HASHED"
            ]
        );

        let row = &output.formatted.records()[0];
        assert_eq!(row.get("Nome_FIRST_NAME"), Some("jose"));
        assert_eq!(row.get("Nome_LAST_NAME"), Some("da silva"));
        assert_eq!(row.get("telefone1_FORMATADO"), Some("+5511987654321"));
        assert_eq!(row.get("EMAIL_FORMATADO"), Some("foo@bar.com"));

        let hashed = &output.hashed.records()[0];
        assert_eq!(
            hashed.get("EMAIL_FORMATADO_HASHED"),
            Some(sha256_hex("foo@bar.com").as_str())
        );
        assert_eq!(output.report.columns_classified, 3);
    }

    #[test]
    fn test_drops_rows_without_values() {
        let input = Table::from_columns(vec![
            Column::from_strs("nome", &[None, None]),
            Column::from_strs("fone", &[None, Some("123")]),
            Column::from_strs("email", &[None, Some("a@b.com")]),
        ])
        .unwrap();

        let output = processed(run_google(&input, EmptyValuePolicy::Absent).unwrap());
        assert_eq!(output.formatted.height(), 1);
        assert_eq!(output.hashed.height(), 1);
        assert_eq!(output.report.rows_in, 2);
        assert_eq!(output.report.rows_out, 1);
        assert_eq!(
            output.formatted.column("email_FORMATADO").unwrap().get(0),
            Some("a@b.com")
        );
        assert_eq!(output.formatted.column("fone_FORMATADO").unwrap().get(0), None);
    }

    #[test]
    fn test_single_word_name_keeps_empty_last_name() {
        let input = Table::from_columns(vec![Column::from_strs("nome", &[Some("Cher")])]).unwrap();

        let output = processed(run_google(&input, EmptyValuePolicy::Absent).unwrap());
        assert_eq!(output.formatted.column("nome_LAST_NAME").unwrap().get(0), Some(""));
        assert_eq!(output.hashed.column("nome_LAST_NAME_HASHED").unwrap().get(0), None);

        let output = processed(run_google(&input, EmptyValuePolicy::Digest).unwrap());
        assert_eq!(
            output.hashed.column("nome_LAST_NAME_HASHED").unwrap().get(0),
            Some(sha256_hex("").as_str())
        );
    }

    #[test]
    fn test_blank_email_keeps_row_but_has_no_digest() {
        let input = Table::from_columns(vec![Column::from_strs("email", &[Some("   ")])]).unwrap();

        let output = processed(run_google(&input, EmptyValuePolicy::Absent).unwrap());
        assert_eq!(output.formatted.height(), 1);
        assert_eq!(output.hashed.column("email_FORMATADO_HASHED").unwrap().get(0), None);
    }

    #[test]
    fn test_no_classified_columns() {
        let input = Table::from_columns(vec![Column::from_strs("cidade", &[Some("Recife")])]).unwrap();
        assert_eq!(
            run_google(&input, EmptyValuePolicy::Absent).unwrap(),
            RunOutcome::NoValidData(NoDataReason::NoMatchingColumns)
        );
    }

    #[test]
    fn test_no_surviving_rows() {
        let input = Table::from_columns(vec![Column::from_strs("fone", &[Some("123"), None])]).unwrap();
        assert_eq!(
            run_google(&input, EmptyValuePolicy::Absent).unwrap(),
            RunOutcome::NoValidData(NoDataReason::NoSurvivingRows)
        );
    }

    #[test]
    fn test_multiple_columns_of_same_role() {
        let input = Table::from_columns(vec![
            Column::from_strs("fone1", &[Some("11987654321")]),
            Column::from_strs("fone2", &[Some("21987654321")]),
        ])
        .unwrap();

        let output = processed(run_google(&input, EmptyValuePolicy::Absent).unwrap());
        assert_eq!(output.formatted.width(), 2);
        assert_eq!(output.formatted.column("fone2_FORMATADO").unwrap().get(0), Some("+5521987654321"));
    }
}
