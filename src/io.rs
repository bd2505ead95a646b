//! Delimited text input and output.
//!
//! Cells are always read as text. Numeric inference would strip the leading
//! zeros phone numbers depend on, so none is attempted.

use crate::error::{HashifyError, Result, ResultExt as _};
use crate::table::{Cell, Column, Table};
use csv::{ReaderBuilder, StringRecord, Terminator, WriterBuilder};
use std::collections::HashSet;
use std::io::{Read, Write};
use std::path::Path;

/// Tokens read as an absent cell, besides the empty field.
pub const DEFAULT_NA_VALUES: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// How to parse a delimited input table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadOptions {
    pub delimiter: u8,
    pub na_values: Vec<String>,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            delimiter: b';',
            na_values: DEFAULT_NA_VALUES.iter().map(|&s| s.to_owned()).collect(),
        }
    }
}

/// Parse a delimited table whose first record is the header row.
///
/// # Errors
///
/// Returns [`HashifyError::MalformedInput`] for invalid UTF-8, rows with more
/// fields than the header, or any other CSV syntax error.
pub fn read_table<R: Read>(mut reader: R, options: &ReadOptions) -> Result<Table> {
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .context("Failed to read input")?;
    let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(&bytes);

    let mut csv_reader = ReaderBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(body);

    let headers = csv_reader
        .headers()
        .map_err(|e| HashifyError::MalformedInput(format!("Failed to read header row: {e}")))?
        .clone();
    if headers.is_empty() {
        return Err(HashifyError::MalformedInput(
            "input has no header row".to_owned(),
        ));
    }

    let names = dedupe_headers(&headers);
    let na: HashSet<&str> = options.na_values.iter().map(String::as_str).collect();
    let mut cells: Vec<Vec<Cell>> = vec![Vec::new(); names.len()];

    for (index, result) in csv_reader.records().enumerate() {
        // Header is line 1, so data row N is line N + 1.
        let line = index + 2;
        let record = result.map_err(|e| {
            HashifyError::MalformedInput(format!("Failed to parse row {line}: {e}"))
        })?;
        if record.len() > names.len() {
            return Err(HashifyError::MalformedInput(format!(
                "row {line} has {} fields, expected {}",
                record.len(),
                names.len()
            )));
        }
        for (col, column_cells) in cells.iter_mut().enumerate() {
            let value = record
                .get(col)
                .filter(|v| !v.is_empty() && !na.contains(v))
                .map(str::to_owned);
            column_cells.push(value);
        }
    }

    let columns = names
        .into_iter()
        .zip(cells)
        .map(|(name, cells)| Column::new(name, cells))
        .collect();
    Table::from_columns(columns)
}

/// Open and parse a delimited file.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or fails to parse.
pub fn read_table_from_path(path: &Path, options: &ReadOptions) -> Result<Table> {
    if !path.is_file() {
        return Err(HashifyError::InvalidPath(format!(
            "{} is not a readable file",
            path.display()
        )));
    }
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;
    read_table(std::io::BufReader::new(file), options)
}

/// Repeated headers become `h`, `h.1`, `h.2`, ... in order of appearance.
fn dedupe_headers(headers: &StringRecord) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut names = Vec::with_capacity(headers.len());

    for header in headers {
        let mut name = header.to_owned();
        let mut count = 0;
        while seen.contains(&name) {
            count += 1;
            name = format!("{header}.{count}");
        }
        seen.insert(name.clone());
        names.push(name);
    }
    names
}

/// Write `table` with a header row. Absent cells become empty fields.
///
/// # Errors
///
/// Returns an error if the underlying writer fails.
pub fn write_table<W: Write>(writer: W, table: &Table, delimiter: u8) -> Result<()> {
    let mut csv_writer = WriterBuilder::new()
        .delimiter(delimiter)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(writer);

    csv_writer.write_record(table.headers())?;
    for record in table.records() {
        csv_writer.write_record(record.iter().map(|(_, v)| v.unwrap_or("")))?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Render `table` as delimited text.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_delimited_string(table: &Table, delimiter: u8) -> Result<String> {
    let mut buffer = Vec::new();
    write_table(&mut buffer, table, delimiter)?;
    String::from_utf8(buffer).map_err(|e| HashifyError::Other(e.to_string()))
}
