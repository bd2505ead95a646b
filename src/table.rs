//! Strongly-typed tabular data.
//!
//! A [`Table`] is an ordered list of named [`Column`]s that all have the same
//! number of cells. A [`Cell`] is `Option<String>`: `None` means the value is
//! absent, `Some(String::new())` means it is present but empty. Nothing in this
//! module treats the two as equal.

use crate::error::{HashifyError, Result};

/// One cell value. `None` is absent.
pub type Cell = Option<String>;

/// A named column of cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    name: String,
    cells: Vec<Cell>,
}

impl Column {
    pub fn new(name: impl Into<String>, cells: Vec<Cell>) -> Self {
        Self {
            name: name.into(),
            cells,
        }
    }

    /// Build a column from borrowed optional strings. Handy in tests.
    pub fn from_strs(name: impl Into<String>, cells: &[Option<&str>]) -> Self {
        Self::new(
            name,
            cells.iter().map(|c| c.map(str::to_owned)).collect(),
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cell at `row`, flattened so that an out-of-range row reads as absent.
    pub fn get(&self, row: usize) -> Option<&str> {
        self.cells.get(row).and_then(|c| c.as_deref())
    }
}

/// Ordered, rectangular collection of columns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    columns: Vec<Column>,
    height: usize,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table, rejecting ragged or duplicate columns.
    ///
    /// # Errors
    ///
    /// Returns [`HashifyError::Table`] if column lengths differ or a name repeats.
    pub fn from_columns(columns: Vec<Column>) -> Result<Self> {
        let mut table = Self::new();
        for column in columns {
            table.push_column(column)?;
        }
        Ok(table)
    }

    /// Append a column. The first column fixes the table height.
    ///
    /// # Errors
    ///
    /// Returns [`HashifyError::Table`] if the length does not match the
    /// table height or a column with the same name already exists.
    pub fn push_column(&mut self, column: Column) -> Result<()> {
        if self.columns.iter().any(|c| c.name == column.name) {
            return Err(HashifyError::Table(format!(
                "duplicate column name '{}'",
                column.name
            )));
        }
        if self.columns.is_empty() {
            self.height = column.len();
        } else if column.len() != self.height {
            return Err(HashifyError::Table(format!(
                "column '{}' has {} rows, expected {}",
                column.name,
                column.len(),
                self.height
            )));
        }
        self.columns.push(column);
        Ok(())
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn headers(&self) -> Vec<&str> {
        self.columns.iter().map(Column::name).collect()
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// True when there is nothing to export: no columns or no rows.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty() || self.height == 0
    }

    /// Row-wise view of the table.
    pub fn records(&self) -> Vec<RawRecord<'_>> {
        (0..self.height)
            .map(|row| RawRecord {
                cells: self
                    .columns
                    .iter()
                    .map(|c| (c.name.as_str(), c.get(row)))
                    .collect(),
            })
            .collect()
    }

    /// Keep only the rows whose mask entry is `true`.
    ///
    /// # Errors
    ///
    /// Returns [`HashifyError::Table`] if the mask length differs from the height.
    pub fn retain_rows(&self, mask: &[bool]) -> Result<Self> {
        if mask.len() != self.height {
            return Err(HashifyError::Table(format!(
                "row mask has {} entries, table has {} rows",
                mask.len(),
                self.height
            )));
        }
        let columns = self
            .columns
            .iter()
            .map(|c| {
                let cells = c
                    .cells
                    .iter()
                    .zip(mask)
                    .filter(|&(_, keep)| *keep)
                    .map(|(cell, _)| cell.clone())
                    .collect();
                Column::new(c.name.clone(), cells)
            })
            .collect();
        Ok(Self {
            columns,
            height: mask.iter().filter(|&&keep| keep).count(),
        })
    }

    /// First `n` rows.
    pub fn head(&self, n: usize) -> Self {
        let take = n.min(self.height);
        Self {
            columns: self
                .columns
                .iter()
                .map(|c| Column::new(c.name.clone(), c.cells.iter().take(take).cloned().collect()))
                .collect(),
            height: take,
        }
    }
}

/// One row of a table: an ordered header → cell mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord<'a> {
    cells: Vec<(&'a str, Option<&'a str>)>,
}

impl<'a> RawRecord<'a> {
    /// Cell value under `header`; absent if the cell is absent or the header unknown.
    pub fn get(&self, header: &str) -> Option<&'a str> {
        self.cells
            .iter()
            .find(|(h, _)| *h == header)
            .and_then(|(_, v)| *v)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(&'a str, Option<&'a str>)> {
        self.cells.iter()
    }

    /// True if every cell in the row is absent.
    pub fn is_all_absent(&self) -> bool {
        self.cells.iter().all(|(_, v)| v.is_none())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::from_columns(vec![
            Column::from_strs("nome", &[Some("Ana"), None, Some("")]),
            Column::from_strs("email", &[None, None, Some("a@b.c")]),
        ])
        .unwrap()
    }

    #[test]
    fn test_dimensions() {
        let table = sample();
        assert_eq!(table.width(), 2);
        assert_eq!(table.height(), 3);
        assert_eq!(table.headers(), vec!["nome", "email"]);
        assert!(!table.is_empty());
    }

    #[test]
    fn test_rejects_ragged_columns() {
        let err = Table::from_columns(vec![
            Column::from_strs("a", &[Some("1")]),
            Column::from_strs("b", &[Some("1"), Some("2")]),
        ])
        .unwrap_err();
        assert!(err.to_string().contains("column 'b' has 2 rows, expected 1"));
    }

    #[test]
    fn test_rejects_duplicate_names() {
        let mut table = Table::new();
        table.push_column(Column::from_strs("a", &[None])).unwrap();
        assert!(table.push_column(Column::from_strs("a", &[None])).is_err());
    }

    #[test]
    fn test_empty_string_is_not_absent() {
        let table = sample();
        let records = table.records();
        assert_eq!(records[2].get("nome"), Some(""));
        assert_eq!(records[1].get("nome"), None);
        assert!(records[1].is_all_absent());
        assert!(!records[2].is_all_absent());
    }

    #[test]
    fn test_retain_rows() {
        let kept = sample().retain_rows(&[true, false, true]).unwrap();
        assert_eq!(kept.height(), 2);
        assert_eq!(kept.column("email").unwrap().get(1), Some("a@b.c"));
        assert!(sample().retain_rows(&[true]).is_err());
    }

    #[test]
    fn test_head_and_empty() {
        let table = sample();
        assert_eq!(table.head(1).height(), 1);
        assert_eq!(table.head(10).height(), 3);
        assert!(Table::new().is_empty());
        assert!(table.retain_rows(&[false, false, false]).unwrap().is_empty());
    }
}
