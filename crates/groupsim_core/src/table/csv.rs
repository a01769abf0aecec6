//! Minimal comma-delimited table reader.
//!
//! Supports the plain numeric tables this crate exchanges: one header row,
//! comma separators, optional double quotes around a cell, no embedded commas.

use log::{error, info};
use std::collections::{BTreeSet, HashMap};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub type TableResult<T> = Result<T, TableError>;

/// Input error raised while loading or decoding a table.
#[derive(Debug)]
pub enum TableError {
    NotFound(PathBuf),
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Empty(PathBuf),
    MissingColumns(BTreeSet<String>),
    RaggedRow {
        line: usize,
        expected: usize,
        found: usize,
    },
    InvalidValue {
        line: usize,
        column: String,
        value: String,
        expected: &'static str,
    },
}

impl Display for TableError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(path) => write!(f, "CSV file not found: {}", path.display()),
            Self::Io { path, source } => {
                write!(f, "error reading CSV file {}: {source}", path.display())
            }
            Self::Empty(path) => write!(f, "CSV file has no header row: {}", path.display()),
            Self::MissingColumns(columns) => {
                let names = columns.iter().cloned().collect::<Vec<_>>().join(", ");
                write!(f, "Missing required columns: {{{names}}}")
            }
            Self::RaggedRow {
                line,
                expected,
                found,
            } => write!(
                f,
                "line {line}: expected {expected} cells to match the header, found {found}"
            ),
            Self::InvalidValue {
                line,
                column,
                value,
                expected,
            } => write!(
                f,
                "line {line}: column `{column}` has value `{value}`, expected {expected}"
            ),
        }
    }
}

impl Error for TableError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Parsed table: header names plus raw string cells per data row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvTable {
    headers: Vec<String>,
    index: HashMap<String, usize>,
    rows: Vec<(usize, Vec<String>)>,
}

impl CsvTable {
    /// Reads and parses a table file.
    ///
    /// # Errors
    /// - `NotFound` when the path does not exist.
    /// - `Io` for any other read failure.
    /// - `Empty` / `RaggedRow` for structurally invalid content.
    pub fn from_path(path: impl AsRef<Path>) -> TableResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            error!(
                "event=table_load module=table status=error error_code=not_found path={}",
                path.display()
            );
            return Err(TableError::NotFound(path.to_path_buf()));
        }

        let text = std::fs::read_to_string(path).map_err(|source| TableError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let table = Self::parse(&text).map_err(|err| match err {
            TableError::Empty(_) => TableError::Empty(path.to_path_buf()),
            other => other,
        })?;
        info!(
            "event=table_load module=table status=ok path={} columns={} rows={}",
            path.display(),
            table.headers.len(),
            table.rows.len()
        );
        Ok(table)
    }

    /// Parses table text. Blank lines are skipped; line numbers are 1-based
    /// and count the header.
    pub fn parse(text: &str) -> TableResult<Self> {
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(idx, line)| (idx + 1, line.trim_end_matches('\r')))
            .filter(|(_, line)| !line.trim().is_empty());

        let (_, header_line) = lines.next().ok_or_else(|| TableError::Empty(PathBuf::new()))?;
        let headers = split_cells(header_line.trim_start_matches('\u{feff}'));
        let index = headers
            .iter()
            .enumerate()
            .map(|(position, name)| (name.clone(), position))
            .collect::<HashMap<_, _>>();

        let mut rows = Vec::new();
        for (line, raw) in lines {
            let cells = split_cells(raw);
            if cells.len() != headers.len() {
                return Err(TableError::RaggedRow {
                    line,
                    expected: headers.len(),
                    found: cells.len(),
                });
            }
            rows.push((line, cells));
        }

        Ok(Self {
            headers,
            index,
            rows,
        })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Fails with every missing column name when any of `required` is absent.
    pub fn require_columns(&self, required: &[&str]) -> TableResult<()> {
        let missing = required
            .iter()
            .filter(|name| !self.index.contains_key(**name))
            .map(|name| name.to_string())
            .collect::<BTreeSet<_>>();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(TableError::MissingColumns(missing))
        }
    }

    /// Iterates data rows in file order.
    pub fn records(&self) -> impl Iterator<Item = CsvRecord<'_>> {
        self.rows.iter().map(move |(line, cells)| CsvRecord {
            line: *line,
            cells,
            index: &self.index,
        })
    }

    /// Maps every row with `parse`, stopping at the first failure.
    pub fn map_records<T>(
        &self,
        mut parse: impl FnMut(&CsvRecord<'_>) -> TableResult<T>,
    ) -> TableResult<Vec<T>> {
        self.records().map(|record| parse(&record)).collect()
    }
}

/// Borrowed view over one data row.
#[derive(Debug, Clone, Copy)]
pub struct CsvRecord<'a> {
    line: usize,
    cells: &'a [String],
    index: &'a HashMap<String, usize>,
}

impl<'a> CsvRecord<'a> {
    pub fn line(&self) -> usize {
        self.line
    }

    /// Raw cell text; missing columns read as an empty cell.
    pub fn raw(&self, column: &str) -> &'a str {
        self.index
            .get(column)
            .and_then(|position| self.cells.get(*position))
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn f64(&self, column: &str) -> TableResult<f64> {
        let value = self.raw(column);
        value
            .parse::<f64>()
            .map_err(|_| self.invalid(column, value, "a number"))
    }

    /// Integer cell. Integral float text such as `5.0` is accepted.
    pub fn i64(&self, column: &str) -> TableResult<i64> {
        let value = self.raw(column);
        if let Ok(parsed) = value.parse::<i64>() {
            return Ok(parsed);
        }
        match value.parse::<f64>() {
            Ok(parsed)
                if parsed.is_finite()
                    && parsed.fract() == 0.0
                    && parsed.abs() < i64::MAX as f64 =>
            {
                Ok(parsed as i64)
            }
            _ => Err(self.invalid(column, value, "an integer")),
        }
    }

    pub fn u64(&self, column: &str) -> TableResult<u64> {
        let parsed = self.i64(column)?;
        u64::try_from(parsed)
            .map_err(|_| self.invalid(column, self.raw(column), "a non-negative integer"))
    }

    fn invalid(&self, column: &str, value: &str, expected: &'static str) -> TableError {
        TableError::InvalidValue {
            line: self.line,
            column: column.to_string(),
            value: value.to_string(),
            expected,
        }
    }
}

fn split_cells(line: &str) -> Vec<String> {
    line.split(',')
        .map(|cell| {
            let trimmed = cell.trim();
            trimmed
                .strip_prefix('"')
                .and_then(|inner| inner.strip_suffix('"'))
                .unwrap_or(trimmed)
                .to_string()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{CsvTable, TableError};

    #[test]
    fn parse_reads_header_and_rows() {
        let table = CsvTable::parse("a,b\n1,2\n\n3,4\n").expect("table should parse");
        assert_eq!(table.headers(), ["a", "b"]);
        assert_eq!(table.len(), 2);

        let lines = table.records().map(|r| r.line()).collect::<Vec<_>>();
        assert_eq!(lines, vec![2, 4]);
    }

    #[test]
    fn ragged_row_is_rejected() {
        let err = CsvTable::parse("a,b\n1\n").expect_err("ragged row must fail");
        assert!(matches!(
            err,
            TableError::RaggedRow {
                line: 2,
                expected: 2,
                found: 1
            }
        ));
    }

    #[test]
    fn integer_cells_accept_integral_floats_only() {
        let table = CsvTable::parse("n\n5.0\n5.5\n").expect("table should parse");
        let records = table.records().collect::<Vec<_>>();
        assert_eq!(records[0].i64("n").expect("5.0 is integral"), 5);
        let err = records[1].i64("n").expect_err("5.5 is not integral");
        assert!(err.to_string().contains("expected an integer"));
    }

    #[test]
    fn missing_columns_are_all_named() {
        let table = CsvTable::parse("group_id\n1\n").expect("table should parse");
        let err = table
            .require_columns(&["group_id", "stop_percent", "group_size"])
            .expect_err("missing columns must fail");
        assert_eq!(
            err.to_string(),
            "Missing required columns: {group_size, stop_percent}"
        );
    }

    #[test]
    fn quoted_cells_and_bom_are_unwrapped() {
        let table = CsvTable::parse("\u{feff}\"x\",y\n\"1.5\",2\n").expect("table should parse");
        let record = table.records().next().expect("one row");
        assert_eq!(record.f64("x").expect("x is numeric"), 1.5);
    }
}
