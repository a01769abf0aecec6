//! Flat-file output helpers.
//!
//! # Responsibility
//! - Resolve output filename prefixes (caller-supplied or timestamp-derived).
//! - Write whole files with create-or-truncate semantics.
//!
//! # Invariants
//! - A failed write is returned to the caller; nothing is retried.
//! - Output failures never touch in-memory results.

use chrono::Local;
use log::error;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

static PREFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_.\-]*$").expect("valid prefix regex"));

/// Timestamp layout for derived prefixes, e.g. `20260131_1405`.
pub const TIMESTAMP_PREFIX_FORMAT: &str = "%Y%m%d_%H%M";

pub type OutputResult<T> = Result<T, OutputError>;

/// Failure of a requested save operation.
#[derive(Debug)]
pub enum OutputError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    InvalidPrefix(String),
    /// The stage that produces the requested output has not run yet.
    NothingToSave(&'static str),
}

impl Display for OutputError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "failed to write {}: {source}", path.display()),
            Self::InvalidPrefix(prefix) => write!(
                f,
                "invalid output prefix `{prefix}`; use letters, digits, `_`, `-` or `.`"
            ),
            Self::NothingToSave(details) => write!(f, "nothing to save: {details}"),
        }
    }
}

impl Error for OutputError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Returns the validated caller prefix, or a local timestamp prefix.
pub fn resolve_prefix(prefix: Option<&str>) -> OutputResult<String> {
    match prefix {
        Some(value) if PREFIX_RE.is_match(value) => Ok(value.to_string()),
        Some(value) => Err(OutputError::InvalidPrefix(value.to_string())),
        None => Ok(timestamp_prefix()),
    }
}

pub fn timestamp_prefix() -> String {
    Local::now().format(TIMESTAMP_PREFIX_FORMAT).to_string()
}

/// Lowercases `name` and joins its ASCII alphanumeric runs with `_`.
///
/// Every other character separates runs, so the result is always safe to
/// append to a valid prefix. A name without alphanumerics becomes `table`.
pub fn slugify(name: &str) -> String {
    let words = name
        .split(|ch: char| !ch.is_ascii_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>();
    if words.is_empty() {
        return "table".to_string();
    }
    words.join("_")
}

pub fn ensure_dir(dir: &Path) -> OutputResult<()> {
    std::fs::create_dir_all(dir).map_err(|source| io_error(dir, source))
}

/// Writes `contents` to `path`, replacing any existing file.
pub fn write_text_file(path: &Path, contents: &str) -> OutputResult<()> {
    std::fs::write(path, contents).map_err(|source| io_error(path, source))
}

/// Writes a delimited table with a header row, replacing any existing file.
pub fn write_delimited_file<I>(
    path: &Path,
    delimiter: char,
    header: &[&str],
    rows: I,
) -> OutputResult<()>
where
    I: IntoIterator<Item = Vec<String>>,
{
    let file = File::create(path).map_err(|source| io_error(path, source))?;
    let mut writer = BufWriter::new(file);
    write_rows(&mut writer, &delimiter.to_string(), header, rows)
        .map_err(|source| io_error(path, source))
}

pub fn write_csv_file<I>(path: &Path, header: &[&str], rows: I) -> OutputResult<()>
where
    I: IntoIterator<Item = Vec<String>>,
{
    write_delimited_file(path, ',', header, rows)
}

fn write_rows<W, I>(writer: &mut W, separator: &str, header: &[&str], rows: I) -> std::io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = Vec<String>>,
{
    writeln!(writer, "{}", header.join(separator))?;
    for row in rows {
        writeln!(writer, "{}", row.join(separator))?;
    }
    writer.flush()
}

fn io_error(path: &Path, source: std::io::Error) -> OutputError {
    error!(
        "event=file_write module=output status=error path={} error={}",
        path.display(),
        source
    );
    OutputError::Io {
        path: path.to_path_buf(),
        source,
    }
}
