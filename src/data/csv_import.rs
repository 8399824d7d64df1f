//! Region CSV import.
//!
//! Deliberately naive: lines split on `\n`, fields split on `,`, no quoting.
//! Columns are found by header name, so their order does not matter. Short
//! or empty lines are not skipped: they become records with empty fields.

use thiserror::Error;

use crate::models::{RegionRecord, UserCount};

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;

pub const HEADER_STATE_PROVINCE: &str = "State/Province";
pub const HEADER_COUNTRY: &str = "Country";
pub const HEADER_TOTAL_USERS: &str = "Total Users";

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("could not read {name}: {source}")]
    Io {
        name: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{name} is not UTF-8 text")]
    NotUtf8 { name: String },
}

/// Raw bytes of a file the user picked.
#[derive(Debug, Clone)]
pub struct ImportedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl ImportedFile {
    #[cfg(not(target_arch = "wasm32"))]
    pub fn read(path: &std::path::Path) -> Result<Self, ImportError> {
        let name = path
            .file_name()
            .map(|f| f.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let bytes = std::fs::read(path).map_err(|source| ImportError::Io {
            name: name.clone(),
            source,
        })?;
        Ok(Self { name, bytes })
    }

    pub fn text(self) -> Result<String, ImportError> {
        String::from_utf8(self.bytes).map_err(|_| ImportError::NotUtf8 { name: self.name })
    }
}

/// Result of parsing one import file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportReport {
    pub records: Vec<RegionRecord>,
    /// Records whose `Total Users` did not parse.
    pub invalid_counts: usize,
    /// Expected headers absent from the header line.
    pub missing_headers: Vec<&'static str>,
}

/// Column positions resolved from the header line.
struct ColumnMap {
    state_province: Option<usize>,
    country: Option<usize>,
    total_users: Option<usize>,
}

impl ColumnMap {
    fn from_header(line: &str) -> Self {
        let headers: Vec<&str> = line.split(',').collect();
        let find = |name: &str| headers.iter().position(|h| *h == name);
        Self {
            state_province: find(HEADER_STATE_PROVINCE),
            country: find(HEADER_COUNTRY),
            total_users: find(HEADER_TOTAL_USERS),
        }
    }

    fn missing(&self) -> Vec<&'static str> {
        [
            (self.state_province, HEADER_STATE_PROVINCE),
            (self.country, HEADER_COUNTRY),
            (self.total_users, HEADER_TOTAL_USERS),
        ]
        .into_iter()
        .filter(|(idx, _)| idx.is_none())
        .map(|(_, name)| name)
        .collect()
    }
}

fn cell<'a>(values: &[&'a str], column: Option<usize>) -> &'a str {
    column.and_then(|i| values.get(i).copied()).unwrap_or("")
}

/// Parses the whole file content. Never fails: bad values degrade into
/// empty strings or [`UserCount::Invalid`].
pub fn parse_region_csv(content: &str) -> ImportReport {
    // Spreadsheet exports often start with a byte order mark
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut lines = content.split('\n').map(|l| l.strip_suffix('\r').unwrap_or(l));
    let columns = ColumnMap::from_header(lines.next().unwrap_or(""));

    let records: Vec<RegionRecord> = lines
        .enumerate()
        .map(|(i, line)| {
            let values: Vec<&str> = line.split(',').collect();

            #[cfg(debug_assertions)]
            if DEBUG_FLAGS.print_import_lines {
                log::debug!("Import line {}: {:?}", i + 2, values);
            }

            RegionRecord {
                id: i as u64 + 1,
                state_province: cell(&values, columns.state_province).to_string(),
                country: cell(&values, columns.country).to_string(),
                total_users: UserCount::parse(cell(&values, columns.total_users)),
            }
        })
        .collect();

    let invalid_counts = records.iter().filter(|r| !r.total_users.is_valid()).count();

    ImportReport {
        records,
        invalid_counts,
        missing_headers: columns.missing(),
    }
}

/// Reads and parses a file from disk.
#[cfg(not(target_arch = "wasm32"))]
pub fn read_region_csv(path: &std::path::Path) -> Result<ImportReport, ImportError> {
    let text = ImportedFile::read(path)?.text()?;
    Ok(parse_region_csv(&text))
}
