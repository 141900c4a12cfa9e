//! Statement ingestion for tranzit
//!
//! This crate turns a byte stream of comma-separated statement rows into a
//! [`Collection`] of atomic [`Record`]s. A row has exactly five columns:
//!
//! ```text
//! sender, receiver, label, date, amount
//! ```
//!
//! Amounts carry their two decimal digits with `.` as a visual separator
//! (`-27.73` means minus 27 units and 73 hundredths), so parsing strips the
//! dots and keeps an integer. A label like `11.58 Casă + 16.15 Alimente`
//! is itemized: the row expands into one record per item and the item
//! amounts must add up to the row total.
//!
//! # Example
//!
//! ```
//! use tranzit_importer::read_str;
//!
//! let statement = "a,b,c,2019-12-05,100\n";
//! let collection = read_str(statement).unwrap();
//! assert_eq!(collection.len(), 1);
//! assert_eq!(collection[0].amount, 100);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod reader;

use std::io::Read;
use std::num::ParseIntError;

use tranzit_core::Collection;

pub use config::ReaderConfig;
pub use reader::Reader;

/// Error aborting an ingestion run.
///
/// Ingestion is all-or-nothing: the first malformed row stops the run and
/// the error carries that row. There is no partial collection to recover.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    /// The underlying CSV reader failed.
    #[error("read error: {0}")]
    Csv(#[from] csv::Error),
    /// A row did not have exactly five columns.
    #[error("row has {found} columns, expected 5 => {row:?}")]
    ColumnCount {
        /// Columns found in the row.
        found: usize,
        /// The offending row.
        row: Vec<String>,
    },
    /// The date column did not match the configured layout.
    #[error("invalid date {value}: {source} => {row:?}")]
    Date {
        /// The cleaned cell that failed to parse.
        value: String,
        /// The underlying parse failure.
        source: chrono::ParseError,
        /// The offending row.
        row: Vec<String>,
    },
    /// An amount column (or item amount) was not an integer after
    /// separator stripping.
    #[error("invalid amount {value}: {source} => {row:?}")]
    Amount {
        /// The stripped cell that failed to parse.
        value: String,
        /// The underlying parse failure.
        source: ParseIntError,
        /// The offending row.
        row: Vec<String>,
    },
    /// An item of an itemized label had no label part after its amount.
    #[error("item {item} is missing a label => {row:?}")]
    ItemLabel {
        /// The cleaned item text.
        item: String,
        /// The offending row.
        row: Vec<String>,
    },
    /// The items of an itemized label did not add up to the row total.
    #[error("items don't add up, off by {diff} => {row:?}")]
    SumMismatch {
        /// Row total minus the sum of the emitted items.
        diff: i64,
        /// The offending row.
        row: Vec<String>,
    },
}

impl ImportError {
    /// The offending row, when the failure is tied to one.
    #[must_use]
    pub fn row(&self) -> &[String] {
        match self {
            Self::Csv(_) => &[],
            Self::ColumnCount { row, .. }
            | Self::Date { row, .. }
            | Self::Amount { row, .. }
            | Self::ItemLabel { row, .. }
            | Self::SumMismatch { row, .. } => row,
        }
    }
}

/// Ingest a statement from a byte source with the default configuration.
///
/// # Errors
///
/// Returns an [`ImportError`] carrying the offending row on the first
/// malformed row, unparseable date or amount, or itemized-label sum
/// mismatch.
pub fn read<R: Read>(src: R) -> Result<Collection, ImportError> {
    Reader::new(ReaderConfig::default()).read_from(src)
}

/// Ingest a statement from a string with the default configuration.
///
/// # Errors
///
/// Same failure modes as [`read`].
pub fn read_str(content: &str) -> Result<Collection, ImportError> {
    read(content.as_bytes())
}
