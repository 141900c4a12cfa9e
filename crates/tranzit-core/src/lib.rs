//! Core types for tranzit
//!
//! This crate provides the fundamental types shared by the importer and the
//! query engine:
//!
//! - [`Record`] - One atomic transaction (sender, receiver, label, date, amount)
//! - [`Collection`] - An ordered sequence of records
//! - [`Locale`] - Process-wide month names and diacritic-folding rules
//! - [`text::clean`] - The whitespace normalization every text field goes through
//!
//! Amounts are signed integers in hundredths of a monetary unit; there is no
//! floating point anywhere in the pipeline. Dates have day precision and are
//! anchored at 00:00:00 UTC.
//!
//! # Example
//!
//! ```
//! use tranzit_core::{day_timestamp, Collection, NaiveDate, Record};
//!
//! let record = Record::new(
//!     "Alexandru",
//!     "(magazin)",
//!     "Alimente",
//!     NaiveDate::from_ymd_opt(2019, 12, 5).unwrap(),
//!     -2773,
//! );
//!
//! // The canonical form doubles as the dedup key in set operations.
//! assert_eq!(
//!     record.to_string(),
//!     format!(r#"["Alexandru","(magazin)","Alimente",{},-2773]"#, record.timestamp()),
//! );
//!
//! let collection = Collection::from(vec![record]);
//! assert_eq!(collection.len(), 1);
//! assert_eq!(day_timestamp(collection[0].date) % 86_400, 0);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod locale;
pub mod record;
pub mod text;

pub use locale::Locale;
pub use record::{day_timestamp, Collection, Record};
pub use text::clean;

// Re-export the date type used throughout the workspace.
pub use chrono::NaiveDate;
