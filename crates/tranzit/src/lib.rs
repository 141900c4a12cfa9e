//! tranzit: ingest bank-statement CSV exports and filter them with a
//! compact set-algebra query language.
//!
//! The pipeline is two calls: [`read`] turns bytes into a [`Collection`]
//! of atomic records, and [`Filter::filter`] evaluates a query against it.
//! Everything happens in memory, single-threaded, with no floating point:
//! amounts are integers in hundredths and dates sit at UTC midnight.
//!
//! # Example
//!
//! ```
//! use tranzit::{read, Filter, Locale};
//!
//! let statement = "\
//! Alexandru,(magazin),Sucuri,2019-12-04,-15.00
//! Alexandru,(magazin),11.58 Casă + 16.15 Alimente,2019-12-05,-27.73
//! Ordonator,Alexandru,Transfer,2019-11-19,1000.00
//! ";
//!
//! // The itemized second row expands into two records.
//! let collection = read(statement.as_bytes()).unwrap();
//! assert_eq!(collection.len(), 4);
//!
//! Locale::default().with_fold("ă", "a").install();
//!
//! // Outflows of at least 16.00, newest first.
//! let out = collection.filter("[s>16; z<0]").unwrap();
//! assert_eq!(out.len(), 1);
//! assert_eq!(out[0].amount, -1615);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub use tranzit_core::{clean, day_timestamp, Collection, Locale, NaiveDate, Record};
pub use tranzit_importer::{read, read_str, ImportError, Reader, ReaderConfig};
pub use tranzit_query::{filter_with, Filter, QueryError};
