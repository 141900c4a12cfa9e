//! Set-algebra query engine for tranzit collections.
//!
//! A query is a sequence of bracketed formulas joined by single-character
//! operators:
//!
//! ```text
//! [a=catrina] + [b=catrina]        union, deduplicated
//! [] - [a=alex]                    difference
//! (s>1000; z<0)                    conjunction inside one formula
//! ```
//!
//! `[`/`]` make a side inclusive, `(`/`)` exclusive, and the sides mix
//! freely. A formula body holds `;`-separated conditions of the form
//! `<header><op><value>` with `header` one of `a` (sender), `b`
//! (receiver), `c` (label), `d` (date), `s` (absolute amount), `x`
//! (either party), `z` (signed amount) and `op` one of `=`, `>`, `<`.
//! Text values may list `,`-separated alternatives and use `"..."` for
//! exact match; date values understand ISO, numeric and month-name forms
//! through the process-wide [`Locale`](tranzit_core::Locale).
//!
//! Evaluation happens in two stages: the query compiles into a flat token
//! stream, then each formula is prepared into typed comparators and folded
//! over the collection. Results always come back sorted by date
//! descending, amount ascending.
//!
//! # Example
//!
//! ```
//! use tranzit_core::{Collection, Locale, NaiveDate, Record};
//! use tranzit_query::filter_with;
//!
//! let collection = Collection::from(vec![Record::new(
//!     "Alexandru",
//!     "(magazin)",
//!     "Alimente",
//!     NaiveDate::from_ymd_opt(2019, 12, 5).unwrap(),
//!     -2773,
//! )]);
//!
//! let out = filter_with(&collection, "[b=magazin]", &Locale::empty()).unwrap();
//! assert_eq!(out.len(), 1);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod comparator;
pub mod error;
mod eval;
mod prepare;
mod token;

pub use error::QueryError;
pub use eval::{filter_with, Filter};
