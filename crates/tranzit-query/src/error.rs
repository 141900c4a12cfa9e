//! Query error types.

use std::num::ParseIntError;
use thiserror::Error;

/// Error returned when a query cannot be compiled or evaluated.
///
/// Query errors are recoverable values: the collection the query ran
/// against is untouched and the caller can fix the query and retry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// The opening brackets of the query don't pair up with the closing
    /// ones.
    #[error("number of opened parenthesis don't match with closed ones")]
    UnbalancedParens,
    /// A formula was opened but never closed.
    #[error("formula {0} doesn't have a closing parenthesis")]
    UnclosedFormula(String),
    /// A formula body opened another bracket; nesting is unsupported.
    #[error("unsupported nested parenthesis in {0}")]
    NestedParens(String),
    /// An operator was not followed by a formula.
    #[error("expected opening parenthesis after operator in {0}")]
    ExpectedOpen(String),
    /// More than one character appeared between two formulas.
    #[error("unexpected operation between collections: {0}")]
    AmbiguousOperator(String),
    /// The query did not start with a formula.
    #[error("incorrect query {0}")]
    IncorrectQuery(String),
    /// Two formulas followed each other with no operator between them.
    #[error("incorrect query, missing operation {0}")]
    MissingOperator(String),
    /// An operator had no formula to apply to.
    #[error("incorrect query, missing formula {0}")]
    MissingFormula(String),
    /// An operator byte outside the supported set.
    #[error("unsupported operator: {0}")]
    UnsupportedOperator(u8),
    /// A header/operator combination outside the supported table.
    #[error("header {header}? {operator}")]
    InvalidComparison {
        /// The condition's header letter.
        header: char,
        /// The condition's operator byte.
        operator: u8,
    },
    /// A condition whose header is not one of `a b c d s x z`.
    #[error("unsupported header: {0}")]
    UnsupportedHeader(u8),
    /// An amount value that did not survive coercion.
    #[error("not an amount {value}: {source}")]
    InvalidAmount {
        /// The text that failed to parse.
        value: String,
        /// The underlying parse failure.
        source: ParseIntError,
    },
    /// A balance value that did not survive coercion.
    #[error("not a number {value}: {source}")]
    InvalidNumber {
        /// The text that failed to parse.
        value: String,
        /// The underlying parse failure.
        source: ParseIntError,
    },
}
