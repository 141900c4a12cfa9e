//! Prepared predicates and how they match records.

use once_cell::sync::Lazy;
use regex::Regex;
use tranzit_core::{Locale, Record};

use crate::error::QueryError;
use crate::token::Scope;

/// Header letters a condition may target.
pub(crate) const HEADER_SENDER: u8 = b'a';
pub(crate) const HEADER_RECEIVER: u8 = b'b';
pub(crate) const HEADER_LABEL: u8 = b'c';
pub(crate) const HEADER_DATE: u8 = b'd';
pub(crate) const HEADER_SUM: u8 = b's';
/// Either party; ORs sender and receiver.
pub(crate) const HEADER_ANYONE: u8 = b'x';
/// Signed amount against a reference, "is it positive or negative?".
pub(crate) const HEADER_BALANCE: u8 = b'z';

pub(crate) const OP_EQUAL: u8 = b'=';
pub(crate) const OP_GREATER: u8 = b'>';
pub(crate) const OP_LESS: u8 = b'<';

static NON_ALPHANUMERIC: Lazy<Regex> = Lazy::new(|| Regex::new("[^a-z0-9]").unwrap());

/// One prepared condition.
///
/// Text headers keep the raw (lowercased) value; date and amount headers
/// keep a baseline in `number` plus an optional range width in `offset`.
/// A condition that failed the header pattern stays all-zero and gets
/// rejected at evaluation time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Comparator {
    pub header: u8,
    pub operator: u8,
    /// Lowercased, trimmed value; `,` separates alternatives.
    pub value: String,
    /// Baseline timestamp or amount.
    pub number: i64,
    /// Range width above the baseline (dates: seconds; amounts: hundredths).
    pub offset: i64,
    /// Inclusivity of the enclosing formula.
    pub scope: Scope,
}

impl Comparator {
    /// Does the record pass this condition?
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::UnsupportedHeader`] or
    /// [`QueryError::InvalidComparison`] for combinations outside the
    /// supported table.
    pub fn compare(&self, record: &Record, locale: &Locale) -> Result<bool, QueryError> {
        match (self.header, self.operator) {
            (HEADER_SENDER, OP_EQUAL) => Ok(self.matches_text(&record.sender, locale)),
            (HEADER_RECEIVER, OP_EQUAL) => Ok(self.matches_text(&record.receiver, locale)),
            (HEADER_LABEL, OP_EQUAL) => Ok(self.matches_text(&record.label, locale)),
            (HEADER_ANYONE, OP_EQUAL) => Ok(self.matches_text(&record.sender, locale)
                || self.matches_text(&record.receiver, locale)),
            (HEADER_DATE, OP_EQUAL) => Ok(self.matches_day(record)),
            (HEADER_DATE, OP_GREATER) => Ok(self.is_after(record)),
            (HEADER_DATE, OP_LESS) => Ok(self.is_before(record)),
            (HEADER_SUM, OP_EQUAL) => Ok(self.matches_magnitude(record)),
            (HEADER_SUM, OP_GREATER) => Ok(self.exceeds_magnitude(record)),
            (HEADER_SUM, OP_LESS) => Ok(self.is_under_magnitude(record)),
            (HEADER_BALANCE, OP_GREATER) => Ok(record.amount > self.number),
            (HEADER_BALANCE, OP_LESS) => Ok(record.amount < self.number),
            (
                header @ (HEADER_SENDER | HEADER_RECEIVER | HEADER_LABEL | HEADER_DATE
                | HEADER_SUM | HEADER_ANYONE | HEADER_BALANCE),
                operator,
            ) => Err(QueryError::InvalidComparison {
                header: header as char,
                operator,
            }),
            (header, _) => Err(QueryError::UnsupportedHeader(header)),
        }
    }

    /// Any of the `,`-separated alternatives matches.
    fn matches_text(&self, candidate: &str, locale: &Locale) -> bool {
        self.value
            .split(',')
            .any(|alternative| text_match(alternative, candidate, locale))
    }

    fn matches_day(&self, record: &Record) -> bool {
        let ts = record.timestamp();
        if self.offset > 0 {
            ts >= self.number && ts <= self.number + self.offset
        } else {
            ts == self.number
        }
    }

    fn is_after(&self, record: &Record) -> bool {
        let ts = record.timestamp();
        if self.scope.left_inclusive {
            ts >= self.number
        } else {
            ts > self.number + self.offset
        }
    }

    fn is_before(&self, record: &Record) -> bool {
        let ts = record.timestamp();
        if self.scope.right_inclusive {
            ts <= self.number + self.offset
        } else {
            ts < self.number
        }
    }

    fn matches_magnitude(&self, record: &Record) -> bool {
        let amount = record.amount.abs();
        if self.offset > 0 {
            amount >= self.number && amount <= self.number + self.offset
        } else {
            amount == self.number
        }
    }

    fn exceeds_magnitude(&self, record: &Record) -> bool {
        let amount = record.amount.abs();
        if self.scope.left_inclusive {
            amount >= self.number
        } else {
            amount > self.number
        }
    }

    fn is_under_magnitude(&self, record: &Record) -> bool {
        let amount = record.amount.abs();
        if self.scope.right_inclusive {
            amount <= self.number
        } else {
            amount < self.number
        }
    }
}

/// Match one query alternative against a candidate value.
///
/// Both sides are lowercased and run through the locale's fold rules. A
/// double-quoted alternative requires exact equality with its interior.
/// Otherwise the candidate matches by prefix, either directly or after
/// every non-`[a-z0-9]` character is blanked out; the second pass is what
/// lets `magazin` find `(magazin)`.
fn text_match(keyword: &str, candidate: &str, locale: &Locale) -> bool {
    let keyword = locale.fold(&keyword.to_lowercase());
    let candidate = locale.fold(&candidate.to_lowercase());

    if keyword.len() >= 2 && keyword.starts_with('"') && keyword.ends_with('"') {
        return candidate == keyword[1..keyword.len() - 1];
    }

    if candidate.starts_with(&keyword) {
        return true;
    }

    let stripped = NON_ALPHANUMERIC.replace_all(&candidate, " ");
    stripped.trim().starts_with(&keyword)
}
