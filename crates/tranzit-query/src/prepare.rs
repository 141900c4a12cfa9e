//! Turns one formula body into its list of typed comparators.
//!
//! The body splits on `;` into conditions of the form `<header><op><value>`.
//! Text values stay as bytes; date and amount values are coerced here, at
//! preparation time, so evaluation is pure integer comparison.

use chrono::{Datelike, Local, Months, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use tranzit_core::{day_timestamp, Locale};

use crate::comparator::{Comparator, HEADER_BALANCE, HEADER_DATE, HEADER_SUM};
use crate::error::QueryError;
use crate::token::Formula;

static CONDITION: Lazy<Regex> = Lazy::new(|| Regex::new(r"([xzabcds]\s*[=><])\s*(.+)").unwrap());

// Date patterns, most likely first. All anchored; first match wins.
static DAY_MONTH: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d{1,2})\s+(\w{3,})$").unwrap());
static DAY_MONTH_YEAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,2})\s+(\w{3,})\s+(\d{4})$").unwrap());
static MONTH_YEAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\w{3,})\s+(\d{4})$").unwrap());
static NUMERIC_DMY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,2})[/.\-](\d{1,2})[/.\-](\d{4})$").unwrap());
static ISO_YMD: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d{4})-(\d{2})-(\d{2})$").unwrap());

/// Bare-year values older than this match nothing.
const MIN_YEAR: i32 = 1922;

/// Prepare the comparators of one formula.
///
/// Conditions are kept in declaration order; preparation stops at the
/// first empty condition. A condition that doesn't fit the
/// `<header><op><value>` pattern produces a zero comparator, which the
/// evaluator rejects as an unsupported header.
///
/// # Errors
///
/// Returns [`QueryError::InvalidAmount`] or [`QueryError::InvalidNumber`]
/// when an `s` or `z` value does not coerce to an integer.
pub(crate) fn prepare(formula: &Formula, locale: &Locale) -> Result<Vec<Comparator>, QueryError> {
    let mut comparators = Vec::new();

    for condition in formula.body.trim().split(';') {
        if condition.is_empty() {
            break;
        }

        let mut comparator = Comparator {
            scope: formula.scope,
            ..Comparator::default()
        };

        if let Some(caps) = CONDITION.captures(condition) {
            let field: Vec<u8> = caps[1].bytes().filter(|b| *b != b' ').collect();
            let raw = caps[2].to_lowercase();

            comparator.header = field[0];
            comparator.operator = field[1];
            comparator.value = raw.trim().to_string();

            match comparator.header {
                HEADER_DATE => coerce_date(&mut comparator, locale),
                HEADER_SUM => coerce_amount(&mut comparator, &raw)?,
                HEADER_BALANCE => coerce_balance(&mut comparator)?,
                _ => {}
            }
        }

        comparators.push(comparator);
    }

    Ok(comparators)
}

/// Coerce a date value into a baseline timestamp and an optional range.
///
/// A structurally valid value whose components are out of range (day 45,
/// month name the locale doesn't know, a year outside the window, Feb 30)
/// silently leaves the baseline at zero; such a comparator only ever
/// matches records dated 1970-01-01.
fn coerce_date(comparator: &mut Comparator, locale: &Locale) {
    let value = comparator.value.clone();

    if let Some(caps) = DAY_MONTH.captures(&value) {
        let day: u32 = caps[1].parse().unwrap_or(0);
        if (1..=31).contains(&day) {
            if let Some(index) = locale.month_index(&caps[2]) {
                let (year, month) = infer_year(index as u32 + 1);
                if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
                    comparator.number = day_timestamp(date);
                }
            }
        }
    } else if let Some(caps) = DAY_MONTH_YEAR.captures(&value) {
        let day: u32 = caps[1].parse().unwrap_or(0);
        let year: i32 = caps[3].parse().unwrap_or(0);
        if (1..=31).contains(&day) {
            if let Some(index) = locale.month_index(&caps[2]) {
                if let Some(date) = NaiveDate::from_ymd_opt(year, index as u32 + 1, day) {
                    comparator.number = day_timestamp(date);
                }
            }
        }
    } else if let Some(caps) = MONTH_YEAR.captures(&value) {
        let year: i32 = caps[2].parse().unwrap_or(0);
        if let Some(index) = locale.month_index(&caps[1]) {
            set_month_range(comparator, year, index as u32 + 1);
        }
    } else if let Some(caps) = NUMERIC_DMY.captures(&value) {
        let day: u32 = caps[1].parse().unwrap_or(0);
        let month: u32 = caps[2].parse().unwrap_or(0);
        let year: i32 = caps[3].parse().unwrap_or(0);
        if (1..=31).contains(&day) && (1..=12).contains(&month) {
            if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
                comparator.number = day_timestamp(date);
            }
        }
    } else if let Some(caps) = ISO_YMD.captures(&value) {
        let year: i32 = caps[1].parse().unwrap_or(0);
        let month: u32 = caps[2].parse().unwrap_or(0);
        let day: u32 = caps[3].parse().unwrap_or(0);
        if (1..=31).contains(&day) && (1..=12).contains(&month) {
            if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
                comparator.number = day_timestamp(date);
            }
        }
    } else if let Some(index) = locale.month_index(&value) {
        let (year, month) = infer_year(index as u32 + 1);
        set_month_range(comparator, year, month);
    } else if value.len() == 4 {
        if let Ok(year) = value.parse::<i32>() {
            if year > MIN_YEAR && year <= Local::now().year() {
                if let (Some(first), Some(last)) = (
                    NaiveDate::from_ymd_opt(year, 1, 1),
                    NaiveDate::from_ymd_opt(year, 12, 31),
                ) {
                    comparator.number = day_timestamp(first);
                    comparator.offset = day_timestamp(last) - comparator.number;
                }
            }
        }
    }
}

/// The current year, or the previous one when the month hasn't happened
/// yet this year.
fn infer_year(month: u32) -> (i32, u32) {
    let today = Local::now().date_naive();
    let mut year = today.year();
    if month > today.month() {
        year -= 1;
    }
    (year, month)
}

/// Baseline = first day of the month, offset = seconds to its last day.
fn set_month_range(comparator: &mut Comparator, year: i32, month: u32) {
    if let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) {
        let last = first
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .unwrap_or(first);
        comparator.number = day_timestamp(first);
        comparator.offset = day_timestamp(last) - comparator.number;
    }
}

/// An amount is `10` (meaning 10.00 through 10.99) or `10,50` (exact).
fn coerce_amount(comparator: &mut Comparator, raw: &str) -> Result<(), QueryError> {
    if comparator.value.contains(',') {
        let text = raw.replace(',', "");
        match text.parse::<i64>() {
            Ok(number) => comparator.number = number,
            Err(source) => return Err(QueryError::InvalidAmount {
                value: text,
                source,
            }),
        }
    } else {
        let base = format!("{}00", comparator.value);
        let bound = format!("{}99", comparator.value);
        let number = base.parse::<i64>().map_err(|source| QueryError::InvalidAmount {
            value: base.clone(),
            source,
        })?;
        let max: i64 = bound.parse().map_err(|source| QueryError::InvalidAmount {
            value: bound.clone(),
            source,
        })?;
        comparator.offset = max - number;
        comparator.number = number;
    }
    Ok(())
}

fn coerce_balance(comparator: &mut Comparator) -> Result<(), QueryError> {
    let number: i32 = comparator
        .value
        .parse()
        .map_err(|source| QueryError::InvalidNumber {
            value: comparator.value.clone(),
            source,
        })?;
    comparator.number = i64::from(number);
    Ok(())
}
