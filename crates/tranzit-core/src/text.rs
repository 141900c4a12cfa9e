//! Whitespace normalization.

/// Trim a string and collapse every internal run of whitespace to a single
/// space.
///
/// Every text column of an ingested row and every query string pass through
/// this before anything else looks at them.
///
/// # Example
///
/// ```
/// use tranzit_core::text::clean;
///
/// assert_eq!(clean("  Vizită   dentist \t"), "Vizită dentist");
/// assert_eq!(clean("\n"), "");
/// ```
#[must_use]
pub fn clean(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
