//! Process-wide locale for month names and diacritic folding.
//!
//! The locale must be configured before the first query runs; after that it
//! is treated as read-only. It lives behind a read-mostly lock and the query
//! engine takes a [`Locale::snapshot`] once per filter call, so configuring
//! a new locale mid-query never tears an evaluation in half.

use parking_lot::RwLock;
use std::collections::BTreeMap;

static ACTIVE: RwLock<Locale> = RwLock::new(Locale::empty());

/// Month names and character-substitution rules used by the query engine.
///
/// `months` is ordered, index 0 being January. The fold map rewrites
/// characters (or longer fragments) to an ASCII comparison alphabet; it is
/// applied in key order, which a `BTreeMap` keeps deterministic.
///
/// With no months configured, date-by-name conditions simply match nothing;
/// they are not an error.
///
/// # Example
///
/// ```
/// use tranzit_core::Locale;
///
/// let locale = Locale::default()
///     .with_months(["ianuarie", "februarie", "martie"])
///     .with_fold("î", "i");
///
/// assert_eq!(locale.month_index("febr"), Some(1));
/// assert_eq!(locale.fold("împrumut"), "imprumut");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Locale {
    months: Vec<String>,
    folds: BTreeMap<String, String>,
}

impl Locale {
    /// A locale with no months and no fold rules.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            months: Vec::new(),
            folds: BTreeMap::new(),
        }
    }

    /// Set the ordered month names, January first.
    #[must_use]
    pub fn with_months<I, S>(mut self, months: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.months = months.into_iter().map(Into::into).collect();
        self
    }

    /// Add one substitution rule.
    #[must_use]
    pub fn with_fold(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.folds.insert(from.into(), to.into());
        self
    }

    /// Zero-based index of the first month whose folded name starts with
    /// the folded `name`, or `None` when nothing matches.
    #[must_use]
    pub fn month_index(&self, name: &str) -> Option<usize> {
        let needle = self.fold(name);
        self.months
            .iter()
            .position(|month| self.fold(month).starts_with(&needle))
    }

    /// Apply every substitution rule, in key order, over the text.
    #[must_use]
    pub fn fold(&self, text: &str) -> String {
        let mut out = text.to_string();
        for (from, to) in &self.folds {
            out = out.replace(from.as_str(), to);
        }
        out
    }

    /// Make this locale the process-wide one.
    pub fn install(self) {
        *ACTIVE.write() = self;
    }

    /// A copy of the process-wide locale.
    #[must_use]
    pub fn snapshot() -> Self {
        ACTIVE.read().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn romanian() -> Locale {
        Locale::default().with_months([
            "ianuarie",
            "februarie",
            "martie",
            "aprilie",
            "mai",
            "iunie",
            "iulie",
            "august",
            "septembrie",
            "octombrie",
            "noiembrie",
            "decembrie",
        ])
    }

    #[test]
    fn month_index_is_a_prefix_scan() {
        let locale = romanian();
        assert_eq!(locale.month_index("noiembrie"), Some(10));
        assert_eq!(locale.month_index("noi"), Some(10));
        // "martie" wins over "mai" by position, not by length.
        assert_eq!(locale.month_index("ma"), Some(2));
        assert_eq!(locale.month_index("zzz"), None);
    }

    #[test]
    fn month_index_without_months() {
        assert_eq!(Locale::empty().month_index("noiembrie"), None);
    }

    #[test]
    fn fold_applies_in_key_order() {
        let locale = Locale::default()
            .with_fold("î", "i")
            .with_fold("ș", "s")
            .with_fold("ă", "a");
        assert_eq!(locale.fold("împrumut"), "imprumut");
        assert_eq!(locale.fold("casă și"), "casa si");
        assert_eq!(locale.fold("plain"), "plain");
    }

    #[test]
    fn empty_locale_folds_nothing() {
        assert_eq!(Locale::empty().fold("împrumut"), "împrumut");
    }
}
