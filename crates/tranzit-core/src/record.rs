//! Transaction records and ordered collections of them.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Index;

/// Seconds since the Unix epoch of the given day at 00:00:00 UTC.
///
/// Records carry day precision only; every comparison in the query engine
/// happens on this midnight-UTC timestamp.
#[must_use]
pub fn day_timestamp(date: NaiveDate) -> i64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp()
}

/// One atomic transaction.
///
/// A record is immutable once ingested. Rows whose label names several
/// items are split by the importer into one record per item, so a record
/// always describes a single purpose.
///
/// `amount` is in hundredths of a monetary unit: negative means an outflow
/// from `sender`, positive an inflow.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Record {
    /// Party the money leaves.
    pub sender: String,
    /// Party the money reaches.
    pub receiver: String,
    /// What the transaction was for.
    pub label: String,
    /// Day of the transaction, at UTC.
    pub date: NaiveDate,
    /// Signed amount in hundredths.
    pub amount: i64,
}

impl Record {
    /// Create a new record.
    #[must_use]
    pub fn new(
        sender: impl Into<String>,
        receiver: impl Into<String>,
        label: impl Into<String>,
        date: NaiveDate,
        amount: i64,
    ) -> Self {
        Self {
            sender: sender.into(),
            receiver: receiver.into(),
            label: label.into(),
            date,
            amount,
        }
    }

    /// Seconds since the Unix epoch of this record's day at midnight UTC.
    #[must_use]
    pub fn timestamp(&self) -> i64 {
        day_timestamp(self.date)
    }

    /// The canonical string identifying this record.
    ///
    /// Set operations deduplicate on this key, so two records are the same
    /// record exactly when their canonical strings are equal.
    #[must_use]
    pub fn key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            r#"["{}","{}","{}",{},{}]"#,
            self.sender,
            self.receiver,
            self.label,
            self.timestamp(),
            self.amount
        )
    }
}

/// An ordered sequence of records.
///
/// Ingestion order is preserved; only a query result gets re-sorted, and
/// then by date descending with amount ascending as the tie-break.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Collection {
    records: Vec<Record>,
}

impl Collection {
    /// Create an empty collection.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the collection holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Append a record.
    pub fn push(&mut self, record: Record) {
        self.records.push(record);
    }

    /// Iterate over the records in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// The records as a slice.
    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Consume the collection and return the records.
    #[must_use]
    pub fn into_records(self) -> Vec<Record> {
        self.records
    }
}

impl From<Vec<Record>> for Collection {
    fn from(records: Vec<Record>) -> Self {
        Self { records }
    }
}

impl FromIterator<Record> for Collection {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Collection {
    type Item = Record;
    type IntoIter = std::vec::IntoIter<Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl Index<usize> for Collection {
    type Output = Record;

    fn index(&self, index: usize) -> &Record {
        &self.records[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn timestamp_is_midnight_utc() {
        let r = Record::new("a", "b", "c", date(2019, 12, 5), -2773);
        assert_eq!(r.timestamp() % 86_400, 0);
        assert_eq!(r.timestamp(), 1_575_504_000);
    }

    #[test]
    fn canonical_key_shape() {
        let r = Record::new("a", "b", "c", date(1970, 1, 1), 100);
        assert_eq!(r.key(), r#"["a","b","c",0,100]"#);
    }

    #[test]
    fn keys_differ_structurally() {
        let r1 = Record::new("a", "b", "c", date(2020, 1, 11), -4022);
        let r2 = Record::new("a", "b", "c", date(2020, 1, 11), -9861);
        assert_ne!(r1.key(), r2.key());
        assert_eq!(r1.key(), r1.clone().key());
    }

    #[test]
    fn collection_preserves_order() {
        let mut collection = Collection::new();
        collection.push(Record::new("a", "b", "first", date(2020, 1, 2), 1));
        collection.push(Record::new("a", "b", "second", date(2019, 1, 2), 2));
        assert_eq!(collection.len(), 2);
        assert_eq!(collection[0].label, "first");
        assert_eq!(collection[1].label, "second");
    }
}
