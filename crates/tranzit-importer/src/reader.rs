//! The statement reader.

use std::io::Read;

use chrono::NaiveDate;
use tranzit_core::{clean, Collection, Record};

use crate::{ImportError, ReaderConfig};

const COLUMNS: usize = 5;

/// Reads delimited statement rows into a [`Collection`].
#[derive(Debug, Clone, Default)]
pub struct Reader {
    config: ReaderConfig,
}

impl Reader {
    /// Create a reader with the given configuration.
    #[must_use]
    pub const fn new(config: ReaderConfig) -> Self {
        Self { config }
    }

    /// Ingest every row of the source, up to the configured byte cap.
    ///
    /// Bytes beyond the cap are silently ignored; a row cut in half by the
    /// cap surfaces as a malformed row.
    ///
    /// # Errors
    ///
    /// Returns an [`ImportError`] carrying the offending row on the first
    /// malformed row, unparseable date or amount, or itemized-label sum
    /// mismatch.
    pub fn read_from<R: Read>(&self, src: R) -> Result<Collection, ImportError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(src.take(self.config.max_bytes));

        let mut collection = Collection::new();
        for result in reader.records() {
            let record = result?;
            let row: Vec<String> = record.iter().map(str::to_string).collect();
            if row.len() != COLUMNS {
                return Err(ImportError::ColumnCount {
                    found: row.len(),
                    row,
                });
            }
            self.expand_row(&row, &mut collection)?;
        }

        tracing::debug!(records = collection.len(), "statement ingested");
        Ok(collection)
    }

    /// Emit the records of one row: a single record, or one per item when
    /// the label is itemized.
    fn expand_row(&self, row: &[String], out: &mut Collection) -> Result<(), ImportError> {
        let sender = clean(&row[0]);
        let receiver = clean(&row[1]);
        let date = self.parse_date(&row[3], row)?;

        if row[2].contains(self.config.item_separator) {
            let total = self.parse_amount(&row[4], row)?;
            let sign = if total < 0 { -1 } else { 1 };

            let mut acc = 0i64;
            for item in row[2].split(self.config.item_separator) {
                let item = clean(item);
                let Some((amount_text, label)) = item.split_once(' ') else {
                    return Err(ImportError::ItemLabel {
                        item,
                        row: row.to_vec(),
                    });
                };
                let subtotal = self.parse_amount(amount_text, row)? * sign;
                out.push(Record::new(
                    sender.clone(),
                    receiver.clone(),
                    clean(label),
                    date,
                    subtotal,
                ));
                acc += subtotal;
            }

            let diff = total - acc;
            if diff != 0 {
                return Err(ImportError::SumMismatch {
                    diff,
                    row: row.to_vec(),
                });
            }
        } else {
            let amount = self.parse_amount(&row[4], row)?;
            out.push(Record::new(sender, receiver, clean(&row[2]), date, amount));
        }

        Ok(())
    }

    fn parse_date(&self, cell: &str, row: &[String]) -> Result<NaiveDate, ImportError> {
        let value = clean(cell);
        NaiveDate::parse_from_str(&value, &self.config.date_format).map_err(|source| {
            ImportError::Date {
                value,
                source,
                row: row.to_vec(),
            }
        })
    }

    /// `.` is a visual separator; the two decimal digits are already part
    /// of the integer (`-27.73` -> `-2773`).
    fn parse_amount(&self, cell: &str, row: &[String]) -> Result<i64, ImportError> {
        let value = clean(cell).replace('.', "");
        value
            .parse()
            .map_err(|source| ImportError::Amount {
                value,
                source,
                row: row.to_vec(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{read_str, ImportError};

    #[test]
    fn single_row() {
        let collection = read_str("a,b,c,2019-12-05,100").unwrap();
        assert_eq!(collection.len(), 1);
        let record = &collection[0];
        assert_eq!(record.sender, "a");
        assert_eq!(record.receiver, "b");
        assert_eq!(record.label, "c");
        assert_eq!(record.amount, 100);
    }

    #[test]
    fn amount_keeps_its_hundredths() {
        let collection = read_str("a,b,c,2019-12-05,-27.73").unwrap();
        assert_eq!(collection[0].amount, -2773);

        let collection = read_str("a,b,c,2020-01-11,-4022").unwrap();
        assert_eq!(collection[0].amount, -4022);
    }

    #[test]
    fn text_columns_are_cleaned() {
        let collection = read_str("  Alexandru ,( magazin ),Produse   Online,2019-10-14,-993.93")
            .unwrap();
        assert_eq!(collection[0].sender, "Alexandru");
        assert_eq!(collection[0].receiver, "( magazin )");
        assert_eq!(collection[0].label, "Produse Online");
    }

    #[test]
    fn itemized_label_expands() {
        let collection =
            read_str("a,b,11.58 Casă și curățenie + 16.15 Alimente,2019-12-05,-27.73").unwrap();
        assert_eq!(collection.len(), 2);
        assert_eq!(collection[0].label, "Casă și curățenie");
        assert_eq!(collection[0].amount, -1158);
        assert_eq!(collection[1].label, "Alimente");
        assert_eq!(collection[1].amount, -1615);
    }

    #[test]
    fn itemized_label_takes_the_row_sign() {
        let collection = read_str("a,b,10.00 One + 5.50 Two,2019-12-05,15.50").unwrap();
        assert_eq!(collection[0].amount, 1000);
        assert_eq!(collection[1].amount, 550);
    }

    #[test]
    fn items_must_add_up() {
        let err = read_str("a,b,118 Casă și curățenie + 16.15 Alimente,2019-12-05,-27.73")
            .unwrap_err();
        match err {
            ImportError::SumMismatch { diff, row } => {
                assert_ne!(diff, 0);
                assert_eq!(row.len(), 5);
            }
            other => panic!("expected sum mismatch, got {other}"),
        }
    }

    #[test]
    fn item_without_label_fails() {
        let err = read_str("a,b,27.73 + 16.15 Alimente,2019-12-05,-27.73").unwrap_err();
        assert!(matches!(err, ImportError::ItemLabel { .. }));
    }

    #[test]
    fn bad_date_fails() {
        let err = read_str("a,b,c,2019'12'05,-27.73").unwrap_err();
        match err {
            ImportError::Date { value, row, .. } => {
                assert_eq!(value, "2019'12'05");
                assert_eq!(row[0], "a");
            }
            other => panic!("expected date error, got {other}"),
        }
    }

    #[test]
    fn bad_amount_fails() {
        let err = read_str("a,b,c,2019-12-05,-27x73").unwrap_err();
        assert!(matches!(err, ImportError::Amount { .. }));
    }

    #[test]
    fn short_row_fails() {
        let err = read_str("a,b,c,2019-12-05").unwrap_err();
        assert!(matches!(err, ImportError::ColumnCount { found: 4, .. }));
    }

    #[test]
    fn empty_lines_are_skipped() {
        let collection = read_str("\na,b,c,2019-12-05,100\n\n").unwrap();
        assert_eq!(collection.len(), 1);
    }

    #[test]
    fn byte_cap_truncates() {
        let first = "a,b,c,2019-12-05,100\n";
        let second = "d,e,f,2019-12-06,200\n";
        let config = ReaderConfig::default().with_max_bytes(first.len() as u64);
        let collection = Reader::new(config)
            .read_from(format!("{first}{second}").as_bytes())
            .unwrap();
        assert_eq!(collection.len(), 1);
        assert_eq!(collection[0].sender, "a");
    }

    #[test]
    fn custom_separator_and_date_format() {
        let config = ReaderConfig::default()
            .with_item_separator('&')
            .with_date_format("%d/%m/%Y");
        let collection = Reader::new(config)
            .read_from("a,b,1.00 One & 2.00 Two,05/12/2019,-3.00".as_bytes())
            .unwrap();
        assert_eq!(collection.len(), 2);
        assert_eq!(collection[0].date.to_string(), "2019-12-05");
    }
}
