//! Configuration for the statement reader.

/// Knobs for one ingestion run.
///
/// The defaults match what bank exports in the wild look like: a 1 MiB cap,
/// ISO dates, and `+` separating the items of an itemized label.
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// Read at most this many bytes from the source; the rest is silently
    /// ignored.
    pub max_bytes: u64,
    /// strftime-style layout for the date column.
    pub date_format: String,
    /// Character splitting an itemized label into its items.
    pub item_separator: char,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            max_bytes: 1 << 20,
            date_format: "%Y-%m-%d".to_string(),
            item_separator: '+',
        }
    }
}

impl ReaderConfig {
    /// Set the input byte cap.
    #[must_use]
    pub const fn with_max_bytes(mut self, max_bytes: u64) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    /// Set the date layout (strftime-style).
    #[must_use]
    pub fn with_date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = format.into();
        self
    }

    /// Set the itemized-label separator.
    #[must_use]
    pub const fn with_item_separator(mut self, separator: char) -> Self {
        self.item_separator = separator;
        self
    }
}
