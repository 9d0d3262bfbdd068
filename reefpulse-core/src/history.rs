//! The bounded, newest-first log of test entries.

use chrono::{DateTime, Utc};
use reefpulse_schemas::{parameter::ParameterKind, reading::TestEntry};
use serde::Serialize;

/// Number of entries retained; older entries are evicted.
pub const HISTORY_CAPACITY: usize = 100;

/// Days without a test after which the tank is considered overdue.
pub const OVERDUE_AFTER_DAYS: i64 = 7;

/// One point of a parameter trend.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrendPoint {
    pub date: DateTime<Utc>,
    pub value: f64,
}

/// Test entries ordered newest first, holding at most `capacity` of them.
#[derive(Debug, Clone, PartialEq)]
pub struct History {
    entries: Vec<TestEntry>,
    capacity: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            capacity,
        }
    }

    /// Builds a history from entries in any order, keeping the `capacity` most recent.
    pub fn from_entries(entries: Vec<TestEntry>, capacity: usize) -> Self {
        let mut history = Self {
            entries,
            capacity,
        };
        history.normalize();
        history
    }

    /// Adds one entry. On equal timestamps the newly added entry sorts first.
    pub fn record(&mut self, entry: TestEntry) {
        self.merge(std::iter::once(entry));
    }

    /// Adds a batch of entries ahead of the existing ones, then re-sorts and evicts.
    pub fn merge<I: IntoIterator<Item = TestEntry>>(&mut self, entries: I) {
        let mut merged: Vec<TestEntry> = entries.into_iter().collect();
        merged.append(&mut self.entries);
        self.entries = merged;
        self.normalize();
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn normalize(&mut self) {
        // Stable sort: entries with equal dates keep their relative order.
        self.entries.sort_by(|a, b| b.date.cmp(&a.date));
        self.entries.truncate(self.capacity);
    }

    pub fn latest(&self) -> Option<&TestEntry> {
        self.entries.first()
    }

    pub fn entries(&self) -> &[TestEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<TestEntry> {
        self.entries
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Values of `kind` over time, oldest first. Entries without that reading are skipped.
    pub fn parameter_series(&self, kind: ParameterKind) -> Vec<TrendPoint> {
        self.entries
            .iter()
            .rev()
            .filter_map(|entry| {
                entry.readings.get(kind).map(|value| TrendPoint {
                    date: entry.date,
                    value,
                })
            })
            .collect()
    }

    /// Parameters with at least one reading anywhere in the history, in canonical order.
    pub fn recorded_kinds(&self) -> Vec<ParameterKind> {
        ParameterKind::ALL
            .into_iter()
            .filter(|kind| self.entries.iter().any(|e| e.readings.get(*kind).is_some()))
            .collect()
    }

    /// Whole days since the most recent test, or `None` for an empty history.
    pub fn days_since_last_test(&self, now: DateTime<Utc>) -> Option<i64> {
        self.latest().map(|entry| (now - entry.date).num_days())
    }

    pub fn is_overdue(&self, now: DateTime<Utc>, after_days: i64) -> bool {
        self.days_since_last_test(now)
            .is_some_and(|days| days > after_days)
    }
}
