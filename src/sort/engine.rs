//! Stable multi-column sort with direction toggling.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::field::FieldPath;
use crate::types::records::ScreeningRecord;

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Ascending,
    /// Highest first.
    #[default]
    Descending,
}

impl SortDirection {
    /// The opposite direction.
    pub fn flipped(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    /// Orients an ascending comparison result.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }

    /// Arrow shown next to the active column header.
    pub fn arrow(self) -> &'static str {
        match self {
            Self::Ascending => "▲",
            Self::Descending => "▼",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ascending => write!(f, "asc"),
            Self::Descending => write!(f, "desc"),
        }
    }
}

/// The active sort key and its direction. Held by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub key: FieldPath,
    pub direction: SortDirection,
}

impl SortState {
    pub fn new(key: FieldPath, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    /// State after a click on `key`: same key flips, a new key starts
    /// descending.
    pub fn next(&self, key: FieldPath) -> Self {
        if key == self.key {
            Self::new(key, self.direction.flipped())
        } else {
            Self::new(key, SortDirection::Descending)
        }
    }
}

impl Default for SortState {
    /// Score, best first.
    fn default() -> Self {
        Self::new(FieldPath::score(), SortDirection::Descending)
    }
}

/// Stateless sort over screening records.
///
/// Inputs are never mutated. Ties keep their input order.
pub struct SortEngine;

impl SortEngine {
    /// Sorts by `key`, deriving the new state from `prior`.
    pub fn sort(
        records: &[ScreeningRecord],
        key: FieldPath,
        prior: &SortState,
    ) -> (Vec<ScreeningRecord>, SortState) {
        let state = prior.next(key);
        let sorted = Self::apply(records, &state);
        (sorted, state)
    }

    /// Sorts with `state` as is, without toggling.
    pub fn apply(records: &[ScreeningRecord], state: &SortState) -> Vec<ScreeningRecord> {
        let mut sorted = records.to_vec();
        // `sort_by` is stable, so reversing the ordering keeps ties in place.
        sorted.sort_by(|a, b| state.direction.apply(Self::compare(a, b, &state.key)));
        sorted
    }

    /// Ascending comparison of two records on `key`.
    pub fn compare(a: &ScreeningRecord, b: &ScreeningRecord, key: &FieldPath) -> Ordering {
        key.resolve(a).compare(&key.resolve(b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symbols(records: &[ScreeningRecord]) -> Vec<&str> {
        records.iter().map(|r| r.symbol.as_str()).collect()
    }

    fn priced(prices: &[(&str, f64)]) -> Vec<ScreeningRecord> {
        prices
            .iter()
            .map(|(s, p)| ScreeningRecord::new(*s).with_price(*p))
            .collect()
    }

    #[test]
    fn test_same_key_toggles() {
        let state = SortState::default();
        let next = state.next(FieldPath::score());
        assert_eq!(next.direction, SortDirection::Ascending);
        assert_eq!(next.next(FieldPath::score()).direction, SortDirection::Descending);
    }

    #[test]
    fn test_new_key_starts_descending() {
        let prior = SortState::new(FieldPath::top("current_price"), SortDirection::Ascending);
        let next = prior.next(FieldPath::metric("p_fcf"));
        assert_eq!(next.key, FieldPath::metric("p_fcf"));
        assert_eq!(next.direction, SortDirection::Descending);
    }

    #[test]
    fn test_missing_score_sorts_as_zero() {
        let records = vec![
            ScreeningRecord::new("A"),
            ScreeningRecord::new("B").with_score(20.0),
        ];
        let state = SortState::default();

        let sorted = SortEngine::apply(&records, &state);
        assert_eq!(symbols(&sorted), vec!["B", "A"]);
    }

    #[test]
    fn test_negative_values_rank_below_missing() {
        let records = vec![
            ScreeningRecord::new("NEG").with_p_fcf(-4.0),
            ScreeningRecord::new("NONE"),
            ScreeningRecord::new("POS").with_p_fcf(12.0),
        ];
        let state = SortState::new(FieldPath::metric("p_fcf"), SortDirection::Ascending);

        let sorted = SortEngine::apply(&records, &state);
        assert_eq!(symbols(&sorted), vec!["NEG", "NONE", "POS"]);
    }

    #[test]
    fn test_price_clicked_twice() {
        let records = priced(&[("A", 100.0), ("B", 200.0), ("C", 50.0)]);
        let state = SortState::default();

        let (first, state) = SortEngine::sort(&records, FieldPath::top("current_price"), &state);
        assert_eq!(state.direction, SortDirection::Descending);
        assert_eq!(symbols(&first), vec!["B", "A", "C"]);

        let (second, state) = SortEngine::sort(&first, FieldPath::top("current_price"), &state);
        assert_eq!(state.direction, SortDirection::Ascending);
        assert_eq!(symbols(&second), vec!["C", "A", "B"]);
    }

    #[test]
    fn test_ties_keep_input_order_in_both_directions() {
        let records = vec![
            ScreeningRecord::new("X").with_score(50.0),
            ScreeningRecord::new("Y"),
            ScreeningRecord::new("Z").with_score(50.0),
            ScreeningRecord::new("W"),
        ];

        let desc = SortEngine::apply(&records, &SortState::default());
        assert_eq!(symbols(&desc), vec!["X", "Z", "Y", "W"]);

        let asc = SortEngine::apply(
            &records,
            &SortState::new(FieldPath::score(), SortDirection::Ascending),
        );
        assert_eq!(symbols(&asc), vec!["Y", "W", "X", "Z"]);
    }

    #[test]
    fn test_symbol_is_case_sensitive() {
        let records = vec![
            ScreeningRecord::new("abc"),
            ScreeningRecord::new("ABD"),
            ScreeningRecord::new("Abc"),
        ];
        let state = SortState::new(FieldPath::top("symbol"), SortDirection::Ascending);

        let sorted = SortEngine::apply(&records, &state);
        assert_eq!(symbols(&sorted), vec!["ABD", "Abc", "abc"]);
    }

    #[test]
    fn test_input_untouched_and_idempotent() {
        let records = priced(&[("A", 3.0), ("B", 1.0), ("C", 2.0)]);
        let original = records.clone();
        let state = SortState::new(FieldPath::top("current_price"), SortDirection::Ascending);

        let once = SortEngine::apply(&records, &state);
        let twice = SortEngine::apply(&records, &state);

        assert_eq!(records, original);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_empty_input() {
        let (sorted, state) = SortEngine::sort(&[], FieldPath::score(), &SortState::default());
        assert!(sorted.is_empty());
        assert_eq!(state.direction, SortDirection::Ascending);
    }
}
