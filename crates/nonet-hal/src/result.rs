//! Execution results: outcome frequency tables.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Outcome frequency table: bitstring to number of occurrences.
///
/// Serializes as a flat JSON object, e.g. `{"000000000": 450, "111111111": 50}`.
/// Character `i` of a bitstring is the value of classical bit `i`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Counts(BTreeMap<String, u64>);

impl Counts {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from `(bitstring, count)` pairs; repeated keys accumulate.
    pub fn from_pairs<S: Into<String>>(pairs: impl IntoIterator<Item = (S, u64)>) -> Self {
        let mut counts = Self::new();
        for (bitstring, count) in pairs {
            counts.insert(bitstring, count);
        }
        counts
    }

    /// Add `count` occurrences of `bitstring`. Saturates at `u64::MAX`.
    pub fn insert(&mut self, bitstring: impl Into<String>, count: u64) {
        let entry = self.0.entry(bitstring.into()).or_insert(0);
        *entry = entry.saturating_add(count);
    }

    /// Occurrences of `bitstring` (zero if absent).
    pub fn get(&self, bitstring: &str) -> u64 {
        self.0.get(bitstring).copied().unwrap_or(0)
    }

    /// Sum of all counts, or `None` if it does not fit in a `u64`.
    pub fn checked_total_shots(&self) -> Option<u64> {
        self.0.values().try_fold(0u64, |acc, &v| acc.checked_add(v))
    }

    /// Sum of all counts, saturating at `u64::MAX`.
    pub fn total_shots(&self) -> u64 {
        self.0.values().fold(0u64, |acc, &v| acc.saturating_add(v))
    }

    /// Number of distinct bitstrings.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over `(bitstring, count)` in lexicographic bitstring order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.0.iter().map(|(k, &v)| (k.as_str(), v))
    }

    /// Entries sorted by descending count, ties broken by bitstring.
    pub fn sorted(&self) -> Vec<(&str, u64)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries
    }

    /// The most frequent outcome.
    pub fn most_frequent(&self) -> Option<(&str, u64)> {
        self.sorted().into_iter().next()
    }

    /// Relative frequency of each outcome. Empty when the table sums to zero.
    pub fn probabilities(&self) -> BTreeMap<&str, f64> {
        let total = self.total_shots();
        if total == 0 {
            return BTreeMap::new();
        }
        self.iter()
            .map(|(k, v)| (k, v as f64 / total as f64))
            .collect()
    }
}

impl<S: Into<String>> FromIterator<(S, u64)> for Counts {
    fn from_iter<I: IntoIterator<Item = (S, u64)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}

/// Result of one submission: the frequency table plus bookkeeping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Measurement outcome frequencies.
    pub counts: Counts,
    /// Number of shots requested.
    pub shots: u32,
    /// Wall-clock execution time in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_time_ms: Option<u64>,
    /// Backend-specific metadata.
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

impl ExecutionResult {
    /// Create a new result.
    pub fn new(counts: Counts, shots: u32) -> Self {
        Self {
            counts,
            shots,
            execution_time_ms: None,
            metadata: serde_json::Map::new(),
        }
    }

    /// Record the execution time.
    #[must_use]
    pub fn with_execution_time(mut self, ms: u64) -> Self {
        self.execution_time_ms = Some(ms);
        self
    }

    /// Attach a metadata entry.
    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_counts() -> Counts {
        Counts::from_pairs([
            ("000000000", 450),
            ("111111111", 50),
            ("000111000", 10),
            ("111000111", 5),
        ])
    }

    #[test]
    fn test_insert_accumulates() {
        let mut counts = Counts::new();
        counts.insert("01", 1);
        counts.insert("01", 2);
        counts.insert("10", 1);
        assert_eq!(counts.get("01"), 3);
        assert_eq!(counts.get("11"), 0);
        assert_eq!(counts.total_shots(), 4);
        assert_eq!(counts.len(), 2);
    }

    #[test]
    fn test_total_shots_does_not_wrap() {
        let counts = Counts::from_pairs([("0", u64::MAX), ("1", 2)]);
        assert_eq!(counts.checked_total_shots(), None);
        assert_eq!(counts.total_shots(), u64::MAX);

        let mut counts = Counts::new();
        counts.insert("0", u64::MAX);
        counts.insert("0", 1);
        assert_eq!(counts.get("0"), u64::MAX);

        assert_eq!(reference_counts().checked_total_shots(), Some(515));
    }

    #[test]
    fn test_sorted_and_most_frequent() {
        let counts = reference_counts();
        let sorted = counts.sorted();
        assert_eq!(sorted[0], ("000000000", 450));
        assert_eq!(sorted[3], ("111000111", 5));
        assert_eq!(counts.most_frequent(), Some(("000000000", 450)));
        assert_eq!(Counts::new().most_frequent(), None);
    }

    #[test]
    fn test_probabilities() {
        let counts = Counts::from_pairs([("0", 3), ("1", 1)]);
        let probs = counts.probabilities();
        assert!((probs["0"] - 0.75).abs() < 1e-12);
        assert!((probs["1"] - 0.25).abs() < 1e-12);
        assert!(Counts::from_pairs([("0", 0)]).probabilities().is_empty());
    }

    #[test]
    fn test_counts_json_is_flat_object() {
        let counts = reference_counts();
        let json = serde_json::to_value(&counts).unwrap();
        assert_eq!(json["000111000"], 10);

        let parsed: Counts =
            serde_json::from_str(r#"{"000000000": 450, "111000111": 5}"#).unwrap();
        assert_eq!(parsed.total_shots(), 455);
    }

    #[test]
    fn test_execution_result_builder() {
        let result = ExecutionResult::new(reference_counts(), 515)
            .with_execution_time(12)
            .with_metadata("seed", serde_json::json!(7));
        assert_eq!(result.shots, 515);
        assert_eq!(result.execution_time_ms, Some(12));
        assert_eq!(result.metadata["seed"], 7);
    }
}
