//! Insertion-ordered frequency tables and Top-N ranking.

use std::hash::Hash;

use indexmap::IndexMap;

use crate::types::RankedEntry;

/// Weight of a value seen on a static element sample.
pub const STATIC_WEIGHT: u64 = 1;

/// Counts per key. Iteration order is first-seen order, which is what
/// breaks ties when ranking.
#[derive(Debug, Clone)]
pub struct FrequencyTable<K> {
    counts: IndexMap<K, u64>,
}

impl<K> Default for FrequencyTable<K> {
    fn default() -> Self {
        Self {
            counts: IndexMap::new(),
        }
    }
}

impl<K: Hash + Eq + Clone> FrequencyTable<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `weight` to `key`; `None` keys are ignored.
    pub fn add(&mut self, key: Option<K>, weight: u64) {
        if let Some(key) = key {
            *self.counts.entry(key).or_insert(0) += weight;
        }
    }

    pub fn count(&self, key: &K) -> u64 {
        self.counts.get(key).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Highest counts first, ties in first-seen order, at most `n` entries.
    pub fn top_n(&self, n: usize) -> Vec<RankedEntry<K>> {
        let mut entries: Vec<(&K, u64)> = self.counts.iter().map(|(k, c)| (k, *c)).collect();
        // stable sort keeps insertion order among equal counts
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        entries
            .into_iter()
            .take(n)
            .map(|(value, count)| RankedEntry {
                value: value.clone(),
                count,
            })
            .collect()
    }
}

/// First raw spelling seen for each normalized key.
#[derive(Debug, Clone, Default)]
pub struct OriginalSpellings {
    first_seen: IndexMap<String, String>,
}

impl OriginalSpellings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep `raw` (trimmed, case preserved) unless `key` already has one.
    pub fn record(&mut self, key: &str, raw: &str) {
        if !self.first_seen.contains_key(key) {
            self.first_seen
                .insert(key.to_string(), raw.trim().to_string());
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.first_seen.get(key).map(String::as_str)
    }

    /// Replace each normalized key with its first original spelling.
    pub fn restore(&self, ranked: Vec<RankedEntry<String>>) -> Vec<RankedEntry<String>> {
        ranked
            .into_iter()
            .map(|entry| RankedEntry {
                value: self
                    .get(&entry.value)
                    .map(str::to_string)
                    .unwrap_or(entry.value),
                count: entry.count,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_keys_are_ignored() {
        let mut table: FrequencyTable<String> = FrequencyTable::new();
        table.add(None, 5);
        assert!(table.is_empty());
    }

    #[test]
    fn weights_accumulate() {
        let mut table = FrequencyTable::new();
        table.add(Some("a"), STATIC_WEIGHT);
        table.add(Some("a"), 3);
        assert_eq!(table.count(&"a"), 4);
        assert_eq!(table.count(&"b"), 0);
    }

    #[test]
    fn top_n_orders_by_count_then_first_seen() {
        let mut table = FrequencyTable::new();
        for key in ["b", "a", "c", "a", "c", "d"] {
            table.add(Some(key), 1);
        }
        let ranked = table.top_n(10);
        let values: Vec<&str> = ranked.iter().map(|e| e.value).collect();
        assert_eq!(values, vec!["a", "c", "b", "d"]);
        assert_eq!(ranked[0].count, 2);
    }

    #[test]
    fn top_n_respects_cap_and_is_non_increasing() {
        let mut table = FrequencyTable::new();
        for i in 0..50u64 {
            table.add(Some(i), i % 7 + 1);
        }
        let ranked = table.top_n(20);
        assert_eq!(ranked.len(), 20);
        assert!(ranked.windows(2).all(|w| w[0].count >= w[1].count));
        assert!(table.top_n(0).is_empty());
    }

    #[test]
    fn spellings_keep_the_first_raw_form() {
        let mut spellings = OriginalSpellings::new();
        spellings.record("rgb(255,0,0)", " RGB(255, 0, 0) ");
        spellings.record("rgb(255,0,0)", "rgb(255,0,0)");
        assert_eq!(spellings.get("rgb(255,0,0)"), Some("RGB(255, 0, 0)"));

        let restored = spellings.restore(vec![
            RankedEntry {
                value: "rgb(255,0,0)".to_string(),
                count: 3,
            },
            RankedEntry {
                value: "#fff".to_string(),
                count: 1,
            },
        ]);
        assert_eq!(restored[0].value, "RGB(255, 0, 0)");
        assert_eq!(restored[0].count, 3);
        assert_eq!(restored[1].value, "#fff");
    }
}
