//! Frequency Table Module
//! Counts category label occurrences, keeping first-seen order.

use indexmap::IndexMap;

/// Distinct labels and their occurrence counts, in order of first appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: IndexMap<String, usize>,
}

impl FrequencyTable {
    /// Build the table with a single scan over `labels`.
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut counts: IndexMap<String, usize> = IndexMap::new();
        for label in labels {
            let label = label.as_ref();
            match counts.get_mut(label) {
                Some(count) => *count += 1,
                None => {
                    counts.insert(label.to_string(), 1);
                }
            }
        }
        Self { counts }
    }

    /// Distinct labels in first-seen order.
    pub fn categories(&self) -> Vec<&str> {
        self.counts.keys().map(String::as_str).collect()
    }

    /// Counts aligned with [`categories`](Self::categories).
    pub fn counts(&self) -> Vec<usize> {
        self.counts.values().copied().collect()
    }

    pub fn get(&self, label: &str) -> Option<usize> {
        self.counts.get(label).copied()
    }

    /// Position of `label` in first-seen order.
    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.counts.get_index_of(label)
    }

    /// Total number of observations.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(label, count)| (label.as_str(), *count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_seen_order_and_counts() {
        let table = FrequencyTable::from_labels(["b", "a", "b", "c", "a", "a"]);
        assert_eq!(table.categories(), vec!["b", "a", "c"]);
        assert_eq!(table.counts(), vec![2, 3, 1]);
        assert_eq!(table.total(), 6);
    }

    #[test]
    fn lookup_by_label() {
        let labels = vec!["x".to_string(), "y".to_string(), "x".to_string()];
        let table = FrequencyTable::from_labels(labels);
        assert_eq!(table.get("x"), Some(2));
        assert_eq!(table.get("z"), None);
        assert_eq!(table.index_of("y"), Some(1));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn labels_are_case_sensitive_and_untrimmed() {
        let table = FrequencyTable::from_labels(["A", "a", "a ", "A"]);
        assert_eq!(table.categories(), vec!["A", "a", "a "]);
        assert_eq!(table.counts(), vec![2, 1, 1]);
    }

    #[test]
    fn empty_input() {
        let table = FrequencyTable::from_labels(Vec::<&str>::new());
        assert!(table.is_empty());
        assert_eq!(table.total(), 0);
        assert_eq!(table.iter().count(), 0);
    }
}
