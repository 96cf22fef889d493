use crate::bloom_filters::MembershipFilter;
use crate::error::FilterError;
use rand::distributions::Alphanumeric;
use rand::rngs::OsRng;
use rand::Rng;
use std::collections::HashSet;
use std::fmt;
use std::iter::FromIterator;

/// Exact set of keys, kept next to a filter to tell confirmed hits from false positives.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct KeySet {
    pub keys: HashSet<String>,
}

/// Verdict for a query key once the filter answer is checked against the exact set.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum Classification {
    Absent,
    Confirmed,
    FalsePositive,
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Classification::Absent => "Not in the DB",
            Classification::Confirmed => "Probably in the DB",
            Classification::FalsePositive => "False positive",
        };
        f.write_str(label)
    }
}

impl KeySet {
    pub fn new<S: AsRef<str>>(keys: &[S]) -> Self {
        KeySet {
            keys: keys.iter().map(|key| key.as_ref().to_string()).collect(),
        }
    }

    /// `count` distinct alphanumeric keys of `key_len` characters.
    ///
    /// `key_len` must leave room for `count` distinct keys, otherwise this never returns.
    pub fn random(count: usize, key_len: usize) -> Self {
        let mut keys = HashSet::with_capacity(count);
        while keys.len() < count {
            let key: String = OsRng
                .sample_iter(&Alphanumeric)
                .take(key_len)
                .map(char::from)
                .collect();
            keys.insert(key);
        }

        KeySet { keys }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    /// Builds a filter sized for exactly this set and inserts every key.
    pub fn to_bloom_filter(
        &self,
        false_positive_rate: f64,
    ) -> Result<MembershipFilter, FilterError> {
        let mut filter = MembershipFilter::new(self.len(), false_positive_rate)?;

        for key in &self.keys {
            filter.insert(key);
        }

        Ok(filter)
    }

    pub fn classify(&self, filter: &MembershipFilter, key: &str) -> Classification {
        if !filter.contains(key) {
            Classification::Absent
        } else if self.contains(key) {
            Classification::Confirmed
        } else {
            Classification::FalsePositive
        }
    }
}

impl FromIterator<String> for KeySet {
    fn from_iter<T: IntoIterator<Item = String>>(iter: T) -> Self {
        KeySet {
            keys: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::bloom_filters::MembershipFilter;
    use crate::error::FilterError;
    use crate::sets::{Classification, KeySet};

    #[test]
    fn test_random() {
        let set1 = KeySet::random(5, 16);
        let set2 = KeySet::random(5, 16);

        assert_eq!(set1.len(), 5);
        assert_eq!(set2.len(), 5);

        assert_ne!(set1, set2);

        for key in &set1.keys {
            assert_eq!(key.len(), 16);
            assert!(key.chars().all(|c| c.is_ascii_alphanumeric()));
        }
    }

    #[test]
    fn test_new_deduplicates() {
        let set = KeySet::new(&["a@x.com", "b@x.com", "a@x.com"]);
        assert_eq!(set.len(), 2);
        assert!(set.contains("a@x.com"));
        assert!(!set.contains("c@x.com"));
    }

    #[test]
    fn test_key_set_from_iter() {
        let keys = vec!["a@x.com".to_string(), "b@x.com".to_string()];

        let set_a = KeySet::new(keys.as_slice());
        let set_b: KeySet = keys.into_iter().collect();

        assert_eq!(set_a, set_b);
    }

    #[test]
    fn test_to_bloom_filter() {
        let set = KeySet::random(200, 12);
        let filter = set.to_bloom_filter(1e-7).unwrap();

        assert_eq!(filter.expected_count(), 200);
        for key in &set.keys {
            assert!(filter.contains(key));
        }
    }

    #[test]
    fn test_empty_set_has_no_filter() {
        assert!(matches!(
            KeySet::default().to_bloom_filter(0.01),
            Err(FilterError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_classify() {
        let set = KeySet::new(&["a@x.com", "b@x.com"]);
        let filter = set.to_bloom_filter(1e-7).unwrap();

        assert_eq!(set.classify(&filter, "a@x.com"), Classification::Confirmed);
        assert_eq!(set.classify(&filter, "c@x.com"), Classification::Absent);
    }

    #[test]
    fn test_classify_false_positive() {
        // A filter with every probed bit set answers yes for anything.
        let mut saturated = MembershipFilter::new(1, 0.99).unwrap();
        saturated.insert("a@x.com");
        assert_eq!(saturated.bit_array_size(), 1);

        let set = KeySet::new(&["a@x.com"]);
        assert_eq!(set.classify(&saturated, "a@x.com"), Classification::Confirmed);
        assert_eq!(set.classify(&saturated, "z@y.org"), Classification::FalsePositive);
    }

    #[test]
    fn test_classification_labels() {
        assert_eq!(Classification::Absent.to_string(), "Not in the DB");
        assert_eq!(Classification::Confirmed.to_string(), "Probably in the DB");
        assert_eq!(Classification::FalsePositive.to_string(), "False positive");
    }
}
