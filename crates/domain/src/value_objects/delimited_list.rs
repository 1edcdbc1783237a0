//! Delimited list - Comma-joined set encoding shared by ban and permission lists
//!
//! The backing store persists set-valued fields as comma-joined text. In
//! memory the sets are genuine ordered collections; this type owns the
//! encode/decode boundary so nothing else manipulates the encoded string.

use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Ordered set with a comma-joined persisted form
///
/// Insertion order is preserved and is the canonical encoding order.
/// Membership is exact equality; callers own any normalization (for
/// example lowercasing) applied before insertion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelimitedList<T>(Vec<T>);

impl<T> Default for DelimitedList<T> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<T: PartialEq> DelimitedList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, entry: &T) -> bool {
        self.0.contains(entry)
    }

    /// Returns false (and leaves the list unchanged) for duplicates.
    pub fn insert(&mut self, entry: T) -> bool {
        if self.contains(&entry) {
            return false;
        }
        self.0.push(entry);
        true
    }

    pub fn remove(&mut self, entry: &T) -> bool {
        let before = self.0.len();
        self.0.retain(|e| e != entry);
        self.0.len() != before
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<T: Display> DelimitedList<T> {
    /// Comma-join in insertion order; the empty list encodes as "".
    pub fn encode(&self) -> String {
        self.0
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl<T: FromStr + PartialEq> DelimitedList<T> {
    /// Decode a comma-joined string, skipping blank segments and segments
    /// that fail to parse. Empty input yields the empty list.
    pub fn decode(encoded: &str) -> Self {
        let mut list = Self::new();
        for segment in encoded.split(',') {
            let segment = segment.trim();
            if segment.is_empty() {
                continue;
            }
            if let Ok(entry) = segment.parse() {
                list.insert(entry);
            }
        }
        list
    }
}

impl<T: PartialEq> FromIterator<T> for DelimitedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        for entry in iter {
            list.insert(entry);
        }
        list
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_lists_round_trip() {
        let list: DelimitedList<String> = ["Magic Mirror", "Rod of Discord"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(list.encode(), "Magic Mirror,Rod of Discord");
        assert_eq!(DelimitedList::<String>::decode(&list.encode()), list);
    }

    #[test]
    fn numeric_lists_round_trip() {
        let list: DelimitedList<i32> = [10, 226, 4].into_iter().collect();
        assert_eq!(list.encode(), "10,226,4");
        assert_eq!(DelimitedList::<i32>::decode(&list.encode()), list);
    }

    #[test]
    fn empty_input_decodes_to_empty_list() {
        assert!(DelimitedList::<String>::decode("").is_empty());
        assert!(DelimitedList::<i32>::decode("  ").is_empty());
        assert_eq!(DelimitedList::<i32>::new().encode(), "");
    }

    #[test]
    fn unparseable_segments_are_skipped() {
        let list = DelimitedList::<i32>::decode("10,oops,4");
        assert_eq!(list.encode(), "10,4");
    }

    #[test]
    fn insert_rejects_duplicates() {
        let mut list = DelimitedList::new();
        assert!(list.insert(10));
        assert!(!list.insert(10));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn remove_reports_absence() {
        let mut list: DelimitedList<i32> = [10].into_iter().collect();
        assert!(list.remove(&10));
        assert!(!list.remove(&10));
        assert!(list.is_empty());
    }
}
