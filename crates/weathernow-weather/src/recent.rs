//! Most-recent-first list of looked-up places.

use serde::{Deserialize, Serialize};

use crate::types::{LocationCandidate, RecentLocation};

/// Maximum number of entries kept.
pub const MAX_RECENT: usize = 6;

/// Recent searches, deduplicated by (name, region, country).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecentSearches {
    entries: Vec<RecentLocation>,
}

impl RecentSearches {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from previously stored entries, dropping duplicates and overflow.
    pub fn from_entries(entries: Vec<RecentLocation>) -> Self {
        let mut list = Self::new();
        for entry in entries.into_iter().rev() {
            list.push_front(entry);
        }
        list
    }

    /// Record a successful lookup: move or insert at the front.
    pub fn record(&mut self, place: &LocationCandidate) {
        self.push_front(RecentLocation::from(place));
    }

    fn push_front(&mut self, item: RecentLocation) {
        self.entries.retain(|existing| !existing.same_place(&item));
        self.entries.insert(0, item);
        self.entries.truncate(MAX_RECENT);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[RecentLocation] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&RecentLocation> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place(name: &str, admin1: &str, country: &str) -> LocationCandidate {
        LocationCandidate {
            id: None,
            name: name.to_string(),
            country: country.to_string(),
            admin1: admin1.to_string(),
            latitude: 0.0,
            longitude: 0.0,
        }
    }

    fn names(list: &RecentSearches) -> Vec<&str> {
        list.entries().iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn test_most_recent_first() {
        let mut list = RecentSearches::new();
        list.record(&place("Paris", "Île-de-France", "France"));
        list.record(&place("Tokyo", "Tokyo", "Japan"));
        assert_eq!(names(&list), vec!["Tokyo", "Paris"]);
    }

    #[test]
    fn test_capped_at_six() {
        let mut list = RecentSearches::new();
        for n in 0..10 {
            list.record(&place(&format!("City {}", n), "", ""));
            assert_eq!(list.len(), (n + 1).min(MAX_RECENT));
        }
        assert_eq!(
            names(&list),
            vec!["City 9", "City 8", "City 7", "City 6", "City 5", "City 4"]
        );
    }

    #[test]
    fn test_refetch_moves_to_front_without_growth() {
        let mut list = RecentSearches::new();
        list.record(&place("Paris", "Île-de-France", "France"));
        list.record(&place("London", "England", "United Kingdom"));
        list.record(&place("Delhi", "Delhi", "India"));

        let mut moved = place("Paris", "Île-de-France", "France");
        moved.latitude = 48.86;
        list.record(&moved);

        assert_eq!(list.len(), 3);
        assert_eq!(names(&list), vec!["Paris", "Delhi", "London"]);
        assert_eq!(list.entries()[0].latitude, 48.86);
    }

    #[test]
    fn test_same_name_different_region_kept() {
        let mut list = RecentSearches::new();
        list.record(&place("Paris", "Île-de-France", "France"));
        list.record(&place("Paris", "Texas", "United States"));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_from_entries_normalizes() {
        let stored: Vec<RecentLocation> = (0..8)
            .map(|n| RecentLocation::from(&place(&format!("City {}", n % 7), "", "")))
            .collect();
        let list = RecentSearches::from_entries(stored);
        assert_eq!(list.len(), MAX_RECENT);
        assert_eq!(list.entries()[0].name, "City 0");
        let mut seen = std::collections::HashSet::new();
        assert!(list.entries().iter().all(|e| seen.insert(e.name.clone())));
    }

    #[test]
    fn test_serializes_as_plain_array() {
        let mut list = RecentSearches::new();
        list.record(&place("Paris", "Île-de-France", "France"));
        let json = serde_json::to_value(&list).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["name"], "Paris");
        assert_eq!(json[0]["admin1"], "Île-de-France");

        let back: RecentSearches = serde_json::from_value(json).unwrap();
        assert_eq!(back, list);
    }

    #[test]
    fn test_clear() {
        let mut list = RecentSearches::new();
        list.record(&place("Paris", "", "France"));
        list.clear();
        assert!(list.is_empty());
    }
}
