use crate::{model::CityQuery, store::Store};

pub const HISTORY_LIMIT: usize = 5;

/// Recent searches, most recent first, without duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchHistory {
    entries: Vec<String>,
}

impl SearchHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild history from stored entries, dropping blanks and repeats and
    /// keeping at most [`HISTORY_LIMIT`] entries.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut kept: Vec<String> = Vec::new();
        for entry in entries {
            let entry = entry.into();
            if entry.trim().is_empty() || kept.contains(&entry) {
                continue;
            }
            kept.push(entry);
            if kept.len() == HISTORY_LIMIT {
                break;
            }
        }
        Self { entries: kept }
    }

    /// Move `city` to the front, evicting the oldest entry once full.
    pub fn record(&mut self, city: &CityQuery) {
        let city = city.as_str();
        self.entries.retain(|entry| entry != city);
        self.entries.insert(0, city.to_string());
        self.entries.truncate(HISTORY_LIMIT);
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Search history persisted through a [`Store`] on every change.
pub struct SearchHistoryStore {
    history: SearchHistory,
    store: Box<dyn Store<Vec<String>>>,
}

impl SearchHistoryStore {
    /// Load persisted history once; anything unusable starts empty.
    pub fn load(store: Box<dyn Store<Vec<String>>>) -> Self {
        let history = store.load().map(SearchHistory::from_entries).unwrap_or_default();
        Self { history, store }
    }

    pub fn record(&mut self, city: &CityQuery) {
        self.history.record(city);
        if let Err(err) = self.store.save(&self.history.entries().to_vec()) {
            tracing::warn!(error = %err, "Failed to persist search history");
        }
    }

    pub fn list(&self) -> &[String] {
        self.history.entries()
    }
}

impl std::fmt::Debug for SearchHistoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchHistoryStore").field("history", &self.history).finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use std::sync::Arc;

    fn city(name: &str) -> CityQuery {
        CityQuery::try_from(name).expect("valid city")
    }

    #[test]
    fn recording_twice_keeps_one_entry_at_front() {
        let mut history = SearchHistory::new();
        history.record(&city("London"));
        history.record(&city("Paris"));
        history.record(&city("London"));

        assert_eq!(history.entries(), ["London", "Paris"]);
    }

    #[test]
    fn sixth_city_evicts_least_recent() {
        let mut history = SearchHistory::new();
        for name in ["A", "B", "C", "D", "E", "F"] {
            history.record(&city(name));
        }

        assert_eq!(history.len(), HISTORY_LIMIT);
        assert_eq!(history.entries(), ["F", "E", "D", "C", "B"]);
    }

    #[test]
    fn matching_is_case_sensitive() {
        let mut history = SearchHistory::new();
        history.record(&city("london"));
        history.record(&city("London"));

        assert_eq!(history.entries(), ["London", "london"]);
    }

    #[test]
    fn from_entries_normalizes_stored_state() {
        let history = SearchHistory::from_entries(["Oslo", "", "Oslo", "Rome", "  ", "A", "B", "C", "D"]);
        assert_eq!(history.entries(), ["Oslo", "Rome", "A", "B", "C"]);
    }

    #[test]
    fn store_persists_on_every_record() {
        let backend: Arc<MemoryStore<Vec<String>>> = Arc::new(MemoryStore::new());
        let mut store = SearchHistoryStore::load(Box::new(backend.clone()));
        assert!(store.list().is_empty());

        store.record(&city("London"));
        assert_eq!(backend.load(), Some(vec!["London".to_string()]));

        store.record(&city("Nowhereville"));
        assert_eq!(
            backend.load(),
            Some(vec!["Nowhereville".to_string(), "London".to_string()])
        );
    }

    #[test]
    fn store_loads_existing_state() {
        let backend = MemoryStore::with_value(vec!["Rome".to_string(), "Oslo".to_string()]);
        let store = SearchHistoryStore::load(Box::new(backend));
        assert_eq!(store.list(), ["Rome", "Oslo"]);
    }
}
