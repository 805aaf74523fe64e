use std::collections::HashMap;

/// Raw suggestion answers keyed by [`SuggestionRequest::cache_key`].
///
/// Only answers that parsed cleanly are stored, so a malformed reply is
/// retried on the next trigger instead of being replayed.
///
/// [`SuggestionRequest::cache_key`]: super::SuggestionRequest::cache_key
#[derive(Debug, Default)]
pub struct SuggestionCache {
    entries: HashMap<String, String>,
}

impl SuggestionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn insert(&mut self, key: String, raw: String) {
        self.entries.insert(key, raw);
    }

    pub fn invalidate(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
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

    #[test]
    fn insert_replace_and_clear() {
        let mut cache = SuggestionCache::new();
        cache.insert("k".into(), "[\"a\"]".into());
        cache.insert("k".into(), "[\"b\"]".into());
        assert_eq!(cache.get("k"), Some("[\"b\"]"));
        assert_eq!(cache.len(), 1);

        assert!(cache.invalidate("k"));
        assert!(!cache.invalidate("k"));

        cache.insert("x".into(), "[]".into());
        cache.clear();
        assert!(cache.is_empty());
    }
}
