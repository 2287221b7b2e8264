use std::{
    collections::HashMap,
    hash::{DefaultHasher, Hash, Hasher},
    sync::{LazyLock, RwLock}
};

use crate::response::GenerationRecord;

/// Global record cache
static RECORD_CACHE: LazyLock<RwLock<RecordCache>> =
    LazyLock::new(|| RwLock::new(RecordCache::new(1000)));

/// Cache of generation records keyed by question text.
///
/// Question files occasionally repeat the same text under different IDs;
/// the cache reuses the first record instead of paying for another API call.
pub struct RecordCache {
    cache:    HashMap<u64, GenerationRecord>,
    max_size: usize
}

impl RecordCache {
    pub fn new(max_size: usize) -> Self {
        Self {
            cache: HashMap::with_capacity(max_size),
            max_size
        }
    }

    fn hash_key(question: &str) -> u64 {
        let mut hasher = DefaultHasher::new();
        question.hash(&mut hasher);
        hasher.finish()
    }

    pub fn get(&self, question: &str) -> Option<GenerationRecord> {
        let key = Self::hash_key(question);
        self.cache.get(&key).cloned()
    }

    pub fn insert(&mut self, question: &str, record: GenerationRecord) {
        // Simple eviction: clear half when full
        if self.cache.len() >= self.max_size {
            let keys: Vec<_> = self.cache.keys().take(self.max_size / 2).copied().collect();
            for key in keys {
                self.cache.remove(&key);
            }
        }

        let key = Self::hash_key(question);
        self.cache.insert(key, record);
    }
}

/// Get cached record for a question text or None
pub fn get_cached(question: &str) -> Option<GenerationRecord> {
    RECORD_CACHE.read().ok()?.get(question)
}

/// Cache a generation record under its question text
pub fn cache_record(question: &str, record: GenerationRecord) {
    if let Ok(mut cache) = RECORD_CACHE.write() {
        cache.insert(question, record);
    }
}
