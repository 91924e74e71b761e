//! Opt-in memoization for text-shaped generations. Exists to avoid paying a
//! provider twice for the exact same request, not for correctness; there is
//! no eviction. Image generation must stay un-memoized so every request
//! yields a fresh image.

use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};

use parking_lot::Mutex;

#[derive(Debug, Default)]
pub struct PromptCache {
    entries: Mutex<HashMap<u64, String>>,
}

impl PromptCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key over the normalized request inputs. The operation tag keeps
    /// different operations with identical prompts apart.
    pub fn key(parts: &[&str]) -> u64 {
        let mut hasher = DefaultHasher::new();
        for part in parts {
            part.hash(&mut hasher);
        }
        hasher.finish()
    }

    pub fn get(&self, key: u64) -> Option<String> {
        self.entries.lock().get(&key).cloned()
    }

    pub fn insert(&self, key: u64, value: String) {
        self.entries.lock().insert(key, value);
    }
}
