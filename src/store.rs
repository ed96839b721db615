//! Process-lifetime subscriber registry.

use crate::consts::DEFAULT_CATEGORY;
use std::collections::{BTreeSet, HashMap};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Telegram chat id of the subscriber
pub type SubscriberId = i64;

#[derive(Debug, Default)]
pub struct SubscriptionStore {
    entries: Mutex<HashMap<SubscriberId, BTreeSet<String>>>,
}

impl SubscriptionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<SubscriberId, BTreeSet<String>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Flip membership of `category` and return the resulting set.
    pub fn toggle(&self, id: SubscriberId, category: &str) -> BTreeSet<String> {
        let mut entries = self.lock();
        let cats = entries.entry(id).or_default();
        if !cats.remove(category) {
            cats.insert(category.to_string());
        }
        cats.clone()
    }

    /// Current selection, empty for unknown subscribers
    pub fn categories(&self, id: SubscriberId) -> BTreeSet<String> {
        self.lock().get(&id).cloned().unwrap_or_default()
    }

    /// Current selection, or the default category if `id` never picked anything
    pub fn categories_or_default(&self, id: SubscriberId) -> BTreeSet<String> {
        self.lock()
            .get(&id)
            .cloned()
            .unwrap_or_else(|| BTreeSet::from([DEFAULT_CATEGORY.to_string()]))
    }

    pub fn snapshot(&self) -> Vec<(SubscriberId, BTreeSet<String>)> {
        self.lock().iter().map(|(id, cats)| (*id, cats.clone())).collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
