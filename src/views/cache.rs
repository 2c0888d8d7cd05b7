// src/views/cache.rs

use chrono::{DateTime, Utc};

/// The latest successful list result for one view. Replaced wholesale on
/// refresh, never merged; a failed refresh leaves it untouched.
#[derive(Debug, Clone)]
pub struct CollectionCache<T> {
    items: Vec<T>,
    refreshed_at: Option<DateTime<Utc>>,
}

impl<T> Default for CollectionCache<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            refreshed_at: None,
        }
    }
}

impl<T> CollectionCache<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace(&mut self, items: Vec<T>) {
        self.items = items;
        self.refreshed_at = Some(Utc::now());
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// True once a refresh has succeeded.
    pub fn is_loaded(&self) -> bool {
        self.refreshed_at.is_some()
    }

    pub fn refreshed_at(&self) -> Option<DateTime<Utc>> {
        self.refreshed_at
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn find<P>(&self, predicate: P) -> Option<&T>
    where
        P: FnMut(&&T) -> bool,
    {
        self.items.iter().find(predicate)
    }
}
