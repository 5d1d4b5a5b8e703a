//! Exact-text analysis cache.
//!
//! Keys are the input text byte for byte: no case folding, no whitespace
//! normalization. Entries never expire; the owner clears the cache
//! explicitly.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use serde::Serialize;

use crate::model::AnalysisResult;

/// Snapshot of cache occupancy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub entry_count: usize,
    /// Sum of the character counts of every cached text.
    pub total_cached_characters: usize,
}

/// Thread-safe map from input text to its [`AnalysisResult`].
///
/// Lookups and inserts each take the lock once. Two threads missing on the
/// same text at the same time both compute it; the later insert wins and
/// both results are identical.
#[derive(Debug, Default)]
pub struct AnalysisCache {
    entries: Mutex<HashMap<String, AnalysisResult>>,
}

impl AnalysisCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, AnalysisResult>> {
        // A panic while holding the lock cannot leave a half-written entry.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Stored result for exactly `text`, cloned.
    #[must_use]
    pub fn get(&self, text: &str) -> Option<AnalysisResult> {
        self.lock().get(text).cloned()
    }

    /// Stored result with `processing_time` replaced by the time elapsed
    /// since `started`.
    #[must_use]
    pub fn get_refreshed(&self, text: &str, started: Instant) -> Option<AnalysisResult> {
        let mut result = self.get(text)?;
        result.processing_time = started.elapsed();
        Some(result)
    }

    pub fn insert(&self, result: AnalysisResult) {
        self.lock().insert(result.text.clone(), result);
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    #[must_use]
    pub fn stats(&self) -> CacheStats {
        let entries = self.lock();
        CacheStats {
            entry_count: entries.len(),
            total_cached_characters: entries.keys().map(|k| k.chars().count()).sum(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
