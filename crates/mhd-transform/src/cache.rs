//! Memoization around [`crate::clean`].

use std::collections::HashMap;
use std::sync::Arc;

use mhd_model::{CleanOptions, RawSheet, TidyTable};
use tracing::trace;

use crate::clean::clean;
use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    content_hash: String,
    options: CleanOptions,
}

/// Caches cleaned tables by sheet content hash and options.
///
/// Failures are not cached; a failing sheet is cleaned again on the next call.
#[derive(Debug, Default)]
pub struct CleanCache {
    entries: HashMap<CacheKey, Arc<TidyTable>>,
    hits: usize,
    misses: usize,
}

impl CleanCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached table for `sheet`, cleaning it on a miss.
    pub fn get_or_clean(
        &mut self,
        sheet: &RawSheet,
        options: &CleanOptions,
    ) -> Result<Arc<TidyTable>> {
        let key = CacheKey {
            content_hash: sheet.content_hash(),
            options: options.clone(),
        };
        if let Some(table) = self.entries.get(&key) {
            self.hits += 1;
            trace!(sheet = %sheet.name, hash = %key.content_hash, "clean cache hit");
            return Ok(Arc::clone(table));
        }
        self.misses += 1;
        let table = Arc::new(clean(sheet, options)?);
        self.entries.insert(key, Arc::clone(&table));
        Ok(table)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    pub fn misses(&self) -> usize {
        self.misses
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.hits = 0;
        self.misses = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mhd_model::{CellValue, SummaryMatch};

    fn sheet(value: f64) -> RawSheet {
        RawSheet::new(
            "Table NOCC.1",
            vec![
                vec![CellValue::from("Group"), CellValue::from("2019-20")],
                vec![CellValue::from("Adults"), CellValue::Number(value)],
            ],
        )
    }

    fn options() -> CleanOptions {
        CleanOptions::new().with_header_row(0)
    }

    #[test]
    fn identical_sheets_hit_the_cache() {
        let mut cache = CleanCache::new();
        let first = cache.get_or_clean(&sheet(1.0), &options()).unwrap();
        let second = cache.get_or_clean(&sheet(1.0), &options()).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!((cache.hits(), cache.misses()), (1, 1));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn changed_content_or_options_miss() {
        let mut cache = CleanCache::new();
        cache.get_or_clean(&sheet(1.0), &options()).unwrap();
        cache.get_or_clean(&sheet(2.0), &options()).unwrap();
        cache
            .get_or_clean(
                &sheet(1.0),
                &options().with_summary_match(SummaryMatch::Substring),
            )
            .unwrap();
        assert_eq!(cache.misses(), 3);
        assert_eq!(cache.len(), 3);

        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.hits(), 0);
    }

    #[test]
    fn failures_are_not_cached() {
        let mut cache = CleanCache::new();
        let bad = CleanOptions::new().with_header_row(10);
        assert!(cache.get_or_clean(&sheet(1.0), &bad).is_err());
        assert!(cache.is_empty());
    }
}
