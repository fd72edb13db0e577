//! In-memory table for development and testing

use std::cmp::Ordering as CmpOrdering;
use std::convert::Infallible;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;

use crate::shared::PageSource;

/// Row predicate used as the filter of a [`MemoryTable`]
pub type RowFilter<R> = Arc<dyn Fn(&R) -> bool + Send + Sync>;

/// Row comparator used as one sort key of a [`MemoryTable`]
pub type RowOrder<R> = Arc<dyn Fn(&R, &R) -> CmpOrdering + Send + Sync>;

/// Insertion-ordered rows kept in memory.
///
/// Rows are keyed by a monotonically increasing sequence number, so an
/// unordered read returns them in insertion order.
pub struct MemoryTable<R> {
    rows: DashMap<u64, R>,
    next_key: AtomicU64,
}

impl<R: Clone> MemoryTable<R> {
    pub fn new() -> Self {
        Self {
            rows: DashMap::new(),
            next_key: AtomicU64::new(1),
        }
    }

    /// Append a row and return its sequence key.
    pub fn insert(&self, row: R) -> u64 {
        let key = self.next_key.fetch_add(1, Ordering::SeqCst);
        self.rows.insert(key, row);
        key
    }

    pub fn remove(&self, key: u64) -> Option<R> {
        self.rows.remove(&key).map(|(_, row)| row)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Every row matching `filter`, in insertion order.
    pub fn scan(&self, filter: Option<&RowFilter<R>>) -> Vec<R> {
        let mut matched: Vec<(u64, R)> = self
            .rows
            .iter()
            .filter(|entry| filter.map_or(true, |f| f(entry.value())))
            .map(|entry| (*entry.key(), entry.value().clone()))
            .collect();
        matched.sort_by_key(|(key, _)| *key);
        matched.into_iter().map(|(_, row)| row).collect()
    }
}

impl<R: Clone> Default for MemoryTable<R> {
    fn default() -> Self {
        Self::new()
    }
}

fn compare_chain<R>(order_by: &[RowOrder<R>], a: &R, b: &R) -> CmpOrdering {
    order_by
        .iter()
        .fold(CmpOrdering::Equal, |acc, cmp| acc.then_with(|| cmp(a, b)))
}

#[async_trait]
impl<R> PageSource for MemoryTable<R>
where
    R: Clone + Send + Sync + 'static,
{
    type Row = R;
    type Filter = RowFilter<R>;
    type Order = RowOrder<R>;
    type Error = Infallible;

    async fn fetch(
        &self,
        filter: Option<&RowFilter<R>>,
        order_by: &[RowOrder<R>],
        limit: u64,
        offset: u64,
    ) -> Result<Vec<R>, Infallible> {
        let mut rows = self.scan(filter);
        if !order_by.is_empty() {
            // stable, so equal keys keep insertion order
            rows.sort_by(|a, b| compare_chain(order_by, a, b));
        }

        let offset = usize::try_from(offset).unwrap_or(usize::MAX);
        let limit = usize::try_from(limit).unwrap_or(usize::MAX);
        Ok(rows.into_iter().skip(offset).take(limit).collect())
    }

    async fn count(&self, filter: Option<&RowFilter<R>>) -> Result<u64, Infallible> {
        let total = self
            .rows
            .iter()
            .filter(|entry| filter.map_or(true, |f| f(entry.value())))
            .count();
        Ok(total as u64)
    }
}
