//! Generic paginated query helper
//!
//! Runs a data query and a count query concurrently against one filter.
//! The filter is taken once and handed by reference to both sub-queries,
//! so the reported `total` always describes the same rows as `items`.

use async_trait::async_trait;

use super::{PageRequest, PageResult};

/// A tabular backing store that can be read one page at a time.
///
/// Implementations must apply `filter` identically in [`fetch`](Self::fetch)
/// and [`count`](Self::count).
#[async_trait]
pub trait PageSource: Send + Sync {
    type Row: Send;
    type Filter: Send + Sync;
    type Order: Send + Sync;
    type Error: Send;

    /// Filtered, ordered read of at most `limit` rows starting at `offset`.
    async fn fetch(
        &self,
        filter: Option<&Self::Filter>,
        order_by: &[Self::Order],
        limit: u64,
        offset: u64,
    ) -> Result<Vec<Self::Row>, Self::Error>;

    /// Number of rows matching `filter`.
    async fn count(&self, filter: Option<&Self::Filter>) -> Result<u64, Self::Error>;
}

/// Parameters of a single [`paginate`] call
#[derive(Debug, Clone)]
pub struct PageQuery<F, O> {
    pub filter: Option<F>,
    pub pagination: PageRequest,
    pub order_by: Vec<O>,
}

impl<F, O> PageQuery<F, O> {
    pub fn new(pagination: PageRequest) -> Self {
        Self {
            filter: None,
            pagination,
            order_by: Vec::new(),
        }
    }

    pub fn filter(mut self, filter: F) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn filter_opt(mut self, filter: Option<F>) -> Self {
        self.filter = filter;
        self
    }

    pub fn order_by(mut self, order: O) -> Self {
        self.order_by.push(order);
        self
    }
}

/// Fetch one page and the matching total in parallel.
///
/// No default ordering is imposed. Errors from either sub-query are returned
/// as-is; nothing is retried and no partial page is produced.
pub async fn paginate<S>(
    source: &S,
    query: PageQuery<S::Filter, S::Order>,
) -> Result<PageResult<S::Row>, S::Error>
where
    S: PageSource + ?Sized,
{
    let PageQuery {
        filter,
        pagination,
        order_by,
    } = query;
    let filter = filter.as_ref();

    let (items, total) = tokio::try_join!(
        source.fetch(filter, &order_by, pagination.limit, pagination.offset()),
        source.count(filter),
    )?;

    Ok(PageResult::new(
        items,
        total,
        pagination.page,
        pagination.limit,
    ))
}

#[cfg(test)]
mod tests {
    use std::cmp::Ordering;
    use std::sync::Arc;
    use std::time::Duration;

    use tokio::sync::Barrier;

    use super::*;
    use crate::infrastructure::storage::{MemoryTable, RowFilter, RowOrder};

    #[derive(Debug, Clone, PartialEq)]
    struct Officer {
        name: String,
        organization_id: i32,
    }

    fn by_name() -> RowOrder<Officer> {
        Arc::new(|a: &Officer, b: &Officer| a.name.cmp(&b.name))
    }

    fn in_org(org: i32) -> RowFilter<Officer> {
        Arc::new(move |o: &Officer| o.organization_id == org)
    }

    /// 25 officers inserted out of name order, all in organization 1.
    fn twenty_five() -> MemoryTable<Officer> {
        let table = MemoryTable::new();
        for n in (1..=25).rev() {
            table.insert(Officer {
                name: format!("officer-{:02}", n),
                organization_id: 1,
            });
        }
        table
    }

    fn names(page: &PageResult<Officer>) -> Vec<String> {
        page.items.iter().map(|o| o.name.clone()).collect()
    }

    #[tokio::test]
    async fn pages_through_ordered_rows() {
        let table = twenty_five();

        let first = paginate(
            &table,
            PageQuery::new(PageRequest::new(1, 10)).order_by(by_name()),
        )
        .await
        .unwrap();
        assert_eq!(first.total, 25);
        assert_eq!(first.items.len(), 10);
        assert_eq!(first.items[0].name, "officer-01");
        assert_eq!(first.items[9].name, "officer-10");

        let third = paginate(
            &table,
            PageQuery::new(PageRequest::new(3, 10)).order_by(by_name()),
        )
        .await
        .unwrap();
        assert_eq!(third.total, 25);
        assert_eq!(
            names(&third),
            vec![
                "officer-21",
                "officer-22",
                "officer-23",
                "officer-24",
                "officer-25"
            ]
        );

        let fourth = paginate(
            &table,
            PageQuery::new(PageRequest::new(4, 10)).order_by(by_name()),
        )
        .await
        .unwrap();
        assert!(fourth.items.is_empty());
        assert_eq!(fourth.total, 25);
        assert_eq!(fourth.page, 4);
        assert_eq!(fourth.limit, 10);
    }

    #[tokio::test]
    async fn filter_applies_to_items_and_total() {
        let table = MemoryTable::new();
        for i in 0..10 {
            table.insert(Officer {
                name: format!("officer-{}", i),
                organization_id: if i % 3 == 0 { 7 } else { 2 },
            });
        }

        let page = paginate(
            &table,
            PageQuery::new(PageRequest::new(1, 10)).filter(in_org(7)),
        )
        .await
        .unwrap();

        assert_eq!(page.items.len(), 4);
        assert_eq!(page.total, 4);
        assert!(page.items.iter().all(|o| o.organization_id == 7));
    }

    #[tokio::test]
    async fn total_matches_full_scan_for_every_filter() {
        let table = MemoryTable::new();
        for i in 0..37 {
            table.insert(Officer {
                name: format!("officer-{}", i),
                organization_id: i % 5,
            });
        }

        for org in 0..6 {
            let expected = table.scan(Some(&in_org(org))).len() as u64;
            let page = paginate(
                &table,
                PageQuery::new(PageRequest::new(1, 3)).filter(in_org(org)),
            )
            .await
            .unwrap();
            assert_eq!(page.total, expected, "organization {}", org);
        }
    }

    #[tokio::test]
    async fn items_are_the_slice_at_offset() {
        let table = twenty_five();
        let mut all = table.scan(None);
        all.sort_by(|a, b| a.name.cmp(&b.name));

        for page in 1..=4 {
            for limit in [1, 4, 7, 10, 30] {
                let result = paginate(
                    &table,
                    PageQuery::new(PageRequest::new(page, limit)).order_by(by_name()),
                )
                .await
                .unwrap();
                let expected: Vec<Officer> = all
                    .iter()
                    .skip(((page - 1) * limit) as usize)
                    .take(limit as usize)
                    .cloned()
                    .collect();
                assert_eq!(result.items, expected, "page={} limit={}", page, limit);
                assert!(result.items.len() as u64 <= limit);
            }
        }
    }

    #[tokio::test]
    async fn empty_filter_result() {
        let table = twenty_five();
        let page = paginate(
            &table,
            PageQuery::new(PageRequest::new(1, 10)).filter(in_org(99)),
        )
        .await
        .unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.total, 0);
    }

    #[tokio::test]
    async fn partial_last_page() {
        let table = MemoryTable::new();
        for i in 0..23 {
            table.insert(Officer {
                name: format!("officer-{:02}", i),
                organization_id: 1,
            });
        }
        let page = paginate(&table, PageQuery::new(PageRequest::new(3, 10)))
            .await
            .unwrap();
        assert_eq!(page.items.len(), 3);
        assert_eq!(page.total, 23);
    }

    #[tokio::test]
    async fn offset_beyond_range_keeps_true_total() {
        let table = MemoryTable::new();
        for i in 0..5 {
            table.insert(Officer {
                name: format!("officer-{}", i),
                organization_id: 1,
            });
        }
        let page = paginate(&table, PageQuery::new(PageRequest::new(5, 10)))
            .await
            .unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.total, 5);
    }

    #[tokio::test]
    async fn smallest_page_is_fine() {
        let table = twenty_five();
        let page = paginate(&table, PageQuery::new(PageRequest::new(1, 1)))
            .await
            .unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.total, 25);
    }

    #[tokio::test]
    async fn unordered_query_keeps_insertion_order() {
        let table = twenty_five();
        let page = paginate(&table, PageQuery::new(PageRequest::new(1, 3)))
            .await
            .unwrap();
        assert_eq!(
            names(&page),
            vec!["officer-25", "officer-24", "officer-23"]
        );
    }

    #[tokio::test]
    async fn secondary_order_breaks_ties() {
        let table = MemoryTable::new();
        for (name, org) in [("b", 1), ("a", 2), ("a", 1), ("b", 2)] {
            table.insert(Officer {
                name: name.to_string(),
                organization_id: org,
            });
        }
        let by_org_desc: RowOrder<Officer> =
            Arc::new(|a: &Officer, b: &Officer| b.organization_id.cmp(&a.organization_id));

        let page = paginate(
            &table,
            PageQuery::new(PageRequest::new(1, 10))
                .order_by(by_name())
                .order_by(by_org_desc),
        )
        .await
        .unwrap();

        let keys: Vec<(String, i32)> = page
            .items
            .into_iter()
            .map(|o| (o.name, o.organization_id))
            .collect();
        assert_eq!(
            keys,
            vec![
                ("a".to_string(), 2),
                ("a".to_string(), 1),
                ("b".to_string(), 2),
                ("b".to_string(), 1)
            ]
        );
    }

    /// Source whose count query always fails.
    struct BrokenCount;

    #[async_trait]
    impl PageSource for BrokenCount {
        type Row = u32;
        type Filter = ();
        type Order = ();
        type Error = String;

        async fn fetch(
            &self,
            _filter: Option<&()>,
            _order_by: &[()],
            _limit: u64,
            _offset: u64,
        ) -> Result<Vec<u32>, String> {
            Ok(vec![1, 2, 3])
        }

        async fn count(&self, _filter: Option<&()>) -> Result<u64, String> {
            Err("connection reset".to_string())
        }
    }

    #[tokio::test]
    async fn sub_query_errors_propagate_unchanged() {
        let err = paginate(&BrokenCount, PageQuery::new(PageRequest::default()))
            .await
            .unwrap_err();
        assert_eq!(err, "connection reset");
    }

    /// Source whose fetch and count each wait for the other to start.
    struct Rendezvous {
        barrier: Barrier,
    }

    #[async_trait]
    impl PageSource for Rendezvous {
        type Row = u32;
        type Filter = u32;
        type Order = ();
        type Error = String;

        async fn fetch(
            &self,
            filter: Option<&u32>,
            _order_by: &[()],
            _limit: u64,
            _offset: u64,
        ) -> Result<Vec<u32>, String> {
            self.barrier.wait().await;
            Ok(filter.copied().into_iter().collect())
        }

        async fn count(&self, filter: Option<&u32>) -> Result<u64, String> {
            self.barrier.wait().await;
            Ok(filter.map_or(0, |_| 1))
        }
    }

    #[tokio::test]
    async fn fetch_and_count_run_concurrently() {
        let source = Rendezvous {
            barrier: Barrier::new(2),
        };

        let page = tokio::time::timeout(
            Duration::from_secs(2),
            paginate(&source, PageQuery::new(PageRequest::default()).filter(7)),
        )
        .await
        .expect("sub-queries were not issued concurrently")
        .unwrap();

        assert_eq!(page.items, vec![7]);
        assert_eq!(page.total, 1);
    }

    #[test]
    fn builder_collects_orders() {
        let query: PageQuery<(), Ordering> = PageQuery::new(PageRequest::default())
            .order_by(Ordering::Less)
            .order_by(Ordering::Greater);
        assert_eq!(query.order_by.len(), 2);
        assert!(query.filter.is_none());
    }
}
