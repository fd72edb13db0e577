//! SeaORM-backed [`PageSource`]

use std::marker::PhantomData;

use async_trait::async_trait;
use sea_orm::{
    Condition, DatabaseConnection, DbErr, EntityTrait, Order, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Select,
};

use crate::shared::PageSource;

/// Any SeaORM entity read through a shared connection pool.
///
/// The filter is a [`Condition`]; sort keys are `(column, direction)` pairs.
pub struct EntityTable<E> {
    db: DatabaseConnection,
    _entity: PhantomData<E>,
}

impl<E: EntityTrait> EntityTable<E> {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            _entity: PhantomData,
        }
    }

    /// Base select shared by the data and the count query.
    fn filtered(filter: Option<&Condition>) -> Select<E> {
        match filter {
            Some(condition) => E::find().filter(condition.clone()),
            None => E::find(),
        }
    }
}

#[async_trait]
impl<E> PageSource for EntityTable<E>
where
    E: EntityTrait,
    E::Model: Send + Sync,
{
    type Row = E::Model;
    type Filter = Condition;
    type Order = (E::Column, Order);
    type Error = DbErr;

    async fn fetch(
        &self,
        filter: Option<&Condition>,
        order_by: &[(E::Column, Order)],
        limit: u64,
        offset: u64,
    ) -> Result<Vec<E::Model>, DbErr> {
        let mut query = Self::filtered(filter);
        for (column, order) in order_by {
            query = query.order_by(*column, order.clone());
        }
        query.offset(offset).limit(limit).all(&self.db).await
    }

    async fn count(&self, filter: Option<&Condition>) -> Result<u64, DbErr> {
        Self::filtered(filter).count(&self.db).await
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use sea_orm::{ActiveModelTrait, ColumnTrait, Set};

    use super::*;
    use crate::infrastructure::database::entities::{organization, police_officer};
    use crate::infrastructure::database::test_support::migrated_db;
    use crate::shared::{paginate, PageQuery, PageRequest};

    async fn seed_organizations(db: &DatabaseConnection, count: usize) {
        // inserted in reverse name order so ordering is observable
        for n in (1..=count).rev() {
            organization::ActiveModel {
                name: Set(format!("Org {:02}", n)),
                created_at: Set(Utc::now()),
                ..Default::default()
            }
            .insert(db)
            .await
            .unwrap();
        }
    }

    fn by_name() -> (organization::Column, Order) {
        (organization::Column::Name, Order::Asc)
    }

    #[tokio::test]
    async fn pages_are_ordered_slices_with_true_total() {
        let db = migrated_db().await;
        seed_organizations(&db, 25).await;
        let table = EntityTable::<organization::Entity>::new(db);

        let first = paginate(
            &table,
            PageQuery::new(PageRequest::new(1, 10)).order_by(by_name()),
        )
        .await
        .unwrap();
        assert_eq!(first.total, 25);
        assert_eq!(first.items.len(), 10);
        assert_eq!(first.items[0].name, "Org 01");
        assert_eq!(first.items[9].name, "Org 10");

        let third = paginate(
            &table,
            PageQuery::new(PageRequest::new(3, 10)).order_by(by_name()),
        )
        .await
        .unwrap();
        let names: Vec<&str> = third.items.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["Org 21", "Org 22", "Org 23", "Org 24", "Org 25"]);
        assert_eq!(third.total, 25);

        let fourth = paginate(
            &table,
            PageQuery::new(PageRequest::new(4, 10)).order_by(by_name()),
        )
        .await
        .unwrap();
        assert!(fourth.items.is_empty());
        assert_eq!(fourth.total, 25);
    }

    #[tokio::test]
    async fn condition_restricts_items_and_total() {
        let db = migrated_db().await;
        seed_organizations(&db, 2).await;

        let now = Utc::now();
        for i in 0..10 {
            police_officer::ActiveModel {
                first_name: Set(Some(format!("Officer {}", i))),
                organization_id: Set(Some(if i < 4 { 1 } else { 2 })),
                verification_status: Set(police_officer::VerificationStatus::Unverified),
                created_at: Set(now + Duration::seconds(i)),
                ..Default::default()
            }
            .insert(&db)
            .await
            .unwrap();
        }

        let table = EntityTable::<police_officer::Entity>::new(db);
        let filter = Condition::all().add(police_officer::Column::OrganizationId.eq(1));

        let page = paginate(
            &table,
            PageQuery::new(PageRequest::new(1, 10))
                .filter(filter.clone())
                .order_by((police_officer::Column::CreatedAt, Order::Desc)),
        )
        .await
        .unwrap();

        assert_eq!(page.items.len(), 4);
        assert_eq!(page.total, 4);
        assert!(page.items.iter().all(|o| o.organization_id == Some(1)));
        assert_eq!(page.items[0].first_name.as_deref(), Some("Officer 3"));

        let scanned = table.fetch(Some(&filter), &[], u64::MAX >> 1, 0).await.unwrap();
        assert_eq!(scanned.len() as u64, table.count(Some(&filter)).await.unwrap());
    }

    #[tokio::test]
    async fn empty_table_yields_empty_page() {
        let db = migrated_db().await;
        let table = EntityTable::<organization::Entity>::new(db);

        let page = paginate(&table, PageQuery::new(PageRequest::new(1, 1)))
            .await
            .unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.total, 0);
    }

    #[tokio::test]
    async fn storage_errors_surface_from_the_helper() {
        let db = migrated_db().await;
        db.close_by_ref().await.unwrap();
        let table = EntityTable::<organization::Entity>::new(db);

        let result = paginate(&table, PageQuery::new(PageRequest::default())).await;
        assert!(result.is_err());
    }
}
