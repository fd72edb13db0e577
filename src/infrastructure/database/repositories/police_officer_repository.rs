use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, Order,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};

use super::db_err;
use crate::domain::{
    CreatePoliceOfficerDto, DomainError, DomainResult, PageRequest, PageResult, PoliceOfficer,
    PoliceOfficerDetail, PoliceOfficerRepositoryInterface, UpdatePoliceOfficerDto,
    VerificationStatus,
};
use crate::infrastructure::database::entities::{organization, police_officer};
use crate::infrastructure::database::EntityTable;
use crate::shared::{paginate, PageQuery};

pub struct PoliceOfficerRepository {
    db: DatabaseConnection,
}

impl PoliceOfficerRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn entity_status_to_domain(status: police_officer::VerificationStatus) -> VerificationStatus {
    match status {
        police_officer::VerificationStatus::Confirmed => VerificationStatus::Confirmed,
        police_officer::VerificationStatus::Suspected => VerificationStatus::Suspected,
        police_officer::VerificationStatus::Unverified => VerificationStatus::Unverified,
    }
}

fn domain_status_to_entity(status: VerificationStatus) -> police_officer::VerificationStatus {
    match status {
        VerificationStatus::Confirmed => police_officer::VerificationStatus::Confirmed,
        VerificationStatus::Suspected => police_officer::VerificationStatus::Suspected,
        VerificationStatus::Unverified => police_officer::VerificationStatus::Unverified,
    }
}

fn officer_model_to_domain(model: police_officer::Model) -> PoliceOfficer {
    PoliceOfficer {
        id: model.id,
        first_name: model.first_name,
        last_name: model.last_name,
        badge_number: model.badge_number,
        rank: model.rank,
        organization_id: model.organization_id,
        verification_status: entity_status_to_domain(model.verification_status),
        estimated_dob: model.estimated_dob,
        created_at: model.created_at,
    }
}

fn organization_filter(organization_id: Option<i32>) -> Option<Condition> {
    organization_id
        .map(|id| Condition::all().add(police_officer::Column::OrganizationId.eq(id)))
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl PoliceOfficerRepositoryInterface for PoliceOfficerRepository {
    async fn create_police_officer(
        &self,
        dto: CreatePoliceOfficerDto,
    ) -> DomainResult<PoliceOfficer> {
        let status = dto.verification_status.unwrap_or_default();

        let model = police_officer::ActiveModel {
            first_name: Set(dto.first_name),
            last_name: Set(dto.last_name),
            badge_number: Set(dto.badge_number),
            rank: Set(dto.rank),
            organization_id: Set(dto.organization_id),
            verification_status: Set(domain_status_to_entity(status)),
            estimated_dob: Set(dto.estimated_dob),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(db_err)?;

        Ok(officer_model_to_domain(model))
    }

    async fn list_police_officers(
        &self,
        page: PageRequest,
        organization_id: Option<i32>,
    ) -> DomainResult<PageResult<PoliceOfficer>> {
        let table = EntityTable::<police_officer::Entity>::new(self.db.clone());
        let query = PageQuery::new(page)
            .filter_opt(organization_filter(organization_id))
            .order_by((police_officer::Column::CreatedAt, Order::Desc))
            .order_by((police_officer::Column::Id, Order::Desc));

        let result = paginate(&table, query).await.map_err(db_err)?;
        Ok(result.map(officer_model_to_domain))
    }

    async fn list_all_police_officers(
        &self,
        organization_id: Option<i32>,
    ) -> DomainResult<Vec<PoliceOfficer>> {
        let mut query = police_officer::Entity::find();
        if let Some(filter) = organization_filter(organization_id) {
            query = query.filter(filter);
        }

        let models = query
            .order_by_asc(police_officer::Column::FirstName)
            .order_by_asc(police_officer::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(models.into_iter().map(officer_model_to_domain).collect())
    }

    async fn get_police_officer_by_id(
        &self,
        id: i32,
    ) -> DomainResult<Option<PoliceOfficerDetail>> {
        let row = police_officer::Entity::find_by_id(id)
            .find_also_related(organization::Entity)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(row.map(|(officer, organization)| PoliceOfficerDetail {
            officer: officer_model_to_domain(officer),
            organization_name: organization.map(|o| o.name),
        }))
    }

    async fn update_police_officer(
        &self,
        id: i32,
        dto: UpdatePoliceOfficerDto,
    ) -> DomainResult<Option<PoliceOfficer>> {
        let existing = police_officer::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let Some(existing) = existing else {
            return Ok(None);
        };

        let mut active: police_officer::ActiveModel = existing.clone().into();

        if let Some(first_name) = dto.first_name {
            active.first_name = Set(first_name);
        }
        if let Some(last_name) = dto.last_name {
            active.last_name = Set(last_name);
        }
        if let Some(badge_number) = dto.badge_number {
            active.badge_number = Set(badge_number);
        }
        if let Some(rank) = dto.rank {
            active.rank = Set(rank);
        }
        if let Some(organization_id) = dto.organization_id {
            active.organization_id = Set(organization_id);
        }
        if let Some(status) = dto.verification_status {
            active.verification_status = Set(domain_status_to_entity(status));
        }
        if let Some(estimated_dob) = dto.estimated_dob {
            active.estimated_dob = Set(estimated_dob);
        }

        if !active.is_changed() {
            return Ok(Some(officer_model_to_domain(existing)));
        }

        let updated = active.update(&self.db).await.map_err(db_err)?;
        Ok(Some(officer_model_to_domain(updated)))
    }

    async fn delete_police_officer(&self, id: i32) -> DomainResult<()> {
        let result = police_officer::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        if result.rows_affected == 0 {
            return Err(DomainError::not_found("PoliceOfficer", id));
        }

        Ok(())
    }

    async fn organization_exists(&self, organization_id: i32) -> DomainResult<bool> {
        let count = organization::Entity::find_by_id(organization_id)
            .count(&self.db)
            .await
            .map_err(db_err)?;

        Ok(count > 0)
    }
}
