use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Order, QueryOrder, Set};

use super::db_err;
use crate::domain::{
    DomainError, DomainResult, NewOrganization, Organization, OrganizationChanges,
    OrganizationRepositoryInterface, PageRequest, PageResult,
};
use crate::infrastructure::database::entities::organization;
use crate::infrastructure::database::EntityTable;
use crate::shared::{paginate, PageQuery};

pub struct OrganizationRepository {
    db: DatabaseConnection,
}

impl OrganizationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn organization_model_to_domain(model: organization::Model) -> Organization {
    Organization {
        id: model.id,
        name: model.name,
        address: model.address,
        email: model.email,
        contact_number: model.contact_number,
        latitude: model.latitude,
        longitude: model.longitude,
        created_at: model.created_at,
    }
}

#[async_trait]
impl OrganizationRepositoryInterface for OrganizationRepository {
    async fn create_organization(&self, new: NewOrganization) -> DomainResult<Organization> {
        let (latitude, longitude) = match new.coordinates {
            Some(c) => (Some(c.latitude), Some(c.longitude)),
            None => (None, None),
        };

        let model = organization::ActiveModel {
            name: Set(new.name),
            address: Set(new.address),
            email: Set(new.email),
            contact_number: Set(new.contact_number),
            latitude: Set(latitude),
            longitude: Set(longitude),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(db_err)?;

        Ok(organization_model_to_domain(model))
    }

    async fn list_organizations(
        &self,
        page: PageRequest,
    ) -> DomainResult<PageResult<Organization>> {
        let table = EntityTable::<organization::Entity>::new(self.db.clone());
        let query = PageQuery::new(page)
            .order_by((organization::Column::Name, Order::Asc))
            .order_by((organization::Column::Id, Order::Asc));

        let result = paginate(&table, query).await.map_err(db_err)?;
        Ok(result.map(organization_model_to_domain))
    }

    async fn list_all_organizations(&self) -> DomainResult<Vec<Organization>> {
        let models = organization::Entity::find()
            .order_by_asc(organization::Column::Name)
            .order_by_asc(organization::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(models.into_iter().map(organization_model_to_domain).collect())
    }

    async fn get_organization_by_id(&self, id: i32) -> DomainResult<Option<Organization>> {
        let model = organization::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(organization_model_to_domain))
    }

    async fn update_organization(
        &self,
        id: i32,
        changes: OrganizationChanges,
    ) -> DomainResult<Option<Organization>> {
        let existing = organization::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let Some(existing) = existing else {
            return Ok(None);
        };

        if changes.is_empty() {
            return Ok(Some(organization_model_to_domain(existing)));
        }

        let mut active: organization::ActiveModel = existing.into();

        if let Some(name) = changes.name {
            active.name = Set(name);
        }
        if let Some(address) = changes.address {
            active.address = Set(address);
        }
        if let Some(email) = changes.email {
            active.email = Set(email);
        }
        if let Some(contact_number) = changes.contact_number {
            active.contact_number = Set(contact_number);
        }
        if let Some(coordinates) = changes.coordinates {
            let (latitude, longitude) = match coordinates {
                Some(c) => (Some(c.latitude), Some(c.longitude)),
                None => (None, None),
            };
            active.latitude = Set(latitude);
            active.longitude = Set(longitude);
        }

        let updated = active.update(&self.db).await.map_err(db_err)?;
        Ok(Some(organization_model_to_domain(updated)))
    }

    async fn delete_organization(&self, id: i32) -> DomainResult<()> {
        let result = organization::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Organization", id));
        }

        Ok(())
    }
}
