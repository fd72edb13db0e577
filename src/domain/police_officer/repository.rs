use async_trait::async_trait;

use super::{CreatePoliceOfficerDto, PoliceOfficer, PoliceOfficerDetail, UpdatePoliceOfficerDto};
use crate::domain::{DomainResult, PageRequest, PageResult};

#[async_trait]
pub trait PoliceOfficerRepositoryInterface: Send + Sync {
    async fn create_police_officer(&self, dto: CreatePoliceOfficerDto)
        -> DomainResult<PoliceOfficer>;

    /// One page, newest first, optionally restricted to one organization.
    async fn list_police_officers(
        &self,
        page: PageRequest,
        organization_id: Option<i32>,
    ) -> DomainResult<PageResult<PoliceOfficer>>;
    /// Every officer ordered by first name, optionally restricted to one organization.
    async fn list_all_police_officers(
        &self,
        organization_id: Option<i32>,
    ) -> DomainResult<Vec<PoliceOfficer>>;
    async fn get_police_officer_by_id(&self, id: i32)
        -> DomainResult<Option<PoliceOfficerDetail>>;

    async fn update_police_officer(
        &self,
        id: i32,
        dto: UpdatePoliceOfficerDto,
    ) -> DomainResult<Option<PoliceOfficer>>;
    async fn delete_police_officer(&self, id: i32) -> DomainResult<()>;

    async fn organization_exists(&self, organization_id: i32) -> DomainResult<bool>;
}
