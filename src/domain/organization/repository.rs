use async_trait::async_trait;

use super::{NewOrganization, Organization, OrganizationChanges};
use crate::domain::{DomainResult, PageRequest, PageResult};

#[async_trait]
pub trait OrganizationRepositoryInterface: Send + Sync {
    async fn create_organization(&self, new: NewOrganization) -> DomainResult<Organization>;

    /// One page ordered by name.
    async fn list_organizations(&self, page: PageRequest)
        -> DomainResult<PageResult<Organization>>;
    /// Every organization ordered by name.
    async fn list_all_organizations(&self) -> DomainResult<Vec<Organization>>;
    async fn get_organization_by_id(&self, id: i32) -> DomainResult<Option<Organization>>;

    async fn update_organization(
        &self,
        id: i32,
        changes: OrganizationChanges,
    ) -> DomainResult<Option<Organization>>;
    async fn delete_organization(&self, id: i32) -> DomainResult<()>;
}
