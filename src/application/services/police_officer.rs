use std::sync::Arc;

use tracing::info;

use crate::domain::{
    CreatePoliceOfficerDto, DomainError, DomainResult, PageRequest, PageResult, PoliceOfficer,
    PoliceOfficerDetail, PoliceOfficerRepositoryInterface, UpdatePoliceOfficerDto,
};
use crate::shared::{non_blank, patch_non_blank};

/// Police officer records, optionally attached to an organization.
pub struct PoliceOfficerService<R: PoliceOfficerRepositoryInterface> {
    repo: Arc<R>,
}

impl<R: PoliceOfficerRepositoryInterface> PoliceOfficerService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn list(
        &self,
        page: PageRequest,
        organization_id: Option<i32>,
    ) -> DomainResult<PageResult<PoliceOfficer>> {
        self.repo.list_police_officers(page, organization_id).await
    }

    /// Officers of one organization; `NotFound` when the organization is unknown.
    pub async fn list_by_organization(
        &self,
        organization_id: i32,
        page: PageRequest,
    ) -> DomainResult<PageResult<PoliceOfficer>> {
        self.ensure_organization(organization_id).await?;
        self.repo
            .list_police_officers(page, Some(organization_id))
            .await
    }

    pub async fn list_all(&self, organization_id: Option<i32>) -> DomainResult<Vec<PoliceOfficer>> {
        self.repo.list_all_police_officers(organization_id).await
    }

    pub async fn get(&self, id: i32) -> DomainResult<PoliceOfficerDetail> {
        self.repo
            .get_police_officer_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("PoliceOfficer", id))
    }

    pub async fn create(&self, dto: CreatePoliceOfficerDto) -> DomainResult<PoliceOfficer> {
        if let Some(organization_id) = dto.organization_id {
            self.ensure_organization(organization_id).await?;
        }

        let officer = self
            .repo
            .create_police_officer(CreatePoliceOfficerDto {
                first_name: non_blank(dto.first_name),
                last_name: non_blank(dto.last_name),
                badge_number: non_blank(dto.badge_number),
                rank: non_blank(dto.rank),
                organization_id: dto.organization_id,
                verification_status: dto.verification_status,
                estimated_dob: non_blank(dto.estimated_dob),
            })
            .await?;

        info!(
            officer_id = officer.id,
            organization_id = ?officer.organization_id,
            "Police officer created"
        );
        Ok(officer)
    }

    pub async fn update(&self, id: i32, dto: UpdatePoliceOfficerDto) -> DomainResult<PoliceOfficer> {
        if let Some(Some(organization_id)) = dto.organization_id {
            self.ensure_organization(organization_id).await?;
        }

        let officer = self
            .repo
            .update_police_officer(
                id,
                UpdatePoliceOfficerDto {
                    first_name: patch_non_blank(dto.first_name),
                    last_name: patch_non_blank(dto.last_name),
                    badge_number: patch_non_blank(dto.badge_number),
                    rank: patch_non_blank(dto.rank),
                    organization_id: dto.organization_id,
                    verification_status: dto.verification_status,
                    estimated_dob: patch_non_blank(dto.estimated_dob),
                },
            )
            .await?
            .ok_or_else(|| DomainError::not_found("PoliceOfficer", id))?;

        info!(officer_id = id, "Police officer updated");
        Ok(officer)
    }

    pub async fn delete(&self, id: i32) -> DomainResult<()> {
        self.repo.delete_police_officer(id).await?;
        info!(officer_id = id, "Police officer deleted");
        Ok(())
    }

    async fn ensure_organization(&self, organization_id: i32) -> DomainResult<()> {
        if self.repo.organization_exists(organization_id).await? {
            Ok(())
        } else {
            Err(DomainError::not_found("Organization", organization_id))
        }
    }
}
