//! Organization management service
//!
//! Normalizes input, geocodes addresses and delegates persistence to the
//! repository. HTTP handlers are thin wrappers around this service.

use std::sync::Arc;

use tracing::{debug, info};

use crate::application::ports::SharedGeocoder;
use crate::domain::{
    CreateOrganizationDto, DomainError, DomainResult, NewOrganization, Organization,
    OrganizationChanges, OrganizationRepositoryInterface, PageRequest, PageResult,
    UpdateOrganizationDto,
};
use crate::shared::{non_blank, patch_non_blank, require_email, require_non_blank};

pub struct OrganizationService<R: OrganizationRepositoryInterface> {
    repo: Arc<R>,
    geocoder: SharedGeocoder,
}

impl<R: OrganizationRepositoryInterface> OrganizationService<R> {
    pub fn new(repo: Arc<R>, geocoder: SharedGeocoder) -> Self {
        Self { repo, geocoder }
    }

    pub async fn list(&self, page: PageRequest) -> DomainResult<PageResult<Organization>> {
        self.repo.list_organizations(page).await
    }

    pub async fn list_all(&self) -> DomainResult<Vec<Organization>> {
        self.repo.list_all_organizations().await
    }

    pub async fn get(&self, id: i32) -> DomainResult<Option<Organization>> {
        self.repo.get_organization_by_id(id).await
    }

    /// Create an organization, geocoding its address when one is given.
    pub async fn create(&self, dto: CreateOrganizationDto) -> DomainResult<Organization> {
        let name = require_non_blank("name", &dto.name)?;
        let email = non_blank(dto.email);
        if let Some(ref email) = email {
            require_email(email)?;
        }
        let address = non_blank(dto.address);

        let coordinates = match address {
            Some(ref address) => self.geocoder.geocode(address).await,
            None => None,
        };

        let organization = self
            .repo
            .create_organization(NewOrganization {
                name,
                address,
                email,
                contact_number: non_blank(dto.contact_number),
                coordinates,
            })
            .await?;

        info!(
            organization_id = organization.id,
            geocoded = organization.coordinates().is_some(),
            "Organization created"
        );
        Ok(organization)
    }

    /// Apply a partial update.
    ///
    /// Clearing the address also clears the coordinates; a changed address
    /// is geocoded again.
    pub async fn update(&self, id: i32, dto: UpdateOrganizationDto) -> DomainResult<Organization> {
        let existing = self
            .repo
            .get_organization_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Organization", id))?;

        let mut changes = OrganizationChanges::default();

        if let Some(name) = dto.name {
            changes.name = Some(require_non_blank("name", &name)?);
        }

        match patch_non_blank(dto.address) {
            None => {}
            Some(None) => {
                changes.address = Some(None);
                changes.coordinates = Some(None);
            }
            Some(Some(address)) if existing.address.as_deref() == Some(address.as_str()) => {
                debug!(organization_id = id, "Address unchanged, skipping geocoding");
            }
            Some(Some(address)) => {
                // Coordinates always describe the stored address, so a failed
                // lookup leaves none.
                changes.coordinates = Some(self.geocoder.geocode(&address).await);
                changes.address = Some(Some(address));
            }
        }

        if let Some(email) = patch_non_blank(dto.email) {
            if let Some(ref email) = email {
                require_email(email)?;
            }
            changes.email = Some(email);
        }
        changes.contact_number = patch_non_blank(dto.contact_number);

        let organization = self
            .repo
            .update_organization(id, changes)
            .await?
            .ok_or_else(|| DomainError::not_found("Organization", id))?;

        info!(organization_id = id, "Organization updated");
        Ok(organization)
    }

    pub async fn delete(&self, id: i32) -> DomainResult<()> {
        self.repo.delete_organization(id).await?;
        info!(organization_id = id, "Organization deleted");
        Ok(())
    }
}
