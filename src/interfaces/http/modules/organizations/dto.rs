//! Organization DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidateEmail, ValidationError};

use crate::domain::{CreateOrganizationDto, Organization, UpdateOrganizationDto};
use crate::interfaces::http::common::double_option;

/// Organization API representation
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrganizationDto {
    pub id: i32,
    pub name: String,
    pub address: Option<String>,
    pub email: Option<String>,
    pub contact_number: Option<String>,
    /// Decimal degrees as returned by the geocoder
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Organization> for OrganizationDto {
    fn from(o: Organization) -> Self {
        Self {
            id: o.id,
            name: o.name,
            address: o.address,
            email: o.email,
            contact_number: o.contact_number,
            latitude: o.latitude,
            longitude: o.longitude,
            created_at: o.created_at,
        }
    }
}

/// Blank means "no e-mail"; anything else must look like an address.
fn blank_or_email(value: &str) -> Result<(), ValidationError> {
    let value = value.trim();
    if value.is_empty() || value.validate_email() {
        Ok(())
    } else {
        Err(ValidationError::new("email"))
    }
}

/// Create organization request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateOrganizationRequest {
    #[validate(length(min = 1, max = 255, message = "must be 1-255 characters"))]
    pub name: String,
    /// Geocoded on create when non-blank
    pub address: Option<String>,
    #[validate(custom(function = "blank_or_email"))]
    pub email: Option<String>,
    pub contact_number: Option<String>,
}

impl From<CreateOrganizationRequest> for CreateOrganizationDto {
    fn from(r: CreateOrganizationRequest) -> Self {
        Self {
            name: r.name,
            address: r.address,
            email: r.email,
            contact_number: r.contact_number,
        }
    }
}

/// Partial update. Omitted fields are unchanged; `null` or `""` clears a field.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateOrganizationRequest {
    #[validate(length(min = 1, max = 255, message = "must be 1-255 characters"))]
    pub name: Option<String>,
    /// Clearing the address also clears latitude and longitude
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub address: Option<Option<String>>,
    /// Checked by the service once blanks are removed
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub email: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub contact_number: Option<Option<String>>,
}

impl From<UpdateOrganizationRequest> for UpdateOrganizationDto {
    fn from(r: UpdateOrganizationRequest) -> Self {
        Self {
            name: r.name,
            address: r.address,
            email: r.email,
            contact_number: r.contact_number,
        }
    }
}
