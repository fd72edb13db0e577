//! Police officer DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::domain::{
    CreatePoliceOfficerDto, PageRequest, PoliceOfficer, PoliceOfficerDetail,
    UpdatePoliceOfficerDto, VerificationStatus,
};
use crate::interfaces::http::common::double_option;
use crate::shared::validate_pagination;

/// Police officer API representation
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PoliceOfficerDto {
    pub id: i32,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub badge_number: Option<String>,
    pub rank: Option<String>,
    pub organization_id: Option<i32>,
    /// Present on single-officer reads
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_name: Option<String>,
    /// confirmed, suspected or unverified
    pub verification_status: String,
    pub estimated_dob: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<PoliceOfficer> for PoliceOfficerDto {
    fn from(o: PoliceOfficer) -> Self {
        Self {
            id: o.id,
            first_name: o.first_name,
            last_name: o.last_name,
            badge_number: o.badge_number,
            rank: o.rank,
            organization_id: o.organization_id,
            organization_name: None,
            verification_status: o.verification_status.as_str().to_string(),
            estimated_dob: o.estimated_dob,
            created_at: o.created_at,
        }
    }
}

impl From<PoliceOfficerDetail> for PoliceOfficerDto {
    fn from(detail: PoliceOfficerDetail) -> Self {
        Self {
            organization_name: detail.organization_name,
            ..Self::from(detail.officer)
        }
    }
}

fn parse_status(status: Option<String>) -> Result<Option<VerificationStatus>, String> {
    status
        .map(|s| {
            VerificationStatus::parse(&s).ok_or_else(|| {
                format!(
                    "Invalid verification_status '{}': expected confirmed, suspected or unverified",
                    s
                )
            })
        })
        .transpose()
}

/// Create police officer request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreatePoliceOfficerRequest {
    #[validate(length(max = 100))]
    pub first_name: Option<String>,
    #[validate(length(max = 100))]
    pub last_name: Option<String>,
    #[validate(length(max = 50))]
    pub badge_number: Option<String>,
    pub rank: Option<String>,
    /// Must reference an existing organization
    pub organization_id: Option<i32>,
    /// Defaults to unverified
    pub verification_status: Option<String>,
    pub estimated_dob: Option<String>,
}

impl TryFrom<CreatePoliceOfficerRequest> for CreatePoliceOfficerDto {
    type Error = String;

    fn try_from(r: CreatePoliceOfficerRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            first_name: r.first_name,
            last_name: r.last_name,
            badge_number: r.badge_number,
            rank: r.rank,
            organization_id: r.organization_id,
            verification_status: parse_status(r.verification_status)?,
            estimated_dob: r.estimated_dob,
        })
    }
}

/// Partial update. Omitted fields are unchanged; `null` clears a field.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdatePoliceOfficerRequest {
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub first_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub last_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub badge_number: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub rank: Option<Option<String>>,
    /// `null` detaches the officer from its organization
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<i32>)]
    pub organization_id: Option<Option<i32>>,
    pub verification_status: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub estimated_dob: Option<Option<String>>,
}

impl TryFrom<UpdatePoliceOfficerRequest> for UpdatePoliceOfficerDto {
    type Error = String;

    fn try_from(r: UpdatePoliceOfficerRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            first_name: r.first_name,
            last_name: r.last_name,
            badge_number: r.badge_number,
            rank: r.rank,
            organization_id: r.organization_id,
            verification_status: parse_status(r.verification_status)?,
            estimated_dob: r.estimated_dob,
        })
    }
}

/// List police officers query parameters
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListPoliceOfficersParams {
    /// Page number, starting at 1 (default 1)
    pub page: Option<u64>,
    /// Page size, 1 to 100 (default 10)
    pub limit: Option<u64>,
    /// Only officers of this organization
    pub organization_id: Option<i32>,
}

impl ListPoliceOfficersParams {
    pub fn page_request(&self) -> PageRequest {
        validate_pagination(self.page, self.limit)
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PoliceOfficerFilterParams {
    /// Only officers of this organization
    pub organization_id: Option<i32>,
}
