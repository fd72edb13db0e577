//! Organization API handlers
//!
//! Thin wrappers over `OrganizationService`.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::dto::{CreateOrganizationRequest, OrganizationDto, UpdateOrganizationRequest};
use crate::application::{OrganizationService, PoliceOfficerService};
use crate::infrastructure::database::repositories::{
    OrganizationRepository, PoliceOfficerRepository,
};
use crate::interfaces::http::common::{
    domain_error, not_found, ApiError, ApiResponse, ApiResult, PaginatedResponse,
    PaginationParams, ValidatedJson,
};
use crate::interfaces::http::modules::police_officers::PoliceOfficerDto;

/// Organization handler state, concrete over the SeaORM repositories.
#[derive(Clone)]
pub struct OrganizationHandlerState {
    pub organization_service: Arc<OrganizationService<OrganizationRepository>>,
    pub officer_service: Arc<PoliceOfficerService<PoliceOfficerRepository>>,
}

#[utoipa::path(
    get,
    path = "/api/v1/organizations",
    tag = "Organizations",
    params(PaginationParams),
    responses(
        (status = 200, description = "Organizations ordered by name", body = ApiResponse<PaginatedResponse<OrganizationDto>>)
    )
)]
pub async fn list_organizations(
    State(state): State<OrganizationHandlerState>,
    Query(params): Query<PaginationParams>,
) -> ApiResult<PaginatedResponse<OrganizationDto>> {
    let page = state
        .organization_service
        .list(params.page_request())
        .await
        .map_err(domain_error)?;

    Ok(Json(ApiResponse::success(PaginatedResponse::from_page(page))))
}

#[utoipa::path(
    get,
    path = "/api/v1/organizations/all",
    tag = "Organizations",
    responses(
        (status = 200, description = "Every organization ordered by name", body = ApiResponse<Vec<OrganizationDto>>)
    )
)]
pub async fn list_all_organizations(
    State(state): State<OrganizationHandlerState>,
) -> ApiResult<Vec<OrganizationDto>> {
    let organizations = state
        .organization_service
        .list_all()
        .await
        .map_err(domain_error)?;

    Ok(Json(ApiResponse::success(
        organizations.into_iter().map(OrganizationDto::from).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/organizations/{id}",
    tag = "Organizations",
    params(("id" = i32, Path, description = "Organization ID")),
    responses(
        (status = 200, description = "Organization details", body = ApiResponse<OrganizationDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_organization(
    State(state): State<OrganizationHandlerState>,
    Path(id): Path<i32>,
) -> ApiResult<OrganizationDto> {
    match state.organization_service.get(id).await {
        Ok(Some(organization)) => Ok(Json(ApiResponse::success(organization.into()))),
        Ok(None) => Err(not_found(format!("Organization '{}' not found", id))),
        Err(e) => Err(domain_error(e)),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/organizations",
    tag = "Organizations",
    request_body = CreateOrganizationRequest,
    responses(
        (status = 201, description = "Organization created", body = ApiResponse<OrganizationDto>),
        (status = 400, description = "Invalid input"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn create_organization(
    State(state): State<OrganizationHandlerState>,
    ValidatedJson(request): ValidatedJson<CreateOrganizationRequest>,
) -> Result<(StatusCode, Json<ApiResponse<OrganizationDto>>), ApiError> {
    let organization = state
        .organization_service
        .create(request.into())
        .await
        .map_err(domain_error)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(organization.into())),
    ))
}

#[utoipa::path(
    put,
    path = "/api/v1/organizations/{id}",
    tag = "Organizations",
    params(("id" = i32, Path, description = "Organization ID")),
    request_body = UpdateOrganizationRequest,
    responses(
        (status = 200, description = "Organization updated", body = ApiResponse<OrganizationDto>),
        (status = 404, description = "Not found"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn update_organization(
    State(state): State<OrganizationHandlerState>,
    Path(id): Path<i32>,
    ValidatedJson(request): ValidatedJson<UpdateOrganizationRequest>,
) -> ApiResult<OrganizationDto> {
    let organization = state
        .organization_service
        .update(id, request.into())
        .await
        .map_err(domain_error)?;

    Ok(Json(ApiResponse::success(organization.into())))
}

#[utoipa::path(
    delete,
    path = "/api/v1/organizations/{id}",
    tag = "Organizations",
    params(("id" = i32, Path, description = "Organization ID")),
    responses(
        (status = 200, description = "Organization deleted, its officers detached"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_organization(
    State(state): State<OrganizationHandlerState>,
    Path(id): Path<i32>,
) -> ApiResult<()> {
    state
        .organization_service
        .delete(id)
        .await
        .map_err(domain_error)?;

    Ok(Json(ApiResponse::success(())))
}

#[utoipa::path(
    get,
    path = "/api/v1/organizations/{id}/police-officers",
    tag = "Organizations",
    params(("id" = i32, Path, description = "Organization ID"), PaginationParams),
    responses(
        (status = 200, description = "Officers of the organization, newest first", body = ApiResponse<PaginatedResponse<PoliceOfficerDto>>),
        (status = 404, description = "Organization not found")
    )
)]
pub async fn list_organization_officers(
    State(state): State<OrganizationHandlerState>,
    Path(id): Path<i32>,
    Query(params): Query<PaginationParams>,
) -> ApiResult<PaginatedResponse<PoliceOfficerDto>> {
    let page = state
        .officer_service
        .list_by_organization(id, params.page_request())
        .await
        .map_err(domain_error)?;

    Ok(Json(ApiResponse::success(PaginatedResponse::from_page(page))))
}
