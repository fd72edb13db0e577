//! Police officer API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::dto::{
    CreatePoliceOfficerRequest, ListPoliceOfficersParams, PoliceOfficerDto,
    PoliceOfficerFilterParams, UpdatePoliceOfficerRequest,
};
use crate::application::PoliceOfficerService;
use crate::domain::{CreatePoliceOfficerDto, UpdatePoliceOfficerDto};
use crate::infrastructure::database::repositories::PoliceOfficerRepository;
use crate::interfaces::http::common::{
    bad_request, domain_error, ApiError, ApiResponse, ApiResult, PaginatedResponse,
    ValidatedJson,
};

#[derive(Clone)]
pub struct PoliceOfficerHandlerState {
    pub officer_service: Arc<PoliceOfficerService<PoliceOfficerRepository>>,
}

#[utoipa::path(
    get,
    path = "/api/v1/police-officers",
    tag = "Police Officers",
    params(ListPoliceOfficersParams),
    responses(
        (status = 200, description = "Officers, newest first", body = ApiResponse<PaginatedResponse<PoliceOfficerDto>>)
    )
)]
pub async fn list_police_officers(
    State(state): State<PoliceOfficerHandlerState>,
    Query(params): Query<ListPoliceOfficersParams>,
) -> ApiResult<PaginatedResponse<PoliceOfficerDto>> {
    let page = state
        .officer_service
        .list(params.page_request(), params.organization_id)
        .await
        .map_err(domain_error)?;

    Ok(Json(ApiResponse::success(PaginatedResponse::from_page(page))))
}

#[utoipa::path(
    get,
    path = "/api/v1/police-officers/all",
    tag = "Police Officers",
    params(PoliceOfficerFilterParams),
    responses(
        (status = 200, description = "Every officer ordered by first name", body = ApiResponse<Vec<PoliceOfficerDto>>)
    )
)]
pub async fn list_all_police_officers(
    State(state): State<PoliceOfficerHandlerState>,
    Query(params): Query<PoliceOfficerFilterParams>,
) -> ApiResult<Vec<PoliceOfficerDto>> {
    let officers = state
        .officer_service
        .list_all(params.organization_id)
        .await
        .map_err(domain_error)?;

    Ok(Json(ApiResponse::success(
        officers.into_iter().map(PoliceOfficerDto::from).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/police-officers/{id}",
    tag = "Police Officers",
    params(("id" = i32, Path, description = "Police officer ID")),
    responses(
        (status = 200, description = "Officer with organization name", body = ApiResponse<PoliceOfficerDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_police_officer(
    State(state): State<PoliceOfficerHandlerState>,
    Path(id): Path<i32>,
) -> ApiResult<PoliceOfficerDto> {
    let detail = state.officer_service.get(id).await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(detail.into())))
}

#[utoipa::path(
    post,
    path = "/api/v1/police-officers",
    tag = "Police Officers",
    request_body = CreatePoliceOfficerRequest,
    responses(
        (status = 201, description = "Officer created", body = ApiResponse<PoliceOfficerDto>),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Organization not found")
    )
)]
pub async fn create_police_officer(
    State(state): State<PoliceOfficerHandlerState>,
    ValidatedJson(request): ValidatedJson<CreatePoliceOfficerRequest>,
) -> Result<(StatusCode, Json<ApiResponse<PoliceOfficerDto>>), ApiError> {
    let dto = CreatePoliceOfficerDto::try_from(request).map_err(bad_request)?;

    let officer = state
        .officer_service
        .create(dto)
        .await
        .map_err(domain_error)?;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(officer.into()))))
}

#[utoipa::path(
    put,
    path = "/api/v1/police-officers/{id}",
    tag = "Police Officers",
    params(("id" = i32, Path, description = "Police officer ID")),
    request_body = UpdatePoliceOfficerRequest,
    responses(
        (status = 200, description = "Officer updated", body = ApiResponse<PoliceOfficerDto>),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Officer or organization not found")
    )
)]
pub async fn update_police_officer(
    State(state): State<PoliceOfficerHandlerState>,
    Path(id): Path<i32>,
    ValidatedJson(request): ValidatedJson<UpdatePoliceOfficerRequest>,
) -> ApiResult<PoliceOfficerDto> {
    let dto = UpdatePoliceOfficerDto::try_from(request).map_err(bad_request)?;

    let officer = state
        .officer_service
        .update(id, dto)
        .await
        .map_err(domain_error)?;

    Ok(Json(ApiResponse::success(officer.into())))
}

#[utoipa::path(
    delete,
    path = "/api/v1/police-officers/{id}",
    tag = "Police Officers",
    params(("id" = i32, Path, description = "Police officer ID")),
    responses(
        (status = 200, description = "Officer deleted"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_police_officer(
    State(state): State<PoliceOfficerHandlerState>,
    Path(id): Path<i32>,
) -> ApiResult<()> {
    state
        .officer_service
        .delete(id)
        .await
        .map_err(domain_error)?;

    Ok(Json(ApiResponse::success(())))
}
