//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{middleware, routing::get, Router};
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::common::{ApiResponse, PaginatedResponse, PaginationParams};
use super::modules::{health, organizations, police_officers, request_id, users};
use crate::application::{
    OrganizationService, PoliceOfficerService, SharedGeocoder, UserService,
};
use crate::infrastructure::database::repositories::{
    OrganizationRepository, PoliceOfficerRepository, UserRepository,
};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::health_check,
        // Organizations
        organizations::list_organizations,
        organizations::list_all_organizations,
        organizations::get_organization,
        organizations::create_organization,
        organizations::update_organization,
        organizations::delete_organization,
        organizations::list_organization_officers,
        // Police officers
        police_officers::list_police_officers,
        police_officers::list_all_police_officers,
        police_officers::get_police_officer,
        police_officers::create_police_officer,
        police_officers::update_police_officer,
        police_officers::delete_police_officer,
        // Users
        users::list_users,
        users::get_user,
        users::create_user,
        users::update_user,
        users::delete_user,
    ),
    components(
        schemas(
            // Common
            ApiResponse<String>,
            PaginationParams,
            PaginatedResponse<organizations::OrganizationDto>,
            PaginatedResponse<police_officers::PoliceOfficerDto>,
            PaginatedResponse<users::UserDto>,
            // Health
            health::HealthResponse,
            health::ComponentHealth,
            // Organizations
            organizations::OrganizationDto,
            organizations::CreateOrganizationRequest,
            organizations::UpdateOrganizationRequest,
            // Police officers
            police_officers::PoliceOfficerDto,
            police_officers::CreatePoliceOfficerRequest,
            police_officers::UpdatePoliceOfficerRequest,
            // Users
            users::UserDto,
            users::CreateUserRequest,
            users::UpdateUserRequest,
        )
    ),
    tags(
        (name = "Health", description = "Server health check endpoints"),
        (name = "Organizations", description = "Police organizations, with geocoded addresses"),
        (name = "Police Officers", description = "Officer records and their organization"),
        (name = "Users", description = "User records"),
    ),
    info(
        title = "CopShop Records API",
        version = "1.0.0",
        description = "Record management for organizations, police officers and users",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(db: DatabaseConnection, geocoder: SharedGeocoder) -> Router {
    let organization_service = Arc::new(OrganizationService::new(
        Arc::new(OrganizationRepository::new(db.clone())),
        geocoder,
    ));
    let officer_service = Arc::new(PoliceOfficerService::new(Arc::new(
        PoliceOfficerRepository::new(db.clone()),
    )));
    let user_service = Arc::new(UserService::new(Arc::new(UserRepository::new(db.clone()))));

    let organization_routes = Router::new()
        .route(
            "/",
            get(organizations::list_organizations).post(organizations::create_organization),
        )
        .route("/all", get(organizations::list_all_organizations))
        .route(
            "/{id}",
            get(organizations::get_organization)
                .put(organizations::update_organization)
                .delete(organizations::delete_organization),
        )
        .route(
            "/{id}/police-officers",
            get(organizations::list_organization_officers),
        )
        .with_state(organizations::OrganizationHandlerState {
            organization_service,
            officer_service: officer_service.clone(),
        });

    let officer_routes = Router::new()
        .route(
            "/",
            get(police_officers::list_police_officers)
                .post(police_officers::create_police_officer),
        )
        .route("/all", get(police_officers::list_all_police_officers))
        .route(
            "/{id}",
            get(police_officers::get_police_officer)
                .put(police_officers::update_police_officer)
                .delete(police_officers::delete_police_officer),
        )
        .with_state(police_officers::PoliceOfficerHandlerState { officer_service });

    let user_routes = Router::new()
        .route("/", get(users::list_users).post(users::create_user))
        .route(
            "/{id}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .with_state(users::UserHandlerState { user_service });

    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .with_state(health::HealthState {
            db,
            started_at: Arc::new(Instant::now()),
        });

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(swagger_routes)
        .merge(health_routes)
        .nest("/api/v1/organizations", organization_routes)
        .nest("/api/v1/police-officers", officer_routes)
        .nest("/api/v1/users", user_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id::request_id_middleware))
}
