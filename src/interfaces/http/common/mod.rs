//! Shared HTTP types: response envelope, pagination and error mapping

pub mod validated_json;

pub use validated_json::ValidatedJson;

use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::error;
use utoipa::{IntoParams, ToSchema};

use crate::domain::{DomainError, PageRequest, PageResult};
use crate::shared::validate_pagination;

/// Standard API envelope.
///
/// Success: `{"success": true, "data": {...}}`,
/// failure: `{"success": false, "data": null, "error": "message"}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Error half of every handler result
pub type ApiError = (StatusCode, Json<ApiResponse<()>>);

pub type ApiResult<T> = Result<Json<ApiResponse<T>>, ApiError>;

/// Map a domain error onto its HTTP status.
pub fn domain_error(e: DomainError) -> ApiError {
    let status = match &e {
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::Validation(_) => StatusCode::BAD_REQUEST,
        DomainError::Conflict(_) => StatusCode::CONFLICT,
        DomainError::Storage(_) => {
            error!(error = %e, "Storage failure while handling request");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, Json(ApiResponse::error(e.to_string())))
}

pub fn not_found(message: impl Into<String>) -> ApiError {
    (StatusCode::NOT_FOUND, Json(ApiResponse::error(message)))
}

pub fn bad_request(message: impl Into<String>) -> ApiError {
    (StatusCode::BAD_REQUEST, Json(ApiResponse::error(message)))
}

/// Page query parameters
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct PaginationParams {
    /// Page number, starting at 1 (default 1)
    pub page: Option<u64>,
    /// Page size, 1 to 100 (default 10)
    pub limit: Option<u64>,
}

impl PaginationParams {
    pub fn page_request(&self) -> PageRequest {
        validate_pagination(self.page, self.limit)
    }
}

/// One page of results plus paging metadata
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    /// Number of matching rows across all pages
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
}

impl<T> PaginatedResponse<T> {
    pub fn from_page<D>(page: PageResult<D>) -> Self
    where
        T: From<D>,
    {
        let total_pages = page.total_pages();
        Self {
            items: page.items.into_iter().map(T::from).collect(),
            total: page.total,
            page: page.page,
            limit: page.limit,
            total_pages,
        }
    }
}

/// Deserializer for partial-update fields.
///
/// Use with `#[serde(default, deserialize_with = "double_option")]`: a missing
/// key stays `None`, an explicit `null` becomes `Some(None)`.
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "double_option")]
        address: Option<Option<String>>,
    }

    #[test]
    fn double_option_tells_missing_from_null() {
        let missing: Patch = serde_json::from_str("{}").unwrap();
        assert_eq!(missing.address, None);

        let null: Patch = serde_json::from_str(r#"{"address": null}"#).unwrap();
        assert_eq!(null.address, Some(None));

        let value: Patch = serde_json::from_str(r#"{"address": "1 Main St"}"#).unwrap();
        assert_eq!(value.address, Some(Some("1 Main St".to_string())));
    }

    #[test]
    fn paginated_response_carries_total_pages() {
        let page = PageResult::new(vec![1, 2, 3], 23, 3, 10);
        let response: PaginatedResponse<i64> = PaginatedResponse::from_page(page);
        assert_eq!(response.total_pages, 3);
        assert_eq!(response.items, vec![1, 2, 3]);
    }

    #[test]
    fn domain_errors_map_to_statuses() {
        assert_eq!(
            domain_error(DomainError::not_found("User", "x")).0,
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            domain_error(DomainError::Validation("bad".into())).0,
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            domain_error(DomainError::Conflict("dup".into())).0,
            StatusCode::CONFLICT
        );
        assert_eq!(
            domain_error(DomainError::Storage("down".into())).0,
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn params_are_clamped() {
        let params = PaginationParams {
            page: Some(0),
            limit: Some(500),
        };
        assert_eq!(params.page_request(), PageRequest::new(1, 100));
        assert_eq!(
            PaginationParams::default().page_request(),
            PageRequest::new(1, 10)
        );
    }
}
