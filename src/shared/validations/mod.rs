use validator::ValidateEmail;

use crate::shared::{DomainError, DomainResult, PageRequest, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};

/// Apply the page defaults and bounds shared by every list endpoint:
/// `page >= 1`, `limit` defaults to 10 and is clamped to `[1, 100]`.
pub fn validate_pagination(page: Option<u64>, limit: Option<u64>) -> PageRequest {
    let page = page.unwrap_or(1).max(1);
    let limit = limit
        .unwrap_or(DEFAULT_PAGE_LIMIT)
        .clamp(1, MAX_PAGE_LIMIT);
    PageRequest::new(page, limit)
}

/// Trim, treating blank strings as absent values.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// [`non_blank`] for a partial-update field: absent stays absent,
/// blank becomes an explicit clear.
pub fn patch_non_blank(value: Option<Option<String>>) -> Option<Option<String>> {
    value.map(non_blank)
}

/// Trimmed value of a mandatory text field.
pub fn require_non_blank(field: &str, value: &str) -> DomainResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(DomainError::Validation(format!("{} is required", field)));
    }
    Ok(value.to_string())
}

pub fn require_email(email: &str) -> DomainResult<()> {
    if email.validate_email() {
        Ok(())
    } else {
        Err(DomainError::Validation(format!(
            "Invalid email address: {}",
            email
        )))
    }
}
