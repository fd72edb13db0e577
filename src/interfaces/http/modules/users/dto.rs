//! User DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::{CreateUserDto, UpdateUserDto, User, UserRole};
use crate::interfaces::http::common::double_option;

/// User API representation
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserDto {
    pub id: String,
    pub username: Option<String>,
    pub name: String,
    pub email: String,
    /// admin, moderator or contributor
    pub role: String,
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserDto {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            username: u.username,
            name: u.name,
            email: u.email,
            role: u.role.as_str().to_string(),
            avatar: u.avatar,
            created_at: u.created_at,
        }
    }
}

fn parse_role(role: Option<String>) -> Result<Option<UserRole>, String> {
    role.map(|r| {
        UserRole::parse(&r).ok_or_else(|| {
            format!(
                "Invalid role '{}': expected admin, moderator or contributor",
                r
            )
        })
    })
    .transpose()
}

/// Create user request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    #[validate(length(min = 3, max = 50, message = "must be 3-50 characters"))]
    pub username: Option<String>,
    #[validate(length(min = 1, max = 255, message = "must be 1-255 characters"))]
    pub name: String,
    #[validate(email(message = "must be a valid e-mail address"))]
    pub email: String,
    /// Defaults to contributor
    pub role: Option<String>,
    /// Path or URL of an already uploaded image
    pub avatar: Option<String>,
}

impl TryFrom<CreateUserRequest> for CreateUserDto {
    type Error = String;

    fn try_from(r: CreateUserRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            username: r.username,
            name: r.name,
            email: r.email,
            role: parse_role(r.role)?,
            avatar: r.avatar,
        })
    }
}

/// Partial update. Omitted fields are unchanged; `null` removes the
/// username or avatar.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateUserRequest {
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub username: Option<Option<String>>,
    #[validate(length(min = 1, max = 255, message = "must be 1-255 characters"))]
    pub name: Option<String>,
    #[validate(email(message = "must be a valid e-mail address"))]
    pub email: Option<String>,
    pub role: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub avatar: Option<Option<String>>,
}

impl TryFrom<UpdateUserRequest> for UpdateUserDto {
    type Error = String;

    fn try_from(r: UpdateUserRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            username: r.username,
            name: r.name,
            email: r.email,
            role: parse_role(r.role)?,
            avatar: r.avatar,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_names_are_checked() {
        let request: CreateUserRequest = serde_json::from_str(
            r#"{"name": "Ada", "email": "ada@example.com", "role": "viewer"}"#,
        )
        .unwrap();
        assert!(CreateUserDto::try_from(request).is_err());

        let request: UpdateUserRequest = serde_json::from_str(r#"{"role": "ADMIN"}"#).unwrap();
        let dto = UpdateUserDto::try_from(request).unwrap();
        assert_eq!(dto.role, Some(UserRole::Admin));
    }

    #[test]
    fn invalid_email_fails_validation() {
        let request: CreateUserRequest =
            serde_json::from_str(r#"{"name": "Ada", "email": "ada"}"#).unwrap();
        assert!(request.validate().is_err());
    }
}
