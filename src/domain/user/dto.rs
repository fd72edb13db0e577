use super::UserRole;

#[derive(Debug, Clone)]
pub struct CreateUserDto {
    pub username: Option<String>,
    pub name: String,
    pub email: String,
    pub role: Option<UserRole>,
    pub avatar: Option<String>,
}

/// Partial update of a user. `avatar: Some(None)` removes the avatar.
#[derive(Debug, Clone, Default)]
pub struct UpdateUserDto {
    pub username: Option<Option<String>>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<UserRole>,
    pub avatar: Option<Option<String>>,
}
