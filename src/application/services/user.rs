//! User management service
//!
//! Enforces e-mail uniqueness up front so callers get a `Conflict` naming
//! the address instead of a bare constraint violation.

use std::sync::Arc;

use tracing::info;

use crate::domain::{
    CreateUserDto, DomainError, DomainResult, PageRequest, PageResult, UpdateUserDto, User,
    UserRepositoryInterface,
};
use crate::shared::{non_blank, patch_non_blank, require_email, require_non_blank};

pub struct UserService<R: UserRepositoryInterface> {
    repo: Arc<R>,
}

impl<R: UserRepositoryInterface> UserService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn list(&self, page: PageRequest) -> DomainResult<PageResult<User>> {
        self.repo.list_users(page).await
    }

    pub async fn get(&self, id: &str) -> DomainResult<Option<User>> {
        self.repo.get_user_by_id(id).await
    }

    /// Create a user (default role: contributor).
    pub async fn create(&self, dto: CreateUserDto) -> DomainResult<User> {
        let name = require_non_blank("name", &dto.name)?;
        let email = dto.email.trim().to_string();
        require_email(&email)?;

        if self.repo.get_user_by_email(&email).await?.is_some() {
            return Err(DomainError::Conflict(format!(
                "Email already in use: {}",
                email
            )));
        }

        let user = self
            .repo
            .create_user(CreateUserDto {
                username: non_blank(dto.username),
                name,
                email,
                role: dto.role,
                avatar: non_blank(dto.avatar),
            })
            .await?;

        info!(user_id = %user.id, role = user.role.as_str(), "User created");
        Ok(user)
    }

    pub async fn update(&self, id: &str, dto: UpdateUserDto) -> DomainResult<User> {
        if self.repo.get_user_by_id(id).await?.is_none() {
            return Err(DomainError::not_found("User", id));
        }

        let name = dto
            .name
            .map(|name| require_non_blank("name", &name))
            .transpose()?;

        let email = match dto.email {
            Some(email) => {
                let email = email.trim().to_string();
                require_email(&email)?;
                if let Some(owner) = self.repo.get_user_by_email(&email).await? {
                    if owner.id != id {
                        return Err(DomainError::Conflict(format!(
                            "Email already in use: {}",
                            email
                        )));
                    }
                }
                Some(email)
            }
            None => None,
        };

        let user = self
            .repo
            .update_user(
                id,
                UpdateUserDto {
                    username: patch_non_blank(dto.username),
                    name,
                    email,
                    role: dto.role,
                    avatar: patch_non_blank(dto.avatar),
                },
            )
            .await?
            .ok_or_else(|| DomainError::not_found("User", id))?;

        info!(user_id = %id, "User updated");
        Ok(user)
    }

    pub async fn delete(&self, id: &str) -> DomainResult<()> {
        self.repo.delete_user(id).await?;
        info!(user_id = %id, "User deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserRole;
    use crate::infrastructure::database::repositories::UserRepository;
    use crate::infrastructure::database::test_support::migrated_db;

    async fn service() -> UserService<UserRepository> {
        UserService::new(Arc::new(UserRepository::new(migrated_db().await)))
    }

    fn dto(name: &str, email: &str) -> CreateUserDto {
        CreateUserDto {
            username: None,
            name: name.into(),
            email: email.into(),
            role: None,
            avatar: None,
        }
    }

    #[tokio::test]
    async fn duplicate_email_conflicts() {
        let svc = service().await;
        let user = svc.create(dto("Ada", "ada@example.com")).await.unwrap();
        assert_eq!(user.role, UserRole::Contributor);

        let err = svc.create(dto("Eve", "ada@example.com")).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn email_of_another_user_conflicts_on_update() {
        let svc = service().await;
        let ada = svc.create(dto("Ada", "ada@example.com")).await.unwrap();
        let bob = svc.create(dto("Bob", "bob@example.com")).await.unwrap();

        let err = svc
            .update(
                &bob.id,
                UpdateUserDto {
                    email: Some("ada@example.com".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));

        // re-submitting your own address is fine
        let same = svc
            .update(
                &ada.id,
                UpdateUserDto {
                    email: Some("ada@example.com".into()),
                    role: Some(UserRole::Moderator),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(same.role, UserRole::Moderator);
    }

    #[tokio::test]
    async fn invalid_input_is_rejected() {
        let svc = service().await;
        assert!(matches!(
            svc.create(dto("Ada", "not-an-email")).await.unwrap_err(),
            DomainError::Validation(_)
        ));
        assert!(matches!(
            svc.create(dto(" ", "ada@example.com")).await.unwrap_err(),
            DomainError::Validation(_)
        ));
    }

    #[tokio::test]
    async fn blank_avatar_removes_it() {
        let svc = service().await;
        let user = svc
            .create(CreateUserDto {
                avatar: Some("/avatars/1.png".into()),
                ..dto("Ada", "ada@example.com")
            })
            .await
            .unwrap();

        let updated = svc
            .update(
                &user.id,
                UpdateUserDto {
                    avatar: Some(Some("".into())),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(updated.avatar.is_none());
    }

    #[tokio::test]
    async fn unknown_user_is_not_found() {
        let svc = service().await;
        assert!(svc.get("nobody").await.unwrap().is_none());
        assert!(matches!(
            svc.update("nobody", UpdateUserDto::default())
                .await
                .unwrap_err(),
            DomainError::NotFound { .. }
        ));
        assert!(matches!(
            svc.delete("nobody").await.unwrap_err(),
            DomainError::NotFound { .. }
        ));
    }
}
