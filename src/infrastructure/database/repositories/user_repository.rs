use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, Order, QueryFilter, Set,
};

use super::{conflict_or_db_err, db_err};
use crate::domain::{
    CreateUserDto, DomainError, DomainResult, PageRequest, PageResult, UpdateUserDto, User,
    UserRepositoryInterface, UserRole,
};
use crate::infrastructure::database::entities::user;
use crate::infrastructure::database::EntityTable;
use crate::shared::{paginate, PageQuery};

const DUPLICATE_USER: &str = "Username or email already exists";

pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn entity_role_to_domain(role: user::UserRole) -> UserRole {
    match role {
        user::UserRole::Admin => UserRole::Admin,
        user::UserRole::Moderator => UserRole::Moderator,
        user::UserRole::Contributor => UserRole::Contributor,
    }
}

fn domain_role_to_entity(role: UserRole) -> user::UserRole {
    match role {
        UserRole::Admin => user::UserRole::Admin,
        UserRole::Moderator => user::UserRole::Moderator,
        UserRole::Contributor => user::UserRole::Contributor,
    }
}

fn user_model_to_domain(model: user::Model) -> User {
    User {
        id: model.id,
        username: model.username,
        name: model.name,
        email: model.email,
        role: entity_role_to_domain(model.role),
        avatar: model.avatar,
        created_at: model.created_at,
    }
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl UserRepositoryInterface for UserRepository {
    async fn create_user(&self, dto: CreateUserDto) -> DomainResult<User> {
        let role = dto.role.unwrap_or_default();

        let new_user = user::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            username: Set(dto.username),
            name: Set(dto.name),
            email: Set(dto.email),
            role: Set(domain_role_to_entity(role)),
            avatar: Set(dto.avatar),
            created_at: Set(Utc::now()),
        };

        let model = new_user
            .insert(&self.db)
            .await
            .map_err(|e| conflict_or_db_err(e, DUPLICATE_USER))?;

        Ok(user_model_to_domain(model))
    }

    async fn list_users(&self, page: PageRequest) -> DomainResult<PageResult<User>> {
        let table = EntityTable::<user::Entity>::new(self.db.clone());
        let query = PageQuery::new(page)
            .order_by((user::Column::CreatedAt, Order::Desc))
            .order_by((user::Column::Id, Order::Desc));

        let result = paginate(&table, query).await.map_err(db_err)?;
        Ok(result.map(user_model_to_domain))
    }

    async fn get_user_by_id(&self, id: &str) -> DomainResult<Option<User>> {
        let model = user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(user_model_to_domain))
    }

    async fn get_user_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        let model = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(user_model_to_domain))
    }

    async fn update_user(&self, id: &str, dto: UpdateUserDto) -> DomainResult<Option<User>> {
        let existing = user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let Some(existing) = existing else {
            return Ok(None);
        };

        let mut active: user::ActiveModel = existing.clone().into();

        if let Some(username) = dto.username {
            active.username = Set(username);
        }
        if let Some(name) = dto.name {
            active.name = Set(name);
        }
        if let Some(email) = dto.email {
            active.email = Set(email);
        }
        if let Some(role) = dto.role {
            active.role = Set(domain_role_to_entity(role));
        }
        if let Some(avatar) = dto.avatar {
            active.avatar = Set(avatar);
        }

        if !active.is_changed() {
            return Ok(Some(user_model_to_domain(existing)));
        }

        let updated = active
            .update(&self.db)
            .await
            .map_err(|e| conflict_or_db_err(e, DUPLICATE_USER))?;

        Ok(Some(user_model_to_domain(updated)))
    }

    async fn delete_user(&self, id: &str) -> DomainResult<()> {
        let result = user::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        if result.rows_affected == 0 {
            return Err(DomainError::not_found("User", id));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::test_support::migrated_db;

    fn dto(name: &str, email: &str) -> CreateUserDto {
        CreateUserDto {
            username: None,
            name: name.to_string(),
            email: email.to_string(),
            role: None,
            avatar: None,
        }
    }

    #[tokio::test]
    async fn create_defaults_role_and_assigns_uuid() {
        let repo = UserRepository::new(migrated_db().await);
        let user = repo.create_user(dto("Ada", "ada@example.com")).await.unwrap();

        assert_eq!(user.role, UserRole::Contributor);
        assert!(uuid::Uuid::parse_str(&user.id).is_ok());

        let found = repo.get_user_by_email("ada@example.com").await.unwrap();
        assert_eq!(found.map(|u| u.id), Some(user.id));
    }

    #[tokio::test]
    async fn duplicate_email_is_a_conflict() {
        let repo = UserRepository::new(migrated_db().await);
        repo.create_user(dto("Ada", "ada@example.com")).await.unwrap();

        let err = repo
            .create_user(dto("Imposter", "ada@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn list_is_newest_first() {
        let repo = UserRepository::new(migrated_db().await);
        for i in 0..5 {
            repo.create_user(dto(&format!("user {}", i), &format!("u{}@example.com", i)))
                .await
                .unwrap();
        }

        let page = repo.list_users(PageRequest::new(1, 2)).await.unwrap();
        assert_eq!(page.total, 5);
        assert_eq!(page.total_pages(), 3);
        let names: Vec<&str> = page.items.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, vec!["user 4", "user 3"]);
    }

    #[tokio::test]
    async fn avatar_can_be_removed() {
        let repo = UserRepository::new(migrated_db().await);
        let user = repo
            .create_user(CreateUserDto {
                avatar: Some("/avatars/ada.png".into()),
                ..dto("Ada", "ada@example.com")
            })
            .await
            .unwrap();

        let updated = repo
            .update_user(
                &user.id,
                UpdateUserDto {
                    avatar: Some(None),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert!(updated.avatar.is_none());
        assert_eq!(updated.email, "ada@example.com");
    }

    #[tokio::test]
    async fn delete_unknown_user_is_not_found() {
        let repo = UserRepository::new(migrated_db().await);
        let err = repo.delete_user("missing").await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "User", .. }));
    }
}
