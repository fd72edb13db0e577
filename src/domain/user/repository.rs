use async_trait::async_trait;

use super::{CreateUserDto, UpdateUserDto, User};
use crate::domain::{DomainResult, PageRequest, PageResult};

#[async_trait]
pub trait UserRepositoryInterface: Send + Sync {
    async fn create_user(&self, dto: CreateUserDto) -> DomainResult<User>;

    /// One page, newest first.
    async fn list_users(&self, page: PageRequest) -> DomainResult<PageResult<User>>;
    async fn get_user_by_id(&self, id: &str) -> DomainResult<Option<User>>;
    async fn get_user_by_email(&self, email: &str) -> DomainResult<Option<User>>;

    async fn update_user(&self, id: &str, dto: UpdateUserDto) -> DomainResult<Option<User>>;
    async fn delete_user(&self, id: &str) -> DomainResult<()>;
}
