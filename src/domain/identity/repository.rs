//! Role repository interface

use async_trait::async_trait;
use uuid::Uuid;

use super::Role;
use crate::domain::DomainResult;

#[async_trait]
pub trait RoleRepository: Send + Sync {
    /// All roles granted to a user
    async fn roles_for(&self, user_id: Uuid) -> DomainResult<Vec<Role>>;

    /// Grant a role; granting twice is a no-op
    async fn grant(&self, user_id: Uuid, role: Role) -> DomainResult<()>;

    async fn has_role(&self, user_id: Uuid, role: Role) -> DomainResult<bool> {
        Ok(self.roles_for(user_id).await?.contains(&role))
    }
}
