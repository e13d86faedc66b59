//! SeaORM implementation of RoleRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::identity::{Role, RoleRepository};
use crate::domain::DomainResult;
use crate::infrastructure::database::entities::user_role;

pub struct SeaOrmRoleRepository {
    db: DatabaseConnection,
}

impl SeaOrmRoleRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RoleRepository for SeaOrmRoleRepository {
    async fn roles_for(&self, user_id: Uuid) -> DomainResult<Vec<Role>> {
        let rows = user_role::Entity::find()
            .filter(user_role::Column::UserId.eq(user_id))
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|r| match Role::parse(&r.role) {
                Some(role) => Some(role),
                None => {
                    warn!(%user_id, role = %r.role, "Ignoring unknown role");
                    None
                }
            })
            .collect())
    }

    async fn grant(&self, user_id: Uuid, role: Role) -> DomainResult<()> {
        let existing = user_role::Entity::find_by_id((user_id, role.as_str().to_string()))
            .one(&self.db)
            .await?;
        if existing.is_some() {
            return Ok(());
        }

        info!(%user_id, role = role.as_str(), "Granting role");
        user_role::ActiveModel {
            user_id: Set(user_id),
            role: Set(role.as_str().to_string()),
            created_at: Set(Utc::now()),
        }
        .insert(&self.db)
        .await?;
        Ok(())
    }
}
