//! Caller identity
//!
//! Every storefront operation receives an explicit [`RequestContext`]
//! describing who is calling. Sessions are issued by the identity
//! provider; this crate only consumes the verified user id and roles.

pub mod repository;

pub use repository::RoleRepository;

use uuid::Uuid;

use crate::shared::errors::DomainError;

/// Role a user may hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Admin,
    Customer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Customer => "customer",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(Self::Admin),
            "customer" => Some(Self::Customer),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Authenticated caller of one request
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub user_id: Uuid,
    pub roles: Vec<Role>,
}

impl RequestContext {
    pub fn new(user_id: Uuid, roles: Vec<Role>) -> Self {
        Self { user_id, roles }
    }

    pub fn customer(user_id: Uuid) -> Self {
        Self::new(user_id, vec![Role::Customer])
    }

    pub fn admin(user_id: Uuid) -> Self {
        Self::new(user_id, vec![Role::Admin])
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(Role::Admin)
    }

    /// Fails with `Forbidden` unless the caller holds the admin role.
    pub fn require_admin(&self) -> Result<(), DomainError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(DomainError::Forbidden("Admin access required".to_string()))
        }
    }
}
