//! Repository traits for the domain layer
//!
//! Contains:
//! - `RepositoryProvider` : unified access to all per-aggregate repositories
//! - `DomainResult` : standard result type for domain operations

use super::cart::CartRepository;
use super::checkout::CheckoutStore;
use super::identity::RoleRepository;
use super::order::OrderRepository;
use super::vehicle::VehicleRepository;
use crate::shared::errors::DomainError;

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Provides access to all domain repositories.
///
/// Consumers request only the repository they need:
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider, user_id: Uuid) {
///     let lines = repos.carts().find_for_user(user_id).await?;
///     let mut uow = repos.checkout().begin().await?;
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn vehicles(&self) -> &dyn VehicleRepository;
    fn carts(&self) -> &dyn CartRepository;
    fn orders(&self) -> &dyn OrderRepository;
    fn roles(&self) -> &dyn RoleRepository;
    fn checkout(&self) -> &dyn CheckoutStore;
}
