//! Admin dashboard endpoints
//!
//! Every handler here goes through the inventory or order service, both of
//! which reject callers without the admin role.

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
