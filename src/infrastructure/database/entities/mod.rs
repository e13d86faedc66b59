//! Database entities module

pub mod cart_item;
pub mod order;
pub mod order_item;
pub mod user_role;
pub mod vehicle;

pub use cart_item::Entity as CartItem;
pub use order::Entity as Order;
pub use order_item::Entity as OrderItem;
pub use user_role::Entity as UserRole;
pub use vehicle::Entity as Vehicle;
