pub mod authorize;
pub mod health;
pub mod registry;
pub mod roles;
