pub mod access;
pub mod roles;

pub use roles::require_roles;
