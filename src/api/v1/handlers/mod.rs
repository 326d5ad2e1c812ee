pub mod assignments;
pub mod events;
pub mod health;
pub mod me;
