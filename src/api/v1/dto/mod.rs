pub mod ack;
pub mod assignments;
