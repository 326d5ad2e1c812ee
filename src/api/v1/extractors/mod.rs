mod auth_ctx;

pub use auth_ctx::{Caller, CurrentIdentity};
