//! Value objects - immutable domain primitives

mod role;
mod user_id;

pub use role::Role;
pub use user_id::{UserId, UserIdParseError};
