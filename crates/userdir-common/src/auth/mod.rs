//! Token codec and password hashing

mod jwt;
mod password;
mod refresh;

pub use jwt::{Claims, JwtService};
pub use password::{hash_password, verify_password};
pub use refresh::{fingerprint, generate_refresh_secret};
