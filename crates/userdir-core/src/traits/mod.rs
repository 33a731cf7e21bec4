//! Store trait (port) - defines the interface for credential persistence

mod store;

pub use store::{CredentialStore, StoreResult};
