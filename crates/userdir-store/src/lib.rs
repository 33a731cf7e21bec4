//! # userdir-store
//!
//! Credential store implementations behind the `CredentialStore` trait from
//! `userdir-core`: a durable JSON file store for production and an in-memory
//! store for tests. Both share the same read-modify-write contract; every
//! mutation is serialized behind a lock so concurrent writers cannot drop
//! each other's updates.

mod document;
mod file;
mod memory;

pub use document::AuthDocument;
pub use file::FileCredentialStore;
pub use memory::MemoryCredentialStore;
