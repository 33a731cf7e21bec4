//! Integration test utilities for the user directory
//!
//! This crate provides helpers for running end-to-end tests against the
//! REST API, with each test server backed by its own temporary store file.

pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
