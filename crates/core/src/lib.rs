//! Domain types for the comicd relay service.
//!
//! Holds the task model, album-id validation, and the in-memory task
//! registry. This crate is HTTP-free so both the API server and its
//! integration tests can depend on it directly.

pub mod error;
pub mod registry;
pub mod task;
