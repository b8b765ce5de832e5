//! Domain layer for the school registry.
//!
//! Holds the types, validation rules and upload policy shared by the
//! database and HTTP crates. Nothing here performs I/O.

pub mod env;
pub mod error;
pub mod school;
pub mod types;
pub mod upload;
