//! # quantpipe-core
//!
//! Core crate for Quantpipe. Contains the opaque payload types handed to
//! pipeline hooks, configuration schemas, and the unified error system.
//!
//! This crate has **no** internal dependencies on other Quantpipe crates.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
