//! # Fitspace Domain
//!
//! Business domain types and models for the Fitspace avatar backend.
//!
//! This crate contains:
//! - Avatar profile data types and wire shapes
//! - Domain error types and Result definitions
//! - The resolved identity tuple (`UserContext`) supplied per request
//!
//! ## Architecture
//! - No dependencies on other Fitspace crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod errors;
pub mod types;

// Re-export commonly used items
pub use errors::*;
pub use types::*;
