//! # cmms-core
//!
//! Core types for CMMS RS.
//!
//! This crate provides the building blocks shared by the feature crates:
//! - Configuration types with environment overrides
//! - Validation error collections

pub mod config;
pub mod error;

pub use config::*;
pub use error::*;
