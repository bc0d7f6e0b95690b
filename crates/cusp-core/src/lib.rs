//! Cusp Core - Foundational types for the cusp tooth editor
//!
//! This crate provides the core types that all other cusp crates depend on:
//! - `ToothId` - Stable tooth identifiers
//! - `Transform` - Position / orientation / scale triple
//! - `frame` - Rigid-frame math (build, invert, compose, decompose)
//! - `CuspConfig` - Layered configuration
//! - Error types and Result alias

mod config;
mod error;
pub mod frame;
mod id;
mod types;

pub use config::{CuspConfig, InteractionConfig, ModifierKey};
pub use error::{CuspError, Result};
pub use id::ToothId;
pub use types::Transform;
