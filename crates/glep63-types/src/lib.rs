//! Stable DTOs and reason codes shared across the glep63-check workspace.
//!
//! This crate is intentionally boring:
//! - the finding type emitted by the evaluation engine
//! - stable machine-readable reason codes

#![forbid(unsafe_code)]

pub mod codes;
mod finding;

pub use finding::{Finding, FindingScope, Severity};
