//! Pure policy evaluation (no IO).
//!
//! Input: a key model constructed elsewhere (see `glep63-gnupg`) and a typed
//! policy spec. Output: an ordered list of findings. Evaluation never fails
//! for well-formed inputs; findings are the product, not errors.

#![forbid(unsafe_code)]

pub mod model;
pub mod policy;

mod checks;
mod engine;

pub use engine::check_key;

#[cfg(test)]
pub(crate) mod test_support;

#[cfg(test)]
mod proptest;
