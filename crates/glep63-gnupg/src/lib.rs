//! GnuPG adapters: decoding `gpg --with-colons` output into the key model,
//! and listing keyrings through a discovered GnuPG executable.
//!
//! Decoding is strict: a token the decoder does not recognize is a hard
//! error, never a silently skipped field — a skipped field could hide a real
//! policy violation.

#![forbid(unsafe_code)]

mod colons;
mod gpg;

pub use colons::{ColonsError, parse_colons};
pub use gpg::GpgTool;
