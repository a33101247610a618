//! The registry of named GLEP 63 policy versions.
//!
//! Each spec is a complete, self-contained threshold table; later versions
//! are constructed as explicit deltas on their predecessor, but that is a
//! construction detail — the evaluator never merges specs.

#![forbid(unsafe_code)]

mod presets;

use anyhow::Context;
use glep63_domain::policy::KeySpec;

pub const DEFAULT_SPEC: &str = "glep63-2.1";

const SPEC_NAMES: [&str; 6] = [
    "glep63-1-rsa2048",
    "glep63-1-strict",
    "glep63-1-rsa2048-ec25519",
    "glep63-2-draft-20180707",
    "glep63-2",
    "glep63-2.1",
];

/// All known spec names, in historical order.
pub fn spec_names() -> &'static [&'static str] {
    &SPEC_NAMES
}

/// Build the named spec, validated and ready for evaluation.
pub fn lookup(name: &str) -> anyhow::Result<KeySpec> {
    let spec = match name {
        "glep63-1-rsa2048" => presets::glep63_1_rsa2048(),
        "glep63-1-strict" => presets::glep63_1_strict(),
        "glep63-1-rsa2048-ec25519" => presets::glep63_1_rsa2048_ec25519(),
        "glep63-2-draft-20180707" => presets::glep63_2_draft_20180707(),
        "glep63-2" => presets::glep63_2(),
        "glep63-2.1" => presets::glep63_2_1(),
        other => anyhow::bail!(
            "unknown spec: {other} (known specs: {})",
            SPEC_NAMES.join(", ")
        ),
    };
    spec.validate()
        .with_context(|| format!("spec {name} failed validation"))?;
    Ok(spec)
}
