use serde::{Deserialize, Serialize};

/// Severity is intentionally small: a finding either blocks acceptance of the
/// key (`Issue`) or is advisory (`Warning`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Issue,
}

/// Which record of the key a finding is about.
///
/// Key-scope findings cover the primary key as a whole (including aggregate
/// results such as "no dedicated signing subkey").
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "record")]
pub enum FindingScope {
    Key,
    Subkey { subkey_id: String },
    Uid { user_id: String },
}

/// One policy result about a key, a subkey, or a UID.
///
/// Severity and scope are independent axes; the subkey aggregation pass
/// downgrades selected findings by rewriting `severity` in place.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub severity: Severity,
    pub scope: FindingScope,

    /// Long key id of the owning primary key.
    pub key_id: String,

    /// Stable machine-readable reason code (see [`crate::codes`]).
    pub code: String,

    /// Human-readable description suitable for display.
    pub message: String,
}

impl Finding {
    pub fn is_issue(&self) -> bool {
        self.severity == Severity::Issue
    }
}
