//! Key-level orchestration.

use crate::checks::{self, record, subkeys, uids};
use crate::model::{PublicKey, Validity};
use crate::policy::{KeySpec, RecordKind};
use glep63_types::{Finding, FindingScope, Severity, codes};
use time::OffsetDateTime;

/// Evaluate one key against one spec at the given instant.
///
/// Findings come back in phase order: primary-record findings, then subkey
/// findings in keyring order, then UID findings. A primary key in a terminal
/// validity state short-circuits to exactly one finding.
///
/// Pure: the key and spec are only read, so one spec may serve many
/// concurrent evaluations.
pub fn check_key(key: &PublicKey, spec: &KeySpec, now: OffsetDateTime) -> Vec<Finding> {
    let mut out = Vec::new();
    let key_id = key.primary.key_id.as_str();

    let terminal = match key.primary.validity {
        Validity::Invalid => Some((codes::VALIDITY_INVALID, "Public key is invalid")),
        Validity::Revoked => Some((codes::VALIDITY_REVOKED, "Public key has been revoked")),
        Validity::Expired => Some((codes::VALIDITY_EXPIRED, "Public key has expired")),
        Validity::Valid => None,
    };
    if let Some((code, message)) = terminal {
        out.push(checks::finding(
            Severity::Issue,
            FindingScope::Key,
            key_id,
            code,
            message.to_string(),
        ));
        return out;
    }

    record::run(
        &key.primary,
        spec,
        &record::RecordCtx {
            key_id,
            scope: FindingScope::Key,
            kind: RecordKind::Primary,
        },
        now,
        &mut out,
    );
    subkeys::run(key, spec, now, &mut out);
    uids::run(key, spec, &mut out);

    out
}
