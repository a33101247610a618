//! Subkey evaluation, functional-class aggregation, and severity downgrade.
//!
//! The policy goal is "at least one healthy dedicated subkey per required
//! class", not "every subkey is flawless". Individual subkeys are still
//! checked, but short-lifetime issues soften to warnings once a healthy
//! replacement of the same class exists.

use crate::checks::{finding, record};
use crate::model::{PublicKey, Validity};
use crate::policy::{FunctionalClass, KeySpec, RecordKind};
use glep63_types::{Finding, FindingScope, Severity, codes};
use std::collections::BTreeSet;
use std::ops::Range;
use time::OffsetDateTime;

pub(crate) fn run(
    key: &PublicKey,
    spec: &KeySpec,
    now: OffsetDateTime,
    out: &mut Vec<Finding>,
) {
    let key_id = key.primary.key_id.as_str();

    let mut satisfied: BTreeSet<FunctionalClass> = BTreeSet::new();
    let mut healthy: BTreeSet<FunctionalClass> = BTreeSet::new();
    // Finding ranges of fully-checked subkeys, for the downgrade pass.
    let mut checked: Vec<(Vec<FunctionalClass>, Range<usize>)> = Vec::new();

    for subkey in &key.subkeys {
        let classes: Vec<FunctionalClass> = spec
            .required_classes
            .iter()
            .copied()
            .filter(|class| class.claimed_by(subkey.caps))
            .collect();
        if classes.is_empty() {
            continue;
        }

        let scope = FindingScope::Subkey {
            subkey_id: subkey.key_id.clone(),
        };
        let start = out.len();

        if subkey.validity == Validity::Invalid {
            out.push(finding(
                Severity::Issue,
                scope.clone(),
                key_id,
                codes::VALIDITY_INVALID,
                "Subkey is invalid".to_string(),
            ));
        }
        // Revoked/expired subkeys contribute nothing further and cannot
        // satisfy a class.
        if subkey.validity.is_inactive() {
            continue;
        }

        if subkey.caps.count() > 1
            && let Some(severity) = spec.multipurpose_subkey
        {
            out.push(finding(
                severity,
                scope,
                key_id,
                codes::SUBKEY_MULTIPURPOSE,
                format!(
                    "Subkey has multiple capabilities enabled (has: [{}]; use dedicated subkeys!)",
                    subkey.caps.render()
                ),
            ));
            continue;
        }

        satisfied.extend(classes.iter().copied());

        record::run(
            subkey,
            spec,
            &record::RecordCtx {
                key_id,
                scope,
                kind: RecordKind::Subkey,
            },
            now,
            out,
        );
        let range = start..out.len();

        let has_issue = out[range.clone()].iter().any(Finding::is_issue);
        if !has_issue {
            healthy.extend(classes.iter().copied());
        }
        checked.push((classes, range));
    }

    // A short remaining lifetime is not an emergency when a healthy
    // replacement subkey of the same class already exists.
    for (classes, range) in &checked {
        if classes.iter().any(|class| healthy.contains(class)) {
            for f in &mut out[range.clone()] {
                if f.code == codes::EXPIRE_SHORT && f.severity == Severity::Issue {
                    f.severity = Severity::Warning;
                }
            }
        }
    }

    for class in &spec.required_classes {
        if !satisfied.contains(class) {
            let code = match class {
                FunctionalClass::Sign => codes::SUBKEY_NONE_SIGN,
                FunctionalClass::Encrypt => codes::SUBKEY_NONE_ENCRYPT,
            };
            out.push(finding(
                Severity::Issue,
                FindingScope::Key,
                key_id,
                code,
                format!("Having a dedicated {} subkey is required", class.noun()),
            ));
        }
    }
}
