//! UID requirement check: at least one usable identity in the required
//! domain.

use crate::checks::finding;
use crate::model::{PublicKey, Validity};
use crate::policy::KeySpec;
use glep63_types::{Finding, FindingScope, Severity, codes};

pub(crate) fn run(key: &PublicKey, spec: &KeySpec, out: &mut Vec<Finding>) {
    let key_id = key.primary.key_id.as_str();
    let suffix = format!("@{}", spec.required_uid_domain);

    let mut has_domain_uid = false;
    for uid in &key.uids {
        if uid.validity == Validity::Invalid {
            out.push(finding(
                Severity::Issue,
                FindingScope::Uid {
                    user_id: uid.user_id.clone(),
                },
                key_id,
                codes::VALIDITY_INVALID,
                "UID is invalid".to_string(),
            ));
        }
        if uid.validity.is_inactive() {
            continue;
        }

        if let Some(addr) = uid.mail_address()
            && addr.ends_with(&suffix)
        {
            has_domain_uid = true;
        }
    }

    // A key with no usable UIDs at all is treated the same as one whose
    // UIDs all fail the domain test.
    if !has_domain_uid
        && let Some(severity) = spec.missing_domain_uid
    {
        out.push(finding(
            severity,
            FindingScope::Key,
            key_id,
            codes::UID_NOGENTOO,
            format!("{suffix} e-mail not in key UIDs"),
        ));
    }
}
