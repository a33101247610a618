use glep63_types::{Finding, FindingScope, Severity};

pub(crate) mod record;
pub(crate) mod subkeys;
pub(crate) mod uids;


pub(crate) fn finding(
    severity: Severity,
    scope: FindingScope,
    key_id: &str,
    code: &str,
    message: String,
) -> Finding {
    Finding {
        severity,
        scope,
        key_id: key_id.to_string(),
        code: code.to_string(),
        message,
    }
}
