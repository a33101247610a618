//! Result rendering and exit-code aggregation.

use glep63_domain::model::{PublicKey, Uid};
use glep63_types::{Finding, FindingScope, Severity};
use std::io::{self, Write};

pub struct TextOptions {
    pub errors_only: bool,
    pub machine_readable: bool,
    pub no_name: bool,
    /// UID domain the policy requires; preferred when picking the owner UID
    /// shown next to each finding.
    pub domain: String,
}

/// Bit 0 is set by any issue, bit 1 by any warning when warnings count.
pub fn exit_code(results: &[(PublicKey, Vec<Finding>)], warnings_as_errors: bool) -> i32 {
    let mut code = 0;
    for (_, findings) in results {
        for finding in findings {
            match finding.severity {
                Severity::Issue => code |= 1,
                Severity::Warning if warnings_as_errors => code |= 2,
                Severity::Warning => {}
            }
        }
    }
    code
}

fn owner_uid<'a>(key: &'a PublicKey, domain: &str) -> Option<&'a Uid> {
    let suffix = format!("@{domain}");
    key.uids
        .iter()
        .find(|u| u.mail_address().is_some_and(|a| a.ends_with(&suffix)))
        .or_else(|| key.uids.first())
}

fn uid_display<'a>(uid: &'a Uid, no_name: bool) -> &'a str {
    if no_name {
        uid.mail_address().unwrap_or(&uid.user_id)
    } else {
        &uid.user_id
    }
}

/// One line per finding: the record id, the owner UID, a severity class, the
/// reason code, and the description. Machine-readable output keeps only the
/// record id and the code.
pub fn render_text(
    results: &[(PublicKey, Vec<Finding>)],
    opts: &TextOptions,
    out: &mut impl Write,
) -> io::Result<()> {
    for (key, findings) in results {
        let owner = owner_uid(key, &opts.domain);
        for finding in findings {
            if opts.errors_only && !finding.is_issue() {
                continue;
            }

            let record_id = match &finding.scope {
                FindingScope::Key => finding.key_id.clone(),
                FindingScope::Subkey { subkey_id } => {
                    format!("{}:{subkey_id}", finding.key_id)
                }
                FindingScope::Uid { user_id } => {
                    let shown = if opts.no_name {
                        key.uids
                            .iter()
                            .find(|u| u.user_id == *user_id)
                            .and_then(Uid::mail_address)
                            .unwrap_or(user_id)
                    } else {
                        user_id
                    };
                    format!("{}:[{shown}]", finding.key_id)
                }
            };

            if opts.machine_readable {
                writeln!(out, "{record_id} {}", finding.code)?;
            } else {
                let cls = match finding.severity {
                    Severity::Issue => "[E]",
                    Severity::Warning => "[W]",
                };
                let shown_owner = owner.map(|u| uid_display(u, opts.no_name)).unwrap_or("");
                writeln!(
                    out,
                    "{record_id} [{shown_owner}] {cls} {} {}",
                    finding.code, finding.message
                )?;
            }
        }
    }
    Ok(())
}

/// All findings across all keys as one JSON array; each finding already
/// carries its owning key id.
pub fn render_json(
    results: &[(PublicKey, Vec<Finding>)],
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let findings: Vec<&Finding> = results.iter().flat_map(|(_, f)| f).collect();
    serde_json::to_writer_pretty(&mut *out, &findings)?;
    writeln!(out)?;
    Ok(())
}
