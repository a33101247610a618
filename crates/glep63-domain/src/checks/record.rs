//! Per-record algorithm/length and expiration rules.
//!
//! Applies to a single primary key or subkey. The algorithm branches are
//! mutually exclusive; the expiration check is independent and always runs.

use crate::checks::finding;
use crate::model::{KeyRecord, PublicKeyAlgo};
use crate::policy::{AlgoRule, CurveRule, ExpireRules, KeySpec, RecordKind};
use glep63_types::{Finding, FindingScope, Severity, codes};
use time::OffsetDateTime;
use time::macros::format_description;

/// Curve names accepted by Curve25519-restricted specs, as GnuPG prints them.
const CURVE25519_NAMES: [&str; 2] = ["ec25519", "ed25519"];

pub(crate) struct RecordCtx<'a> {
    pub key_id: &'a str,
    pub scope: FindingScope,
    pub kind: RecordKind,
}

impl RecordCtx<'_> {
    fn push(&self, out: &mut Vec<Finding>, severity: Severity, code: &str, message: String) {
        out.push(finding(severity, self.scope.clone(), self.key_id, code, message));
    }
}

pub(crate) fn run(
    record: &KeyRecord,
    spec: &KeySpec,
    ctx: &RecordCtx<'_>,
    now: OffsetDateTime,
    out: &mut Vec<Finding>,
) {
    // Sign-only/encrypt-only RSA collapses to general RSA for the remaining
    // rules; the normalization itself is worth a warning.
    let mut algo = record.algo;
    if matches!(algo, PublicKeyAlgo::RsaSignOnly | PublicKeyAlgo::RsaEncryptOnly) {
        ctx.push(
            out,
            Severity::Warning,
            codes::ALGO_RSA_DEPRECATED_ONLY,
            "Sign-only/encrypt-only RSA keys are deprecated".to_string(),
        );
        algo = PublicKeyAlgo::Rsa;
    }

    match algo {
        PublicKeyAlgo::Dsa | PublicKeyAlgo::Elgamal => {
            if spec.dsa == AlgoRule::Forbidden {
                ctx.push(
                    out,
                    Severity::Issue,
                    codes::ALGO_DSA,
                    "DSA keys are disallowed (RSA is recommended)".to_string(),
                );
            } else if let Some(min) = spec.dsa_min_length
                && record.length < min
            {
                // Too short beats merely discouraged; the two never co-fire.
                ctx.push(
                    out,
                    Severity::Issue,
                    codes::ALGO_DSA_TOOSHORT,
                    format!(
                        "DSA key too short (has {} bits, should be {} bits)",
                        record.length, min
                    ),
                );
            } else if spec.dsa == AlgoRule::Discouraged {
                ctx.push(
                    out,
                    Severity::Warning,
                    codes::ALGO_DSA_DISCOURAGED,
                    "DSA keys are discouraged (RSA is recommended)".to_string(),
                );
            }
        }
        PublicKeyAlgo::Rsa | PublicKeyAlgo::RsaSignOnly | PublicKeyAlgo::RsaEncryptOnly => {
            if let Some(min) = spec.rsa_min_length
                && record.length < min
            {
                ctx.push(
                    out,
                    Severity::Issue,
                    codes::ALGO_RSA_TOOSHORT,
                    format!(
                        "RSA key too short (has {} bits, should be at least {} bits)",
                        record.length, min
                    ),
                );
            } else if let Some(recommended) = spec.rsa_recommended_length
                && record.length < recommended
            {
                ctx.push(
                    out,
                    Severity::Warning,
                    codes::ALGO_RSA_SHORT,
                    format!(
                        "RSA key short (has {} bits, {} bits recommended)",
                        record.length, recommended
                    ),
                );
            }
        }
        PublicKeyAlgo::Ecdh | PublicKeyAlgo::Ecdsa | PublicKeyAlgo::Eddsa => match spec.curve {
            CurveRule::Forbidden => {
                ctx.push(
                    out,
                    Severity::Issue,
                    codes::ALGO_ECC,
                    "ECC keys are disallowed (RSA is recommended)".to_string(),
                );
            }
            CurveRule::Curve25519Only => {
                if !CURVE25519_NAMES.contains(&record.curve.as_str()) {
                    ctx.push(
                        out,
                        Severity::Issue,
                        codes::ALGO_ECC_INVALID,
                        format!(
                            "ECC curve {} disallowed (only Curve 25519 supported)",
                            record.curve
                        ),
                    );
                }
            }
        },
        PublicKeyAlgo::Other(_) => {
            if let Some(severity) = spec.unknown_algo {
                ctx.push(
                    out,
                    severity,
                    codes::ALGO_INVALID,
                    "Unexpected key algorithm".to_string(),
                );
            }
        }
    }

    check_expiration(record, spec, ctx, now, out);
}

fn check_expiration(
    record: &KeyRecord,
    spec: &KeySpec,
    ctx: &RecordCtx<'_>,
    now: OffsetDateTime,
    out: &mut Vec<Finding>,
) {
    let rules = spec.expire_rules(ctx.kind);
    if !rules.is_configured() {
        return;
    }
    let bounds = describe_bounds(rules);

    let Some(expires) = record.expires else {
        let severity = if rules.max.is_some() {
            Severity::Issue
        } else {
            Severity::Warning
        };
        ctx.push(
            out,
            severity,
            codes::EXPIRE_NONE,
            format!("No expiration date on public key ({bounds})"),
        );
        return;
    };

    let remaining_days = (expires - now).whole_days() as f64;

    if let Some(max) = rules.max
        && remaining_days > max.days()
    {
        ctx.push(
            out,
            Severity::Issue,
            codes::EXPIRE_LONG,
            format!(
                "Expiration date is too long (is {}, {bounds})",
                format_timestamp(expires)
            ),
        );
    } else if let Some(recommended) = rules.recommended
        && remaining_days > recommended.days()
    {
        ctx.push(
            out,
            Severity::Warning,
            codes::EXPIRE_LONG,
            format!(
                "Expiration date is long (is {}, {bounds})",
                format_timestamp(expires)
            ),
        );
    } else if let Some(renewal) = spec.renewal
        && remaining_days < renewal.window.days()
    {
        ctx.push(
            out,
            renewal.severity,
            codes::EXPIRE_SHORT,
            format!(
                "Expiration date is short (is {}, less than {})",
                format_timestamp(expires),
                renewal.window
            ),
        );
    }
}

fn describe_bounds(rules: ExpireRules) -> String {
    match (rules.recommended, rules.max) {
        (Some(recommended), Some(max)) => format!("<{recommended} recommended, {max} max"),
        (Some(recommended), None) => format!("<{recommended} recommended"),
        (None, Some(max)) => format!("{max} max"),
        // Filtered out by is_configured before we get here.
        (None, None) => String::new(),
    }
}

pub(crate) fn format_timestamp(ts: OffsetDateTime) -> String {
    let fmt = format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
    ts.format(&fmt).unwrap_or_else(|_| ts.to_string())
}
