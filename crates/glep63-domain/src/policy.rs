//! Typed policy specification consumed by the evaluation engine.
//!
//! A [`KeySpec`] is a complete, self-contained threshold table: there is no
//! default merging at evaluation time. Specs are validated once at
//! construction and shared immutably across evaluations.

use crate::model::Capabilities;
use glep63_types::Severity;
use std::collections::BTreeSet;
use std::fmt;
use thiserror::Error;

/// The sign/encrypt grouping used to decide whether a key carries at least
/// one healthy dedicated subkey for a purpose.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum FunctionalClass {
    Sign,
    Encrypt,
}

impl FunctionalClass {
    pub fn claimed_by(self, caps: Capabilities) -> bool {
        match self {
            FunctionalClass::Sign => caps.sign,
            FunctionalClass::Encrypt => caps.encrypt,
        }
    }

    /// Human noun for messages ("signing subkey", "encryption subkey").
    pub fn noun(self) -> &'static str {
        match self {
            FunctionalClass::Sign => "signing",
            FunctionalClass::Encrypt => "encryption",
        }
    }
}

/// Policy stance on the DSA/Elgamal family.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AlgoRule {
    Allowed,
    Discouraged,
    Forbidden,
}

/// Policy stance on elliptic-curve keys.
///
/// These are the only two supported shapes: a spec either rejects ECC
/// outright or pins it to Curve25519. "Any curve goes" is not representable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CurveRule {
    Forbidden,
    Curve25519Only,
}

/// A policy duration, kept in the unit the policy text uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lifetime {
    Years(u32),
    Days(u32),
}

impl Lifetime {
    /// Threshold in days; calendar years at 365.24 days each.
    pub fn days(self) -> f64 {
        match self {
            Lifetime::Years(y) => f64::from(y) * 365.24,
            Lifetime::Days(d) => f64::from(d),
        }
    }
}

impl fmt::Display for Lifetime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lifetime::Years(y) => write!(f, "{y} years"),
            Lifetime::Days(d) => write!(f, "{d} days"),
        }
    }
}

/// Expiration-date bounds for one record context (primary key or subkey).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExpireRules {
    /// Exceeding this remaining lifetime is an issue.
    pub max: Option<Lifetime>,
    /// Exceeding this remaining lifetime is a warning.
    pub recommended: Option<Lifetime>,
}

impl ExpireRules {
    pub fn is_configured(self) -> bool {
        self.max.is_some() || self.recommended.is_some()
    }
}

/// Renewal rule: a key expiring within `window` needs attention.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShortExpiry {
    pub severity: Severity,
    pub window: Lifetime,
}

/// Whether a record is evaluated as the primary key or as a subkey.
///
/// Selects which expiration bounds apply.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecordKind {
    Primary,
    Subkey,
}

/// One named, versioned policy.
///
/// Plain RSA can never be forbidden and ECC can never be unrestricted; both
/// are structural properties of this type rather than runtime checks.
#[derive(Clone, Debug)]
pub struct KeySpec {
    pub name: String,
    pub description: String,

    /// Functional subkey classes the policy enforces. Never empty.
    pub required_classes: BTreeSet<FunctionalClass>,

    pub dsa: AlgoRule,
    pub dsa_min_length: Option<u32>,

    pub rsa_min_length: Option<u32>,
    pub rsa_recommended_length: Option<u32>,

    pub curve: CurveRule,

    /// Severity for algorithms outside the recognized set, if reported.
    pub unknown_algo: Option<Severity>,

    pub key_expire: ExpireRules,
    pub subkey_expire: ExpireRules,
    pub renewal: Option<ShortExpiry>,

    /// Severity for subkeys carrying more than one capability, if reported.
    pub multipurpose_subkey: Option<Severity>,

    /// Domain at least one usable UID address must belong to.
    pub required_uid_domain: String,
    /// Severity when no usable UID matches the domain, if reported.
    pub missing_domain_uid: Option<Severity>,
}

#[derive(Debug, Error)]
pub enum SpecError {
    #[error("spec `{0}` enforces no functional subkey classes")]
    NoRequiredClasses(String),
    #[error("spec `{0}` has an empty required UID domain")]
    EmptyUidDomain(String),
}

impl KeySpec {
    /// Internal consistency check, run once when the registry builds a spec.
    pub fn validate(&self) -> Result<(), SpecError> {
        if self.required_classes.is_empty() {
            return Err(SpecError::NoRequiredClasses(self.name.clone()));
        }
        if self.required_uid_domain.is_empty() {
            return Err(SpecError::EmptyUidDomain(self.name.clone()));
        }
        Ok(())
    }

    pub fn expire_rules(&self, kind: RecordKind) -> ExpireRules {
        match kind {
            RecordKind::Primary => self.key_expire,
            RecordKind::Subkey => self.subkey_expire,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::spec;

    #[test]
    fn lifetime_days_and_display() {
        assert_eq!(Lifetime::Days(14).days(), 14.0);
        assert_eq!(Lifetime::Years(5).days(), 1826.2);
        assert_eq!(Lifetime::Years(3).to_string(), "3 years");
        assert_eq!(Lifetime::Days(900).to_string(), "900 days");
    }

    #[test]
    fn validate_rejects_empty_class_set() {
        let mut s = spec();
        s.required_classes.clear();
        assert!(matches!(s.validate(), Err(SpecError::NoRequiredClasses(_))));
    }

    #[test]
    fn validate_rejects_empty_domain() {
        let mut s = spec();
        s.required_uid_domain.clear();
        assert!(matches!(s.validate(), Err(SpecError::EmptyUidDomain(_))));
    }

    #[test]
    fn validate_accepts_complete_spec() {
        assert!(spec().validate().is_ok());
    }
}
