//! Spec constructors, one per historical GLEP 63 policy version.
//!
//! Keep these small and readable: each later version is its predecessor plus
//! the approved deltas.

use glep63_domain::policy::{
    AlgoRule, CurveRule, ExpireRules, FunctionalClass, KeySpec, Lifetime, ShortExpiry,
};
use glep63_types::Severity;

const GENTOO_DOMAIN: &str = "gentoo.org";

/// GLEP 63 v1 without the RSA4096 preference.
pub(crate) fn glep63_1_rsa2048() -> KeySpec {
    KeySpec {
        name: "glep63-1-rsa2048".to_string(),
        description: "GLEP 63 v1 without RSA4096 preference".to_string(),
        required_classes: [FunctionalClass::Sign].into_iter().collect(),
        dsa: AlgoRule::Discouraged,
        dsa_min_length: Some(2048),
        rsa_min_length: Some(2048),
        rsa_recommended_length: None,
        curve: CurveRule::Forbidden,
        unknown_algo: Some(Severity::Issue),
        key_expire: ExpireRules {
            max: Some(Lifetime::Years(5)),
            recommended: Some(Lifetime::Years(3)),
        },
        subkey_expire: ExpireRules {
            max: Some(Lifetime::Years(5)),
            recommended: Some(Lifetime::Years(1)),
        },
        renewal: Some(ShortExpiry {
            severity: Severity::Warning,
            window: Lifetime::Days(14),
        }),
        multipurpose_subkey: Some(Severity::Warning),
        required_uid_domain: GENTOO_DOMAIN.to_string(),
        missing_domain_uid: Some(Severity::Warning),
    }
}

/// GLEP 63 v1 with the RSA4096 preference.
pub(crate) fn glep63_1_strict() -> KeySpec {
    KeySpec {
        name: "glep63-1-strict".to_string(),
        description: "GLEP 63 v1 with RSA4096 preference".to_string(),
        rsa_recommended_length: Some(4096),
        ..glep63_1_rsa2048()
    }
}

/// GLEP 63 v1 with RSA2048 preference and Curve25519 allowed.
pub(crate) fn glep63_1_rsa2048_ec25519() -> KeySpec {
    KeySpec {
        name: "glep63-1-rsa2048-ec25519".to_string(),
        description: "GLEP 63 v1 with RSA2048 preference and allowed EC25519".to_string(),
        curve: CurveRule::Curve25519Only,
        ..glep63_1_rsa2048()
    }
}

/// GLEP 63 v2 draft as of 2018-07-07.
pub(crate) fn glep63_2_draft_20180707() -> KeySpec {
    KeySpec {
        name: "glep63-2-draft-20180707".to_string(),
        description: "GLEP 63 v2 draft as of 2018-07-07".to_string(),
        required_classes: [FunctionalClass::Sign].into_iter().collect(),
        dsa: AlgoRule::Forbidden,
        dsa_min_length: None,
        rsa_min_length: Some(2048),
        rsa_recommended_length: None,
        curve: CurveRule::Curve25519Only,
        unknown_algo: Some(Severity::Issue),
        key_expire: ExpireRules {
            max: Some(Lifetime::Days(900)),
            recommended: None,
        },
        subkey_expire: ExpireRules {
            max: Some(Lifetime::Days(900)),
            recommended: None,
        },
        renewal: Some(ShortExpiry {
            severity: Severity::Issue,
            window: Lifetime::Days(14),
        }),
        multipurpose_subkey: Some(Severity::Warning),
        required_uid_domain: GENTOO_DOMAIN.to_string(),
        missing_domain_uid: Some(Severity::Warning),
    }
}

/// GLEP 63 v2 as approved by the Council on 2018-07-29.
pub(crate) fn glep63_2() -> KeySpec {
    KeySpec {
        name: "glep63-2".to_string(),
        description: "GLEP 63 v2 as approved by the Council on 2018-07-29".to_string(),
        missing_domain_uid: Some(Severity::Issue),
        ..glep63_2_draft_20180707()
    }
}

/// GLEP 63 v2.1 as approved by the Council on 2019-04-14.
pub(crate) fn glep63_2_1() -> KeySpec {
    KeySpec {
        name: "glep63-2.1".to_string(),
        description: "GLEP 63 v2.1 as approved by the Council on 2019-04-14".to_string(),
        required_classes: [FunctionalClass::Sign, FunctionalClass::Encrypt]
            .into_iter()
            .collect(),
        ..glep63_2()
    }
}
