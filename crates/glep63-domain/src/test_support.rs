use crate::model::{Capabilities, KeyRecord, PublicKey, PublicKeyAlgo, Uid, Validity};
use crate::policy::{
    AlgoRule, CurveRule, ExpireRules, FunctionalClass, KeySpec, Lifetime, ShortExpiry,
};
use glep63_types::Severity;
use std::collections::BTreeSet;
use time::macros::datetime;
use time::{Duration, OffsetDateTime};

/// Fixed evaluation instant shared by the tests (matches the key fixtures).
pub const NOW: OffsetDateTime = datetime!(2018-08-03 00:00 UTC);

/// An expiration date that trips no expiration rule in [`spec`].
pub fn quiet_expiry() -> OffsetDateTime {
    NOW + Duration::days(300)
}

pub fn caps(s: &str) -> Capabilities {
    Capabilities {
        sign: s.contains('s'),
        encrypt: s.contains('e'),
        certify: s.contains('c'),
        authenticate: s.contains('a'),
    }
}

pub fn record(
    key_id: &str,
    algo: PublicKeyAlgo,
    length: u32,
    cap_str: &str,
    expires: Option<OffsetDateTime>,
) -> KeyRecord {
    KeyRecord {
        validity: Validity::Valid,
        length,
        algo,
        key_id: key_id.to_string(),
        created: Some(NOW - Duration::days(30)),
        expires,
        caps: caps(cap_str),
        curve: String::new(),
    }
}

pub fn rsa_record(key_id: &str, length: u32, cap_str: &str) -> KeyRecord {
    record(key_id, PublicKeyAlgo::Rsa, length, cap_str, Some(quiet_expiry()))
}

pub fn key(primary: KeyRecord, subkeys: Vec<KeyRecord>, uids: Vec<Uid>) -> PublicKey {
    PublicKey {
        primary,
        subkeys,
        uids,
    }
}

/// A healthy RSA key: 4096-bit certify+sign primary, one dedicated signing
/// subkey, one gentoo.org UID.
pub fn good_key() -> PublicKey {
    key(
        rsa_record("PRIMARY0000000AA", 4096, "sc"),
        vec![rsa_record("SUBKEY00000000AB", 4096, "s")],
        vec![gentoo_uid()],
    )
}

pub fn uid(validity: Validity, user_id: &str) -> Uid {
    Uid {
        validity,
        created: Some(NOW - Duration::days(30)),
        expires: None,
        uid_hash: "0DAFDC73F43FC173C2216BA2BB4928391676BF2F".to_string(),
        user_id: user_id.to_string(),
    }
}

pub fn gentoo_uid() -> Uid {
    uid(Validity::Valid, "GLEP63 test key <nobody@gentoo.org>")
}

/// Baseline test policy, close to glep63-1 with a strict unknown-algo rule.
pub fn spec() -> KeySpec {
    KeySpec {
        name: "test".to_string(),
        description: "baseline test spec".to_string(),
        required_classes: BTreeSet::from([FunctionalClass::Sign]),
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
        required_uid_domain: "gentoo.org".to_string(),
        missing_domain_uid: Some(Severity::Warning),
    }
}

/// Like [`spec`], but renewal is fatal (glep63-2 style).
pub fn strict_renewal_spec() -> KeySpec {
    let mut s = spec();
    s.name = "test-strict-renewal".to_string();
    s.renewal = Some(ShortExpiry {
        severity: Severity::Issue,
        window: Lifetime::Days(14),
    });
    s
}
