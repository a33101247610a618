//! Property-based tests for the evaluation engine.
//!
//! These verify structural invariants over arbitrary keys:
//! - evaluation is deterministic
//! - terminal primary validity suppresses everything else
//! - at most one algorithm-branch finding per record
//! - every finding names the evaluated key

use crate::check_key;
use crate::model::{KeyRecord, PublicKey, PublicKeyAlgo, Uid, Validity};
use crate::test_support::{NOW, caps, gentoo_uid, spec, uid};
use glep63_types::codes;
use proptest::prelude::*;
use time::Duration;

fn arb_validity() -> impl Strategy<Value = Validity> {
    prop_oneof![
        Just(Validity::Valid),
        Just(Validity::Invalid),
        Just(Validity::Revoked),
        Just(Validity::Expired),
    ]
}

fn arb_algo() -> impl Strategy<Value = PublicKeyAlgo> {
    prop_oneof![
        Just(PublicKeyAlgo::Rsa),
        Just(PublicKeyAlgo::RsaSignOnly),
        Just(PublicKeyAlgo::RsaEncryptOnly),
        Just(PublicKeyAlgo::Dsa),
        Just(PublicKeyAlgo::Elgamal),
        Just(PublicKeyAlgo::Ecdh),
        Just(PublicKeyAlgo::Ecdsa),
        Just(PublicKeyAlgo::Eddsa),
        (100u16..200).prop_map(PublicKeyAlgo::Other),
    ]
}

fn arb_curve() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("ed25519".to_string()),
        Just("ec25519".to_string()),
        Just("nistp256".to_string()),
        Just("brainpoolP512r1".to_string()),
    ]
}

fn arb_caps() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just(""),
        Just("s"),
        Just("e"),
        Just("a"),
        Just("sc"),
        Just("se"),
        Just("sea"),
    ]
}

fn arb_expires() -> impl Strategy<Value = Option<Duration>> {
    prop_oneof![
        Just(None),
        (-30i64..4000).prop_map(|d| Some(Duration::days(d))),
    ]
}

prop_compose! {
    fn arb_record(key_id: &'static str)(
        validity in arb_validity(),
        algo in arb_algo(),
        length in prop_oneof![Just(1024u32), Just(2047), Just(2048), Just(4096), 256u32..8192],
        cap_str in arb_caps(),
        curve in arb_curve(),
        expires in arb_expires(),
    ) -> KeyRecord {
        KeyRecord {
            validity,
            length,
            algo,
            key_id: key_id.to_string(),
            created: Some(NOW - Duration::days(30)),
            expires: expires.map(|d| NOW + d),
            caps: caps(cap_str),
            curve,
        }
    }
}

fn arb_key() -> impl Strategy<Value = PublicKey> {
    (
        arb_record("PRIMARY0000000AA"),
        proptest::collection::vec(arb_record("SUBKEY00000000AB"), 0..4),
        prop_oneof![
            Just(Vec::<Uid>::new()),
            Just(vec![gentoo_uid()]),
            Just(vec![uid(Validity::Valid, "Somebody <someone@example.org>")]),
        ],
    )
        .prop_map(|(primary, subkeys, uids)| PublicKey {
            primary,
            subkeys,
            uids,
        })
}

proptest! {
    #[test]
    fn evaluation_is_deterministic(key in arb_key()) {
        let s = spec();
        prop_assert_eq!(check_key(&key, &s, NOW), check_key(&key, &s, NOW));
    }

    #[test]
    fn terminal_primary_yields_exactly_one_finding(key in arb_key()) {
        let s = spec();
        let findings = check_key(&key, &s, NOW);
        if key.primary.validity != Validity::Valid {
            prop_assert_eq!(findings.len(), 1);
            prop_assert!(findings[0].code.starts_with("validity:"));
        }
    }

    #[test]
    fn at_most_one_algorithm_finding_for_the_primary(key in arb_key()) {
        let findings = check_key(&key, &spec(), NOW);
        let algo_findings = findings
            .iter()
            .filter(|f| {
                f.scope == glep63_types::FindingScope::Key
                    && f.code.starts_with("algo:")
                    && f.code != codes::ALGO_RSA_DEPRECATED_ONLY
            })
            .count();
        prop_assert!(algo_findings <= 1);
    }

    #[test]
    fn findings_always_name_the_evaluated_key(key in arb_key()) {
        for finding in check_key(&key, &spec(), NOW) {
            prop_assert_eq!(finding.key_id.as_str(), key.primary.key_id.as_str());
        }
    }
}
