//! Parser for the `gpg --with-colons` machine-readable key listing.
//!
//! Only `pub`, `sub`, and `uid` records carry policy-relevant data; all
//! other record types (fpr, tru, sig, ...) are skipped.

use glep63_domain::model::{Capabilities, KeyRecord, PublicKey, PublicKeyAlgo, Uid, Validity};
use thiserror::Error;
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime};

#[derive(Debug, Error)]
pub enum ColonsError {
    #[error("line {line}: unknown validity mark `{value}`")]
    UnknownValidity { line: usize, value: String },

    #[error("line {line}: malformed key length `{value}`")]
    BadLength { line: usize, value: String },

    #[error("line {line}: malformed algorithm id `{value}`")]
    BadAlgorithm { line: usize, value: String },

    #[error("line {line}: unknown capability flag `{value}`")]
    UnknownCapability { line: usize, value: char },

    #[error("line {line}: malformed date `{value}`")]
    BadDate { line: usize, value: String },

    #[error("line {line}: truncated `{record}` record")]
    Truncated { line: usize, record: String },

    #[error("line {line}: `{record}` record before any pub record")]
    OrphanRecord { line: usize, record: String },
}

/// Decode a colon-format listing into public keys, in listing order.
pub fn parse_colons(input: &str) -> Result<Vec<PublicKey>, ColonsError> {
    let mut keys: Vec<PublicKey> = Vec::new();

    for (idx, raw) in input.lines().enumerate() {
        let line = idx + 1;
        let fields: Vec<&str> = raw.split(':').collect();

        match fields[0] {
            "pub" => {
                keys.push(PublicKey {
                    primary: parse_key_record(&fields, line)?,
                    subkeys: Vec::new(),
                    uids: Vec::new(),
                });
            }
            "sub" => {
                let subkey = parse_key_record(&fields, line)?;
                let key = keys.last_mut().ok_or_else(|| ColonsError::OrphanRecord {
                    line,
                    record: "sub".to_string(),
                })?;
                key.subkeys.push(subkey);
            }
            "uid" => {
                let uid = parse_uid(&fields, line)?;
                let key = keys.last_mut().ok_or_else(|| ColonsError::OrphanRecord {
                    line,
                    record: "uid".to_string(),
                })?;
                key.uids.push(uid);
            }
            _ => {}
        }
    }

    Ok(keys)
}

fn parse_key_record(fields: &[&str], line: usize) -> Result<KeyRecord, ColonsError> {
    // validity 1, length 2, algo 3, keyid 4, created 5, expires 6, caps 11;
    // the curve name (16) only appears for ECC keys.
    if fields.len() < 12 {
        return Err(ColonsError::Truncated {
            line,
            record: fields[0].to_string(),
        });
    }

    Ok(KeyRecord {
        validity: parse_validity(fields[1], line)?,
        length: fields[2]
            .parse()
            .map_err(|_| ColonsError::BadLength {
                line,
                value: fields[2].to_string(),
            })?,
        algo: parse_algo(fields[3], line)?,
        key_id: fields[4].to_string(),
        created: parse_date(fields[5], line)?,
        expires: parse_date(fields[6], line)?,
        caps: parse_caps(fields[11], line)?,
        curve: fields.get(16).copied().unwrap_or_default().to_string(),
    })
}

fn parse_uid(fields: &[&str], line: usize) -> Result<Uid, ColonsError> {
    if fields.len() < 10 {
        return Err(ColonsError::Truncated {
            line,
            record: "uid".to_string(),
        });
    }

    Ok(Uid {
        validity: parse_validity(fields[1], line)?,
        created: parse_date(fields[5], line)?,
        expires: parse_date(fields[6], line)?,
        uid_hash: fields[7].to_string(),
        user_id: fields[9].to_string(),
    })
}

fn parse_validity(value: &str, line: usize) -> Result<Validity, ColonsError> {
    // The full documented mark set; only the terminal states matter to the
    // rules, the rest are "not marked bad".
    match value {
        "i" => Ok(Validity::Invalid),
        "r" => Ok(Validity::Revoked),
        "e" => Ok(Validity::Expired),
        "" | "o" | "d" | "-" | "q" | "n" | "m" | "f" | "u" => Ok(Validity::Valid),
        other => Err(ColonsError::UnknownValidity {
            line,
            value: other.to_string(),
        }),
    }
}

fn parse_algo(value: &str, line: usize) -> Result<PublicKeyAlgo, ColonsError> {
    value
        .parse::<u16>()
        .map(PublicKeyAlgo::from_openpgp_id)
        .map_err(|_| ColonsError::BadAlgorithm {
            line,
            value: value.to_string(),
        })
}

fn parse_caps(value: &str, line: usize) -> Result<Capabilities, ColonsError> {
    let mut caps = Capabilities::default();
    for c in value.chars() {
        match c {
            's' => caps.sign = true,
            'e' => caps.encrypt = true,
            'c' => caps.certify = true,
            'a' => caps.authenticate = true,
            // Uppercase marks mean "usable via some subkey" (and 'D' means
            // disabled); neither says anything about this record itself.
            _ if c.is_ascii_uppercase() => {}
            other => {
                return Err(ColonsError::UnknownCapability { line, value: other });
            }
        }
    }
    Ok(caps)
}

fn parse_date(value: &str, line: usize) -> Result<Option<OffsetDateTime>, ColonsError> {
    if value.is_empty() {
        return Ok(None);
    }

    let bad_date = || ColonsError::BadDate {
        line,
        value: value.to_string(),
    };

    if value.contains('T') {
        let fmt = format_description!("[year][month][day]T[hour][minute][second]");
        let parsed = PrimitiveDateTime::parse(value, &fmt).map_err(|_| bad_date())?;
        return Ok(Some(parsed.assume_utc()));
    }

    let seconds: i64 = value.parse().map_err(|_| bad_date())?;
    OffsetDateTime::from_unix_timestamp(seconds)
        .map(Some)
        .map_err(|_| bad_date())
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    const RSA4096_GOOD: &str = "\
pub:u:4096:1:1CA702E06E4BCC77:1533197590:1564733590::u:::scSC::::::23::0:
fpr:::::::::76D807795BF5E849A5577D631CA702E06E4BCC77:
uid:u::::1533197590::0DAFDC73F43FC173C2216BA2BB4928391676BF2F::GLEP63 test key <nobody@gentoo.org>::::::::::0:
sub:u:4096:1:7D36F079CF0CA133:1533197744:1564733744:::::s::::::23:
fpr:::::::::62D59FE2046463CD65D44A247D36F079CF0CA133:
";

    #[test]
    fn parses_a_complete_key_listing() {
        let keys = parse_colons(RSA4096_GOOD).unwrap();
        assert_eq!(keys.len(), 1);

        let key = &keys[0];
        assert_eq!(key.primary.validity, Validity::Valid);
        assert_eq!(key.primary.length, 4096);
        assert_eq!(key.primary.algo, PublicKeyAlgo::Rsa);
        assert_eq!(key.primary.key_id, "1CA702E06E4BCC77");
        assert_eq!(key.primary.created, Some(datetime!(2018-08-02 08:13:10 UTC)));
        assert_eq!(key.primary.expires, Some(datetime!(2019-08-02 08:13:10 UTC)));
        assert_eq!(key.primary.caps.render(), "sc");
        assert_eq!(key.primary.curve, "");

        assert_eq!(key.subkeys.len(), 1);
        assert_eq!(key.subkeys[0].key_id, "7D36F079CF0CA133");
        assert_eq!(key.subkeys[0].caps.render(), "s");

        assert_eq!(key.uids.len(), 1);
        assert_eq!(key.uids[0].user_id, "GLEP63 test key <nobody@gentoo.org>");
        assert_eq!(
            key.uids[0].uid_hash,
            "0DAFDC73F43FC173C2216BA2BB4928391676BF2F"
        );
    }

    #[test]
    fn parses_ecc_curve_name() {
        let listing = "\
pub:u:256:22:72ECB1B69A95C55B:1533197590:1564733590::u:::scSC::::::23::0:
uid:u::::1533197590::0DAFDC73F43FC173C2216BA2BB4928391676BF2F::Test <t@gentoo.org>::::::::::0:
sub:u:256:22:E16A504B1932E847:1533197744:1564733744:::::s:::::ed25519:23:
";
        let keys = parse_colons(listing).unwrap();
        assert_eq!(keys[0].subkeys[0].algo, PublicKeyAlgo::Eddsa);
        assert_eq!(keys[0].subkeys[0].curve, "ed25519");
    }

    #[test]
    fn parses_iso_style_dates() {
        let listing =
            "pub:u:4096:1:1CA702E06E4BCC77:20180802T081310:20190802T081310::u:::scSC::::::23::0:\n";
        let keys = parse_colons(listing).unwrap();
        assert_eq!(keys[0].primary.created, Some(datetime!(2018-08-02 08:13:10 UTC)));
    }

    #[test]
    fn revoked_and_expired_marks_decode() {
        let listing = "\
pub:r:4096:1:CD407D01E7D00880:946682289:978218289::-:::sc::::::23::0:
uid:e::::946682289::0DAFDC73F43FC173C2216BA2BB4928391676BF2F::Test <t@gentoo.org>::::::::::0:
";
        let keys = parse_colons(listing).unwrap();
        assert_eq!(keys[0].primary.validity, Validity::Revoked);
        assert_eq!(keys[0].uids[0].validity, Validity::Expired);
    }

    #[test]
    fn unknown_validity_mark_is_an_error() {
        let listing = "pub:x:4096:1:1CA702E06E4BCC77:1533197590:::u:::sc::::::23::0:\n";
        let err = parse_colons(listing).unwrap_err();
        assert!(matches!(err, ColonsError::UnknownValidity { line: 1, .. }));
    }

    #[test]
    fn malformed_algorithm_is_an_error() {
        let listing = "pub:u:4096:rsa:1CA702E06E4BCC77:1533197590:::u:::sc::::::23::0:\n";
        let err = parse_colons(listing).unwrap_err();
        assert!(matches!(err, ColonsError::BadAlgorithm { .. }));
    }

    #[test]
    fn unknown_algorithm_id_decodes_to_other() {
        let listing = "pub:u:1024:20:1CA702E06E4BCC77:1533197590:::u:::sc::::::23::0:\n";
        let keys = parse_colons(listing).unwrap();
        assert_eq!(keys[0].primary.algo, PublicKeyAlgo::Other(20));
    }

    #[test]
    fn unknown_capability_flag_is_an_error() {
        let listing = "pub:u:4096:1:1CA702E06E4BCC77:1533197590:::u:::s?::::::23::0:\n";
        let err = parse_colons(listing).unwrap_err();
        assert!(matches!(err, ColonsError::UnknownCapability { value: '?', .. }));
    }

    #[test]
    fn orphan_subkey_record_is_an_error() {
        let listing = "sub:u:4096:1:7D36F079CF0CA133:1533197744:::::::s::::::23:\n";
        let err = parse_colons(listing).unwrap_err();
        assert!(matches!(err, ColonsError::OrphanRecord { .. }));
    }

    #[test]
    fn unrelated_record_types_are_skipped() {
        let listing = "tru::1:1533197590:0:3:1:5\n";
        assert!(parse_colons(listing).unwrap().is_empty());
    }
}
