//! Key metadata model, as produced by the GnuPG decoder.
//!
//! Records are constructed once and treated as read-only by the evaluator.

use time::OffsetDateTime;

/// Validity state of a key, subkey, or UID.
///
/// `Valid` covers every non-terminal GnuPG validity mark (unknown, marginal,
/// full, ultimate, ...); the rules only distinguish the terminal states.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Validity {
    Valid,
    Invalid,
    Revoked,
    Expired,
}

impl Validity {
    /// Revoked and expired records are skipped entirely by per-record rules.
    pub fn is_inactive(self) -> bool {
        matches!(self, Validity::Revoked | Validity::Expired)
    }
}

/// OpenPGP public-key algorithm (RFC 4880 §9.1 ids).
///
/// `Other` carries an unrecognized numeric id so the unexpected-algorithm
/// rule can report it instead of the decoder rejecting the whole key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PublicKeyAlgo {
    Rsa,
    RsaEncryptOnly,
    RsaSignOnly,
    Elgamal,
    Dsa,
    Ecdh,
    Ecdsa,
    Eddsa,
    Other(u16),
}

impl PublicKeyAlgo {
    pub fn from_openpgp_id(id: u16) -> Self {
        match id {
            1 => PublicKeyAlgo::Rsa,
            2 => PublicKeyAlgo::RsaEncryptOnly,
            3 => PublicKeyAlgo::RsaSignOnly,
            16 => PublicKeyAlgo::Elgamal,
            17 => PublicKeyAlgo::Dsa,
            18 => PublicKeyAlgo::Ecdh,
            19 => PublicKeyAlgo::Ecdsa,
            22 => PublicKeyAlgo::Eddsa,
            other => PublicKeyAlgo::Other(other),
        }
    }
}

/// Capability flags of a key or subkey.
///
/// Only a key's own capabilities are tracked; the uppercase "usable via a
/// subkey" marks in GnuPG output carry no policy meaning and are dropped by
/// the decoder.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Capabilities {
    pub sign: bool,
    pub encrypt: bool,
    pub certify: bool,
    pub authenticate: bool,
}

impl Capabilities {
    pub fn count(self) -> usize {
        [self.sign, self.encrypt, self.certify, self.authenticate]
            .iter()
            .filter(|&&c| c)
            .count()
    }

    /// Compact GnuPG-style rendering ("sc", "e", ...), for messages.
    pub fn render(self) -> String {
        let mut s = String::new();
        if self.sign {
            s.push('s');
        }
        if self.encrypt {
            s.push('e');
        }
        if self.certify {
            s.push('c');
        }
        if self.authenticate {
            s.push('a');
        }
        s
    }
}

/// Common shape of primary keys and subkeys.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyRecord {
    pub validity: Validity,
    pub length: u32,
    pub algo: PublicKeyAlgo,
    pub key_id: String,
    pub created: Option<OffsetDateTime>,
    pub expires: Option<OffsetDateTime>,
    pub caps: Capabilities,
    /// Elliptic-curve name; empty for non-ECC algorithms.
    pub curve: String,
}

/// A primary key with its subkeys and UIDs, in keyring order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicKey {
    pub primary: KeyRecord,
    pub subkeys: Vec<KeyRecord>,
    pub uids: Vec<Uid>,
}

/// A user identity certified under a primary key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Uid {
    pub validity: Validity,
    pub created: Option<OffsetDateTime>,
    pub expires: Option<OffsetDateTime>,
    pub uid_hash: String,
    /// Raw user id string, conventionally `Display Name <email>`.
    pub user_id: String,
}

impl Uid {
    /// The e-mail address embedded in the user id, if any.
    ///
    /// Takes the content of the last `<...>` pair, or the whole string when
    /// it is a bare address.
    pub fn mail_address(&self) -> Option<&str> {
        if let (Some(start), Some(end)) = (self.user_id.rfind('<'), self.user_id.rfind('>'))
            && start < end
        {
            return Some(&self.user_id[start + 1..end]);
        }
        let trimmed = self.user_id.trim();
        trimmed.contains('@').then_some(trimmed)
    }
}
