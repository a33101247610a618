//! Stable machine-readable reason codes.
//!
//! Codes use a dotted-colon namespace (`area:detail[:qualifier]`) and are part
//! of the output contract: scripts key off them, so they never change meaning.

// Record validity
pub const VALIDITY_INVALID: &str = "validity:invalid";
pub const VALIDITY_REVOKED: &str = "validity:revoked";
pub const VALIDITY_EXPIRED: &str = "validity:expired";

// Algorithm and key length
pub const ALGO_RSA_DEPRECATED_ONLY: &str = "algo:rsa:deprecated_only";
pub const ALGO_RSA_TOOSHORT: &str = "algo:rsa:tooshort";
pub const ALGO_RSA_SHORT: &str = "algo:rsa:short";
pub const ALGO_DSA: &str = "algo:dsa";
pub const ALGO_DSA_TOOSHORT: &str = "algo:dsa:tooshort";
pub const ALGO_DSA_DISCOURAGED: &str = "algo:dsa:discouraged";
pub const ALGO_ECC: &str = "algo:ecc";
pub const ALGO_ECC_INVALID: &str = "algo:ecc:invalid";
pub const ALGO_INVALID: &str = "algo:invalid";

// Expiration
pub const EXPIRE_NONE: &str = "expire:none";
pub const EXPIRE_LONG: &str = "expire:long";
pub const EXPIRE_SHORT: &str = "expire:short";

// Subkey hygiene
pub const SUBKEY_MULTIPURPOSE: &str = "subkey:multipurpose";
pub const SUBKEY_NONE_SIGN: &str = "subkey:none:sign";
pub const SUBKEY_NONE_ENCRYPT: &str = "subkey:none:encrypt";

// UID requirements
pub const UID_NOGENTOO: &str = "uid:nogentoo";
