use std::fmt;

use hmac::{Hmac, Mac};
use log::{log_enabled, trace, Level};
use sha2::Sha256;
use url::form_urlencoded;

use crate::error::MalformedInput;
use crate::query::{self, FieldSet, HASH_KEY};

type HmacSha256 = Hmac<Sha256>;

/// Key of the first HMAC round, fixed by the platform.
const WEB_APP_DATA: &[u8] = b"WebAppData";

fn hmac_sha256(key: &[u8], message: &[u8]) -> [u8; 32] {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC accepts any key length");
    mac.update(message);

    let mut out = [0u8; 32];
    out.copy_from_slice(&mac.finalize().into_bytes());
    out
}

/// Key derived from the bot token, `HMAC-SHA256("WebAppData", token)`.
///
/// Depends on the secret alone, so it is computed once and reused for every
/// payload signed with that secret.
#[derive(Clone)]
pub struct SigningKey([u8; 32]);

impl SigningKey {
    pub fn derive(secret: impl AsRef<[u8]>) -> Self {
        SigningKey(hmac_sha256(WEB_APP_DATA, secret.as_ref()))
    }

    /// Lowercase hex `HMAC-SHA256(self, check_string)`.
    pub fn sign_check_string(&self, check_string: &str) -> String {
        hex::encode(hmac_sha256(&self.0, check_string.as_bytes()))
    }

    /// Signs a field set. Any `hash` entry is ignored.
    pub fn sign(&self, fields: &FieldSet) -> String {
        self.sign_check_string(&canonicalize(fields))
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningKey(<redacted>)")
    }
}

/// Builds the data check string: `key=value` lines sorted by key and joined
/// with `\n`, without a trailing newline. The `hash` entry never takes part.
pub fn canonicalize(fields: &FieldSet) -> String {
    // FieldSet iterates in byte order of its keys
    let signed = fields
        .iter()
        .filter(|(key, _)| key.as_str() != HASH_KEY)
        .collect::<Vec<_>>();

    if log_enabled!(Level::Trace) {
        let keys = signed.iter().map(|(key, _)| key).collect::<Vec<_>>();
        trace!("check string keys: {keys:?}");
    }

    let pairs = signed
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<String>>();

    pairs.join("\n")
}

/// Derives the signature the platform would have produced for `check_string`.
///
/// Step one derives the signing key from the secret, step two signs the check
/// string with it. The result is lowercase hex.
pub fn derive_expected_signature(check_string: &str, secret: impl AsRef<[u8]>) -> String {
    SigningKey::derive(secret).sign_check_string(check_string)
}

/// Signs passed fields using the specified secret. The `hash` field is
/// skipped, no other field is added or removed.
pub fn sign(fields: &FieldSet, secret: impl AsRef<[u8]>) -> String {
    SigningKey::derive(secret).sign(fields)
}

/// Parses a raw query string and signs its fields. A `hash` already present in
/// the query is ignored.
pub fn sign_query_string(raw: &str, secret: impl AsRef<[u8]>) -> Result<String, MalformedInput> {
    let fields = query::parse_fields(raw)?;
    Ok(sign(&fields, secret))
}

/// Encodes fields as a query string and appends a freshly computed `hash`,
/// producing init data the platform itself could have issued.
pub fn to_signed_query_string(fields: &FieldSet, secret: impl AsRef<[u8]>) -> String {
    let hash = sign(fields, secret);

    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(fields.iter().filter(|(key, _)| key.as_str() != HASH_KEY))
        .append_pair(HASH_KEY, &hash)
        .finish()
}
