use log::debug;
use serde::Serialize;
use subtle::ConstantTimeEq;

use crate::error::ValidationError;
use crate::query::{self, FieldSet};
use crate::sign::SigningKey;
use crate::user::{extract_user, WebAppUser};

/// Init data whose signature has been checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedInitData {
    /// Every signed field, `hash` excluded.
    pub fields: FieldSet,

    /// The embedded user profile, if there is a readable one.
    pub user: Option<WebAppUser>,
}

impl ValidatedInitData {
    /// Returns the decoded value of a signed field.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }
}

/// Verifies init data issued for a single bot.
///
/// The signing key is derived from the token when the verifier is built and is
/// never changed afterwards. To rotate the token build a new verifier and swap
/// it in, e.g. behind an `Arc`. Verification does not block and keeps no state
/// between calls, so one verifier can serve any number of threads.
#[derive(Debug, Clone)]
pub struct Verifier {
    key: SigningKey,
}

impl Verifier {
    /// Creates a verifier for init data signed with the given bot token.
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        Verifier {
            key: SigningKey::derive(secret),
        }
    }

    /// Validates passed init data. This method expects init data to be
    /// passed in the exact raw format the client received it in. Returns `Ok`
    /// in case init data is signed correctly, and it is allowed to trust it.
    ///
    /// A profile in the `user` field that can't be read doesn't fail the
    /// verification, [`ValidatedInitData::user`] is `None` instead.
    pub fn verify(&self, raw: &str) -> Result<ValidatedInitData, ValidationError> {
        let (fields, received) = query::parse(raw).map_err(|err| {
            debug!("init data rejected: {err}");
            err
        })?;

        let expected = self.key.sign(&fields);
        if !bool::from(expected.as_bytes().ct_eq(received.as_bytes())) {
            debug!("init data rejected: signature mismatch");
            return Err(ValidationError::SignatureMismatch);
        }

        let user = extract_user(&fields);
        Ok(ValidatedInitData { fields, user })
    }

    /// Same as [`Verifier::verify`], flattened into the shape handed back to
    /// clients.
    pub fn verdict(&self, raw: &str) -> Verdict {
        self.verify(raw).into()
    }
}

/// Verifies init data against a secret without keeping the derived key around.
pub fn verify(raw: &str, secret: impl AsRef<[u8]>) -> Result<ValidatedInitData, ValidationError> {
    Verifier::new(secret).verify(raw)
}

/// Outcome of a verification as seen from outside: whether the data is
/// authentic and, if it is, who sent it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Verdict {
    pub valid: bool,
    pub user: Option<WebAppUser>,
}

impl From<Result<ValidatedInitData, ValidationError>> for Verdict {
    fn from(result: Result<ValidatedInitData, ValidationError>) -> Self {
        match result {
            Ok(data) => Verdict {
                valid: true,
                user: data.user,
            },
            Err(_) => Verdict::default(),
        }
    }
}
