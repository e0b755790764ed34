use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::MalformedProfile;
use crate::query::FieldSet;

/// Name of the field carrying the JSON encoded user profile.
pub const USER_KEY: &str = "user";

/// Describes the identity of the user who opened the Mini App.
///
/// Only the fields below are copied out of the embedded profile. Each of them
/// is absent when the profile omits it or carries a value of the wrong type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebAppUser {
    /// User ID.
    pub id: Option<i64>,

    /// User's first name.
    pub first_name: Option<String>,

    /// User's last name.
    pub last_name: Option<String>,

    /// IETF language tag of the user's language.
    pub language_code: Option<String>,

    /// True, if this user allowed the bot to message them.
    pub allows_write_to_pm: Option<bool>,
}

impl WebAppUser {
    fn from_object(object: &Map<String, Value>) -> Self {
        let string = |key: &str| object.get(key).and_then(Value::as_str).map(str::to_owned);

        WebAppUser {
            id: object.get("id").and_then(Value::as_i64),
            first_name: string("first_name"),
            last_name: string("last_name"),
            language_code: string("language_code"),
            allows_write_to_pm: object.get("allows_write_to_pm").and_then(Value::as_bool),
        }
    }
}

/// Parses the value of a `user` field.
///
/// The value is percent-decoded once more before being read as JSON, so both
/// plain and doubly encoded profiles are accepted. `+` is left as is.
pub fn parse_user(raw: &str) -> Result<WebAppUser, MalformedProfile> {
    let decoded = urlencoding::decode(raw)?;
    let value: Value = serde_json::from_str(&decoded)?;

    match value {
        Value::Object(object) => Ok(WebAppUser::from_object(&object)),
        _ => Err(MalformedProfile::NotAnObject),
    }
}

/// Extracts the user profile from already verified fields.
///
/// A missing or empty `user` field yields `None`, and so does a profile that
/// can't be decoded. Neither affects the validity of the init data.
pub fn extract_user(fields: &FieldSet) -> Option<WebAppUser> {
    let raw = fields.get(USER_KEY).filter(|raw| !raw.is_empty())?;

    match parse_user(raw) {
        Ok(user) => Some(user),
        Err(err) => {
            debug!("ignoring embedded user profile: {err}");
            None
        }
    }
}
