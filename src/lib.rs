#![forbid(unsafe_code)]

//! Verification of Mini App init data.
//!
//! Init data is the signed query string a Mini App client sends to its backend.
//! Validation follows the algorithm described in the official docs:
//! https://core.telegram.org/bots/webapps#validating-data-received-via-the-mini-app
//!
//! ```
//! use webapp_init_data::{sign::to_signed_query_string, FieldSet, Verifier};
//!
//! let mut fields = FieldSet::new();
//! fields.insert("auth_date".into(), "1700000000".into());
//! fields.insert("user".into(), r#"{"id":1,"first_name":"A"}"#.into());
//! let init_data = to_signed_query_string(&fields, "testtoken");
//!
//! let data = Verifier::new("testtoken").verify(&init_data).unwrap();
//! assert_eq!(data.user.unwrap().id, Some(1));
//! ```

pub mod error;
pub mod query;
pub mod sign;
pub mod token;
pub mod user;
pub mod verifier;

pub use error::{ConfigError, MalformedInput, MalformedProfile, ValidationError};
pub use query::{parse, FieldSet};
pub use sign::{canonicalize, derive_expected_signature, SigningKey};
pub use token::BotToken;
pub use user::{extract_user, WebAppUser};
pub use verifier::{verify, ValidatedInitData, Verdict, Verifier};
