use std::collections::BTreeMap;

use percent_encoding::percent_decode_str;

use crate::error::{MalformedInput, ValidationError};

/// Name of the field carrying the signature.
pub const HASH_KEY: &str = "hash";

/// Decoded init data fields keyed by name.
///
/// A `BTreeMap` iterates in byte-lexicographic key order, which is exactly the
/// order the check string needs.
pub type FieldSet = BTreeMap<String, String>;

/// Decodes a raw init data query string into its fields, keeping `hash` in
/// the set.
///
/// Pairs are split on `&`, empty segments are skipped and a segment without
/// `=` becomes a key with an empty value. When a key repeats, the first
/// occurrence wins and later ones are dropped.
pub fn parse_fields(raw: &str) -> Result<FieldSet, MalformedInput> {
    check_well_formed(raw)?;

    let mut fields = FieldSet::new();
    let mut offset = 0;
    for segment in raw.split('&') {
        let start = offset;
        offset += segment.len() + 1;
        if segment.is_empty() {
            continue;
        }

        let (key, value, value_start) = match segment.split_once('=') {
            Some((key, value)) => (key, value, start + key.len() + 1),
            None => (segment, "", start + segment.len()),
        };

        let key = decode_component(key, start)?;
        let value = decode_component(value, value_start)?;
        fields.entry(key).or_insert(value);
    }

    Ok(fields)
}

// Decoded bytes must be valid UTF-8 as they are; a lossy replacement would let
// distinct payloads share one check string.
fn decode_component(raw: &str, position: usize) -> Result<String, MalformedInput> {
    let raw = raw.replace('+', " ");
    let bytes = percent_decode_str(&raw).collect::<Vec<u8>>();

    String::from_utf8(bytes).map_err(|_| MalformedInput::InvalidUtf8 { position })
}

/// Decodes raw init data and splits off the received signature.
///
/// Returns the remaining fields together with the value of `hash`. The
/// signature is returned as it was decoded from the query, it is not
/// hex-decoded here.
pub fn parse(raw: &str) -> Result<(FieldSet, String), ValidationError> {
    let mut fields = parse_fields(raw)?;

    let hash = fields
        .remove(HASH_KEY)
        .ok_or(ValidationError::MissingSignature)?;

    Ok((fields, hash))
}

// percent_decode passes broken escapes through untouched, so they are
// rejected up front.
fn check_well_formed(raw: &str) -> Result<(), MalformedInput> {
    let bytes = raw.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b';' => return Err(MalformedInput::SemicolonSeparator),
            b'%' => {
                let valid = bytes
                    .get(i + 1..i + 3)
                    .is_some_and(|pair| pair.iter().all(u8::is_ascii_hexdigit));
                if !valid {
                    return Err(MalformedInput::InvalidEscape { position: i });
                }
                i += 3;
            }
            _ => i += 1,
        }
    }
    Ok(())
}
