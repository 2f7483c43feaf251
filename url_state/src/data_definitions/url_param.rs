//! URL parameter helpers and types.

use std::{borrow::Cow, fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::lz_string::{self, LzStringError};


// Any serde type can ride in a URL as long as it round-trips through JSON.
// Empty values are stripped first so that an all-default state encodes as "".
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct UrlParam<T>(pub T);

impl <T> From<T> for UrlParam<T> {
    fn from(value: T) -> Self {
        UrlParam(value)
    }
}

// Display the state in a way that can be parsed by FromStr
impl<T: Serialize> Display for UrlParam<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Ok(value) = serde_json::to_value(&self.0) {
            if let Some(value) = strip_empty(value) {
                write!(f, "{}", lz_string::compress_to_base64(&value.to_string()))?;
            }
        }
        Ok(())
    }
}

#[derive(Debug)]
pub enum StateParseError {
    Empty,
    UriDecodeError(std::string::FromUtf8Error),
    DecompressError(LzStringError),
    JsonError(serde_json::Error),
}

impl std::fmt::Display for StateParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "Empty state token"),
            Self::UriDecodeError(err) => write!(f, "Failed to percent-decode: {}", err),
            Self::DecompressError(err) => write!(f, "Failed to decompress: {}", err),
            Self::JsonError(err) => write!(f, "Failed to deserialize: {}", err),
        }
    }
}

impl std::error::Error for StateParseError {}

// Parse the state from a string that was created by Display
impl<T: DeserializeOwned> FromStr for UrlParam<T> {
    type Err = StateParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        if token.is_empty() {
            return Err(StateParseError::Empty);
        }
        // tokens copied out of an address bar may still be percent-encoded (%2B, %2F, %3D)
        let token = if token.contains('%') {
            urlencoding::decode(token).map_err(StateParseError::UriDecodeError)?
        } else {
            Cow::Borrowed(token)
        };
        let decompressed = lz_string::decompress_from_base64(&token)
            .map_err(StateParseError::DecompressError)?;
        let parsed = serde_json::from_str(&decompressed)
            .map_err(StateParseError::JsonError)?;
        Ok(UrlParam(parsed))
    }
}


/// Removes null, `[]` and `{}` object members, recursively.
///
/// Array elements are cleaned but never dropped, so positions stay meaningful.
/// Returns `None` when nothing is left.
pub fn strip_empty(value: Value) -> Option<Value> {
    let stripped = strip_value(value);
    if is_empty_value(&stripped) {
        None
    } else {
        Some(stripped)
    }
}

fn strip_value(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, value)| (key, strip_value(value)))
                .filter(|(_key, value)| !is_empty_value(value))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(strip_value).collect()),
        other => other,
    }
}

fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}
