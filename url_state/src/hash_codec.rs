//! Category page state <-> `#<token>` URL fragment.

use common::hash_state::CategoryHashState;

use crate::data_definitions::url_param::{StateParseError, UrlParam};


/// Encodes the state, or returns "" when every field is empty.
pub fn serialize_hash_state(state: &CategoryHashState) -> String {
    UrlParam(state).to_string()
}

/// Decodes a fragment token. A leading `#` and percent-encoding are accepted.
///
/// Anything unreadable yields `None`, so the page starts from its defaults.
pub fn deserialize_hash_state(token: Option<&str>) -> Option<CategoryHashState> {
    let token = token?.trim();
    let token = token.strip_prefix('#').unwrap_or(token);
    if token.trim().is_empty() {
        return None;
    }

    match token.parse::<UrlParam<CategoryHashState>>() {
        Ok(UrlParam(state)) => Some(state),
        Err(err) => {
            log_decode_failure(token, &err);
            None
        }
    }
}

pub fn build_hash(state: &CategoryHashState) -> String {
    let token = serialize_hash_state(state);
    if token.is_empty() {
        return token;
    }
    format!("#{token}")
}

#[cfg(feature = "server")]
fn log_decode_failure(token: &str, err: &StateParseError) {
    tracing::warn!("Failed to decode category hash state {:?}: {}", token, err);
}

#[cfg(not(feature = "server"))]
fn log_decode_failure(_token: &str, _err: &StateParseError) {}
