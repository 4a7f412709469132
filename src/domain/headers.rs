use std::collections::BTreeMap;

use reqwest::header::{HeaderName, HeaderValue};

use crate::error::ValidationError;

/// Checks that `name` and `value` are legal on the wire.
///
/// # Errors
///
/// Returns `InvalidHeaderName` or `InvalidHeaderValue` for anything HTTP
/// would refuse, such as spaces in a name or a line break in a value.
pub fn validate_header(name: &str, value: &str) -> Result<(), ValidationError> {
    HeaderName::from_bytes(name.as_bytes()).map_err(|err| ValidationError::InvalidHeaderName {
        name: name.to_owned(),
        source: err,
    })?;
    HeaderValue::from_str(value).map_err(|err| ValidationError::InvalidHeaderValue {
        name: name.to_owned(),
        source: err,
    })?;
    Ok(())
}

/// [`validate_header`] over every entry; stops at the first bad one.
///
/// # Errors
///
/// Returns the error of the first invalid entry.
pub fn validate_headers(headers: &BTreeMap<String, String>) -> Result<(), ValidationError> {
    headers
        .iter()
        .try_for_each(|(name, value)| validate_header(name, value))
}
