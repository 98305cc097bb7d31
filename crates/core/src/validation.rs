//! Input validation utilities.
//!
//! This module contains the checks run on caller-supplied values before they reach the
//! template: file separators at construction time and attribute maps at render time.

use crate::constants::VALID_FILE_SEPARATORS;
use crate::{AttributeMap, AttributeRegistry, TemplateError, TemplateResult};

/// Validates that `separator` is one of the two supported path separators.
///
/// # Errors
///
/// Returns `InvalidFileSeparator` for anything other than `"/"` or `"\"`.
pub fn validate_file_separator(separator: &str) -> TemplateResult<()> {
    if VALID_FILE_SEPARATORS.contains(&separator) {
        Ok(())
    } else {
        Err(TemplateError::InvalidFileSeparator(separator.to_owned()))
    }
}

/// Validates that every key of `attributes` is registered.
///
/// Keys are scanned in map order and only the first unknown key is reported.
///
/// # Errors
///
/// Returns `UnknownAttribute` naming the first unregistered key.
pub fn validate_known_attributes(
    registry: &AttributeRegistry,
    attributes: &AttributeMap,
) -> TemplateResult<()> {
    match attributes.keys().find(|key| !registry.contains(key)) {
        Some(unknown) => Err(TemplateError::UnknownAttribute(unknown.clone())),
        None => Ok(()),
    }
}
