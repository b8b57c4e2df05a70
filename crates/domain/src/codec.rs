//! Conversion between enum members and their storage codes.
//!
//! Persistence layers store the stable short code of each member. Decoding
//! reports unknown codes as validation errors so that bad stored data or bad
//! form input surfaces with the full list of accepted codes.

use flexup_core::{AppError, AppResult};

use crate::registry::FlexEnum;

/// Returns the storage code of the member.
#[must_use]
pub fn encode<E: FlexEnum>(member: E) -> &'static str {
    member.code()
}

/// Returns the storage code of the member, or `None` for a missing value.
#[must_use]
pub fn encode_optional<E: FlexEnum>(member: Option<E>) -> Option<&'static str> {
    member.map(encode)
}

/// Decodes a storage code into a member.
///
/// # Errors
///
/// Returns [`AppError::Validation`] listing the accepted codes when the code
/// is unknown.
pub fn decode<E: FlexEnum>(code: &str) -> AppResult<E> {
    E::from_code(code).map_err(|_| {
        let accepted: Vec<&str> = E::members().iter().map(|member| member.code()).collect();
        AppError::Validation(format!(
            "'{}' is not an accepted code; accepted codes are [{}]",
            code,
            accepted.join(", ")
        ))
    })
}

/// Decodes an optional storage code, passing a missing value through.
///
/// # Errors
///
/// Returns [`AppError::Validation`] when a present code is unknown.
pub fn decode_optional<E: FlexEnum>(code: Option<&str>) -> AppResult<Option<E>> {
    code.map(decode).transpose()
}
