//! Name-based queries over enum metadata tables.
//!
//! These helpers power form validation and generic field handling: callers
//! hold a property name and a candidate value as plain data and resolve them
//! against the typed tables declared by each [`FlexEnum`].

use flexup_core::{AppError, AppResult};

use crate::registry::{Choice, FlexEnum, PropertyValue, ShortList, undeclared_property};

/// Returns every `(code, label)` pair of the enum type in declaration order.
#[must_use]
pub fn choices<E: FlexEnum>() -> Vec<Choice> {
    E::members().iter().map(|member| member.choice()).collect()
}

/// Returns whether the code designates a valid member.
///
/// A missing code is never valid. When a short-list is given, the code must
/// also belong to it.
#[must_use]
pub fn is_valid<E: FlexEnum>(code: Option<&str>, short_list: Option<&ShortList<E>>) -> bool {
    let Some(code) = code else {
        return false;
    };

    match short_list {
        Some(list) => list.contains_code(code),
        None => E::members().iter().any(|member| member.code() == code),
    }
}

/// Returns whether the member is a valid choice.
///
/// A missing member is never valid. When a short-list is given, the member
/// must belong to it; without one every declared member is valid.
#[must_use]
pub fn is_valid_member<E: FlexEnum>(member: Option<E>, short_list: Option<&ShortList<E>>) -> bool {
    match (member, short_list) {
        (None, _) => false,
        (Some(member), Some(list)) => list.contains(member),
        (Some(_), None) => true,
    }
}

/// Returns whether the code designates a valid member that also satisfies a
/// property predicate.
///
/// The predicate requires the named property to be present, or to equal the
/// given value when one is supplied. A short-list and a predicate combine:
/// the member must satisfy both.
///
/// # Errors
///
/// Returns [`AppError::InvalidArgument`] when a property value is given
/// without a property name, or when the name is not declared for the enum
/// type.
pub fn is_valid_with_property<E: FlexEnum>(
    code: Option<&str>,
    short_list: Option<&ShortList<E>>,
    property_name: Option<&str>,
    property_value: Option<&PropertyValue>,
) -> AppResult<bool> {
    let Some(code) = code else {
        return Ok(false);
    };
    let Some(member) = E::members().iter().copied().find(|member| member.code() == code) else {
        return Ok(false);
    };

    if let Some(list) = short_list
        && !list.contains(member)
    {
        return Ok(false);
    }

    match (property_name, property_value) {
        (None, None) => Ok(true),
        (None, Some(_)) => Err(AppError::InvalidArgument(
            "a property name is required to match a property value".to_owned(),
        )),
        (Some(name), None) => Ok(member.property(name)?.is_some()),
        (Some(name), Some(value)) => Ok(member.property(name)?.as_ref() == Some(value)),
    }
}

/// Returns every member whose named property equals the value, in
/// declaration order. An empty result means no member carries the value.
///
/// # Errors
///
/// Returns [`AppError::InvalidArgument`] when the property name is not
/// declared for the enum type.
pub fn find_by_property<E: FlexEnum>(name: &str, value: &PropertyValue) -> AppResult<Vec<E>> {
    if name.is_empty() {
        return Err(AppError::InvalidArgument(
            "a property name is required to match a property value".to_owned(),
        ));
    }
    if !E::property_names().contains(&name) {
        return Err(undeclared_property::<E>(name));
    }

    let mut matches = Vec::new();
    for member in E::members().iter().copied() {
        if member.property(name)?.as_ref() == Some(value) {
            matches.push(member);
        }
    }

    Ok(matches)
}

/// Returns the `(code, label)` pairs of the members whose named property is
/// present (non-null), in declaration order.
///
/// # Errors
///
/// Returns [`AppError::InvalidArgument`] when the property name is not
/// declared for the enum type.
pub fn filter_choices<E: FlexEnum>(name: &str) -> AppResult<Vec<Choice>> {
    if !E::property_names().contains(&name) {
        return Err(undeclared_property::<E>(name));
    }

    let mut choices = Vec::new();
    for member in E::members().iter().copied() {
        if member.property(name)?.is_some() {
            choices.push(member.choice());
        }
    }

    Ok(choices)
}
