//! Override channel and redaction for configuration sections.
//!
//! Each section kind publishes a static table of the keys it accepts through
//! the override channel. Keys marked `redact` are never surfaced: displayed
//! elements only tell whether they are set.

use std::fmt;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverrideField {
    pub name: &'static str,
    pub redact: bool,
}

impl OverrideField {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            redact: false,
        }
    }

    pub const fn redacted(name: &'static str) -> Self {
        Self { name, redact: true }
    }
}

pub fn is_redacted(fields: &[OverrideField], name: &str) -> bool {
    fields.iter().any(|field| field.redact && field.name == name)
}

/// Displayable form of a configuration section.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Element {
    pub id: String,
    pub options: Map<String, Value>,
    pub redacted: Vec<String>,
}

impl Element {
    pub fn new<T: Serialize>(
        id: impl Into<String>,
        value: &T,
        fields: &[OverrideField],
    ) -> Result<Self, OverrideError> {
        let mut options = to_object(value)?;
        let mut redacted = vec![];

        for field in fields.iter().filter(|field| field.redact) {
            if let Some(v) = options.get_mut(field.name) {
                *v = Value::Bool(is_set(v));
                redacted.push(field.name.to_owned());
            }
        }
        redacted.sort();

        Ok(Self {
            id: id.into(),
            options,
            redacted,
        })
    }
}

/// Renders a section as compact JSON with redacted fields masked.
pub struct Redacted<'a, T> {
    value: &'a T,
    fields: &'static [OverrideField],
}

impl<'a, T> Redacted<'a, T> {
    pub fn new(value: &'a T, fields: &'static [OverrideField]) -> Self {
        Self { value, fields }
    }
}

impl<T: Serialize> fmt::Display for Redacted<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match Element::new("", self.value, self.fields) {
            Ok(element) => fmt::Display::fmt(&Value::Object(element.options), f),
            Err(_) => f.write_str("{..}"),
        }
    }
}

/// Returns a copy of `base` with the options in `set` written over it.
///
/// Every key of `set` must appear in `fields`. Defaults and validation are
/// left to the caller.
pub fn apply_overrides<T>(
    base: &T,
    fields: &[OverrideField],
    set: &Map<String, Value>,
) -> Result<T, OverrideError>
where
    T: Serialize + DeserializeOwned,
{
    let mut options = to_object(base)?;

    for (key, value) in set {
        if !fields.iter().any(|field| field.name == key) {
            return Err(OverrideError::UnknownOption(key.clone()));
        }
        options.insert(key.clone(), value.clone());
    }

    serde_json::from_value(Value::Object(options)).map_err(OverrideError::Invalid)
}

fn to_object<T: Serialize>(value: &T) -> Result<Map<String, Value>, OverrideError> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        _ => Err(OverrideError::NotAnObject),
    }
}

fn is_set(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(_) => true,
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum OverrideError {
    #[error("unknown option {0:?}")]
    UnknownOption(String),
    #[error("invalid override: {0}")]
    Invalid(serde_json::Error),
    #[error("section does not serialize to an object")]
    NotAnObject,
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
}
