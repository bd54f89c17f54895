// Copyright (c) 2025 Raptor RPC Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Parameter lookup and validation for method handlers.
//!
//! A parameter bag is the `params` member of a call: an object addressed by
//! key, an array addressed by decimal index, or absent altogether.

use std::fmt;
use std::str::FromStr;

use serde_json::Value;
use thiserror::Error;

/// The runtime shape a required parameter must have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamKind {
    /// A JSON string
    String,
    /// A JSON number without a fractional part
    Integer,
    /// Any JSON number
    Number,
    /// A JSON array
    Array,
    /// A JSON object
    Object,
    /// `true` or `false`
    Boolean,
    /// `null`
    Null,
}

impl ParamKind {
    /// Lowercase name used in validation messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            ParamKind::String => "string",
            ParamKind::Integer => "integer",
            ParamKind::Number => "number",
            ParamKind::Array => "array",
            ParamKind::Object => "object",
            ParamKind::Boolean => "boolean",
            ParamKind::Null => "null",
        }
    }

    /// Returns true if `value` has this shape.
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            ParamKind::String => value.is_string(),
            ParamKind::Integer => match value {
                Value::Number(n) if n.is_i64() || n.is_u64() => true,
                Value::Number(n) => n.as_f64().is_some_and(|f| f.is_finite() && f.fract() == 0.0),
                _ => false,
            },
            ParamKind::Number => value.is_number(),
            ParamKind::Array => value.is_array(),
            ParamKind::Object => value.is_object(),
            ParamKind::Boolean => value.is_boolean(),
            ParamKind::Null => value.is_null(),
        }
    }
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when parsing an unknown kind name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown param kind: {0}")]
pub struct UnknownParamKind(pub String);

impl FromStr for ParamKind {
    type Err = UnknownParamKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "string" => Ok(ParamKind::String),
            "integer" => Ok(ParamKind::Integer),
            "number" => Ok(ParamKind::Number),
            "array" => Ok(ParamKind::Array),
            "object" => Ok(ParamKind::Object),
            "boolean" => Ok(ParamKind::Boolean),
            "null" => Ok(ParamKind::Null),
            other => Err(UnknownParamKind(other.to_string())),
        }
    }
}

/// A violated parameter contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParamError {
    /// The bag has no entry with this name.
    #[error("Missing required param {name}")]
    Missing {
        /// Parameter name
        name: String,
    },

    /// The entry exists but has the wrong shape.
    #[error("Param {name} should be of type {kind}")]
    WrongType {
        /// Parameter name
        name: String,
        /// Required kind
        kind: ParamKind,
    },
}

/// Looks up `name` in a parameter bag.
///
/// Positional bags are indexed by the decimal value of `name`.
pub fn lookup<'a>(bag: Option<&'a Value>, name: &str) -> Option<&'a Value> {
    match bag? {
        Value::Object(map) => map.get(name),
        Value::Array(items) => name.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    }
}

/// Confirms `name` is present in `bag` with the given kind and returns it.
pub fn require<'a>(bag: Option<&'a Value>, name: &str, kind: ParamKind) -> Result<&'a Value, ParamError> {
    let value = lookup(bag, name).ok_or_else(|| ParamError::Missing {
        name: name.to_string(),
    })?;

    if !kind.matches(value) {
        return Err(ParamError::WrongType {
            name: name.to_string(),
            kind,
        });
    }

    Ok(value)
}
