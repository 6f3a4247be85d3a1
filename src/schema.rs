//! Strict validation of untrusted model output.
//!
//! Shape (field names, types, closed label sets, unknown fields) is enforced by serde with
//! `deny_unknown_fields`; bounds and minimum text lengths are enforced by [`Validate`].

use std::error::Error;
use std::fmt;

use serde::de::DeserializeOwned;

#[derive(Debug)]
pub enum SchemaViolation {
    Shape(serde_json::Error),
    OutOfRange {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },
    TooShort {
        field: &'static str,
        len: usize,
        min: usize,
    },
}

impl fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shape(err) => write!(f, "unexpected shape: {err}"),
            Self::OutOfRange {
                field,
                value,
                min,
                max,
            } => write!(f, "{field} = {value} is outside {min}..={max}"),
            Self::TooShort { field, len, min } => {
                write!(f, "{field} has {len} characters, expected at least {min}")
            }
        }
    }
}

impl Error for SchemaViolation {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Shape(err) => Some(err),
            _ => None,
        }
    }
}

pub trait Validate {
    fn validate(&self) -> Result<(), SchemaViolation>;
}

pub fn check_range(
    field: &'static str,
    value: impl Into<i64>,
    min: i64,
    max: i64,
) -> Result<(), SchemaViolation> {
    let value = value.into();
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(SchemaViolation::OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}

pub fn check_min_len(field: &'static str, value: &str, min: usize) -> Result<(), SchemaViolation> {
    let len = value.trim().chars().count();
    if len >= min {
        Ok(())
    } else {
        Err(SchemaViolation::TooShort { field, len, min })
    }
}

/// Converts an already-parsed JSON value into `T` and runs its bound checks.
pub fn conform<T>(value: serde_json::Value) -> Result<T, SchemaViolation>
where
    T: DeserializeOwned + Validate,
{
    let parsed: T = serde_json::from_value(value).map_err(SchemaViolation::Shape)?;
    parsed.validate()?;
    Ok(parsed)
}
