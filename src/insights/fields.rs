use std::collections::BTreeMap;
use std::error::Error;
use std::fmt;

use serde_json::Value;

/// Flat, normalised request fields for one insight call.
///
/// Required fields are guaranteed present and non-blank once extraction succeeds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fields {
    values: BTreeMap<&'static str, String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    NotAnObject,
    Missing(&'static str),
    WrongType(&'static str),
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAnObject => write!(f, "Request body must be a JSON object."),
            Self::Missing(field) => write!(f, "Missing {field} parameter in request body."),
            Self::WrongType(field) => {
                write!(f, "Field \"{field}\" must be a string or a number.")
            }
        }
    }
}

impl Error for FieldError {}

impl Fields {
    /// Pulls `required` and `optional` fields out of a JSON body. Unlisted keys are ignored.
    pub fn extract(
        body: &Value,
        required: &[&'static str],
        optional: &[&'static str],
    ) -> Result<Self, FieldError> {
        let object = body.as_object().ok_or(FieldError::NotAnObject)?;
        let mut values = BTreeMap::new();

        for &name in required {
            let text = object
                .get(name)
                .map(|value| as_text(name, value))
                .transpose()?
                .flatten()
                .ok_or(FieldError::Missing(name))?;
            values.insert(name, text);
        }

        for &name in optional {
            if let Some(text) = object
                .get(name)
                .map(|value| as_text(name, value))
                .transpose()?
                .flatten()
            {
                values.insert(name, text);
            }
        }

        Ok(Self { values })
    }

    /// Value of a field, or an empty string when it was optional and absent.
    pub fn get(&self, name: &str) -> &str {
        self.values.get(name).map(String::as_str).unwrap_or_default()
    }

    pub fn optional(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }
}

fn as_text(name: &'static str, value: &Value) -> Result<Option<String>, FieldError> {
    match value {
        Value::Null => Ok(None),
        Value::String(text) => {
            let trimmed = text.trim();
            Ok((!trimmed.is_empty()).then(|| trimmed.to_string()))
        }
        Value::Number(number) => Ok(Some(number.to_string())),
        Value::Bool(_) | Value::Array(_) | Value::Object(_) => Err(FieldError::WrongType(name)),
    }
}
