//! Input validation utilities
//!
//! Request bodies are read field by field out of a JSON object so that every
//! problem can be reported against the field that caused it. The field
//! validators at the bottom are shared with the write models, which run them
//! again right before anything reaches the database.

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::models::Category;

pub const MISSING_FIELD: &str = "Missing data for required field.";
pub const NULL_FIELD: &str = "Field may not be null.";
pub const UNKNOWN_FIELD: &str = "Unknown field.";
pub const INVALID_INPUT: &str = "Invalid input type.";

/// Key used for errors that concern the body as a whole
pub const SCHEMA_KEY: &str = "_schema";

/// Field-keyed validation failures
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Errors holding a single message for a single field
    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    /// Record the outcome of a field validator
    pub fn check(&mut self, field: &str, result: Result<(), String>) {
        if let Err(message) = result {
            self.add(field, message);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// `Ok(value)` when nothing was recorded
    pub fn into_result<T>(self, value: T) -> Result<T, ValidationErrors> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            if !first {
                write!(f, "; ")?;
            }
            first = false;
            write!(f, "{}: {}", field, messages.join(" "))?;
        }
        Ok(())
    }
}

/// Parse a raw body into JSON, reporting malformed input against `_schema`
pub fn parse_json(body: &[u8]) -> Result<Value, ValidationErrors> {
    serde_json::from_slice(body).map_err(|_| ValidationErrors::single(SCHEMA_KEY, INVALID_INPUT))
}

const TRUTHY: [&str; 14] = [
    "t", "T", "true", "True", "TRUE", "on", "On", "ON", "y", "Y", "yes", "Yes", "YES", "1",
];
const FALSY: [&str; 14] = [
    "f", "F", "false", "False", "FALSE", "off", "Off", "OFF", "n", "N", "no", "No", "NO", "0",
];

/// Integral numbers and numeric strings; booleans and fractions are rejected
fn coerce_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// JSON booleans, the usual yes/no spellings, and 1/0
fn coerce_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) if TRUTHY.contains(&s.as_str()) => Some(true),
        Value::String(s) if FALSY.contains(&s.as_str()) => Some(false),
        Value::Number(n) => match n.as_f64() {
            Some(f) if f == 1.0 => Some(true),
            Some(f) if f == 0.0 => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// Typed reader over a JSON request body
///
/// Accessors return `None` whenever the field is absent or invalid and record
/// the reason; `finish` rejects fields the resource does not accept.
pub struct Payload<'a> {
    fields: &'a Map<String, Value>,
    errors: ValidationErrors,
}

impl<'a> Payload<'a> {
    pub fn new(body: &'a Value) -> Result<Self, ValidationErrors> {
        match body {
            Value::Object(fields) => Ok(Self {
                fields,
                errors: ValidationErrors::new(),
            }),
            _ => Err(ValidationErrors::single(SCHEMA_KEY, INVALID_INPUT)),
        }
    }

    pub fn errors_mut(&mut self) -> &mut ValidationErrors {
        &mut self.errors
    }

    fn required(&mut self, name: &str) -> Option<&'a Value> {
        match self.fields.get(name) {
            None => {
                self.errors.add(name, MISSING_FIELD);
                None
            }
            Some(Value::Null) => {
                self.errors.add(name, NULL_FIELD);
                None
            }
            Some(value) => Some(value),
        }
    }

    fn optional(&self, name: &str) -> Option<&'a Value> {
        self.fields.get(name).filter(|value| !value.is_null())
    }

    fn as_string(&mut self, name: &str, value: &Value) -> Option<String> {
        match value {
            Value::String(s) => Some(s.clone()),
            _ => {
                self.errors.add(name, "Not a valid string.");
                None
            }
        }
    }

    fn as_integer(&mut self, name: &str, value: &Value) -> Option<i64> {
        match coerce_integer(value) {
            Some(n) => Some(n),
            None => {
                self.errors.add(name, "Not a valid integer.");
                None
            }
        }
    }

    fn as_date(&mut self, name: &str, value: &Value) -> Option<NaiveDate> {
        match value
            .as_str()
            .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
        {
            Some(date) => Some(date),
            None => {
                self.errors.add(name, "Not a valid date.");
                None
            }
        }
    }

    pub fn required_string(&mut self, name: &str) -> Option<String> {
        let value = self.required(name)?;
        self.as_string(name, value)
    }

    pub fn optional_string(&mut self, name: &str) -> Option<String> {
        let value = self.optional(name)?;
        self.as_string(name, value)
    }

    pub fn required_bool(&mut self, name: &str) -> Option<bool> {
        match coerce_bool(self.required(name)?) {
            Some(b) => Some(b),
            None => {
                self.errors.add(name, "Not a valid boolean.");
                None
            }
        }
    }

    pub fn required_integer(&mut self, name: &str) -> Option<i64> {
        let value = self.required(name)?;
        self.as_integer(name, value)
    }

    pub fn optional_integer(&mut self, name: &str) -> Option<i64> {
        let value = self.optional(name)?;
        self.as_integer(name, value)
    }

    pub fn required_date(&mut self, name: &str) -> Option<NaiveDate> {
        let value = self.required(name)?;
        self.as_date(name, value)
    }

    /// Reject any field outside `accepted` and hand back the collected errors
    pub fn finish(mut self, accepted: &[&str]) -> ValidationErrors {
        for key in self.fields.keys() {
            if !accepted.contains(&key.as_str()) {
                self.errors.add(key, UNKNOWN_FIELD);
            }
        }
        self.errors
    }
}

/// Validate an exercise name
pub fn validate_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("Name cannot be empty.".to_string());
    }

    Ok(())
}

/// Validate an exercise category
pub fn validate_category(category: &str) -> Result<(), String> {
    category
        .parse::<Category>()
        .map(|_| ())
        .map_err(|_| format!("Category must be one of: {}.", Category::NAMES.join(", ")))
}

/// Validate a workout duration in minutes
pub fn validate_duration_minutes(duration_minutes: i64) -> Result<(), String> {
    if duration_minutes <= 0 {
        return Err("Duration must be a positive integer.".to_string());
    }

    Ok(())
}

/// Validate a repetition count, when present
pub fn validate_reps(reps: Option<i64>) -> Result<(), String> {
    match reps {
        Some(reps) if reps <= 0 => Err("Reps must be a positive integer.".to_string()),
        _ => Ok(()),
    }
}

/// Validate a set count, when present
pub fn validate_sets(sets: Option<i64>) -> Result<(), String> {
    match sets {
        Some(sets) if sets <= 0 => Err("Sets must be a positive integer.".to_string()),
        _ => Ok(()),
    }
}

/// Validate a duration in seconds, when present
pub fn validate_duration_seconds(duration_seconds: Option<i64>) -> Result<(), String> {
    match duration_seconds {
        Some(seconds) if seconds < 0 => Err("Duration in seconds cannot be negative.".to_string()),
        _ => Ok(()),
    }
}
