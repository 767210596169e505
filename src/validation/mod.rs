//! Declarative field validation
//!
//! Each resource declares an ordered [`RuleSet`]. Evaluation visits every
//! rule in declaration order and every failing rule yields exactly one
//! message, so clients receive the complete list of problems at once.

use crate::error::{AppError, Result};
use serde_json::Value;
use validator::ValidateEmail;

lazy_static::lazy_static! {
    static ref ALPHABETIC_REGEX: regex::Regex = regex::Regex::new(r"^[A-Za-z]+$").unwrap();
    static ref NON_NEGATIVE_INTEGER_REGEX: regex::Regex =
        regex::Regex::new(r"^(0|[1-9][0-9]*)$").unwrap();
}

/// Whether a field has to carry a value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// Absent, `null`, `false`, `0` and `""` all count as missing
    Required,
    /// Absent or `null` skips the rule entirely
    Optional,
}

/// Content check applied to a present field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Predicate {
    Alphabetic,
    Email,
    IsString,
    NonNegativeInteger,
}

impl Predicate {
    fn accepts(self, value: &Value) -> bool {
        match self {
            Predicate::IsString => value.is_string(),
            Predicate::Alphabetic => text_of(value).is_some_and(|t| ALPHABETIC_REGEX.is_match(&t)),
            Predicate::Email => text_of(value).is_some_and(|t| t.validate_email()),
            Predicate::NonNegativeInteger => text_of(value).is_some_and(|t| parse_integer(&t).is_some()),
        }
    }

    fn message(self, field: &str) -> String {
        match self {
            Predicate::Alphabetic => format!("\"{}\" may only contain letters", field),
            Predicate::Email => format!("Please provide a valid email address for \"{}\"", field),
            Predicate::IsString => format!("\"{}\" must be a string", field),
            Predicate::NonNegativeInteger => {
                format!("\"{}\" must be a non-negative integer", field)
            }
        }
    }
}

/// One field's rule: presence requirement plus ordered predicates
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub field: &'static str,
    pub presence: Presence,
    pub predicates: &'static [Predicate],
}

impl FieldRule {
    pub const fn required(field: &'static str, predicates: &'static [Predicate]) -> Self {
        Self {
            field,
            presence: Presence::Required,
            predicates,
        }
    }

    pub const fn optional(field: &'static str, predicates: &'static [Predicate]) -> Self {
        Self {
            field,
            presence: Presence::Optional,
            predicates,
        }
    }

    /// Evaluate against a payload; `None` means the rule passed
    pub fn evaluate(&self, payload: &Value) -> Option<String> {
        let value = payload.get(self.field);
        match self.presence {
            Presence::Required if value.map_or(true, is_missing) => {
                return Some(missing_message(self.field));
            }
            Presence::Optional if value.map_or(true, Value::is_null) => return None,
            _ => {}
        }

        let value = value?;
        self.predicates
            .iter()
            .find(|predicate| !predicate.accepts(value))
            .map(|predicate| predicate.message(self.field))
    }
}

/// Ordered list of field rules for one resource type
#[derive(Debug, Clone, Copy)]
pub struct RuleSet {
    pub rules: &'static [FieldRule],
}

impl RuleSet {
    /// Collect one message per failing rule, in declaration order
    pub fn evaluate(&self, payload: &Value) -> Vec<String> {
        self.rules
            .iter()
            .filter_map(|rule| rule.evaluate(payload))
            .collect()
    }

    /// Fail with [`AppError::Validation`] when any rule fails
    pub fn check(&self, payload: &Value) -> Result<()> {
        let violations = self.evaluate(payload);
        if violations.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(violations))
        }
    }
}

/// Rules applied when registering a user
pub const USER_RULES: RuleSet = RuleSet {
    rules: &[
        FieldRule::required("firstName", &[Predicate::Alphabetic]),
        FieldRule::required("lastName", &[Predicate::Alphabetic]),
        FieldRule::required("emailAddress", &[Predicate::Email]),
        FieldRule::required("password", &[]),
    ],
};

/// Rules applied when creating or updating a course
pub const COURSE_RULES: RuleSet = RuleSet {
    rules: &[
        FieldRule::required("title", &[Predicate::IsString]),
        FieldRule::required("description", &[Predicate::IsString]),
        FieldRule::optional("estimatedTime", &[Predicate::IsString]),
        FieldRule::optional("materialsNeeded", &[Predicate::IsString]),
        FieldRule::required("userId", &[Predicate::NonNegativeInteger]),
    ],
};

/// Message for a required field that carries no value
pub fn missing_message(field: &str) -> String {
    format!("Please provide a value for \"{}\"", field)
}

/// Falsy values count as missing
pub fn is_missing(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().map_or(false, |f| f == 0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// Textual form of a scalar JSON value
pub fn text_of(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn parse_integer(text: &str) -> Option<i64> {
    if NON_NEGATIVE_INTEGER_REGEX.is_match(text) {
        text.parse().ok()
    } else {
        None
    }
}

/// Text of a required field, after the rule set passed
pub fn required_text(payload: &Value, field: &str) -> Result<String> {
    payload
        .get(field)
        .and_then(text_of)
        .ok_or_else(|| AppError::Validation(vec![missing_message(field)]))
}

/// Text of an optional field; absent and `null` map to `None`
pub fn optional_text(payload: &Value, field: &str) -> Option<String> {
    payload.get(field).and_then(text_of)
}

/// Integer value of a required field, after the rule set passed
pub fn required_integer(payload: &Value, field: &str) -> Result<i64> {
    payload
        .get(field)
        .and_then(text_of)
        .and_then(|t| parse_integer(&t))
        .ok_or_else(|| AppError::Validation(vec![Predicate::NonNegativeInteger.message(field)]))
}
