// SPDX-License-Identifier: MIT

//! Condition trees and their evaluation against scanned files

use crate::file::{FieldError, FieldValue, File};
use crate::parser::{ParseError, Parser};
use crate::tokenizer::Tokenizer;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// A file field usable in a condition.
///
/// Only `extension`, `name`, `path`, `age`, and `size` have a value
/// source; the remaining members parse but fail at evaluation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Extension,
    Name,
    Created,
    Modified,
    Type,
    Size,
    Age,
    Path,
}

impl Field {
    pub(crate) fn from_token(token: &str) -> Option<Self> {
        Some(match token {
            "extension" => Field::Extension,
            "name" => Field::Name,
            "created" => Field::Created,
            "modified" => Field::Modified,
            "type" => Field::Type,
            "size" => Field::Size,
            "age" => Field::Age,
            "path" => Field::Path,
            _ => return None,
        })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Field::Extension => "extension",
            Field::Name => "name",
            Field::Created => "created",
            Field::Modified => "modified",
            Field::Type => "type",
            Field::Size => "size",
            Field::Age => "age",
            Field::Path => "path",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A comparison operator relating a field to a literal value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Eq,
    Neq,
    Lt,
    Gt,
    Leq,
    Geq,
    StartsWith,
    NotStartsWith,
    EndsWith,
    NotEndsWith,
    Contains,
    NotContains,
}

impl Operator {
    pub(crate) fn from_token(token: &str) -> Option<Self> {
        Some(match token {
            "=" => Operator::Eq,
            "!=" => Operator::Neq,
            "<" => Operator::Lt,
            ">" => Operator::Gt,
            "<=" => Operator::Leq,
            ">=" => Operator::Geq,
            "^=" => Operator::StartsWith,
            "!^=" => Operator::NotStartsWith,
            "$=" => Operator::EndsWith,
            "!$=" => Operator::NotEndsWith,
            "?=" => Operator::Contains,
            "!?=" => Operator::NotContains,
            _ => return None,
        })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Operator::Eq => "=",
            Operator::Neq => "!=",
            Operator::Lt => "<",
            Operator::Gt => ">",
            Operator::Leq => "<=",
            Operator::Geq => ">=",
            Operator::StartsWith => "^=",
            Operator::NotStartsWith => "!^=",
            Operator::EndsWith => "$=",
            Operator::NotEndsWith => "!$=",
            Operator::Contains => "?=",
            Operator::NotContains => "!?=",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A binary combinator joining two conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoolOperator {
    And,
    Or,
    Xor,
}

impl BoolOperator {
    pub(crate) fn from_token(token: &str) -> Option<Self> {
        Some(match token {
            "and" => BoolOperator::And,
            "or" => BoolOperator::Or,
            "xor" => BoolOperator::Xor,
            _ => return None,
        })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BoolOperator::And => "and",
            BoolOperator::Or => "or",
            BoolOperator::Xor => "xor",
        }
    }
}

impl fmt::Display for BoolOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur while evaluating a condition against a file.
#[derive(Debug, Error)]
pub enum EvalError {
    #[error(transparent)]
    Field(#[from] FieldError),
    #[error("operator [{op}] is not supported for field [{field}]")]
    UnsupportedOperator { field: Field, op: Operator },
    #[error("size literal [{0}] is not a number")]
    InvalidNumber(String),
}

/// A boolean-valued expression tree evaluated against one file.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// An atomic `field operator value` comparison.
    Compare {
        field: Field,
        op: Operator,
        value: String,
    },
    /// A binary boolean join of two conditions.
    Join {
        left: Box<Condition>,
        op: BoolOperator,
        right: Box<Condition>,
    },
}

impl Condition {
    /// Parse a raw condition string into an evaluable condition tree.
    pub fn parse(raw: &str) -> Result<Self, ParseError> {
        Parser::new(Tokenizer::new(raw)).parse()
    }

    /// Evaluate the condition against a file.
    ///
    /// Both children of a join are evaluated whenever the left child
    /// succeeds; there is no operator short-circuit.
    pub fn evaluate(&self, file: &File) -> Result<bool, EvalError> {
        match self {
            Condition::Compare { field, op, value } => compare(*field, *op, value, file),
            Condition::Join { left, op, right } => {
                let l = left.evaluate(file)?;
                let r = right.evaluate(file)?;
                Ok(match op {
                    BoolOperator::And => l && r,
                    BoolOperator::Or => l || r,
                    BoolOperator::Xor => (l || r) && !(l && r),
                })
            }
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::Compare { field, op, value } => write!(f, "{field} {op} {value}"),
            Condition::Join { left, op, right } => write!(f, "({left} {op} {right})"),
        }
    }
}

fn compare(field: Field, op: Operator, value: &str, file: &File) -> Result<bool, EvalError> {
    let actual = file.field(field)?;

    match op {
        // Equality against the raw literal is defined for text fields;
        // for size and age it is vacuously false (and `!=` vacuously
        // true), matching the loose dynamic comparison this replaces.
        Operator::Eq => Ok(text_equals(&actual, value)),
        Operator::Neq => Ok(!text_equals(&actual, value)),

        Operator::StartsWith => Ok(text(field, op, &actual)?.starts_with(value)),
        Operator::NotStartsWith => Ok(!text(field, op, &actual)?.starts_with(value)),
        Operator::EndsWith => Ok(text(field, op, &actual)?.ends_with(value)),
        Operator::NotEndsWith => Ok(!text(field, op, &actual)?.ends_with(value)),
        Operator::Contains => Ok(text(field, op, &actual)?.contains(value)),
        Operator::NotContains => Ok(!text(field, op, &actual)?.contains(value)),

        Operator::Gt | Operator::Lt | Operator::Geq | Operator::Leq => match actual {
            FieldValue::Size(size) => {
                let literal: f64 = value
                    .parse()
                    .map_err(|_| EvalError::InvalidNumber(value.to_string()))?;
                Ok(relational(op, size, literal))
            }
            FieldValue::Age(age) => match parse_duration_literal(value) {
                Some(literal) => Ok(relational(op, age, literal)),
                // A malformed age literal evaluates to false rather than
                // failing the whole check.
                None => Ok(false),
            },
            FieldValue::Text(_) => Err(EvalError::UnsupportedOperator { field, op }),
        },
    }
}

fn text_equals(actual: &FieldValue<'_>, value: &str) -> bool {
    matches!(actual, FieldValue::Text(s) if *s == value)
}

fn text<'a>(field: Field, op: Operator, actual: &FieldValue<'a>) -> Result<&'a str, EvalError> {
    match actual {
        FieldValue::Text(s) => Ok(s),
        _ => Err(EvalError::UnsupportedOperator { field, op }),
    }
}

fn relational<T: PartialOrd>(op: Operator, left: T, right: T) -> bool {
    match op {
        Operator::Gt => left > right,
        Operator::Lt => left < right,
        Operator::Geq => left >= right,
        Operator::Leq => left <= right,
        _ => false,
    }
}

/// Parse an age literal like `30d`, `48h`, or `1.5h` into a duration.
///
/// `humantime` handles the common forms, including the day unit.
/// Fractional literals such as `1.5h` fall back to a float-with-unit
/// parse. Returns `None` for anything else.
pub(crate) fn parse_duration_literal(value: &str) -> Option<Duration> {
    if let Ok(duration) = humantime::parse_duration(value) {
        return Some(duration);
    }

    const UNITS: [(&str, f64); 7] = [
        ("ns", 1e-9),
        ("us", 1e-6),
        ("ms", 1e-3),
        ("s", 1.0),
        ("m", 60.0),
        ("h", 3600.0),
        ("d", 86_400.0),
    ];
    for (suffix, seconds) in UNITS {
        if let Some(number) = value.strip_suffix(suffix) {
            let parsed: f64 = number.parse().ok()?;
            return Duration::try_from_secs_f64(parsed * seconds).ok();
        }
    }
    None
}

#[cfg(test)]
#[path = "condition_tests.rs"]
mod tests;
