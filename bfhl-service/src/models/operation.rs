//! Request validation: turns the single-key JSON body into a typed [`Operation`].

use serde_json::{Map, Value};
use std::fmt;

use super::error::BfhlError;

/// The five operations selectable through the request key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Fibonacci,
    Prime,
    Lcm,
    Hcf,
    Ai,
}

impl OperationKind {
    pub const ALL: [OperationKind; 5] = [
        OperationKind::Fibonacci,
        OperationKind::Prime,
        OperationKind::Lcm,
        OperationKind::Hcf,
        OperationKind::Ai,
    ];

    /// The request key, matched case-sensitively.
    pub fn key(self) -> &'static str {
        match self {
            OperationKind::Fibonacci => "fibonacci",
            OperationKind::Prime => "prime",
            OperationKind::Lcm => "lcm",
            OperationKind::Hcf => "hcf",
            OperationKind::Ai => "AI",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.key() == key)
    }

    pub fn shape_message(self) -> &'static str {
        match self {
            OperationKind::Fibonacci => "Invalid fibonacci input",
            OperationKind::Prime => "Prime input must be an array",
            OperationKind::Lcm => "LCM input must be a non-empty array",
            OperationKind::Hcf => "HCF input must be a non-empty array",
            OperationKind::Ai => "AI input must be a string",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A validated request, ready for dispatch.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Number of terms to generate.
    Fibonacci(usize),
    /// Raw candidates; non-integers are filtered out at execution time.
    Prime(Vec<Value>),
    Lcm(Vec<i64>),
    Hcf(Vec<i64>),
    /// The question, already trimmed.
    Ai(String),
}

impl Operation {
    pub fn kind(&self) -> OperationKind {
        match self {
            Operation::Fibonacci(_) => OperationKind::Fibonacci,
            Operation::Prime(_) => OperationKind::Prime,
            Operation::Lcm(_) => OperationKind::Lcm,
            Operation::Hcf(_) => OperationKind::Hcf,
            Operation::Ai(_) => OperationKind::Ai,
        }
    }

    /// Validate a request body. The body must hold exactly one known key
    /// whose value has the shape that operation requires.
    ///
    /// `max_fibonacci_terms` bounds the size of a Fibonacci response.
    pub fn from_body(
        body: Map<String, Value>,
        max_fibonacci_terms: usize,
    ) -> Result<Self, BfhlError> {
        if body.len() != 1 {
            return Err(BfhlError::ExactlyOneKey);
        }

        let (key, value) = body
            .into_iter()
            .next()
            .ok_or(BfhlError::ExactlyOneKey)?;

        let kind = OperationKind::from_key(&key).ok_or(BfhlError::UnknownOperation(key))?;

        Self::parse(kind, value, max_fibonacci_terms)
    }

    fn parse(
        kind: OperationKind,
        value: Value,
        max_fibonacci_terms: usize,
    ) -> Result<Self, BfhlError> {
        let shape_error = || BfhlError::Shape(kind);

        match kind {
            OperationKind::Fibonacci => as_integer(&value)
                .and_then(|n| usize::try_from(n).ok())
                .filter(|n| *n <= max_fibonacci_terms)
                .map(Operation::Fibonacci)
                .ok_or_else(shape_error),
            OperationKind::Prime => match value {
                Value::Array(items) => Ok(Operation::Prime(items)),
                _ => Err(shape_error()),
            },
            OperationKind::Lcm => integer_list(value)
                .map(Operation::Lcm)
                .ok_or_else(shape_error),
            OperationKind::Hcf => integer_list(value)
                .map(Operation::Hcf)
                .ok_or_else(shape_error),
            OperationKind::Ai => match value {
                Value::String(question) => {
                    let question = question.trim();
                    if question.is_empty() {
                        Err(shape_error())
                    } else {
                        Ok(Operation::Ai(question.to_string()))
                    }
                }
                _ => Err(shape_error()),
            },
        }
    }
}

/// Read a JSON number as an `i64` when it is integral.
///
/// Floats with no fractional part (`7.0`) count as integers; anything outside
/// the `i64` range does not.
pub fn as_integer(value: &Value) -> Option<i64> {
    let Value::Number(number) = value else {
        return None;
    };

    if let Some(n) = number.as_i64() {
        return Some(n);
    }

    let f = number.as_f64()?;
    if f.is_finite() && f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

/// A non-empty array made only of integers.
fn integer_list(value: Value) -> Option<Vec<i64>> {
    match value {
        Value::Array(items) if !items.is_empty() => items.iter().map(as_integer).collect(),
        _ => None,
    }
}
