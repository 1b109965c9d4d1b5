//! Validation error structures
//!
//! An invalid argument is an expected, representable outcome, not an
//! exception: every failed check produces a `ValidationError` value and
//! the full pass returns the ordered list. The canonical message
//! templates live here, next to the constructors that fill them.

use serde::Serialize;
use serde_json::Value;

use crate::schema::CheckKind;

/// One failed check, with full context.
///
/// Synchronous errors are appended in schema declaration order,
/// depth-first through objects. Errors from asynchronous checks are
/// appended in completion order instead.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationError {
    /// Human-readable description of the failed check.
    pub cause: String,
    /// Kind of the schema node that produced the error.
    pub kind: CheckKind,
    /// Dotted path at the point of failure.
    pub path: String,
    /// The failing value (`Null` when the value was absent).
    pub value: Value,
}

impl ValidationError {
    /// `"<path> is null"`
    pub(crate) fn null_value(kind: CheckKind, path: &str) -> Self {
        Self {
            cause: format!("{} is null", path),
            kind,
            path: path.to_string(),
            value: Value::Null,
        }
    }

    /// `"<path> is not a string"`
    pub(crate) fn not_a_string(kind: CheckKind, path: &str, value: &Value) -> Self {
        Self {
            cause: format!("{} is not a string", path),
            kind,
            path: path.to_string(),
            value: value.clone(),
        }
    }

    /// `"<path> is not a number"`
    pub(crate) fn not_a_number(path: &str, value: &Value) -> Self {
        Self {
            cause: format!("{} is not a number", path),
            kind: CheckKind::Number,
            path: path.to_string(),
            value: value.clone(),
        }
    }

    /// `"<path> is not an array"`
    pub(crate) fn not_an_array(path: &str, value: &Value) -> Self {
        Self {
            cause: format!("{} is not an array", path),
            kind: CheckKind::Array,
            path: path.to_string(),
            value: value.clone(),
        }
    }

    /// `"<path> '<value>' not found in [ 'a', 'b' ]"`
    pub(crate) fn string_not_in_set(path: &str, value: &str, members: &[String]) -> Self {
        Self {
            cause: format!(
                "{} '{}' not found in {}",
                path,
                value,
                format_set(members.iter().map(|m| format!("'{}'", m))),
            ),
            kind: CheckKind::String,
            path: path.to_string(),
            value: Value::String(value.to_string()),
        }
    }

    /// `"<path> value of <v> not found in [ 1, 2, 3 ]"`
    pub(crate) fn number_not_in_set(path: &str, value: f64, members: &[f64]) -> Self {
        Self {
            cause: format!(
                "{} value of {} not found in {}",
                path,
                format_number(value),
                format_set(members.iter().map(|m| format_number(*m))),
            ),
            kind: CheckKind::Number,
            path: path.to_string(),
            value: number_value(value),
        }
    }

    /// `"<path> value of <elem> not found in [ ... ]"`, one per element.
    pub(crate) fn member_not_in_set(path: &str, element: &Value, members: &[Value]) -> Self {
        Self {
            cause: format!(
                "{} value of {} not found in {}",
                path,
                format_bare(element),
                format_set(members.iter().map(format_quoted)),
            ),
            kind: CheckKind::Array,
            path: path.to_string(),
            value: element.clone(),
        }
    }

    /// `"<path> value of '<value>' is longer than <n> characters"`
    pub(crate) fn too_long(path: &str, value: &str, bound: usize) -> Self {
        Self {
            cause: format!(
                "{} value of '{}' is longer than {} characters",
                path, value, bound
            ),
            kind: CheckKind::String,
            path: path.to_string(),
            value: Value::String(value.to_string()),
        }
    }

    /// `"<path> value of '<value>' is shorter than <n> characters"`
    pub(crate) fn too_short(path: &str, value: &str, bound: usize) -> Self {
        Self {
            cause: format!(
                "{} value of '{}' is shorter than {} characters",
                path, value, bound
            ),
            kind: CheckKind::String,
            path: path.to_string(),
            value: Value::String(value.to_string()),
        }
    }

    /// `"<path> value of <v> is greater than <n>"`
    pub(crate) fn above_bound(path: &str, value: f64, bound: f64) -> Self {
        Self {
            cause: format!(
                "{} value of {} is greater than {}",
                path,
                format_number(value),
                format_number(bound)
            ),
            kind: CheckKind::Number,
            path: path.to_string(),
            value: number_value(value),
        }
    }

    /// `"<path> value of <v> is less than <n>"`
    pub(crate) fn below_bound(path: &str, value: f64, bound: f64) -> Self {
        Self {
            cause: format!(
                "{} value of {} is less than {}",
                path,
                format_number(value),
                format_number(bound)
            ),
            kind: CheckKind::Number,
            path: path.to_string(),
            value: number_value(value),
        }
    }

    /// `"<path> value of '<value>' did not match regexp <pattern>"`
    pub(crate) fn no_regexp_match(kind: CheckKind, path: &str, value: &str, pattern: &str) -> Self {
        Self {
            cause: format!(
                "{} value of '{}' did not match regexp {}",
                path, value, pattern
            ),
            kind,
            path: path.to_string(),
            value: Value::String(value.to_string()),
        }
    }

    /// `"no object member <path>"`
    pub(crate) fn no_object_member(kind: CheckKind, path: &str) -> Self {
        Self {
            cause: format!("no object member {}", path),
            kind,
            path: path.to_string(),
            value: Value::Null,
        }
    }

    /// Wraps a cause reported by a custom check with node context.
    pub(crate) fn custom(cause: String, kind: CheckKind, path: &str, value: Value) -> Self {
        Self {
            cause,
            kind,
            path: path.to_string(),
            value,
        }
    }
}

/// Formats a membership set for error messages:
/// `[ 'open', 'close' ]`, or `[]` when empty.
fn format_set<I: IntoIterator<Item = String>>(members: I) -> String {
    let inner = members.into_iter().collect::<Vec<_>>().join(", ");
    if inner.is_empty() {
        "[]".to_string()
    } else {
        format!("[ {} ]", inner)
    }
}

/// Formats a number without a trailing `.0` when integral.
fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

/// Formats an arbitrary value as it appears inside a membership set:
/// strings single-quoted, numbers plain.
fn format_quoted(value: &Value) -> String {
    match value {
        Value::String(s) => format!("'{}'", s),
        Value::Number(n) => format_number(n.as_f64().unwrap_or(f64::NAN)),
        other => other.to_string(),
    }
}

/// Formats an arbitrary value as it appears in a message body: bare.
fn format_bare(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => format_number(n.as_f64().unwrap_or(f64::NAN)),
        other => other.to_string(),
    }
}

fn number_value(value: f64) -> Value {
    serde_json::Number::from_f64(value)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}
