//! Check primitives
//!
//! Stateless functions that validate one value against one rule set and
//! append structured errors. An invalid input value is never a panic
//! and never an `Err`: the appended errors are the result. Within a
//! rule set, checks run in a fixed priority order and only the first
//! failing check reports; custom-function errors are cumulative.

use regex::Regex;
use serde_json::Value;

use crate::schema::{CheckFn, CheckKind, NumberChecks, StringChecks};

use super::errors::ValidationError;

/// The value must be present.
pub(crate) fn not_null(errors: &mut Vec<ValidationError>, value: &Value, path: &str) {
    if value.is_null() {
        errors.push(ValidationError::null_value(CheckKind::NotNull, path));
    }
}

/// The value must be a string satisfying the rule set.
///
/// Priority: membership, `lt`, `gt`, `lte`, `gte`, pattern.
pub(crate) fn string(
    errors: &mut Vec<ValidationError>,
    checks: Option<&StringChecks>,
    value: &Value,
    path: &str,
) {
    let text = match value {
        Value::Null => {
            errors.push(ValidationError::null_value(CheckKind::String, path));
            return;
        }
        Value::String(text) => text,
        other => {
            errors.push(ValidationError::not_a_string(CheckKind::String, path, other));
            return;
        }
    };
    let Some(checks) = checks else { return };

    let length = text.chars().count();
    if let Some(members) = &checks.in_set {
        if !members.iter().any(|member| member == text) {
            errors.push(ValidationError::string_not_in_set(path, text, members));
            return;
        }
    }
    if let Some(bound) = checks.lt {
        if length >= bound {
            errors.push(ValidationError::too_long(path, text, bound));
            return;
        }
    }
    if let Some(bound) = checks.gt {
        if length <= bound {
            errors.push(ValidationError::too_short(path, text, bound));
            return;
        }
    }
    if let Some(bound) = checks.lte {
        if length > bound {
            errors.push(ValidationError::too_long(path, text, bound));
            return;
        }
    }
    if let Some(bound) = checks.gte {
        if length < bound {
            errors.push(ValidationError::too_short(path, text, bound));
            return;
        }
    }
    if let Some(pattern) = &checks.regexp {
        if !pattern.is_match(text) {
            errors.push(ValidationError::no_regexp_match(
                CheckKind::String,
                path,
                text,
                pattern.as_str(),
            ));
        }
    }
}

/// The value must be a number satisfying the rule set.
///
/// Priority: `lt`, `gt`, `lte`, `gte`, membership.
pub(crate) fn number(
    errors: &mut Vec<ValidationError>,
    checks: Option<&NumberChecks>,
    value: &Value,
    path: &str,
) {
    let numeric = match value {
        Value::Null => {
            errors.push(ValidationError::null_value(CheckKind::Number, path));
            return;
        }
        Value::Number(numeric) => numeric.as_f64().unwrap_or(f64::NAN),
        other => {
            errors.push(ValidationError::not_a_number(path, other));
            return;
        }
    };
    let Some(checks) = checks else { return };

    if let Some(bound) = checks.lt {
        if numeric >= bound {
            errors.push(ValidationError::above_bound(path, numeric, bound));
            return;
        }
    }
    if let Some(bound) = checks.gt {
        if numeric <= bound {
            errors.push(ValidationError::below_bound(path, numeric, bound));
            return;
        }
    }
    if let Some(bound) = checks.lte {
        if numeric > bound {
            errors.push(ValidationError::above_bound(path, numeric, bound));
            return;
        }
    }
    if let Some(bound) = checks.gte {
        if numeric < bound {
            errors.push(ValidationError::below_bound(path, numeric, bound));
            return;
        }
    }
    if let Some(members) = &checks.in_set {
        if !members.iter().any(|member| *member == numeric) {
            errors.push(ValidationError::number_not_in_set(path, numeric, members));
        }
    }
}

/// The value must be a string matching the pattern.
pub(crate) fn pattern(
    errors: &mut Vec<ValidationError>,
    regexp: &Regex,
    value: &Value,
    path: &str,
) {
    let text = match value {
        Value::Null => {
            errors.push(ValidationError::null_value(CheckKind::Pattern, path));
            return;
        }
        Value::String(text) => text,
        other => {
            errors.push(ValidationError::not_a_string(CheckKind::Pattern, path, other));
            return;
        }
    };
    if !regexp.is_match(text) {
        errors.push(ValidationError::no_regexp_match(
            CheckKind::Pattern,
            path,
            text,
            regexp.as_str(),
        ));
    }
}

/// Runs a caller-supplied synchronous check and re-wraps every reported
/// cause with node context. Cumulative: no priority truncation.
pub(crate) fn function(
    errors: &mut Vec<ValidationError>,
    check: &CheckFn,
    kind: CheckKind,
    value: &Value,
    path: &str,
    args: &[Value],
) {
    for cause in check(path, value, args) {
        errors.push(ValidationError::custom(cause, kind, path, value.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Arc;

    fn string_errors(checks: Option<&StringChecks>, value: &Value) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        string(&mut errors, checks, value, "param1");
        errors
    }

    fn number_errors(checks: Option<&NumberChecks>, value: &Value) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        number(&mut errors, checks, value, "param1");
        errors
    }

    #[test]
    fn test_not_null() {
        let mut errors = Vec::new();
        not_null(&mut errors, &json!(1), "param1");
        assert!(errors.is_empty());

        not_null(&mut errors, &Value::Null, "param1");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].cause, "param1 is null");
    }

    #[test]
    fn test_string_type_errors() {
        let errors = string_errors(None, &Value::Null);
        assert_eq!(errors[0].cause, "param1 is null");

        let errors = string_errors(None, &json!(1));
        assert_eq!(errors[0].cause, "param1 is not a string");

        assert!(string_errors(None, &json!("1")).is_empty());
    }

    #[test]
    fn test_string_membership() {
        let checks = StringChecks::new().in_set(["open", "close", "store"]);
        let errors = string_errors(Some(&checks), &json!("tes"));
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[0].cause,
            "param1 'tes' not found in [ 'open', 'close', 'store' ]"
        );

        assert!(string_errors(Some(&checks), &json!("store")).is_empty());
    }

    #[test]
    fn test_string_length_bounds() {
        let checks = StringChecks::new().lt(10).gt(5);
        assert!(string_errors(Some(&checks), &json!("123456")).is_empty());

        let errors = string_errors(Some(&checks), &json!(""));
        assert_eq!(
            errors[0].cause,
            "param1 value of '' is shorter than 5 characters"
        );

        let errors = string_errors(Some(&checks), &json!("12345678911"));
        assert_eq!(
            errors[0].cause,
            "param1 value of '12345678911' is longer than 10 characters"
        );
    }

    #[test]
    fn test_string_bound_asymmetry() {
        // Exclusive bounds fail at the boundary.
        let exclusive = StringChecks::new().gt(5);
        assert_eq!(string_errors(Some(&exclusive), &json!("12345")).len(), 1);

        // Inclusive bounds pass at the boundary.
        let inclusive = StringChecks::new().gte(5);
        assert!(string_errors(Some(&inclusive), &json!("12345")).is_empty());

        let exclusive = StringChecks::new().lt(5);
        assert_eq!(string_errors(Some(&exclusive), &json!("12345")).len(), 1);

        let inclusive = StringChecks::new().lte(5);
        assert!(string_errors(Some(&inclusive), &json!("12345")).is_empty());
    }

    #[test]
    fn test_string_membership_outranks_length() {
        // Only the first failing check reports.
        let checks = StringChecks::new().in_set(["open"]).lt(2);
        let errors = string_errors(Some(&checks), &json!("tes"));
        assert_eq!(errors.len(), 1);
        assert!(errors[0].cause.contains("not found in"));
    }

    #[test]
    fn test_string_regexp() {
        let checks = StringChecks::new().regexp(Regex::new("^mine").unwrap());
        let errors = string_errors(Some(&checks), &json!("1"));
        assert_eq!(
            errors[0].cause,
            "param1 value of '1' did not match regexp ^mine"
        );

        assert!(string_errors(Some(&checks), &json!("mine")).is_empty());
    }

    #[test]
    fn test_string_checks_are_idempotent() {
        let checks = StringChecks::new().in_set(["open"]);
        let first = string_errors(Some(&checks), &json!("tes"));
        let second = string_errors(Some(&checks), &json!("tes"));
        assert_eq!(first.len(), second.len());
        assert_eq!(first[0].cause, second[0].cause);
    }

    #[test]
    fn test_number_type_errors() {
        let errors = number_errors(None, &Value::Null);
        assert_eq!(errors[0].cause, "param1 is null");

        let errors = number_errors(None, &json!("hello"));
        assert_eq!(errors[0].cause, "param1 is not a number");

        assert!(number_errors(None, &json!(7)).is_empty());
    }

    #[test]
    fn test_number_range() {
        let checks = NumberChecks::new().gt(5.0).lt(1000.0);
        assert!(number_errors(Some(&checks), &json!(7)).is_empty());

        let errors = number_errors(Some(&checks), &json!(2000));
        assert_eq!(errors[0].cause, "param1 value of 2000 is greater than 1000");

        let errors = number_errors(Some(&checks), &json!(1));
        assert_eq!(errors[0].cause, "param1 value of 1 is less than 5");
    }

    #[test]
    fn test_number_bound_asymmetry() {
        // A value exactly at an exclusive bound fails.
        let exclusive = NumberChecks::new().gt(5.0);
        assert_eq!(number_errors(Some(&exclusive), &json!(5)).len(), 1);

        // A value exactly at an inclusive bound passes.
        let inclusive = NumberChecks::new().gte(5.0);
        assert!(number_errors(Some(&inclusive), &json!(5)).is_empty());
        assert_eq!(number_errors(Some(&inclusive), &json!(4)).len(), 1);

        let exclusive = NumberChecks::new().lt(1000.0);
        assert_eq!(number_errors(Some(&exclusive), &json!(1000)).len(), 1);

        let inclusive = NumberChecks::new().lte(1000.0);
        assert!(number_errors(Some(&inclusive), &json!(1000)).is_empty());
    }

    #[test]
    fn test_number_membership() {
        let checks = NumberChecks::new().in_set([1.0, 2.0, 3.0]);
        assert!(number_errors(Some(&checks), &json!(1)).is_empty());

        let errors = number_errors(Some(&checks), &json!(8));
        assert_eq!(errors[0].cause, "param1 value of 8 not found in [ 1, 2, 3 ]");
    }

    #[test]
    fn test_pattern() {
        let regexp = Regex::new("^mine").unwrap();
        let mut errors = Vec::new();
        pattern(&mut errors, &regexp, &json!("mine"), "param1");
        assert!(errors.is_empty());

        pattern(&mut errors, &regexp, &json!("1"), "param1");
        assert_eq!(
            errors[0].cause,
            "param1 value of '1' did not match regexp ^mine"
        );

        errors.clear();
        pattern(&mut errors, &regexp, &json!(1), "param1");
        assert_eq!(errors[0].cause, "param1 is not a string");

        errors.clear();
        pattern(&mut errors, &regexp, &Value::Null, "param1");
        assert_eq!(errors[0].cause, "param1 is null");
    }

    #[test]
    fn test_custom_function_errors_are_cumulative() {
        let check: CheckFn = Arc::new(|_path, value, _args| {
            let mut causes = Vec::new();
            if !value.is_string() {
                causes.push("value must be a string".to_string());
            }
            causes.push("only emails from gmail allowed".to_string());
            causes
        });

        let mut errors = Vec::new();
        function(
            &mut errors,
            &check,
            CheckKind::Function,
            &json!(42),
            "email",
            &[json!(42)],
        );
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].cause, "value must be a string");
        assert_eq!(errors[1].cause, "only emails from gmail allowed");
        assert_eq!(errors[1].path, "email");
        assert_eq!(errors[1].value, json!(42));
    }
}
