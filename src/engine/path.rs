//! Dotted-path resolution
//!
//! Member values are resolved one segment at a time. A miss anywhere
//! along the path (a missing member, a null member, or a traversal
//! through a non-object) reports as a single absent value; the engine
//! turns that into exactly one `no object member` error.

use serde_json::Value;

/// Resolves a dotted member path relative to an object value.
///
/// Returns `None` when any segment is absent, including a null leaf.
pub(crate) fn resolve<'v>(root: &'v Value, path: &str) -> Option<&'v Value> {
    let mut current = root;
    for segment in path.split('.') {
        current = current.get(segment)?;
    }
    if current.is_null() {
        None
    } else {
        Some(current)
    }
}

/// Resolves a dotted top-level name against its bound argument,
/// skipping the root segment (which named the parameter itself).
pub(crate) fn resolve_tail<'v>(bound: &'v Value, dotted: &str) -> Option<&'v Value> {
    let mut segments = dotted.split('.');
    segments.next();
    let mut current = bound;
    for segment in segments {
        current = current.get(segment)?;
    }
    if current.is_null() {
        None
    } else {
        Some(current)
    }
}

/// Joins a traversal prefix and a member name into a dotted path.
pub(crate) fn make_path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", prefix, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_resolve_single_segment() {
        let value = json!({"name": "test"});
        assert_eq!(resolve(&value, "name"), Some(&json!("test")));
    }

    #[test]
    fn test_resolve_descends_dotted_paths() {
        let value = json!({"address": {"street": "us road"}});
        assert_eq!(resolve(&value, "address.street"), Some(&json!("us road")));
    }

    #[test]
    fn test_resolve_misses_absent_member() {
        let value = json!({"price": {"currency": "NOK"}});
        assert!(resolve(&value, "name").is_none());
        assert!(resolve(&value, "location.city.street").is_none());
    }

    #[test]
    fn test_resolve_treats_null_leaf_as_absent() {
        let value = json!({"name": null});
        assert!(resolve(&value, "name").is_none());
    }

    #[test]
    fn test_resolve_stops_at_non_object_segment() {
        let value = json!({"price": 10});
        assert!(resolve(&value, "price.amount").is_none());
    }

    #[test]
    fn test_resolve_tail_skips_the_parameter_segment() {
        let bound = json!({"email": "user@user.com"});
        assert_eq!(
            resolve_tail(&bound, "param1.email"),
            Some(&json!("user@user.com"))
        );
        assert!(resolve_tail(&bound, "param1.missing").is_none());
    }

    #[test]
    fn test_resolve_tail_plain_name_returns_the_argument() {
        let bound = json!("store");
        assert_eq!(resolve_tail(&bound, "param1"), Some(&json!("store")));
    }

    #[test]
    fn test_make_path() {
        assert_eq!(make_path("", "name"), "name");
        assert_eq!(make_path("price", "currency"), "price.currency");
    }
}
