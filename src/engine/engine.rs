//! Schema evaluation pass
//!
//! One `Pass` per invocation walks the top-level nodes in declaration
//! order, resolves each node's value from its bound argument, and
//! dispatches by node kind. Synchronous errors accumulate in
//! declaration order, depth-first through objects. Asynchronous checks
//! never run inline: they are queued as `PendingCallback` entries and
//! drained exactly once by callback coordination after the pass.

use std::sync::Arc;

use serde_json::Value;

use crate::schema::{ArrayChecks, AsyncCheckFn, CheckKind, Schema, SchemaNode};
use crate::schema::NodeKind;

use super::errors::ValidationError;
use super::path;
use super::primitives;

/// An asynchronous check captured during the synchronous pass.
pub(crate) struct PendingCallback {
    pub(crate) func: AsyncCheckFn,
    pub(crate) kind: CheckKind,
    pub(crate) path: String,
    pub(crate) value: Value,
}

/// Result of one synchronous pass.
pub(crate) struct Outcome {
    pub(crate) errors: Vec<ValidationError>,
    pub(crate) pending: Vec<PendingCallback>,
}

/// Evaluates the schema against the bound arguments.
///
/// `positions` maps each top-level node to its argument position, in
/// node order. Arguments past the end of `args` validate as absent.
pub(crate) fn run_pass(schema: &Schema, positions: &[usize], args: &[Value]) -> Outcome {
    let mut pass = Pass {
        args,
        fail_fast: schema.fail_on_first,
        errors: Vec::new(),
        pending: Vec::new(),
    };

    for (node, &position) in schema.nodes.iter().zip(positions) {
        pass.top_level(node, position);
        if pass.halted() {
            break;
        }
    }

    tracing::debug!(
        errors = pass.errors.len(),
        pending = pass.pending.len(),
        "validation pass complete"
    );

    Outcome {
        errors: pass.errors,
        pending: pass.pending,
    }
}

struct Pass<'a> {
    args: &'a [Value],
    fail_fast: bool,
    errors: Vec<ValidationError>,
    pending: Vec<PendingCallback>,
}

impl<'a> Pass<'a> {
    /// Whether the fail-fast policy has stopped the pass.
    fn halted(&self) -> bool {
        self.fail_fast && !self.errors.is_empty()
    }

    fn top_level(&mut self, node: &SchemaNode, position: usize) {
        let args = self.args;
        let bound = args.get(position).unwrap_or(&Value::Null);

        // Asynchronous checks are queued with their value resolved now;
        // an unresolvable value dispatches as Null.
        if let NodeKind::Callback(func) = &node.kind {
            let value = path::resolve_tail(bound, &node.name)
                .cloned()
                .unwrap_or(Value::Null);
            self.enqueue(func, &node.name, value);
            return;
        }

        if node.name.contains('.') {
            match path::resolve_tail(bound, &node.name) {
                Some(value) => self.dispatch(node, value, &node.name),
                None => self
                    .errors
                    .push(ValidationError::no_object_member(node.kind(), &node.name)),
            }
            return;
        }

        self.dispatch(node, bound, &node.name);
    }

    fn dispatch(&mut self, node: &SchemaNode, value: &'a Value, node_path: &str) {
        match &node.kind {
            NodeKind::NotNull => primitives::not_null(&mut self.errors, value, node_path),
            NodeKind::String(checks) => {
                primitives::string(&mut self.errors, checks.as_ref(), value, node_path)
            }
            NodeKind::Number(checks) => {
                primitives::number(&mut self.errors, checks.as_ref(), value, node_path)
            }
            NodeKind::Pattern(regexp) => {
                primitives::pattern(&mut self.errors, regexp, value, node_path)
            }
            NodeKind::Function(func) => primitives::function(
                &mut self.errors,
                func,
                CheckKind::Function,
                value,
                node_path,
                self.args,
            ),
            NodeKind::Callback(func) => self.enqueue(func, node_path, value.clone()),
            NodeKind::Array(checks) => self.array(checks, value, node_path),
            NodeKind::Object(children) => {
                if value.is_null() {
                    self.errors
                        .push(ValidationError::no_object_member(CheckKind::Object, node_path));
                } else {
                    // Member paths are reported relative to the object
                    // parameter, not prefixed with its name.
                    self.object(children, value, "");
                }
            }
        }
    }

    fn object(&mut self, children: &[SchemaNode], value: &'a Value, prefix: &str) {
        for child in children {
            if self.halted() {
                return;
            }
            let child_path = path::make_path(prefix, &child.name);
            match path::resolve(value, &child.name) {
                None => self
                    .errors
                    .push(ValidationError::no_object_member(child.kind(), &child_path)),
                Some(member) => match &child.kind {
                    NodeKind::Object(grandchildren) => {
                        self.object(grandchildren, member, &child_path)
                    }
                    _ => self.dispatch(child, member, &child_path),
                },
            }
        }
    }

    fn array(&mut self, checks: &ArrayChecks, value: &'a Value, node_path: &str) {
        let items = match value {
            Value::Null => {
                self.errors
                    .push(ValidationError::null_value(CheckKind::Array, node_path));
                return;
            }
            Value::Array(items) => items,
            other => {
                self.errors
                    .push(ValidationError::not_an_array(node_path, other));
                return;
            }
        };

        if let Some(members) = &checks.in_set {
            for item in items {
                if self.halted() {
                    return;
                }
                if !members.contains(item) {
                    self.errors
                        .push(ValidationError::member_not_in_set(node_path, item, members));
                }
            }
        } else if let Some(each) = &checks.each {
            for (index, item) in items.iter().enumerate() {
                let element_path = format!("{}[{}]", node_path, index);
                self.enqueue(each, &element_path, item.clone());
            }
        } else if let Some(func) = &checks.func {
            primitives::function(
                &mut self.errors,
                func,
                CheckKind::Array,
                value,
                node_path,
                self.args,
            );
        }
    }

    fn enqueue(&mut self, func: &AsyncCheckFn, callback_path: &str, value: Value) {
        self.pending.push(PendingCallback {
            func: Arc::clone(func),
            kind: CheckKind::Callback,
            path: callback_path.to_string(),
            value,
        });
    }
}
