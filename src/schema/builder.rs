//! Fluent schema construction
//!
//! A schema is assembled by chaining one constructor per validated
//! parameter and sealed with [`SchemaBuilder::finish`]. Object nodes
//! take a definer closure that registers child rules through a scoped
//! sub-builder; asynchronous `callback` rules registered inside a scope
//! are hoisted to the schema root under their full dotted path so they
//! can be bound to a call argument and resolved from it.

use std::future::Future;
use std::sync::Arc;

use regex::Regex;

use super::types::{
    ArrayChecks, CheckRequest, NodeKind, NumberChecks, SchemaNode, StringChecks,
};

/// The declarative description of validation rules for a function's
/// positional parameters.
///
/// Built once, immutable afterwards. Cloning is cheap (rule closures
/// are reference counted), so one schema can back any number of
/// wrapped functions.
#[derive(Debug, Clone)]
pub struct Schema {
    pub(crate) nodes: Vec<SchemaNode>,
    pub(crate) fail_on_first: bool,
}

impl Schema {
    /// Starts building a new schema.
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::new()
    }

    /// The top-level nodes in declaration order.
    pub fn nodes(&self) -> &[SchemaNode] {
        &self.nodes
    }

    /// Whether validation stops at the first error found.
    pub fn fails_on_first_error(&self) -> bool {
        self.fail_on_first
    }

    /// Whether any rule in the schema must run asynchronously.
    pub(crate) fn is_async(&self) -> bool {
        self.nodes.iter().any(SchemaNode::has_async_checks)
    }
}

/// Chainable constructor for [`Schema`] values.
#[derive(Default)]
pub struct SchemaBuilder {
    nodes: Vec<SchemaNode>,
    fail_on_first: bool,
}

impl SchemaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requires the argument to be present.
    pub fn not_null(mut self, name: impl Into<String>) -> Self {
        self.nodes.push(SchemaNode::new(name, NodeKind::NotNull));
        self
    }

    /// Requires the argument to be a string.
    pub fn string(mut self, name: impl Into<String>) -> Self {
        self.nodes.push(SchemaNode::new(name, NodeKind::String(None)));
        self
    }

    /// Requires the argument to be a string satisfying the given rule set.
    pub fn string_with(mut self, name: impl Into<String>, checks: StringChecks) -> Self {
        self.nodes
            .push(SchemaNode::new(name, NodeKind::String(Some(checks))));
        self
    }

    /// Requires the argument to be a number.
    pub fn number(mut self, name: impl Into<String>) -> Self {
        self.nodes.push(SchemaNode::new(name, NodeKind::Number(None)));
        self
    }

    /// Requires the argument to be a number satisfying the given rule set.
    pub fn number_with(mut self, name: impl Into<String>, checks: NumberChecks) -> Self {
        self.nodes
            .push(SchemaNode::new(name, NodeKind::Number(Some(checks))));
        self
    }

    /// Requires the argument to be a string matching the given pattern.
    pub fn pattern(mut self, name: impl Into<String>, regexp: Regex) -> Self {
        self.nodes.push(SchemaNode::new(name, NodeKind::Pattern(regexp)));
        self
    }

    /// Requires the argument to be an array satisfying the given rule set.
    pub fn array(mut self, name: impl Into<String>, checks: ArrayChecks) -> Self {
        self.nodes.push(SchemaNode::new(name, NodeKind::Array(checks)));
        self
    }

    /// Validates the argument with a custom synchronous check.
    pub fn function<F>(mut self, name: impl Into<String>, check: F) -> Self
    where
        F: Fn(&str, &serde_json::Value, &[serde_json::Value]) -> Vec<String>
            + Send
            + Sync
            + 'static,
    {
        self.nodes
            .push(SchemaNode::new(name, NodeKind::Function(Arc::new(check))));
        self
    }

    /// Validates the argument with an asynchronous check. Marks the
    /// schema as asynchronous: it can only be bound with
    /// [`Schema::bind_async`](crate::wrap::WrappedAsync).
    pub fn callback<F, Fut>(mut self, name: impl Into<String>, check: F) -> Self
    where
        F: Fn(CheckRequest) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Option<Vec<String>>> + Send + 'static,
    {
        let check: crate::schema::AsyncCheckFn =
            Arc::new(move |request| Box::pin(check(request)));
        self.nodes.push(SchemaNode::new(name, NodeKind::Callback(check)));
        self
    }

    /// Requires the argument to be an object and validates its members
    /// with the rules registered by `define`.
    ///
    /// Member names may be dotted paths (`"address.street"`); they are
    /// resolved one segment at a time relative to the object value.
    pub fn object(mut self, name: impl Into<String>, define: impl FnOnce(&mut ObjectScope)) -> Self {
        let name = name.into();
        let mut scope = ObjectScope::new(name.clone());
        define(&mut scope);
        let ObjectScope {
            children, hoisted, ..
        } = scope;
        self.nodes.push(SchemaNode::new(name, NodeKind::Object(children)));
        self.nodes.extend(hoisted);
        self
    }

    /// Stops validation at the first error found. Schema-level
    /// configuration, applied to every invocation.
    pub fn fail_on_first_error(mut self, enabled: bool) -> Self {
        self.fail_on_first = enabled;
        self
    }

    /// Seals the schema.
    pub fn finish(self) -> Schema {
        Schema {
            nodes: self.nodes,
            fail_on_first: self.fail_on_first,
        }
    }
}

/// Scoped sub-builder handed to [`SchemaBuilder::object`] definers.
///
/// Registrations become the object node's ordered children under their
/// relative names. `callback` registrations are hoisted to the schema
/// root under the scope's full dotted path instead, since asynchronous
/// checks are dispatched from the bound call argument.
pub struct ObjectScope {
    /// Absolute dotted path of the object node, top parameter included.
    prefix: String,
    children: Vec<SchemaNode>,
    hoisted: Vec<SchemaNode>,
}

impl ObjectScope {
    fn new(prefix: String) -> Self {
        Self {
            prefix,
            children: Vec::new(),
            hoisted: Vec::new(),
        }
    }

    /// Requires the member to be present.
    pub fn not_null(&mut self, name: impl Into<String>) {
        self.children.push(SchemaNode::new(name, NodeKind::NotNull));
    }

    /// Requires the member to be a string.
    pub fn string(&mut self, name: impl Into<String>) {
        self.children.push(SchemaNode::new(name, NodeKind::String(None)));
    }

    /// Requires the member to be a string satisfying the given rule set.
    pub fn string_with(&mut self, name: impl Into<String>, checks: StringChecks) {
        self.children
            .push(SchemaNode::new(name, NodeKind::String(Some(checks))));
    }

    /// Requires the member to be a number.
    pub fn number(&mut self, name: impl Into<String>) {
        self.children.push(SchemaNode::new(name, NodeKind::Number(None)));
    }

    /// Requires the member to be a number satisfying the given rule set.
    pub fn number_with(&mut self, name: impl Into<String>, checks: NumberChecks) {
        self.children
            .push(SchemaNode::new(name, NodeKind::Number(Some(checks))));
    }

    /// Requires the member to be a string matching the given pattern.
    pub fn pattern(&mut self, name: impl Into<String>, regexp: Regex) {
        self.children
            .push(SchemaNode::new(name, NodeKind::Pattern(regexp)));
    }

    /// Requires the member to be an array satisfying the given rule set.
    pub fn array(&mut self, name: impl Into<String>, checks: ArrayChecks) {
        self.children.push(SchemaNode::new(name, NodeKind::Array(checks)));
    }

    /// Validates the member with a custom synchronous check.
    pub fn function<F>(&mut self, name: impl Into<String>, check: F)
    where
        F: Fn(&str, &serde_json::Value, &[serde_json::Value]) -> Vec<String>
            + Send
            + Sync
            + 'static,
    {
        self.children
            .push(SchemaNode::new(name, NodeKind::Function(Arc::new(check))));
    }

    /// Validates the member with an asynchronous check, hoisted to the
    /// schema root under the full dotted path.
    pub fn callback<F, Fut>(&mut self, name: impl Into<String>, check: F)
    where
        F: Fn(CheckRequest) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Option<Vec<String>>> + Send + 'static,
    {
        let full = format!("{}.{}", self.prefix, name.into());
        let check: crate::schema::AsyncCheckFn =
            Arc::new(move |request| Box::pin(check(request)));
        self.hoisted.push(SchemaNode::new(full, NodeKind::Callback(check)));
    }

    /// Registers a nested object member with its own definer scope.
    pub fn object(&mut self, name: impl Into<String>, define: impl FnOnce(&mut ObjectScope)) {
        let name = name.into();
        let mut nested = ObjectScope::new(format!("{}.{}", self.prefix, name));
        define(&mut nested);
        let ObjectScope {
            children, hoisted, ..
        } = nested;
        self.children.push(SchemaNode::new(name, NodeKind::Object(children)));
        self.hoisted.extend(hoisted);
    }
}
