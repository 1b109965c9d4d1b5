//! Schema node definitions
//!
//! A schema is an ordered list of nodes, one per validated parameter.
//! Object and array nodes own child rules, forming a tree that is built
//! once and never mutated afterwards, so a schema can be shared freely
//! across concurrent invocations of the same wrapped function.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures_util::future::BoxFuture;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;

/// Synchronous custom check.
///
/// Called with the dotted path of the node, the resolved value and the
/// full positional argument list. Returns one error description per
/// failed rule; an empty list means the value passed.
pub type CheckFn = Arc<dyn Fn(&str, &Value, &[Value]) -> Vec<String> + Send + Sync>;

/// Asynchronous custom check.
///
/// The returned future resolves to `None` on success or `Some(causes)`
/// on failure. The check runs detached from the validation pass that
/// queued it; see [`CheckRequest`] for the data it receives.
pub type AsyncCheckFn =
    Arc<dyn Fn(CheckRequest) -> BoxFuture<'static, Option<Vec<String>>> + Send + Sync>;

/// Everything an asynchronous check needs to run after the synchronous
/// pass has finished.
#[derive(Debug, Clone)]
pub struct CheckRequest {
    /// Dotted path of the node that queued the check.
    pub path: String,
    /// The resolved value under validation (`Null` when absent).
    pub value: Value,
    /// All positional arguments of the invocation.
    pub args: Arc<Vec<Value>>,
}

/// Kind tag for a schema node.
///
/// Carried inside every [`ValidationError`](crate::engine::ValidationError)
/// to identify the rule that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckKind {
    NotNull,
    String,
    Number,
    Pattern,
    Function,
    Callback,
    Object,
    Array,
}

impl CheckKind {
    /// Returns the kind name used in serialized error reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckKind::NotNull => "notnull",
            CheckKind::String => "string",
            CheckKind::Number => "number",
            CheckKind::Pattern => "pattern",
            CheckKind::Function => "function",
            CheckKind::Callback => "callback",
            CheckKind::Object => "object",
            CheckKind::Array => "array",
        }
    }
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Rule set for string nodes.
///
/// Checks run in priority order: membership, `lt`, `gt`, `lte`, `gte`,
/// pattern. Only the first failing check reports. Length bounds count
/// characters; `lt`/`gt` are exclusive, `lte`/`gte` inclusive.
#[derive(Debug, Clone, Default)]
pub struct StringChecks {
    pub(crate) in_set: Option<Vec<String>>,
    pub(crate) lt: Option<usize>,
    pub(crate) gt: Option<usize>,
    pub(crate) lte: Option<usize>,
    pub(crate) gte: Option<usize>,
    pub(crate) regexp: Option<Regex>,
}

impl StringChecks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requires the value to be one of the given members.
    pub fn in_set<I, S>(mut self, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.in_set = Some(members.into_iter().map(Into::into).collect());
        self
    }

    /// Exclusive maximum length: a value of exactly `bound` characters fails.
    pub fn lt(mut self, bound: usize) -> Self {
        self.lt = Some(bound);
        self
    }

    /// Exclusive minimum length: a value of exactly `bound` characters fails.
    pub fn gt(mut self, bound: usize) -> Self {
        self.gt = Some(bound);
        self
    }

    /// Inclusive maximum length: a value of exactly `bound` characters passes.
    pub fn lte(mut self, bound: usize) -> Self {
        self.lte = Some(bound);
        self
    }

    /// Inclusive minimum length: a value of exactly `bound` characters passes.
    pub fn gte(mut self, bound: usize) -> Self {
        self.gte = Some(bound);
        self
    }

    /// Requires the value to match the given pattern.
    ///
    /// The pattern is compiled by the caller, so a malformed expression
    /// surfaces at schema construction time, never as a validation error.
    pub fn regexp(mut self, pattern: Regex) -> Self {
        self.regexp = Some(pattern);
        self
    }
}

/// Rule set for number nodes.
///
/// Checks run in priority order: `lt`, `gt`, `lte`, `gte`, membership.
/// Only the first failing check reports. `lt`/`gt` are exclusive,
/// `lte`/`gte` inclusive: a value exactly at an exclusive bound fails,
/// exactly at an inclusive bound passes.
#[derive(Debug, Clone, Default)]
pub struct NumberChecks {
    pub(crate) lt: Option<f64>,
    pub(crate) gt: Option<f64>,
    pub(crate) lte: Option<f64>,
    pub(crate) gte: Option<f64>,
    pub(crate) in_set: Option<Vec<f64>>,
}

impl NumberChecks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Exclusive upper bound.
    pub fn lt(mut self, bound: f64) -> Self {
        self.lt = Some(bound);
        self
    }

    /// Exclusive lower bound.
    pub fn gt(mut self, bound: f64) -> Self {
        self.gt = Some(bound);
        self
    }

    /// Inclusive upper bound.
    pub fn lte(mut self, bound: f64) -> Self {
        self.lte = Some(bound);
        self
    }

    /// Inclusive lower bound.
    pub fn gte(mut self, bound: f64) -> Self {
        self.gte = Some(bound);
        self
    }

    /// Requires the value to be one of the given members.
    pub fn in_set<I>(mut self, members: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        self.in_set = Some(members.into_iter().collect());
        self
    }
}

/// Rule set for array nodes.
///
/// One rule applies per node, in priority order: membership over every
/// element, an asynchronous per-element check, or a custom function
/// over the whole array.
#[derive(Clone, Default)]
pub struct ArrayChecks {
    pub(crate) in_set: Option<Vec<Value>>,
    pub(crate) each: Option<AsyncCheckFn>,
    pub(crate) func: Option<CheckFn>,
}

impl ArrayChecks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requires every element to be one of the given members. Each
    /// offending element produces its own error.
    pub fn in_set<I>(mut self, members: I) -> Self
    where
        I: IntoIterator<Item = Value>,
    {
        self.in_set = Some(members.into_iter().collect());
        self
    }

    /// Asynchronous check applied to every element individually. Marks
    /// the schema as asynchronous.
    pub fn each<F, Fut>(mut self, check: F) -> Self
    where
        F: Fn(CheckRequest) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Option<Vec<String>>> + Send + 'static,
    {
        let check: AsyncCheckFn = Arc::new(move |request| Box::pin(check(request)));
        self.each = Some(check);
        self
    }

    /// Custom synchronous check over the whole array.
    pub fn func<F>(mut self, check: F) -> Self
    where
        F: Fn(&str, &Value, &[Value]) -> Vec<String> + Send + Sync + 'static,
    {
        self.func = Some(Arc::new(check));
        self
    }
}

impl fmt::Debug for ArrayChecks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArrayChecks")
            .field("in_set", &self.in_set)
            .field("each", &self.each.is_some())
            .field("func", &self.func.is_some())
            .finish()
    }
}

/// One validation rule, scalar or composite.
#[derive(Clone)]
pub struct SchemaNode {
    pub(crate) name: String,
    pub(crate) kind: NodeKind,
}

#[derive(Clone)]
pub(crate) enum NodeKind {
    NotNull,
    String(Option<StringChecks>),
    Number(Option<NumberChecks>),
    Pattern(Regex),
    Function(CheckFn),
    Callback(AsyncCheckFn),
    Object(Vec<SchemaNode>),
    Array(ArrayChecks),
}

impl SchemaNode {
    pub(crate) fn new(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    /// The declared name: a parameter identifier or a dotted path.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The kind tag of this node.
    pub fn kind(&self) -> CheckKind {
        match &self.kind {
            NodeKind::NotNull => CheckKind::NotNull,
            NodeKind::String(_) => CheckKind::String,
            NodeKind::Number(_) => CheckKind::Number,
            NodeKind::Pattern(_) => CheckKind::Pattern,
            NodeKind::Function(_) => CheckKind::Function,
            NodeKind::Callback(_) => CheckKind::Callback,
            NodeKind::Object(_) => CheckKind::Object,
            NodeKind::Array(_) => CheckKind::Array,
        }
    }

    /// Whether this node, or any rule nested under it, must run
    /// asynchronously.
    pub(crate) fn has_async_checks(&self) -> bool {
        match &self.kind {
            NodeKind::Callback(_) => true,
            NodeKind::Array(checks) => checks.each.is_some(),
            NodeKind::Object(children) => children.iter().any(SchemaNode::has_async_checks),
            _ => false,
        }
    }
}

impl fmt::Debug for SchemaNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaNode")
            .field("name", &self.name)
            .field("kind", &self.kind().as_str())
            .finish()
    }
}
