//! Schema construction for argument validation
//!
//! # Design Principles
//!
//! - One node per validated parameter, declared in order
//! - Rule sets are data; custom checks are caller-supplied closures
//! - Schemas are immutable after `finish()` and cheap to clone
//! - Asynchronous rules are visible on the schema itself, so binding
//!   can reject a missing continuation before the first call

mod builder;
mod types;

pub use builder::{ObjectScope, Schema, SchemaBuilder};
pub(crate) use types::NodeKind;
pub use types::{
    ArrayChecks, AsyncCheckFn, CheckFn, CheckKind, CheckRequest, NumberChecks, SchemaNode,
    StringChecks,
};
