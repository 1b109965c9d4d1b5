//! argschema - declarative schema validation for function arguments
//!
//! A schema describes the expected shape of a function's positional
//! parameters. Binding it to a target produces a wrapper that evaluates
//! every rule against the actual call arguments and only invokes the
//! target when the aggregated error list is empty.

pub mod engine;
pub mod schema;
pub mod wrap;
