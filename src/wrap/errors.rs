//! Configuration errors
//!
//! Raised at bind time, never deferred to call time: a schema that
//! cannot be attached to its target is a programming error, unlike the
//! data-driven validation errors the engine accumulates per call.

use thiserror::Error;

/// A schema could not be bound to a target function.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A top-level schema node matched no parameter in the signature,
    /// neither by literal name nor by its dotted root segment.
    #[error("no parameter named '{name}' in the target signature")]
    UnresolvedBinding { name: String },

    /// The schema contains asynchronous checks but was bound to a
    /// synchronous call path.
    #[error("a validation is asynchronous, the calling function must provide a continuation")]
    AsyncValidation,
}
