//! Wrapper invocation and callback coordination
//!
//! # Design Principles
//!
//! - Binding resolves once, at attach time; unresolved names are
//!   configuration errors, never validation errors
//! - An asynchronous schema cannot be bound without a continuation-style
//!   call path
//! - The target only runs after every check, synchronous and
//!   asynchronous, has passed
//! - The final decision per invocation is made exactly once

mod binding;
mod errors;
mod join;
mod wrapper;

pub use errors::ConfigError;
pub use wrapper::{TargetFn, Wrapped, WrappedAsync};
