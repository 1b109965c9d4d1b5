//! Wrapped functions
//!
//! Binding a schema to a target produces a wrapper that evaluates every
//! rule against the actual call arguments and only invokes the target
//! when the aggregated error list is empty. Validation failures are
//! returned as data; the target never observes an invalid call.

use std::sync::Arc;

use serde_json::Value;

use crate::engine::{run_pass, ValidationError};
use crate::schema::Schema;

use super::binding::BindingTable;
use super::errors::ConfigError;
use super::join;

/// The wrapped target. Receives the original arguments untouched.
pub type TargetFn = Arc<dyn Fn(&[Value]) -> Value + Send + Sync>;

impl Schema {
    /// Binds this schema to a synchronous target.
    ///
    /// `signature` is the target's declared parameter-name list, in
    /// order. Fails if a top-level node matches no parameter, or if the
    /// schema contains asynchronous checks, which need the
    /// continuation-style call path of [`Schema::bind_async`].
    pub fn bind<F>(&self, signature: &[&str], target: F) -> Result<Wrapped, ConfigError>
    where
        F: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        if self.is_async() {
            return Err(ConfigError::AsyncValidation);
        }
        let bindings = BindingTable::build(self, signature)?;
        Ok(Wrapped {
            schema: self.clone(),
            bindings,
            target: Arc::new(target),
        })
    }

    /// Binds this schema to a target reached through an asynchronous
    /// call path, allowing callback-type checks.
    pub fn bind_async<F>(&self, signature: &[&str], target: F) -> Result<WrappedAsync, ConfigError>
    where
        F: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        let bindings = BindingTable::build(self, signature)?;
        Ok(WrappedAsync {
            schema: self.clone(),
            bindings,
            target: Arc::new(target),
        })
    }
}

/// A synchronously wrapped function.
#[derive(Clone)]
pub struct Wrapped {
    schema: Schema,
    bindings: BindingTable,
    target: TargetFn,
}

impl std::fmt::Debug for Wrapped {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Wrapped")
            .field("schema", &self.schema)
            .field("bindings", &self.bindings)
            .finish_non_exhaustive()
    }
}

impl Wrapped {
    /// Validates the arguments and, when every check passes, invokes
    /// the target with them, propagating its return value unchanged.
    ///
    /// Missing trailing arguments validate as absent values. On
    /// failure the target is not invoked and the ordered error list is
    /// returned.
    pub fn call(&self, args: &[Value]) -> Result<Value, Vec<ValidationError>> {
        let outcome = run_pass(&self.schema, self.bindings.positions(), args);
        debug_assert!(outcome.pending.is_empty());

        let mut errors = outcome.errors;
        if !errors.is_empty() {
            surface(&self.schema, &mut errors);
            return Err(errors);
        }
        Ok((self.target)(args))
    }
}

/// An asynchronously wrapped function.
#[derive(Clone)]
pub struct WrappedAsync {
    schema: Schema,
    bindings: BindingTable,
    target: TargetFn,
}

impl WrappedAsync {
    /// Validates the arguments, running queued asynchronous checks
    /// concurrently, and invokes the target only after every check has
    /// completed without error.
    ///
    /// Arguments are taken by value: asynchronous checks outlive the
    /// caller's borrow. The final decision is made exactly once, after
    /// the join; no partial error list is ever delivered.
    pub async fn call(&self, args: Vec<Value>) -> Result<Value, Vec<ValidationError>> {
        let outcome = run_pass(&self.schema, self.bindings.positions(), &args);
        let mut errors = outcome.errors;

        // Fail-fast halts before dispatching any asynchronous check.
        if self.schema.fail_on_first && !errors.is_empty() {
            surface(&self.schema, &mut errors);
            return Err(errors);
        }

        if !outcome.pending.is_empty() {
            let shared = Arc::new(args.clone());
            join::await_all(outcome.pending, shared, &mut errors).await;
        }

        if !errors.is_empty() {
            surface(&self.schema, &mut errors);
            return Err(errors);
        }
        Ok((self.target)(&args))
    }
}

/// Applies the fail-fast policy to the surfaced list: a short-circuit,
/// not a suppression, so only the first error is reported.
fn surface(schema: &Schema, errors: &mut Vec<ValidationError>) {
    if schema.fail_on_first {
        errors.truncate(1);
    }
}
