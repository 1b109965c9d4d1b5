//! Callback coordination
//!
//! Asynchronous checks queued by the synchronous pass are dispatched
//! together and joined before the wrapped target may run. The per
//! invocation progression is: collecting (synchronous pass), awaiting
//! callbacks (all pending checks spawned), joined (every completion
//! received), done (one final decision). Completions merge in arrival
//! order, so callback-sourced errors do not preserve declaration order;
//! synchronous errors do. No partial result is ever delivered: the
//! final decision happens exactly once, after every pending check
//! resolves. There is no cancellation and no timeout: a check that
//! never completes stalls the invocation.

use std::sync::Arc;

use serde_json::Value;
use tokio::task::JoinSet;

use crate::engine::{PendingCallback, ValidationError};
use crate::schema::CheckRequest;

/// Dispatches every pending check concurrently and appends each
/// completion's causes, wrapped with that callback's context, in
/// arrival order.
///
/// A panicking user check propagates to the caller; misbehaving check
/// implementations are configuration-class failures and are never
/// swallowed.
pub(crate) async fn await_all(
    pending: Vec<PendingCallback>,
    args: Arc<Vec<Value>>,
    errors: &mut Vec<ValidationError>,
) {
    let mut joins = JoinSet::new();
    for check in pending {
        let request = CheckRequest {
            path: check.path.clone(),
            value: check.value.clone(),
            args: Arc::clone(&args),
        };
        let future = (check.func)(request);
        joins.spawn(async move { (check, future.await) });
    }

    tracing::debug!(pending = joins.len(), "awaiting asynchronous checks");

    while let Some(joined) = joins.join_next().await {
        let (check, result) = match joined {
            Ok(completion) => completion,
            Err(err) if err.is_panic() => std::panic::resume_unwind(err.into_panic()),
            Err(_) => unreachable!("asynchronous checks are never cancelled"),
        };
        if let Some(causes) = result {
            tracing::trace!(path = %check.path, causes = causes.len(), "asynchronous check failed");
            for cause in causes {
                errors.push(ValidationError::custom(
                    cause,
                    check.kind,
                    &check.path,
                    check.value.clone(),
                ));
            }
        }
    }
}
