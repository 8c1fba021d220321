//! Concurrent assembly of a user record and an application record.
//!
//! The two fetches run as independent tokio tasks against their own
//! stores; a supervisory select loop joins the results. Success requires
//! both records; the first error or a caller cancellation wins
//! immediately. Early exit cancels the sibling task through a child
//! [`CancellationToken`] and joins it before returning, so no task
//! outlives the call.

use super::errors::{AuthError, AuthResult};
use std::future::Future;
use tokio::task::{JoinError, JoinHandle};
use tokio_util::sync::CancellationToken;

/// Fetch a user record and an application record concurrently
///
/// Results are paired by origin, never by arrival order. Returns the
/// first fetch error, or `AuthError::Cancelled` when the caller's token
/// fires before both records arrive.
pub async fn aggregate<U, A, FU, FA>(
    cancel: &CancellationToken,
    fetch_user: FU,
    fetch_app: FA,
) -> AuthResult<(U, A)>
where
    U: Send + 'static,
    A: Send + 'static,
    FU: Future<Output = AuthResult<U>> + Send + 'static,
    FA: Future<Output = AuthResult<A>> + Send + 'static,
{
    let child = cancel.child_token();

    let mut user_task = spawn_fetch(&child, fetch_user);
    let mut app_task = spawn_fetch(&child, fetch_app);

    let mut user_slot: Option<U> = None;
    let mut app_slot: Option<A> = None;

    loop {
        tokio::select! {
            joined = &mut user_task, if user_slot.is_none() => match flatten(joined) {
                Ok(user) => user_slot = Some(user),
                Err(err) => {
                    child.cancel();
                    if app_slot.is_none() {
                        let _ = (&mut app_task).await;
                    }
                    return Err(err);
                }
            },

            joined = &mut app_task, if app_slot.is_none() => match flatten(joined) {
                Ok(app) => app_slot = Some(app),
                Err(err) => {
                    child.cancel();
                    if user_slot.is_none() {
                        let _ = (&mut user_task).await;
                    }
                    return Err(err);
                }
            },

            () = cancel.cancelled() => {
                child.cancel();
                if user_slot.is_none() {
                    let _ = (&mut user_task).await;
                }
                if app_slot.is_none() {
                    let _ = (&mut app_task).await;
                }
                return Err(AuthError::Cancelled);
            }
        }

        if user_slot.is_some() && app_slot.is_some() {
            break;
        }
    }

    match (user_slot, app_slot) {
        (Some(user), Some(app)) => Ok((user, app)),
        _ => Err(AuthError::Internal(
            "aggregation finished without both records".to_string(),
        )),
    }
}

/// Run a fetch in its own task, racing it against the shared cancellation
fn spawn_fetch<T, F>(cancel: &CancellationToken, fetch: F) -> JoinHandle<AuthResult<T>>
where
    T: Send + 'static,
    F: Future<Output = AuthResult<T>> + Send + 'static,
{
    let cancel = cancel.clone();
    tokio::spawn(async move {
        tokio::select! {
            () = cancel.cancelled() => Err(AuthError::Cancelled),
            result = fetch => result,
        }
    })
}

fn flatten<T>(joined: Result<AuthResult<T>, JoinError>) -> AuthResult<T> {
    match joined {
        Ok(result) => result,
        Err(err) if err.is_cancelled() => Err(AuthError::Cancelled),
        Err(err) => Err(AuthError::Internal(format!("fetch task failed: {err}"))),
    }
}
