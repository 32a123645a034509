use mongoidx_core::{Error, IndexIdentity, Result};
use std::future::Future;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Race a store call against the caller's cancellation token
///
/// Cancellation wins ties, so an already-cancelled token never reaches the
/// store. On cancellation the store future is dropped, aborting the call.
pub(crate) async fn run_cancellable<F, T>(
    cancel: &CancellationToken,
    operation: &'static str,
    identity: &IndexIdentity,
    call: F,
) -> Result<T>
where
    F: Future<Output = T>,
{
    tokio::select! {
        biased;
        _ = cancel.cancelled() => {
            debug!(index = %identity, operation, "Operation cancelled");
            Err(Error::cancelled(operation, identity))
        }
        output = call => Ok(output),
    }
}
