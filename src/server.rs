use std::{sync::Arc, time::Duration};

use axum::{Extension, Router};
use tokio::{
    net::TcpListener,
    sync::{Notify, oneshot},
};

use crate::{
    api::{self, CallbackSender},
    errors::AuthError,
    types::CallbackOutcome,
    warning,
};

const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

/// Serves the authorization redirect on `listener` for a single request.
///
/// Returns the authorization code, `AuthError::Denied` if the request carried
/// none, or `AuthError::Timeout` if nothing arrived within `timeout`. The
/// listener is torn down before this returns in every case.
pub async fn capture_callback(
    listener: TcpListener,
    timeout: Duration,
) -> Result<String, AuthError> {
    let (outcome_tx, outcome_rx) = oneshot::channel::<CallbackOutcome>();
    let shutdown = Arc::new(Notify::new());

    let app = Router::new()
        .fallback(api::callback)
        .layer(Extension(CallbackSender::new(outcome_tx, Arc::clone(&shutdown))));

    let stop = Arc::clone(&shutdown);
    let mut server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move { stop.notified().await })
            .await
    });

    let received = tokio::time::timeout(timeout, outcome_rx).await;

    // no-op if the handler already signalled
    shutdown.notify_one();
    match tokio::time::timeout(SHUTDOWN_GRACE, &mut server).await {
        Ok(Ok(Err(e))) => warning!("Callback listener stopped with an error: {}", e),
        Ok(_) => {}
        Err(_) => {
            server.abort();
            let _ = server.await;
        }
    }

    match received {
        Ok(Ok(CallbackOutcome::Code(code))) => Ok(code),
        Ok(Ok(CallbackOutcome::Denied(reason))) => Err(AuthError::Denied(reason)),
        Ok(Err(_)) => Err(AuthError::Denied(
            "callback listener stopped before a request arrived".to_string(),
        )),
        Err(_) => Err(AuthError::Timeout(timeout)),
    }
}
