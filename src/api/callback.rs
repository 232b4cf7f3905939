use std::{collections::HashMap, sync::Arc};

use axum::{
    Extension,
    extract::{Query, rejection::QueryRejection},
    http::{StatusCode, header},
    response::{Html, IntoResponse},
};
use tokio::sync::{Mutex, Notify, oneshot};

use crate::types::CallbackOutcome;

/// One-shot channel back to whoever is waiting on the authorization redirect.
///
/// The first request takes the sender and signals `shutdown`, so the server
/// stops accepting before that request is even answered. Every later request
/// finds the sender gone.
#[derive(Clone)]
pub struct CallbackSender {
    slot: Arc<Mutex<Option<oneshot::Sender<CallbackOutcome>>>>,
    shutdown: Arc<Notify>,
}

impl CallbackSender {
    pub fn new(sender: oneshot::Sender<CallbackOutcome>, shutdown: Arc<Notify>) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(sender))),
            shutdown,
        }
    }

    async fn take(&self) -> Option<oneshot::Sender<CallbackOutcome>> {
        let sender = self.slot.lock().await.take();
        if sender.is_some() {
            self.shutdown.notify_one();
        }
        sender
    }
}

pub async fn callback(
    params: Result<Query<HashMap<String, String>>, QueryRejection>,
    Extension(sender): Extension<CallbackSender>,
) -> impl IntoResponse {
    let Some(sender) = sender.take().await else {
        return reply(
            StatusCode::GONE,
            "<h4>Authorization already handled.</h4>",
        );
    };

    let outcome = match params {
        Ok(Query(params)) => outcome_from_params(&params),
        Err(e) => CallbackOutcome::Denied(format!("malformed callback request: {}", e)),
    };

    let response = match outcome {
        CallbackOutcome::Code(_) => reply(
            StatusCode::OK,
            "<h2>Authorization successful!</h2><p>You can close this window.</p>",
        ),
        CallbackOutcome::Denied(_) => reply(
            StatusCode::BAD_REQUEST,
            "<h4>Authorization failed.</h4>",
        ),
    };

    // receiver may already be gone after a timeout
    let _ = sender.send(outcome);
    response
}

fn outcome_from_params(params: &HashMap<String, String>) -> CallbackOutcome {
    match (params.get("code"), params.get("error")) {
        (Some(code), _) if !code.is_empty() => CallbackOutcome::Code(code.clone()),
        (_, Some(error)) => CallbackOutcome::Denied(error.clone()),
        _ => CallbackOutcome::Denied("missing authorization code".to_string()),
    }
}

fn reply(
    status: StatusCode,
    body: &'static str,
) -> (StatusCode, [(header::HeaderName, &'static str); 1], Html<&'static str>) {
    (status, [(header::CONNECTION, "close")], Html(body))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn query(pairs: &[(&str, &str)]) -> Result<Query<HashMap<String, String>>, QueryRejection> {
        Ok(Query(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        ))
    }

    #[tokio::test]
    async fn first_request_signals_shutdown_before_replying() {
        let (tx, rx) = oneshot::channel();
        let shutdown = Arc::new(Notify::new());
        let sender = CallbackSender::new(tx, Arc::clone(&shutdown));

        let res = callback(query(&[("code", "abc")]), Extension(sender.clone()))
            .await
            .into_response();
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(res.headers()[header::CONNECTION], "close");

        tokio::time::timeout(Duration::from_millis(100), shutdown.notified())
            .await
            .expect("shutdown was not signalled");
        assert_eq!(rx.await.unwrap(), CallbackOutcome::Code("abc".to_string()));

        let late = callback(query(&[("code", "late")]), Extension(sender))
            .await
            .into_response();
        assert_eq!(late.status(), StatusCode::GONE);
    }

    #[tokio::test]
    async fn error_parameter_is_denied() {
        let (tx, rx) = oneshot::channel();
        let sender = CallbackSender::new(tx, Arc::new(Notify::new()));

        let res = callback(query(&[("error", "access_denied")]), Extension(sender))
            .await
            .into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            rx.await.unwrap(),
            CallbackOutcome::Denied("access_denied".to_string())
        );
    }
}
