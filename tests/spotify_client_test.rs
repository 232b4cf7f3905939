use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, header},
    routing::get,
};
use serde_json::{Value, json};
use spotrand::{
    errors::PlaylistError,
    spotify::playlist::{PlaylistApi, SpotifyClient},
    types::AccessToken,
};
use tokio::net::TcpListener;

#[derive(Clone, Default)]
struct Provider {
    base: String,
    fail_status: Option<StatusCode>,
    deleted: Arc<Mutex<Vec<Value>>>,
    added: Arc<Mutex<Vec<Value>>>,
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        == Some("Bearer test-token")
}

async fn list_tracks(
    State(provider): State<Provider>,
    Path(id): Path<String>,
    Query(query): Query<std::collections::HashMap<String, String>>,
    headers: HeaderMap,
) -> (StatusCode, Json<Value>) {
    if !authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, Json(json!({"error": "no token"})));
    }
    if id != "pl1" {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({"error": {"status": 404, "message": "Resource not found"}})),
        );
    }

    match query.get("offset").map(String::as_str) {
        None => (
            StatusCode::OK,
            Json(json!({
                "items": [
                    {"track": {"uri": "spotify:track:1"}},
                    {"track": null},
                    {"track": {"uri": "spotify:track:2"}}
                ],
                "next": format!("{}/playlists/pl1/tracks?offset=3&limit=100", provider.base)
            })),
        ),
        Some(_) => (
            StatusCode::OK,
            Json(json!({
                "items": [{"track": {"uri": "spotify:track:3"}}],
                "next": null
            })),
        ),
    }
}

async fn delete_tracks(
    State(provider): State<Provider>,
    Json(body): Json<Value>,
) -> (StatusCode, String) {
    if let Some(status) = provider.fail_status {
        return (status, "delete refused".to_string());
    }
    provider.deleted.lock().unwrap().push(body);
    (StatusCode::OK, r#"{"snapshot_id":"s1"}"#.to_string())
}

async fn add_tracks(
    State(provider): State<Provider>,
    Json(body): Json<Value>,
) -> (StatusCode, String) {
    if let Some(status) = provider.fail_status {
        return (status, "add refused".to_string());
    }
    provider.added.lock().unwrap().push(body);
    (StatusCode::CREATED, r#"{"snapshot_id":"s2"}"#.to_string())
}

async fn start(fail_status: Option<StatusCode>) -> (SpotifyClient, Provider) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());

    let provider = Provider {
        base: base.clone(),
        fail_status,
        ..Provider::default()
    };

    let app = Router::new()
        .route(
            "/playlists/{id}/tracks",
            get(list_tracks).delete(delete_tracks).post(add_tracks),
        )
        .with_state(provider.clone());
    tokio::spawn(async move { axum::serve(listener, app).await });

    let client = SpotifyClient::with_api_url(AccessToken::new("test-token", None), base);
    (client, provider)
}

#[tokio::test]
async fn fetch_follows_pages_and_skips_missing_tracks() {
    let (client, _) = start(None).await;

    let uris = client.playlist_tracks("pl1").await.unwrap();
    assert_eq!(
        uris,
        vec!["spotify:track:1", "spotify:track:2", "spotify:track:3"]
    );
}

#[tokio::test]
async fn fetch_error_carries_status_and_body() {
    let (client, _) = start(None).await;

    match client.playlist_tracks("missing").await {
        Err(PlaylistError::Fetch { status, body }) => {
            assert_eq!(status, StatusCode::NOT_FOUND);
            assert!(body.contains("Resource not found"));
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[tokio::test]
async fn remove_and_append_send_provider_bodies() {
    let (client, provider) = start(None).await;
    let uris = vec!["spotify:track:1".to_string(), "spotify:track:2".to_string()];

    client.remove_tracks("pl1", &uris).await.unwrap();
    client.append_tracks("pl1", &uris).await.unwrap();

    assert_eq!(
        provider.deleted.lock().unwrap().as_slice(),
        &[json!({"tracks": [{"uri": "spotify:track:1"}, {"uri": "spotify:track:2"}]})]
    );
    assert_eq!(
        provider.added.lock().unwrap().as_slice(),
        &[json!({"uris": ["spotify:track:1", "spotify:track:2"]})]
    );
}

#[tokio::test]
async fn rejected_batches_become_batch_errors() {
    let (client, _) = start(Some(StatusCode::TOO_MANY_REQUESTS)).await;
    let uris = vec!["spotify:track:1".to_string()];

    match client.remove_tracks("pl1", &uris).await {
        Err(PlaylistError::BatchOperation {
            action,
            status,
            body,
        }) => {
            assert_eq!(action, "remove");
            assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
            assert_eq!(body, "delete refused");
        }
        other => panic!("unexpected result: {:?}", other),
    }

    match client.append_tracks("pl1", &uris).await {
        Err(PlaylistError::BatchOperation { action, body, .. }) => {
            assert_eq!(action, "add");
            assert_eq!(body, "add refused");
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[tokio::test]
async fn append_requires_created_status() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    let app = Router::new().route(
        "/playlists/{id}/tracks",
        axum::routing::post(|| async { (StatusCode::OK, "ok") }),
    );
    tokio::spawn(async move { axum::serve(listener, app).await });

    let client = SpotifyClient::with_api_url(AccessToken::new("test-token", None), base);
    let result = client
        .append_tracks("pl1", &["spotify:track:1".to_string()])
        .await;

    assert!(matches!(
        result,
        Err(PlaylistError::BatchOperation { status, .. }) if status == StatusCode::OK
    ));
}
