//! API integration tests
//!
//! Drive the full router in-process with `tower::ServiceExt::oneshot`,
//! over the in-memory store or a wiremock-backed remote deployment. The
//! WebSocket tests serve the router on an ephemeral port.

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use note_taking_app::api::create_router;
use note_taking_app::assistant::{AssistantConfig, NoteAssistant, SimulatedModel};
use note_taking_app::events::{EventBus, NoteAction};
use note_taking_app::notes::NoteManager;
use note_taking_app::store::{open_note_store, RemoteConfig};
use note_taking_app::{AppState, Config};
use serde_json::{json, Value};
use std::sync::Arc;
use futures::StreamExt;
use std::time::Duration;
use tokio_tungstenite::tungstenite::Message;
use tower::ServiceExt; // for `oneshot`
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// App state over `remote`, with an instant simulated assistant
fn app_state(remote: RemoteConfig) -> AppState {
    let store = open_note_store(&remote).unwrap();
    let event_bus = Arc::new(EventBus::default());
    AppState {
        notes: Arc::new(NoteManager::with_event_emitter(store, event_bus.clone())),
        assistant: Arc::new(NoteAssistant::new(Arc::new(SimulatedModel::with_delay(
            Duration::ZERO,
        )))),
        event_bus,
        config: Arc::new(Config {
            server_port: 0,
            remote,
            assistant: AssistantConfig::default(),
        }),
    }
}

fn app(state: &AppState) -> Router {
    create_router(state.server_state())
}

async fn call(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    let resp = app.oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

fn ids(body: &Value) -> Vec<String> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|n| n["_id"].as_str().unwrap().to_string())
        .collect()
}

// ============================================================================
// Mock backend
// ============================================================================

#[tokio::test]
async fn test_health_reports_mock_backend() {
    let state = app_state(RemoteConfig::default());
    let (status, body) = call(app(&state), "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["backend"], "mock");
    assert_eq!(body["model"], "simulated");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_note_lifecycle() {
    let state = app_state(RemoteConfig::with_url("http://localhost:3210"));
    let mut events = state.event_bus.subscribe();

    // Create
    let (status, body) = call(
        app(&state),
        "POST",
        "/api/notes",
        Some(json!({"title": "Groceries", "content": "milk"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["id"].as_str().unwrap().to_string();

    let (_, list) = call(app(&state), "GET", "/api/notes", None).await;
    assert_eq!(ids(&list), vec![id.clone(), "note1".into(), "note2".into()]);

    // Read back
    let (status, note) = call(app(&state), "GET", &format!("/api/notes/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(note["title"], "Groceries");
    assert_eq!(note["tags"], json!([]));
    assert_eq!(note["createdAt"], note["updatedAt"]);

    // Partial update
    let (status, _) = call(
        app(&state),
        "PATCH",
        &format!("/api/notes/{}", id),
        Some(json!({"content": "milk, eggs"})),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, note) = call(app(&state), "GET", &format!("/api/notes/{}", id), None).await;
    assert_eq!(note["title"], "Groceries");
    assert_eq!(note["content"], "milk, eggs");
    assert!(note["updatedAt"].as_i64().unwrap() > note["createdAt"].as_i64().unwrap());

    // Delete twice
    let uri = format!("/api/notes/{}", id);
    let (status, _) = call(app(&state), "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, body) = call(app(&state), "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());

    // One event per successful mutation
    let actions: Vec<NoteAction> = std::iter::from_fn(|| events.try_recv().ok())
        .map(|e| e.action)
        .collect();
    assert_eq!(
        actions,
        vec![NoteAction::Created, NoteAction::Updated, NoteAction::Deleted]
    );
}

#[tokio::test]
async fn test_search_over_seed() {
    let state = app_state(RemoteConfig::default());

    let (_, meet) = call(app(&state), "GET", "/api/notes/search?q=meet", None).await;
    assert_eq!(ids(&meet), vec!["note2"]);

    let (_, upper) = call(app(&state), "GET", "/api/notes/search?q=MEET", None).await;
    assert_eq!(ids(&upper), ids(&meet));

    let (_, all) = call(app(&state), "GET", "/api/notes/search?q=", None).await;
    assert_eq!(ids(&all), vec!["note1", "note2"]);
}

#[tokio::test]
async fn test_simulated_assistant_reply() {
    let state = app_state(RemoteConfig::default());
    let (status, body) = call(
        app(&state),
        "POST",
        "/api/notes/note1/assistant",
        Some(json!({"action": "summarize"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let transcript = body["transcript"].as_array().unwrap();
    assert_eq!(transcript[0]["role"], "user");
    assert_eq!(transcript[1]["role"], "assistant");
    assert!(transcript[1]["content"]
        .as_str()
        .unwrap()
        .starts_with("I understand you want help with: \"Please provide a concise summary of this note\""));

    // The assistant never writes to the store
    let (_, note) = call(app(&state), "GET", "/api/notes/note1", None).await;
    assert_eq!(note["createdAt"], note["updatedAt"]);
}

// ============================================================================
// Remote backend
// ============================================================================

#[tokio::test]
async fn test_remote_backend_list_is_sorted_by_updated_at() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/query"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "value": [
                {"_id": "older", "_creationTime": 1.0, "title": "A", "content": "",
                 "createdAt": 1, "updatedAt": 10},
                {"_id": "newer", "_creationTime": 2.0, "title": "B", "content": "",
                 "tags": ["x"], "createdAt": 2, "updatedAt": 20},
            ],
        })))
        .mount(&server)
        .await;

    let state = app_state(RemoteConfig::with_url(server.uri()));
    let (_, health) = call(app(&state), "GET", "/health", None).await;
    assert_eq!(health["backend"], "remote");

    let (status, list) = call(app(&state), "GET", "/api/notes", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&list), vec!["newer", "older"]);
    assert_eq!(list[1]["tags"], json!([]));
}

#[tokio::test]
async fn test_remote_failure_is_bad_gateway() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "status": "error",
            "errorMessage": "Server Error",
        })))
        .mount(&server)
        .await;

    let state = app_state(RemoteConfig::with_url(server.uri()));

    let (status, body) = call(app(&state), "GET", "/api/notes", None).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], "Server Error");

    let (status, health) = call(app(&state), "GET", "/health", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(health["status"], "unhealthy");
}

// ============================================================================
// WebSocket events
// ============================================================================

type WsStream =
    tokio_tungstenite::WebSocketStream<tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>>;

/// Serve the router on 127.0.0.1:0 and return its address
async fn spawn_server(state: &AppState) -> std::net::SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let router = app(state);
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

/// Connect and wait until the handler has subscribed to the bus
async fn connect_events(state: &AppState, url: String) -> WsStream {
    let before = state.event_bus.subscriber_count();
    let (ws, response) = tokio_tungstenite::connect_async(url).await.unwrap();
    assert_eq!(response.status(), 101);

    tokio::time::timeout(Duration::from_secs(5), async {
        while state.event_bus.subscriber_count() <= before {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .unwrap();
    ws
}

/// Next text frame as JSON, skipping control frames
async fn next_event(ws: &mut WsStream) -> Value {
    tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            match ws.next().await {
                Some(Ok(Message::Text(text))) => return serde_json::from_str(&text).unwrap(),
                Some(Ok(_)) => continue,
                other => panic!("WebSocket closed before an event arrived: {:?}", other),
            }
        }
    })
    .await
    .unwrap()
}

#[tokio::test]
async fn test_ws_forwards_created_event() {
    let state = app_state(RemoteConfig::default());
    let addr = spawn_server(&state).await;
    let mut ws = connect_events(&state, format!("ws://{}/ws/events", addr)).await;

    let (status, created) = call(
        app(&state),
        "POST",
        "/api/notes",
        Some(json!({"title": "Live", "content": "streamed"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let event = next_event(&mut ws).await;
    assert_eq!(event["action"], "created");
    assert_eq!(event["note_id"], created["id"]);
    assert_eq!(event["payload"]["title"], "Live");
}

#[tokio::test]
async fn test_ws_note_filter_skips_other_notes() {
    let state = app_state(RemoteConfig::default());
    let addr = spawn_server(&state).await;
    let mut ws = connect_events(&state, format!("ws://{}/ws/events?note_id=note2", addr)).await;

    for id in ["note1", "note2"] {
        let (status, _) = call(
            app(&state),
            "PATCH",
            &format!("/api/notes/{}", id),
            Some(json!({"title": format!("Edited {}", id)})),
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);
    }

    let event = next_event(&mut ws).await;
    assert_eq!(event["action"], "updated");
    assert_eq!(event["note_id"], "note2");
}
