use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::{Value, json};
use tokio::net::TcpListener;

/// In-memory stand-in for the recruiting backend.
#[derive(Default)]
pub struct StubBackend {
    /// Slot documents, keyed by user id.
    pub slots: Vec<(String, Value)>,
    /// Bodies received on the create-slots endpoint.
    pub created: Vec<Value>,
    /// When set, create-slots answers with this status and body.
    pub create_failure: Option<(StatusCode, Value)>,
    /// When set, available-slots answers with this status and body.
    pub list_failure: Option<(StatusCode, Value)>,
    pub list_calls: usize,
    /// Answer successful bookings with `204 No Content`.
    pub book_no_content: bool,
}

pub type SharedBackend = Arc<Mutex<StubBackend>>;

impl StubBackend {
    pub fn with_slots(user_id: &str, slots: Value) -> SharedBackend {
        let slots = slots
            .as_array()
            .cloned()
            .unwrap_or_default()
            .into_iter()
            .map(|slot| (user_id.to_string(), slot))
            .collect();
        Arc::new(Mutex::new(StubBackend {
            slots,
            ..Default::default()
        }))
    }
}

async fn list_slots(
    State(backend): State<SharedBackend>,
    Path(user_id): Path<String>,
) -> (StatusCode, Json<Value>) {
    let mut backend = backend.lock().unwrap();
    backend.list_calls += 1;
    if let Some((status, body)) = backend.list_failure.clone() {
        return (status, Json(body));
    }
    let slots: Vec<Value> = backend
        .slots
        .iter()
        .filter(|(owner, _)| owner == &user_id)
        .map(|(_, slot)| slot.clone())
        .collect();
    (StatusCode::OK, Json(json!({ "slots": slots })))
}

async fn create_slots(
    State(backend): State<SharedBackend>,
    Path(user_id): Path<String>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let mut backend = backend.lock().unwrap();
    if let Some((status, body)) = backend.create_failure.clone() {
        return (status, Json(body));
    }
    let times: Vec<String> = body["start_times"]
        .as_array()
        .map(|a| a.iter().filter_map(|t| t.as_str().map(String::from)).collect())
        .unwrap_or_default();
    for time in times {
        backend.slots.push((
            user_id.clone(),
            json!({ "start_time": time, "available": true, "userId": user_id }),
        ));
    }
    backend.created.push(body);
    (StatusCode::OK, Json(json!({ "message": "Slots created!" })))
}

async fn book_slot(
    State(backend): State<SharedBackend>,
    Path(user_id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let mut backend = backend.lock().unwrap();
    let no_content = backend.book_no_content;
    let wanted = body["selected_start_time"].as_str().unwrap_or_default().to_string();

    let slot = backend.slots.iter_mut().find(|(owner, slot)| {
        owner == &user_id && slot["start_time"].as_str() == Some(wanted.as_str())
    });

    match slot {
        Some((_, slot)) if slot["available"] == json!(true) => {
            slot["available"] = json!(false);
            slot["candidate_email"] = body["candidate_email"].clone();
            if no_content {
                return StatusCode::NO_CONTENT.into_response();
            }
            (
                StatusCode::OK,
                Json(json!({
                    "message": "Interview booked successfully!",
                    "meet_link": "https://meet.example/abc",
                    "event_id": "evt-1"
                })),
            )
                .into_response()
        }
        Some(_) => (
            StatusCode::CONFLICT,
            Json(json!({ "detail": "Slot already taken" })),
        )
            .into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "detail": "Selected slot is not available or already booked." })),
        )
            .into_response(),
    }
}

async fn sign_in(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if body["password"] == json!("secret") {
        (
            StatusCode::OK,
            Json(json!({ "message": "Login successful", "token": "jwt-token", "userId": "hr-1" })),
        )
    } else {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "detail": "Invalid email or password" })),
        )
    }
}

/// Serve the stub on an ephemeral port and return its base URL.
pub async fn spawn_backend(backend: SharedBackend) -> String {
    let app = Router::new()
        .route("/users/:user_id/available-slots/", get(list_slots))
        .route("/users/:user_id/create-slots/", post(create_slots))
        .route("/users/:user_id/book-slot/", post(book_slot))
        .route("/signin", post(sign_in))
        .route("/signup", post(sign_in))
        .with_state(backend);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

/// A base URL nothing is listening on.
pub async fn unreachable_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}
