//! In-process LMS emulator for integration tests.
//!
//! Implements just enough of the API for the client flows under test:
//! registration, login, `users/me`, and file upload/get/delete with the
//! server's validation and not-found payloads.

use axum::extract::{Multipart, Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use uuid::Uuid;

type Reply = (StatusCode, Json<Value>);

#[derive(Default)]
struct Store {
    /// user id -> (user json, password)
    users: HashMap<String, (Value, String)>,
    /// access token -> user id
    tokens: HashMap<String, String>,
    files: HashMap<Uuid, Value>,
}

#[derive(Clone)]
struct AppState {
    base_url: String,
    store: Arc<Mutex<Store>>,
    logins: Arc<AtomicUsize>,
}

pub struct MockLms {
    pub base_url: String,
    logins: Arc<AtomicUsize>,
}

impl MockLms {
    /// Binds an ephemeral port and serves until the test runtime ends.
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let logins = Arc::new(AtomicUsize::new(0));

        let state = AppState {
            base_url: base_url.clone(),
            store: Arc::new(Mutex::new(Store::default())),
            logins: logins.clone(),
        };
        let app = Router::new()
            .route("/api/v1/authentication/login", post(login))
            .route("/api/v1/users", post(create_user))
            .route("/api/v1/users/me", get(get_user_me))
            .route("/api/v1/files", post(create_file))
            .route("/api/v1/files/{file_id}", get(get_file).delete(delete_file))
            .with_state(state);

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, logins }
    }

    pub fn login_count(&self) -> usize {
        self.logins.load(Ordering::SeqCst)
    }
}

fn detail(status: StatusCode, message: &str) -> Reply {
    (status, Json(json!({ "detail": message })))
}

fn too_short(field: &str) -> Reply {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(json!({
            "detail": [{
                "type": "string_too_short",
                "loc": ["body", field],
                "msg": "String should have at least 1 character",
                "input": "",
                "ctx": {"min_length": 1}
            }]
        })),
    )
}

fn current_user(state: &AppState, headers: &HeaderMap) -> Option<Value> {
    let token = headers
        .get("authorization")?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")?;
    let store = state.store.lock().unwrap();
    let user_id = store.tokens.get(token)?;
    store.users.get(user_id).map(|(user, _)| user.clone())
}

async fn login(State(state): State<AppState>, Json(body): Json<Value>) -> Reply {
    state.logins.fetch_add(1, Ordering::SeqCst);
    let mut store = state.store.lock().unwrap();
    let user_id = store
        .users
        .iter()
        .find(|(_, (user, password))| user["email"] == body["email"] && *password == body["password"])
        .map(|(id, _)| id.clone());

    let Some(user_id) = user_id else {
        return detail(StatusCode::UNAUTHORIZED, "Invalid credentials");
    };
    let access = Uuid::new_v4().to_string();
    store.tokens.insert(access.clone(), user_id);
    (
        StatusCode::OK,
        Json(json!({
            "token": {
                "tokenType": "bearer",
                "accessToken": access,
                "refreshToken": Uuid::new_v4().to_string()
            }
        })),
    )
}

async fn create_user(State(state): State<AppState>, Json(body): Json<Value>) -> Reply {
    let id = Uuid::new_v4().to_string();
    let user = json!({
        "id": id,
        "email": body["email"],
        "lastName": body["lastName"],
        "firstName": body["firstName"],
        "middleName": body["middleName"]
    });
    let password = body["password"].as_str().unwrap_or_default().to_string();
    state
        .store
        .lock()
        .unwrap()
        .users
        .insert(id, (user.clone(), password));
    (StatusCode::OK, Json(json!({ "user": user })))
}

async fn get_user_me(State(state): State<AppState>, headers: HeaderMap) -> Reply {
    match current_user(&state, &headers) {
        Some(user) => (StatusCode::OK, Json(json!({ "user": user }))),
        None => detail(StatusCode::UNAUTHORIZED, "Not authenticated"),
    }
}

async fn create_file(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Reply {
    if current_user(&state, &headers).is_none() {
        return detail(StatusCode::UNAUTHORIZED, "Not authenticated");
    }

    let mut fields: HashMap<String, String> = HashMap::new();
    let mut uploaded = 0;
    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().unwrap_or_default().to_string();
        let data = field.bytes().await.unwrap();
        if name == "upload_file" {
            uploaded = data.len();
        } else {
            fields.insert(name, String::from_utf8_lossy(&data).into_owned());
        }
    }

    let filename = fields.remove("filename").unwrap_or_default();
    let directory = fields.remove("directory").unwrap_or_default();
    if filename.is_empty() {
        return too_short("filename");
    }
    if directory.is_empty() {
        return too_short("directory");
    }
    if uploaded == 0 {
        return detail(StatusCode::UNPROCESSABLE_ENTITY, "upload_file is empty");
    }

    let id = Uuid::new_v4();
    let file = json!({
        "id": id.to_string(),
        "url": format!("{}/static/{}/{}", state.base_url, directory, filename),
        "filename": filename,
        "directory": directory
    });
    state.store.lock().unwrap().files.insert(id, file.clone());
    (StatusCode::OK, Json(json!({ "file": file })))
}

fn parse_file_id(file_id: &str) -> Result<Uuid, Reply> {
    Uuid::parse_str(file_id).map_err(|_| {
        let error = "invalid character: expected an optional prefix of `urn:uuid:` \
                     followed by [0-9a-fA-F-], found `i` at 1";
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({
                "detail": [{
                    "type": "uuid_parsing",
                    "loc": ["path", "file_id"],
                    "msg": format!("Input should be a valid UUID, {}", error),
                    "input": file_id,
                    "ctx": {"error": error}
                }]
            })),
        )
    })
}

async fn get_file(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(file_id): Path<String>,
) -> Reply {
    if current_user(&state, &headers).is_none() {
        return detail(StatusCode::UNAUTHORIZED, "Not authenticated");
    }
    let id = match parse_file_id(&file_id) {
        Ok(id) => id,
        Err(reply) => return reply,
    };
    match state.store.lock().unwrap().files.get(&id) {
        Some(file) => (StatusCode::OK, Json(json!({ "file": file }))),
        None => detail(StatusCode::NOT_FOUND, "File not found"),
    }
}

async fn delete_file(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(file_id): Path<String>,
) -> Reply {
    if current_user(&state, &headers).is_none() {
        return detail(StatusCode::UNAUTHORIZED, "Not authenticated");
    }
    let id = match parse_file_id(&file_id) {
        Ok(id) => id,
        Err(reply) => return reply,
    };
    match state.store.lock().unwrap().files.remove(&id) {
        Some(_) => (StatusCode::OK, Json(Value::Null)),
        None => detail(StatusCode::NOT_FOUND, "File not found"),
    }
}
