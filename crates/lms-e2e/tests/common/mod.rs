//! In-process LMS for running the regression suite without a deployment.
//!
//! Serves every endpoint the scenarios touch, with the server's validation
//! and not-found payloads. State lives in memory for the life of the test.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Map, Value, json};
use std::collections::HashMap;
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
    /// Creation order is the listing order.
    courses: Vec<Value>,
    exercises: Vec<Value>,
}

#[derive(Clone)]
struct AppState {
    base_url: String,
    store: Arc<Mutex<Store>>,
}

pub struct Lms {
    pub base_url: String,
}

impl Lms {
    /// Binds an ephemeral port and serves until the test runtime ends.
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());

        let state = AppState {
            base_url: base_url.clone(),
            store: Arc::new(Mutex::new(Store::default())),
        };
        let app = Router::new()
            .route("/api/v1/authentication/login", post(login))
            .route("/api/v1/users", post(create_user))
            .route("/api/v1/users/me", get(get_user_me))
            .route("/api/v1/files", post(create_file))
            .route("/api/v1/files/{file_id}", get(get_file).delete(delete_file))
            .route("/api/v1/courses", get(get_courses).post(create_course))
            .route(
                "/api/v1/courses/{course_id}",
                get(get_course).patch(update_course).delete(delete_course),
            )
            .route("/api/v1/exercises", get(get_exercises).post(create_exercise))
            .route(
                "/api/v1/exercises/{exercise_id}",
                get(get_exercise)
                    .patch(update_exercise)
                    .delete(delete_exercise),
            )
            .with_state(state);

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url }
    }
}

fn detail(status: StatusCode, message: &str) -> Reply {
    (status, Json(json!({ "detail": message })))
}

fn unauthorized() -> Reply {
    detail(StatusCode::UNAUTHORIZED, "Not authenticated")
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

/// Copies the non-null fields of a PATCH body onto `target`.
fn apply_patch(target: &mut Value, patch: &Value, fields: &[&str]) {
    for field in fields {
        if let Some(value) = patch.get(*field).filter(|v| !v.is_null()) {
            target[*field] = value.clone();
        }
    }
}

async fn login(State(state): State<AppState>, Json(body): Json<Value>) -> Reply {
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
        None => unauthorized(),
    }
}

async fn create_file(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Reply {
    if current_user(&state, &headers).is_none() {
        return unauthorized();
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
        return unauthorized();
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
        return unauthorized();
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

async fn get_courses(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Reply {
    if current_user(&state, &headers).is_none() {
        return unauthorized();
    }
    let user_id = query.get("userId").cloned().unwrap_or_default();
    let store = state.store.lock().unwrap();
    let courses: Vec<Value> = store
        .courses
        .iter()
        .filter(|course| course["createdByUser"]["id"] == user_id.as_str())
        .cloned()
        .collect();
    (StatusCode::OK, Json(json!({ "courses": courses })))
}

async fn create_course(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Reply {
    if current_user(&state, &headers).is_none() {
        return unauthorized();
    }
    let mut store = state.store.lock().unwrap();

    let preview_file = body["previewFileId"]
        .as_str()
        .and_then(|id| Uuid::parse_str(id).ok())
        .and_then(|id| store.files.get(&id).cloned());
    let Some(preview_file) = preview_file else {
        return detail(StatusCode::NOT_FOUND, "File not found");
    };
    let author = body["createdByUserId"]
        .as_str()
        .and_then(|id| store.users.get(id))
        .map(|(user, _)| user.clone());
    let Some(author) = author else {
        return detail(StatusCode::NOT_FOUND, "User not found");
    };

    let course = json!({
        "id": Uuid::new_v4().to_string(),
        "title": body["title"],
        "maxScore": body["maxScore"],
        "minScore": body["minScore"],
        "description": body["description"],
        "previewFile": preview_file,
        "estimatedTime": body["estimatedTime"],
        "createdByUser": author
    });
    store.courses.push(course.clone());
    (StatusCode::OK, Json(json!({ "course": course })))
}

async fn get_course(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(course_id): Path<String>,
) -> Reply {
    if current_user(&state, &headers).is_none() {
        return unauthorized();
    }
    let store = state.store.lock().unwrap();
    match store
        .courses
        .iter()
        .find(|course| course["id"] == course_id.as_str())
    {
        Some(course) => (StatusCode::OK, Json(json!({ "course": course }))),
        None => detail(StatusCode::NOT_FOUND, "Course not found"),
    }
}

async fn delete_course(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(course_id): Path<String>,
) -> Reply {
    if current_user(&state, &headers).is_none() {
        return unauthorized();
    }
    let mut store = state.store.lock().unwrap();
    let before = store.courses.len();
    store
        .courses
        .retain(|course| course["id"] != course_id.as_str());

    if store.courses.len() < before {
        (StatusCode::OK, Json(Value::Null))
    } else {
        detail(StatusCode::NOT_FOUND, "Course not found")
    }
}

async fn update_course(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(course_id): Path<String>,
    Json(body): Json<Value>,
) -> Reply {
    if current_user(&state, &headers).is_none() {
        return unauthorized();
    }
    let mut store = state.store.lock().unwrap();
    let Some(course) = store
        .courses
        .iter_mut()
        .find(|course| course["id"] == course_id.as_str())
    else {
        return detail(StatusCode::NOT_FOUND, "Course not found");
    };

    apply_patch(
        course,
        &body,
        &["title", "maxScore", "minScore", "description", "estimatedTime"],
    );
    (StatusCode::OK, Json(json!({ "course": course })))
}

const EXERCISE_FIELDS: [&str; 6] = [
    "title",
    "maxScore",
    "minScore",
    "orderIndex",
    "description",
    "estimatedTime",
];

async fn get_exercises(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Reply {
    if current_user(&state, &headers).is_none() {
        return unauthorized();
    }
    let course_id = query.get("courseId").cloned().unwrap_or_default();
    let store = state.store.lock().unwrap();
    let exercises: Vec<Value> = store
        .exercises
        .iter()
        .filter(|exercise| exercise["courseId"] == course_id.as_str())
        .cloned()
        .collect();
    (StatusCode::OK, Json(json!({ "exercises": exercises })))
}

async fn create_exercise(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Reply {
    if current_user(&state, &headers).is_none() {
        return unauthorized();
    }
    let mut store = state.store.lock().unwrap();
    let course_exists = store
        .courses
        .iter()
        .any(|course| course["id"] == body["courseId"]);
    if !course_exists {
        return detail(StatusCode::NOT_FOUND, "Course not found");
    }

    let mut exercise = Map::new();
    exercise.insert("id".to_string(), json!(Uuid::new_v4().to_string()));
    exercise.insert("courseId".to_string(), body["courseId"].clone());
    for field in EXERCISE_FIELDS {
        exercise.insert(field.to_string(), body[field].clone());
    }
    let exercise = Value::Object(exercise);
    store.exercises.push(exercise.clone());
    (StatusCode::OK, Json(json!({ "exercise": exercise })))
}

async fn get_exercise(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(exercise_id): Path<String>,
) -> Reply {
    if current_user(&state, &headers).is_none() {
        return unauthorized();
    }
    let store = state.store.lock().unwrap();
    match store
        .exercises
        .iter()
        .find(|exercise| exercise["id"] == exercise_id.as_str())
    {
        Some(exercise) => (StatusCode::OK, Json(json!({ "exercise": exercise }))),
        None => detail(StatusCode::NOT_FOUND, "Exercise not found"),
    }
}

async fn update_exercise(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(exercise_id): Path<String>,
    Json(body): Json<Value>,
) -> Reply {
    if current_user(&state, &headers).is_none() {
        return unauthorized();
    }
    let mut store = state.store.lock().unwrap();
    let Some(exercise) = store
        .exercises
        .iter_mut()
        .find(|exercise| exercise["id"] == exercise_id.as_str())
    else {
        return detail(StatusCode::NOT_FOUND, "Exercise not found");
    };

    apply_patch(exercise, &body, &EXERCISE_FIELDS);
    (StatusCode::OK, Json(json!({ "exercise": exercise })))
}

async fn delete_exercise(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(exercise_id): Path<String>,
) -> Reply {
    if current_user(&state, &headers).is_none() {
        return unauthorized();
    }
    let mut store = state.store.lock().unwrap();
    let before = store.exercises.len();
    store
        .exercises
        .retain(|exercise| exercise["id"] != exercise_id.as_str());

    if store.exercises.len() < before {
        (StatusCode::OK, Json(Value::Null))
    } else {
        detail(StatusCode::NOT_FOUND, "Exercise not found")
    }
}
