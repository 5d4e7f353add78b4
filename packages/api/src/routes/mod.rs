//! # HTTP surface
//!
//! [`router`] wires every endpoint onto an [`AppState`] holding the shared [`Store`].
//!
//! | Method | Path | Handler |
//! |--------|------|---------|
//! | GET | `/` | [`sitemap`] |
//! | GET | `/people` | [`people::list_people`] |
//! | GET/POST/PUT/DELETE | `/people/{id}` | [`people`] |
//! | GET | `/planets` | [`planets::list_planets`] |
//! | GET/POST/PUT/DELETE | `/planet/{id}` | [`planets`] |
//! | GET | `/users` | [`users::list_users`] |
//! | GET | `/users/favorites` | [`favorites::list_favorites`] |
//! | POST/DELETE | `/favorite/people/{id}` | [`favorites`] |
//! | POST/DELETE | `/favorite/planet/{id}` | [`favorites`] |
//!
//! POST and PUT bodies are parsed by [`parse_record`] rather than axum's `Json`
//! extractor so that an empty body and a body without `name` map to the
//! validation errors clients expect.

use std::sync::Arc;

use axum::{
    body::Bytes,
    routing::{get, post},
    Json, Router,
};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::error::{ApiError, ApiResult};
use crate::models::{PeopleInput, PlanetInput, MAX_TEXT_LEN};
use crate::store::Store;

pub mod favorites;
mod identity;
mod path;
pub mod people;
pub mod planets;
pub mod users;


pub use identity::{CurrentUser, USER_ID_HEADER};
pub use path::IdPath;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
}

impl AppState {
    pub fn new(store: impl Store + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}

/// One line of the API map served at `/`.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Endpoint {
    pub method: &'static str,
    pub path: &'static str,
}

const fn endpoint(method: &'static str, path: &'static str) -> Endpoint {
    Endpoint { method, path }
}

pub const ENDPOINTS: &[Endpoint] = &[
    endpoint("GET", "/"),
    endpoint("GET", "/people"),
    endpoint("GET", "/people/{id}"),
    endpoint("POST", "/people/{id}"),
    endpoint("PUT", "/people/{id}"),
    endpoint("DELETE", "/people/{id}"),
    endpoint("GET", "/planets"),
    endpoint("GET", "/planet/{id}"),
    endpoint("POST", "/planet/{id}"),
    endpoint("PUT", "/planet/{id}"),
    endpoint("DELETE", "/planet/{id}"),
    endpoint("GET", "/users"),
    endpoint("GET", "/users/favorites"),
    endpoint("POST", "/favorite/people/{id}"),
    endpoint("DELETE", "/favorite/people/{id}"),
    endpoint("POST", "/favorite/planet/{id}"),
    endpoint("DELETE", "/favorite/planet/{id}"),
];

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(sitemap))
        .route("/people", get(people::list_people))
        .route(
            "/people/{id}",
            get(people::get_people)
                .post(people::create_people)
                .put(people::update_people)
                .delete(people::delete_people),
        )
        .route("/planets", get(planets::list_planets))
        .route(
            "/planet/{id}",
            get(planets::get_planet)
                .post(planets::create_planet)
                .put(planets::update_planet)
                .delete(planets::delete_planet),
        )
        .route("/users", get(users::list_users))
        .route("/users/favorites", get(favorites::list_favorites))
        .route(
            "/favorite/people/{id}",
            post(favorites::add_favorite_people)
                .delete(favorites::remove_favorite_people),
        )
        .route(
            "/favorite/planet/{id}",
            post(favorites::add_favorite_planet)
                .delete(favorites::remove_favorite_planet),
        )
        .with_state(state)
}

/// API map listing every route.
pub async fn sitemap() -> Json<Value> {
    Json(serde_json::json!({ "endpoints": ENDPOINTS }))
}

/// Field checks run on a parsed body before it reaches the store.
pub(crate) trait Validate {
    fn validate(&self) -> ApiResult<()>;
}

fn check_length(field: &str, value: Option<&str>) -> ApiResult<()> {
    match value {
        Some(value) if value.chars().count() > MAX_TEXT_LEN => Err(ApiError::Validation(format!(
            "{field} must be at most {MAX_TEXT_LEN} characters"
        ))),
        _ => Ok(()),
    }
}

impl Validate for PeopleInput {
    fn validate(&self) -> ApiResult<()> {
        check_length("name", Some(self.name.as_str()))?;
        check_length("gender", self.gender.as_deref())?;
        check_length("haircolor", self.haircolor.as_deref())?;
        check_length("eyescolor", self.eyescolor.as_deref())
    }
}

impl Validate for PlanetInput {
    fn validate(&self) -> ApiResult<()> {
        check_length("name", Some(self.name.as_str()))?;
        check_length("terrain", self.terrain.as_deref())
    }
}

/// Parse a create/replace body. The body must be a JSON object with a string `name`,
/// and every text field must fit its column.
pub(crate) fn parse_record<T: DeserializeOwned + Validate>(body: &Bytes) -> ApiResult<T> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(ApiError::missing_body());
    }

    let value: Value = serde_json::from_slice(body)
        .map_err(|e| ApiError::Validation(format!("Invalid JSON body: {e}")))?;

    match &value {
        Value::Null => return Err(ApiError::missing_body()),
        Value::Object(fields) => {
            if !matches!(fields.get("name"), Some(Value::String(_))) {
                return Err(ApiError::missing_name());
            }
        }
        _ => {
            return Err(ApiError::Validation(
                "The request body must be a JSON object".into(),
            ))
        }
    }

    let record: T = serde_json::from_value(value)
        .map_err(|e| ApiError::Validation(format!("Invalid body: {e}")))?;
    record.validate()?;
    Ok(record)
}
