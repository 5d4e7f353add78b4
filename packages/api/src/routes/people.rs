use axum::{
    body::Bytes,
    extract::State,
    Json,
};
use serde_json::{json, Value};

use super::{parse_record, AppState, IdPath};
use crate::error::{ApiError, ApiResult};
use crate::models::{People, PeopleInput};

fn not_found(id: i32) -> ApiError {
    ApiError::NotFound(format!("People {id} not found"))
}

pub async fn list_people(State(state): State<AppState>) -> ApiResult<Json<Vec<People>>> {
    Ok(Json(state.store.list_people().await?))
}

pub async fn get_people(State(state): State<AppState>, IdPath(id): IdPath) -> ApiResult<Json<People>> {
    state
        .store
        .get_people(id)
        .await?
        .map(Json)
        .ok_or_else(|| not_found(id))
}

/// Create the person with the id from the path.
pub async fn create_people(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    body: Bytes,
) -> ApiResult<Json<People>> {
    let exists = || ApiError::AlreadyExists(format!("People {id} already exists"));

    if state.store.get_people(id).await?.is_some() {
        return Err(exists());
    }
    let input: PeopleInput = parse_record(&body)?;

    let people = state
        .store
        .insert_people(&input.into_people(id))
        .await?
        .ok_or_else(exists)?;

    tracing::info!(id, name = %people.name, "people created");
    Ok(Json(people))
}

/// Replace every column of an existing person. Omitted optional fields become null.
pub async fn update_people(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    body: Bytes,
) -> ApiResult<Json<People>> {
    if state.store.get_people(id).await?.is_none() {
        return Err(not_found(id));
    }
    let input: PeopleInput = parse_record(&body)?;

    let people = state
        .store
        .update_people(&input.into_people(id))
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(id, "people updated");
    Ok(Json(people))
}

pub async fn delete_people(State(state): State<AppState>, IdPath(id): IdPath) -> ApiResult<Json<Value>> {
    if !state.store.delete_people(id).await? {
        return Err(not_found(id));
    }

    tracing::info!(id, "people deleted");
    Ok(Json(json!({ "message": format!("People {id} deleted") })))
}
