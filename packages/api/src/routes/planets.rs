use axum::{
    body::Bytes,
    extract::State,
    Json,
};
use serde_json::{json, Value};

use super::{parse_record, AppState, IdPath};
use crate::error::{ApiError, ApiResult};
use crate::models::{Planet, PlanetInput};

fn not_found(id: i32) -> ApiError {
    ApiError::NotFound(format!("Planet {id} not found"))
}

pub async fn list_planets(State(state): State<AppState>) -> ApiResult<Json<Vec<Planet>>> {
    Ok(Json(state.store.list_planets().await?))
}

pub async fn get_planet(State(state): State<AppState>, IdPath(id): IdPath) -> ApiResult<Json<Planet>> {
    state
        .store
        .get_planet(id)
        .await?
        .map(Json)
        .ok_or_else(|| not_found(id))
}

pub async fn create_planet(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    body: Bytes,
) -> ApiResult<Json<Planet>> {
    let exists = || ApiError::AlreadyExists(format!("Planet {id} already exists"));

    if state.store.get_planet(id).await?.is_some() {
        return Err(exists());
    }
    let input: PlanetInput = parse_record(&body)?;

    let planet = state
        .store
        .insert_planet(&input.into_planet(id))
        .await?
        .ok_or_else(exists)?;

    tracing::info!(id, name = %planet.name, "planet created");
    Ok(Json(planet))
}

/// Full replacement: `population` and `terrain` missing from the body are cleared.
pub async fn update_planet(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    body: Bytes,
) -> ApiResult<Json<Planet>> {
    if state.store.get_planet(id).await?.is_none() {
        return Err(not_found(id));
    }
    let input: PlanetInput = parse_record(&body)?;

    let planet = state
        .store
        .update_planet(&input.into_planet(id))
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(id, "planet updated");
    Ok(Json(planet))
}

pub async fn delete_planet(State(state): State<AppState>, IdPath(id): IdPath) -> ApiResult<Json<Value>> {
    if !state.store.delete_planet(id).await? {
        return Err(not_found(id));
    }

    tracing::info!(id, "planet deleted");
    Ok(Json(json!({ "message": format!("Planet {id} deleted") })))
}
