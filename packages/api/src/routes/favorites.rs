use axum::{
    extract::State,
    Json,
};
use serde_json::{json, Value};

use super::{AppState, CurrentUser, IdPath};
use crate::error::ApiResult;
use crate::favorites;
use crate::models::Favorite;

pub async fn list_favorites(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<Json<Vec<Favorite>>> {
    Ok(Json(favorites::list(state.store.as_ref(), &user).await?))
}

pub async fn add_favorite_people(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    IdPath(id): IdPath,
) -> ApiResult<Json<Value>> {
    favorites::add_people(state.store.as_ref(), &user, id).await?;
    Ok(Json(json!({ "favorite people added": format!("{} - {}", user.email, id) })))
}

pub async fn remove_favorite_people(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    IdPath(id): IdPath,
) -> ApiResult<Json<Value>> {
    favorites::remove_people(state.store.as_ref(), &user, id).await?;
    Ok(Json(json!({ "favorite people deleted": format!("{} - {}", user.email, id) })))
}

pub async fn add_favorite_planet(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    IdPath(id): IdPath,
) -> ApiResult<Json<Value>> {
    favorites::add_planet(state.store.as_ref(), &user, id).await?;
    Ok(Json(json!({ "favorite planet added": format!("{} - {}", user.email, id) })))
}

pub async fn remove_favorite_planet(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    IdPath(id): IdPath,
) -> ApiResult<Json<Value>> {
    favorites::remove_planet(state.store.as_ref(), &user, id).await?;
    Ok(Json(json!({ "favorite planet deleted": format!("{} - {}", user.email, id) })))
}
