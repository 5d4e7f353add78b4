use axum::{extract::State, Json};

use super::AppState;
use crate::error::ApiResult;
use crate::models::UserInfo;

/// All users, projected to `{id, email}`.
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Json<Vec<UserInfo>>> {
    let users = state.store.list_users().await?;
    Ok(Json(users.iter().map(|user| user.to_info()).collect()))
}
