//! Resolve the user a favorites request acts for.

use axum::{extract::FromRequestParts, http::request::Parts};

use super::AppState;
use crate::error::ApiError;
use crate::models::User;

/// Header carrying the acting user's id.
pub const USER_ID_HEADER: &str = "x-user-id";

/// The user a request acts for.
///
/// With an `x-user-id` header the named user must exist and be active. Without it the
/// lowest-id active user is used. Anything else is rejected with 401.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let user = match parts.headers.get(USER_ID_HEADER) {
            Some(value) => {
                let id = value
                    .to_str()
                    .ok()
                    .and_then(|v| v.trim().parse::<i32>().ok())
                    .ok_or(ApiError::Unauthorized)?;
                state.store.get_user(id).await?.filter(|user| user.is_active)
            }
            None => state.store.first_active_user().await?,
        };

        match user {
            Some(user) => Ok(CurrentUser(user)),
            None => {
                tracing::debug!("no active user for request");
                Err(ApiError::Unauthorized)
            }
        }
    }
}
