// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use axum::Json;
use axum::extract::Query;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use azdili_core::Clock;
use serde::Deserialize;

use crate::cmd::serve::error::ApiError;
use crate::cmd::serve::state::ServerState;
use crate::models::User;
use crate::models::UserPatch;

#[derive(Deserialize)]
pub struct UserQuery {
    email: Option<String>,
}

#[derive(Deserialize)]
pub struct PatchUserRequest {
    email: String,
    #[serde(flatten)]
    patch: UserPatch,
}

/// Fetches the user with the given email, creating it on first sight.
pub async fn get_user_handler(
    State(state): State<ServerState>,
    Query(query): Query<UserQuery>,
) -> Result<Json<User>, ApiError> {
    let email: String = match query.email {
        Some(email) if !email.trim().is_empty() => email,
        _ => return Err(ApiError::bad_request("Email is required")),
    };
    let now = state.clock.now();
    let user = state
        .with_db(|db| match db.find_user_by_email(&email)? {
            Some(user) => Ok(user),
            None => db.insert_user(&email, now),
        })
        .map_err(|e| ApiError::internal("Failed to fetch user", e))?;
    Ok(Json(user))
}

pub async fn patch_user_handler(
    State(state): State<ServerState>,
    body: Result<Json<PatchUserRequest>, JsonRejection>,
) -> Result<Json<User>, ApiError> {
    let Json(PatchUserRequest { email, patch }) =
        body.map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;
    let now = state.clock.now();
    let user = state
        .with_db(|db| db.update_user(&email, &patch, now))
        .map_err(|e| ApiError::internal("Failed to update user", e))?;
    match user {
        Some(user) => Ok(Json(user)),
        None => Err(ApiError::not_found("User not found")),
    }
}
