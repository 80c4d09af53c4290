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
use azdili_core::Quality;
use azdili_core::UserId;
use azdili_core::WordId;
use serde::Deserialize;

use crate::cmd::serve::error::ApiError;
use crate::cmd::serve::state::ServerState;
use crate::models::DueReview;
use crate::models::ReviewRecord;

#[derive(Deserialize)]
pub struct DueQuery {
    #[serde(rename = "userId")]
    user_id: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeRequest {
    user_id: UserId,
    word_id: WordId,
    /// Kept raw so a bad grade gets its own message. Any whole number is
    /// accepted, including one written as `4.0`.
    quality: f64,
}

/// Items the learner should review now.
pub async fn due_handler(
    State(state): State<ServerState>,
    Query(query): Query<DueQuery>,
) -> Result<Json<Vec<DueReview>>, ApiError> {
    let user: UserId = match query.user_id {
        None => return Err(ApiError::bad_request("userId is required")),
        Some(raw) => match raw.trim().parse::<i64>() {
            Ok(id) => UserId(id),
            Err(_) => return Err(ApiError::bad_request("userId must be an integer")),
        },
    };
    let now = state.clock.now();
    let items = state
        .with_db(|db| db.due_reviews(user, now))
        .map_err(|e| ApiError::internal("Failed to fetch spaced repetition items", e))?;
    Ok(Json(items))
}

/// Records a grade and returns the rescheduled item.
pub async fn grade_handler(
    State(state): State<ServerState>,
    body: Result<Json<GradeRequest>, JsonRejection>,
) -> Result<Json<ReviewRecord>, ApiError> {
    let Json(GradeRequest {
        user_id,
        word_id,
        quality,
    }) = body.map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;
    let quality: Quality =
        Quality::from_number(quality).map_err(|e| ApiError::bad_request(e.message()))?;
    let record = state
        .with_db(|db| db.grade(user_id, word_id, quality, &*state.clock))
        .map_err(|e| ApiError::internal("Failed to update review status", e))?;
    match record {
        Some(record) => Ok(Json(record)),
        None => Err(ApiError::not_found("Unknown user or word")),
    }
}
