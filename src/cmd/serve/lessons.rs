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
use azdili_core::Lesson;
use serde::Deserialize;

use crate::cmd::serve::error::ApiError;
use crate::cmd::serve::state::ServerState;

#[derive(Deserialize)]
pub struct LessonsQuery {
    level: Option<String>,
}

pub async fn lessons_handler(
    State(state): State<ServerState>,
    Query(query): Query<LessonsQuery>,
) -> Result<Json<Vec<Lesson>>, ApiError> {
    let level: Option<String> = query.level.filter(|level| !level.is_empty());
    let lessons = state
        .with_db(|db| db.list_lessons(level.as_deref()))
        .map_err(|e| ApiError::internal("Failed to fetch lessons", e))?;
    Ok(Json(lessons))
}
