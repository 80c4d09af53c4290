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

use azdili_core::ReviewState;
use azdili_core::Timestamp;
use azdili_core::UserId;
use azdili_core::WordId;
use serde::Deserialize;
use serde::Serialize;

/// A persisted review state, keyed by learner and word.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReviewRecord {
    pub user_id: UserId,
    pub word_id: WordId,
    #[serde(flatten)]
    pub state: ReviewState,
}

/// A due review joined with the word it schedules.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DueReview {
    #[serde(flatten)]
    pub record: ReviewRecord,
    pub word: String,
    pub translation: String,
    pub pronunciation_url: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub xp: i64,
    pub streak: i64,
    pub cefr_level: String,
    pub created_at: Timestamp,
    pub last_active: Option<Timestamp>,
}

/// A partial update to a user. Absent fields keep their stored value.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct UserPatch {
    pub xp: Option<i64>,
    pub streak: Option<i64>,
    pub cefr_level: Option<String>,
}
