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

use serde::Deserialize;
use serde::Serialize;

use crate::types::ids::LessonId;
use crate::types::ids::WordId;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Lesson {
    pub id: LessonId,
    /// CEFR level, e.g. `A1`.
    pub level_code: String,
    pub title: String,
    pub description: String,
    /// Position of the lesson within its level.
    pub order_index: i64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VocabularyItem {
    pub id: WordId,
    /// The lesson that introduces the word, if any.
    pub lesson_id: Option<LessonId>,
    pub word: String,
    pub translation: String,
    pub pronunciation_url: Option<String>,
}
