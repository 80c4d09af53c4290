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

use azdili_core::Clock;
use azdili_core::Fallible;
use azdili_core::Quality;
use azdili_core::UserId;
use azdili_core::WordId;
use azdili_core::fail;

use crate::db::Database;
use crate::models::ReviewRecord;

/// Grades one item from the command line and prints the stored record.
pub fn review_word(
    database: &str,
    user: UserId,
    word: WordId,
    quality: i64,
    clock: &dyn Clock,
) -> Fallible<()> {
    let record = grade_word(database, user, word, quality, clock)?;
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}

fn grade_word(
    database: &str,
    user: UserId,
    word: WordId,
    quality: i64,
    clock: &dyn Clock,
) -> Fallible<ReviewRecord> {
    let quality = Quality::new(quality)?;
    let mut db = Database::new(database)?;
    match db.grade(user, word, quality, clock)? {
        Some(record) => Ok(record),
        None => fail(format!("no user {user} or no word {word} in the database.")),
    }
}
