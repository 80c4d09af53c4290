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

use azdili_core::Fallible;
use azdili_core::Timestamp;
use azdili_core::UserId;

use crate::db::Database;

/// Prints the learner's due items as JSON.
pub fn print_due(database: &str, user: UserId, now: Timestamp) -> Fallible<()> {
    let db = Database::new(database)?;
    let items = db.due_reviews(user, now)?;
    log::debug!("{} items due for user {user}", items.len());
    println!("{}", serde_json::to_string_pretty(&items)?);
    Ok(())
}
