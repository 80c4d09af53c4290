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

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;

use azdili_core::Clock;
use azdili_core::Fallible;

use crate::db::Database;

pub type SharedClock = Arc<dyn Clock + Send + Sync>;

#[derive(Clone)]
pub struct ServerState {
    /// Every request takes this lock for the whole of its storage work, so
    /// the read-modify-write of a grading never interleaves with another.
    pub db: Arc<Mutex<Database>>,
    pub clock: SharedClock,
}

impl ServerState {
    /// Runs `f` while holding the database lock.
    pub fn with_db<T>(&self, f: impl FnOnce(&mut Database) -> Fallible<T>) -> Fallible<T> {
        // A panic inside `f` drops any open transaction, which rolls it back,
        // so the connection behind a poisoned lock is still consistent.
        let mut db: MutexGuard<'_, Database> =
            self.db.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut db)
    }
}
