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

//! SQLite storage for users, lessons, vocabulary and review states.

use azdili_core::Catalog;
use azdili_core::Clock;
use azdili_core::Fallible;
use azdili_core::Lesson;
use azdili_core::Quality;
use azdili_core::ReviewState;
use azdili_core::Timestamp;
use azdili_core::UserId;
use azdili_core::WordId;
use azdili_core::schedule;
use rusqlite::Connection;
use rusqlite::OptionalExtension;
use rusqlite::Row;
use rusqlite::params;

use crate::models::DueReview;
use crate::models::ReviewRecord;
use crate::models::User;
use crate::models::UserPatch;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE,
    xp INTEGER NOT NULL DEFAULT 0,
    streak INTEGER NOT NULL DEFAULT 0,
    cefr_level TEXT NOT NULL DEFAULT 'A1',
    created_at TEXT NOT NULL,
    last_active TEXT
);

CREATE TABLE IF NOT EXISTS lessons (
    id INTEGER PRIMARY KEY,
    level_code TEXT NOT NULL,
    title TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    order_index INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS vocabulary (
    id INTEGER PRIMARY KEY,
    lesson_id INTEGER REFERENCES lessons (id),
    word TEXT NOT NULL,
    translation TEXT NOT NULL,
    pronunciation_url TEXT
);

CREATE TABLE IF NOT EXISTS spaced_repetition (
    user_id INTEGER NOT NULL REFERENCES users (id),
    word_id INTEGER NOT NULL REFERENCES vocabulary (id),
    next_review_date TEXT NOT NULL,
    ease_factor REAL NOT NULL,
    interval INTEGER NOT NULL,
    repetition_count INTEGER NOT NULL,
    PRIMARY KEY (user_id, word_id)
);

CREATE INDEX IF NOT EXISTS spaced_repetition_due
    ON spaced_repetition (user_id, next_review_date);
";

const USER_COLUMNS: &str =
    "id, username, email, xp, streak, cefr_level, created_at, last_active";

pub struct Database {
    conn: Connection,
}

impl Database {
    /// Opens the database at `path`, creating the file and tables as needed.
    pub fn new(path: &str) -> Fallible<Self> {
        let conn = Connection::open(path)?;
        Self::with_connection(conn)
    }

    #[cfg(test)]
    pub fn in_memory() -> Fallible<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Fallible<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    #[cfg(test)]
    pub fn get_review_state(&self, user: UserId, word: WordId) -> Fallible<Option<ReviewState>> {
        read_review_state(&self.conn, user, word)
    }

    /// Inserts the state, or overwrites every scheduling field if one is
    /// already stored for the pair.
    #[cfg(test)]
    pub fn upsert_review_state(
        &self,
        user: UserId,
        word: WordId,
        state: &ReviewState,
    ) -> Fallible<ReviewRecord> {
        write_review_state(&self.conn, user, word, state)
    }

    /// Grades one item: loads its state, schedules it, and stores the result,
    /// all inside one transaction.
    ///
    /// Returns `None` if the user or the word does not exist.
    pub fn grade<C>(
        &mut self,
        user: UserId,
        word: WordId,
        quality: Quality,
        clock: &C,
    ) -> Fallible<Option<ReviewRecord>>
    where
        C: Clock + ?Sized,
    {
        let tx = self.conn.transaction()?;
        if !exists(&tx, "SELECT 1 FROM users WHERE id = ?1", user.get())?
            || !exists(&tx, "SELECT 1 FROM vocabulary WHERE id = ?1", word.get())?
        {
            return Ok(None);
        }
        let current: Option<ReviewState> = read_review_state(&tx, user, word)?;
        let next: ReviewState = schedule(current, quality, clock);
        let record = write_review_state(&tx, user, word, &next)?;
        tx.commit()?;
        log::debug!(
            "Graded word {word} for user {user} with quality {quality}: due {}",
            record.state.next_review_date
        );
        Ok(Some(record))
    }

    /// Reviews for `user` that are due at or before `now`, oldest first.
    pub fn due_reviews(&self, user: UserId, now: Timestamp) -> Fallible<Vec<DueReview>> {
        let mut stmt = self.conn.prepare(
            "SELECT sr.user_id, sr.word_id, sr.next_review_date, sr.ease_factor, sr.interval,
                    sr.repetition_count, v.word, v.translation, v.pronunciation_url
             FROM spaced_repetition sr
             JOIN vocabulary v ON sr.word_id = v.id
             WHERE sr.user_id = ?1 AND sr.next_review_date <= ?2
             ORDER BY sr.next_review_date ASC, sr.word_id ASC",
        )?;
        let rows = stmt
            .query_map(params![user, now], |row| {
                Ok(DueReview {
                    record: review_record(row)?,
                    word: row.get(6)?,
                    translation: row.get(7)?,
                    pronunciation_url: row.get(8)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Lessons of one level, or of every level, in teaching order.
    pub fn list_lessons(&self, level: Option<&str>) -> Fallible<Vec<Lesson>> {
        match level {
            Some(level) => {
                let mut stmt = self.conn.prepare(
                    "SELECT id, level_code, title, description, order_index FROM lessons
                     WHERE level_code = ?1 ORDER BY order_index ASC",
                )?;
                let rows = stmt
                    .query_map(params![level], lesson_row)?
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(rows)
            }
            None => {
                let mut stmt = self.conn.prepare(
                    "SELECT id, level_code, title, description, order_index FROM lessons
                     ORDER BY level_code, order_index ASC",
                )?;
                let rows = stmt
                    .query_map([], lesson_row)?
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(rows)
            }
        }
    }

    pub fn find_user_by_email(&self, email: &str) -> Fallible<Option<User>> {
        let user = self
            .conn
            .query_row(
                &format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?1 LIMIT 1"),
                params![email],
                user_row,
            )
            .optional()?;
        Ok(user)
    }

    /// Creates a user whose username is the local part of the email.
    pub fn insert_user(&self, email: &str, now: Timestamp) -> Fallible<User> {
        let username = email.split_once('@').map_or(email, |(local, _)| local);
        self.conn.execute(
            "INSERT INTO users (username, email, created_at) VALUES (?1, ?2, ?3)",
            params![username, email, now],
        )?;
        let id = self.conn.last_insert_rowid();
        let user = self.conn.query_row(
            &format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1"),
            params![id],
            user_row,
        )?;
        log::info!("Created user {} ({email})", user.id);
        Ok(user)
    }

    /// Applies `patch` and stamps `last_active`. Returns `None` if no user
    /// has this email.
    pub fn update_user(
        &self,
        email: &str,
        patch: &UserPatch,
        now: Timestamp,
    ) -> Fallible<Option<User>> {
        let changed = self.conn.execute(
            "UPDATE users
             SET xp = COALESCE(?1, xp),
                 streak = COALESCE(?2, streak),
                 cefr_level = COALESCE(?3, cefr_level),
                 last_active = ?4
             WHERE email = ?5",
            params![patch.xp, patch.streak, patch.cefr_level, now, email],
        )?;
        if changed == 0 {
            return Ok(None);
        }
        self.find_user_by_email(email)
    }

    /// Inserts or replaces every lesson and word of the catalog. Returns the
    /// number of lessons and words written.
    pub fn import_catalog(&mut self, catalog: &Catalog) -> Fallible<(usize, usize)> {
        let tx = self.conn.transaction()?;
        for lesson in &catalog.lessons {
            tx.execute(
                "INSERT INTO lessons (id, level_code, title, description, order_index)
                 VALUES (?1, ?2, ?3, ?4, ?5)
                 ON CONFLICT (id) DO UPDATE SET
                     level_code = excluded.level_code,
                     title = excluded.title,
                     description = excluded.description,
                     order_index = excluded.order_index",
                params![
                    lesson.id.get(),
                    lesson.level_code,
                    lesson.title,
                    lesson.description,
                    lesson.order_index
                ],
            )?;
        }
        for word in &catalog.words {
            tx.execute(
                "INSERT INTO vocabulary (id, lesson_id, word, translation, pronunciation_url)
                 VALUES (?1, ?2, ?3, ?4, ?5)
                 ON CONFLICT (id) DO UPDATE SET
                     lesson_id = excluded.lesson_id,
                     word = excluded.word,
                     translation = excluded.translation,
                     pronunciation_url = excluded.pronunciation_url",
                params![
                    word.id.get(),
                    word.lesson_id.map(|id| id.get()),
                    word.word,
                    word.translation,
                    word.pronunciation_url
                ],
            )?;
        }
        tx.commit()?;
        Ok((catalog.lessons.len(), catalog.words.len()))
    }
}

fn exists(conn: &Connection, sql: &str, id: i64) -> Fallible<bool> {
    let found = conn
        .query_row(sql, params![id], |_| Ok(()))
        .optional()?;
    Ok(found.is_some())
}

fn read_review_state(
    conn: &Connection,
    user: UserId,
    word: WordId,
) -> Fallible<Option<ReviewState>> {
    let record = conn
        .query_row(
            "SELECT user_id, word_id, next_review_date, ease_factor, interval, repetition_count
             FROM spaced_repetition WHERE user_id = ?1 AND word_id = ?2 LIMIT 1",
            params![user, word],
            review_record,
        )
        .optional()?;
    Ok(record.map(|r| r.state))
}

fn write_review_state(
    conn: &Connection,
    user: UserId,
    word: WordId,
    state: &ReviewState,
) -> Fallible<ReviewRecord> {
    conn.execute(
        "INSERT INTO spaced_repetition
             (user_id, word_id, next_review_date, ease_factor, interval, repetition_count)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)
         ON CONFLICT (user_id, word_id) DO UPDATE SET
             next_review_date = excluded.next_review_date,
             ease_factor = excluded.ease_factor,
             interval = excluded.interval,
             repetition_count = excluded.repetition_count",
        params![
            user,
            word,
            state.next_review_date,
            state.ease_factor,
            state.interval_days,
            state.repetition_count
        ],
    )?;
    Ok(ReviewRecord {
        user_id: user,
        word_id: word,
        state: *state,
    })
}

fn review_record(row: &Row) -> rusqlite::Result<ReviewRecord> {
    Ok(ReviewRecord {
        user_id: row.get(0)?,
        word_id: row.get(1)?,
        state: ReviewState {
            next_review_date: row.get(2)?,
            ease_factor: row.get(3)?,
            interval_days: row.get(4)?,
            repetition_count: row.get(5)?,
        },
    })
}

fn lesson_row(row: &Row) -> rusqlite::Result<Lesson> {
    Ok(Lesson {
        id: row.get(0)?,
        level_code: row.get(1)?,
        title: row.get(2)?,
        description: row.get(3)?,
        order_index: row.get(4)?,
    })
}

fn user_row(row: &Row) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        username: row.get(1)?,
        email: row.get(2)?,
        xp: row.get(3)?,
        streak: row.get(4)?,
        cefr_level: row.get(5)?,
        created_at: row.get(6)?,
        last_active: row.get(7)?,
    })
}
