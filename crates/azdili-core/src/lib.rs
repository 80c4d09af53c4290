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

//! azdili-core: Core library for the azdili language-learning backend.
//!
//! This library has no I/O and provides:
//! - SM-2 review scheduling
//! - Review state, recall quality and timestamp types
//! - An injectable time source
//! - Parsing of TOML lesson and vocabulary catalogs

pub mod catalog;
pub mod clock;
pub mod error;
pub mod sm2;
pub mod types;

// Re-exports for convenience
pub use catalog::{Catalog, parse_catalog};
pub use clock::{Clock, FixedClock};
#[cfg(feature = "clock")]
pub use clock::SystemClock;
pub use error::{ErrorReport, Fallible, fail};
pub use sm2::schedule;
pub use types::ids::{LessonId, UserId, WordId};
pub use types::lesson::{Lesson, VocabularyItem};
pub use types::quality::Quality;
pub use types::review_state::ReviewState;
pub use types::timestamp::Timestamp;
