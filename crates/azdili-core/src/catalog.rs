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

//! Lesson and vocabulary catalogs written in TOML.
//!
//! ```toml
//! [[lesson]]
//! id = 1
//! level = "A1"
//! title = "Greetings"
//! order = 1
//!
//! [[lesson.word]]
//! id = 10
//! word = "salam"
//! translation = "hello"
//!
//! [[word]]
//! id = 99
//! word = "bəli"
//! translation = "yes"
//! ```
//!
//! Words nested under a lesson belong to it. Top-level words belong to no
//! lesson.

use std::collections::HashSet;
use std::error::Error;
use std::fmt::Display;
use std::fmt::Formatter;

use serde::Deserialize;

use crate::error::ErrorReport;
use crate::types::ids::LessonId;
use crate::types::ids::WordId;
use crate::types::lesson::Lesson;
use crate::types::lesson::VocabularyItem;

#[derive(Debug, Default, PartialEq)]
pub struct Catalog {
    pub lessons: Vec<Lesson>,
    pub words: Vec<VocabularyItem>,
}

#[derive(Debug)]
pub struct CatalogError {
    pub message: String,
    pub source_path: String,
}

impl CatalogError {
    fn new(message: impl Into<String>, source_path: &str) -> Self {
        CatalogError {
            message: message.into(),
            source_path: source_path.to_string(),
        }
    }
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} Location: {}", self.message, self.source_path)
    }
}

impl Error for CatalogError {}

impl From<CatalogError> for ErrorReport {
    fn from(value: CatalogError) -> Self {
        ErrorReport::new(format!("Catalog error: {value}"))
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawCatalog {
    #[serde(default)]
    lesson: Vec<RawLesson>,
    #[serde(default)]
    word: Vec<RawWord>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawLesson {
    id: i64,
    level: String,
    title: String,
    #[serde(default)]
    description: String,
    order: i64,
    #[serde(default)]
    word: Vec<RawWord>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawWord {
    id: i64,
    word: String,
    translation: String,
    pronunciation_url: Option<String>,
}

/// Parses and validates a catalog. `source_path` is only used in errors.
pub fn parse_catalog(source_path: &str, text: &str) -> Result<Catalog, CatalogError> {
    let raw: RawCatalog = toml::from_str(text)
        .map_err(|e| CatalogError::new(format!("Invalid TOML: {}", e.message()), source_path))?;

    let mut lesson_ids: HashSet<i64> = HashSet::new();
    let mut word_ids: HashSet<i64> = HashSet::new();
    let mut catalog = Catalog::default();

    for lesson in raw.lesson {
        if !lesson_ids.insert(lesson.id) {
            return Err(CatalogError::new(
                format!("Duplicate lesson id {}.", lesson.id),
                source_path,
            ));
        }
        let level_code = lesson.level.trim().to_string();
        if level_code.is_empty() {
            return Err(CatalogError::new(
                format!("Lesson {} has an empty level.", lesson.id),
                source_path,
            ));
        }
        for word in lesson.word {
            catalog.words.push(check_word(
                word,
                Some(LessonId(lesson.id)),
                &mut word_ids,
                source_path,
            )?);
        }
        catalog.lessons.push(Lesson {
            id: LessonId(lesson.id),
            level_code,
            title: lesson.title,
            description: lesson.description,
            order_index: lesson.order,
        });
    }

    for word in raw.word {
        catalog
            .words
            .push(check_word(word, None, &mut word_ids, source_path)?);
    }

    Ok(catalog)
}

fn check_word(
    raw: RawWord,
    lesson_id: Option<LessonId>,
    seen: &mut HashSet<i64>,
    source_path: &str,
) -> Result<VocabularyItem, CatalogError> {
    if !seen.insert(raw.id) {
        return Err(CatalogError::new(
            format!("Duplicate word id {}.", raw.id),
            source_path,
        ));
    }
    let word = raw.word.trim().to_string();
    let translation = raw.translation.trim().to_string();
    if word.is_empty() || translation.is_empty() {
        return Err(CatalogError::new(
            format!("Word {} needs both a word and a translation.", raw.id),
            source_path,
        ));
    }
    Ok(VocabularyItem {
        id: WordId(raw.id),
        lesson_id,
        word,
        translation,
        pronunciation_url: raw.pronunciation_url.filter(|url| !url.trim().is_empty()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_catalog() -> Result<(), CatalogError> {
        let catalog = parse_catalog("catalog.toml", "")?;
        assert_eq!(catalog, Catalog::default());
        Ok(())
    }

    #[test]
    fn test_nested_and_loose_words() -> Result<(), CatalogError> {
        let text = r#"
            [[lesson]]
            id = 1
            level = "A1"
            title = "Greetings"
            description = "Saying hello."
            order = 1

            [[lesson.word]]
            id = 10
            word = "salam"
            translation = "hello"
            pronunciation_url = "https://example.com/salam.mp3"

            [[lesson.word]]
            id = 11
            word = "sağ ol"
            translation = "thanks"

            [[word]]
            id = 99
            word = "bəli"
            translation = "yes"
        "#;
        let catalog = parse_catalog("catalog.toml", text)?;
        assert_eq!(catalog.lessons.len(), 1);
        assert_eq!(catalog.lessons[0].level_code, "A1");
        assert_eq!(catalog.lessons[0].order_index, 1);
        assert_eq!(catalog.words.len(), 3);
        assert_eq!(catalog.words[0].lesson_id, Some(LessonId(1)));
        assert_eq!(
            catalog.words[0].pronunciation_url.as_deref(),
            Some("https://example.com/salam.mp3")
        );
        assert_eq!(catalog.words[1].pronunciation_url, None);
        assert_eq!(catalog.words[2].lesson_id, None);
        assert_eq!(catalog.words[2].word, "bəli");
        Ok(())
    }

    #[test]
    fn test_duplicate_word_across_lessons() {
        let text = r#"
            [[lesson]]
            id = 1
            level = "A1"
            title = "One"
            order = 1
            [[lesson.word]]
            id = 10
            word = "su"
            translation = "water"

            [[lesson]]
            id = 2
            level = "A1"
            title = "Two"
            order = 2
            [[lesson.word]]
            id = 10
            word = "çörək"
            translation = "bread"
        "#;
        let err = parse_catalog("catalog.toml", text).unwrap_err();
        assert_eq!(err.message, "Duplicate word id 10.");
        assert_eq!(err.source_path, "catalog.toml");
    }

    #[test]
    fn test_duplicate_lesson() {
        let text = r#"
            [[lesson]]
            id = 3
            level = "B1"
            title = "One"
            order = 1

            [[lesson]]
            id = 3
            level = "B1"
            title = "Again"
            order = 2
        "#;
        let err = parse_catalog("catalog.toml", text).unwrap_err();
        assert_eq!(err.message, "Duplicate lesson id 3.");
    }

    #[test]
    fn test_blank_translation() {
        let text = r#"
            [[word]]
            id = 5
            word = "ev"
            translation = "  "
        "#;
        let err = parse_catalog("catalog.toml", text).unwrap_err();
        assert_eq!(err.message, "Word 5 needs both a word and a translation.");
    }

    #[test]
    fn test_unknown_field() {
        let text = r#"
            [[word]]
            id = 5
            word = "ev"
            translation = "house"
            colour = "red"
        "#;
        let err = parse_catalog("catalog.toml", text).unwrap_err();
        assert!(err.message.starts_with("Invalid TOML"));
    }
}
