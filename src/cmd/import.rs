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

use std::fs::read_to_string;
use std::path::Path;

use azdili_core::Catalog;
use azdili_core::Fallible;
use azdili_core::fail;
use azdili_core::parse_catalog;

use crate::db::Database;

/// Loads a TOML catalog into the database.
pub fn import_catalog(path: &str, database: &str) -> Fallible<()> {
    if !Path::new(path).exists() {
        return fail(format!("catalog {path} does not exist."));
    }
    let text = read_to_string(path)?;
    let catalog: Catalog = parse_catalog(path, &text)?;
    let mut db = Database::new(database)?;
    let (lessons, words) = db.import_catalog(&catalog)?;
    log::info!("Imported {lessons} lessons and {words} words from {path}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs::write;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_import() -> Fallible<()> {
        let dir = tempdir()?;
        let catalog = dir.path().join("catalog.toml");
        write(
            &catalog,
            "[[lesson]]\nid = 1\nlevel = \"A1\"\ntitle = \"Numbers\"\norder = 1\n\n[[lesson.word]]\nid = 1\nword = \"bir\"\ntranslation = \"one\"\n",
        )?;
        let database = dir.path().join("azdili.db").display().to_string();
        import_catalog(&catalog.display().to_string(), &database)?;
        let db = Database::new(&database)?;
        let lessons = db.list_lessons(Some("A1"))?;
        assert_eq!(lessons.len(), 1);
        assert_eq!(lessons[0].title, "Numbers");
        Ok(())
    }

    #[test]
    fn test_import_missing_file() -> Fallible<()> {
        let dir = tempdir()?;
        let database = dir.path().join("azdili.db").display().to_string();
        let err = import_catalog("./no-such-catalog.toml", &database).unwrap_err();
        assert_eq!(
            err.to_string(),
            "error: catalog ./no-such-catalog.toml does not exist."
        );
        Ok(())
    }
}
