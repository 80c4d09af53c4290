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

use azdili_core::Fallible;
use azdili_core::fail;
use serde::Deserialize;

/// Read when `--config` is not given, if it exists.
pub const DEFAULT_CONFIG_PATH: &str = "azdili.toml";

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_DATABASE: &str = "azdili.db";

/// Contents of the config file. Every key is optional.
#[derive(Debug, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub database: Option<String>,
}

/// Effective settings after layering flags over the file over defaults.
#[derive(Debug, PartialEq)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub database: String,
}

impl ConfigFile {
    /// Loads the file at `path`. Without a path, the default file is read if
    /// present and otherwise an empty config is used.
    pub fn load(path: Option<&str>) -> Fallible<Self> {
        match path {
            Some(path) => {
                if !Path::new(path).exists() {
                    return fail(format!("config file {path} does not exist."));
                }
                Self::parse(&read_to_string(path)?)
            }
            None => {
                if Path::new(DEFAULT_CONFIG_PATH).exists() {
                    log::debug!("Reading {DEFAULT_CONFIG_PATH}");
                    Self::parse(&read_to_string(DEFAULT_CONFIG_PATH)?)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn parse(text: &str) -> Fallible<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn resolve(
        self,
        host: Option<String>,
        port: Option<u16>,
        database: Option<String>,
    ) -> Settings {
        Settings {
            host: host
                .or(self.host)
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: port.or(self.port).unwrap_or(DEFAULT_PORT),
            database: database
                .or(self.database)
                .unwrap_or_else(|| DEFAULT_DATABASE.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs::write;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_defaults() {
        let settings = ConfigFile::default().resolve(None, None, None);
        assert_eq!(
            settings,
            Settings {
                host: "127.0.0.1".to_string(),
                port: 8000,
                database: "azdili.db".to_string(),
            }
        );
    }

    #[test]
    fn test_flags_override_file() -> Fallible<()> {
        let file = ConfigFile::parse("port = 9000\ndatabase = \"/var/lib/azdili.db\"\n")?;
        let settings = file.resolve(None, Some(9100), None);
        assert_eq!(settings.port, 9100);
        assert_eq!(settings.host, "127.0.0.1");
        assert_eq!(settings.database, "/var/lib/azdili.db");
        Ok(())
    }

    #[test]
    fn test_unknown_key() {
        let err = ConfigFile::parse("prot = 9000\n").unwrap_err();
        assert!(err.to_string().starts_with("error: TOML error"));
    }

    #[test]
    fn test_load_explicit_path() -> Fallible<()> {
        let dir = tempdir()?;
        let path = dir.path().join("server.toml");
        write(&path, "host = \"0.0.0.0\"\n")?;
        let path = path.display().to_string();
        let file = ConfigFile::load(Some(&path))?;
        assert_eq!(file.host.as_deref(), Some("0.0.0.0"));
        Ok(())
    }

    #[test]
    fn test_load_missing_explicit_path() -> Fallible<()> {
        let dir = tempdir()?;
        let path = dir.path().join("nope.toml").display().to_string();
        let err = ConfigFile::load(Some(&path)).unwrap_err();
        assert_eq!(err.to_string(), format!("error: config file {path} does not exist."));
        Ok(())
    }
}
