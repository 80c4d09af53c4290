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

use azdili_core::Clock;
use azdili_core::Fallible;
use azdili_core::FixedClock;
use azdili_core::SystemClock;
use azdili_core::Timestamp;
use azdili_core::UserId;
use azdili_core::WordId;
use clap::Parser;

use crate::cmd::due::print_due;
use crate::cmd::import::import_catalog;
use crate::cmd::review::review_word;
use crate::cmd::serve::server::ServerConfig;
use crate::cmd::serve::server::start_server;
use crate::config::ConfigFile;
use crate::config::DEFAULT_DATABASE;

#[derive(Parser)]
#[command(version, about, long_about = None)]
enum Command {
    /// Serve the JSON API.
    Serve {
        /// Path to a TOML config file. By default, ./azdili.toml is read if it exists.
        #[arg(long)]
        config: Option<String>,
        /// Path to the SQLite database. Overrides the config file.
        #[arg(long)]
        database: Option<String>,
        /// The host address to bind to. Overrides the config file. Default is 127.0.0.1.
        #[arg(long)]
        host: Option<String>,
        /// The port to listen on. Overrides the config file. Default is 8000.
        #[arg(long)]
        port: Option<u16>,
    },
    /// Load lessons and vocabulary from a TOML catalog.
    Import {
        /// Path to the catalog file.
        catalog: String,
        /// Path to the SQLite database.
        #[arg(long, default_value = DEFAULT_DATABASE)]
        database: String,
    },
    /// Grade one word for one learner and print the new schedule.
    Review {
        #[arg(long)]
        user: i64,
        #[arg(long)]
        word: i64,
        /// Recall quality, from 0 (blackout) to 5 (perfect).
        #[arg(long)]
        quality: i64,
        /// Grade as if it were this time (YYYY-MM-DDTHH:MM:SS.sss) instead of now.
        #[arg(long)]
        at: Option<String>,
        /// Path to the SQLite database.
        #[arg(long, default_value = DEFAULT_DATABASE)]
        database: String,
    },
    /// Print the words a learner should review now.
    Due {
        #[arg(long)]
        user: i64,
        /// List what is due at this time (YYYY-MM-DDTHH:MM:SS.sss) instead of now.
        #[arg(long)]
        at: Option<String>,
        /// Path to the SQLite database.
        #[arg(long, default_value = DEFAULT_DATABASE)]
        database: String,
    },
}

pub async fn entrypoint() -> Fallible<()> {
    let cli: Command = Command::parse();
    match cli {
        Command::Serve {
            config,
            database,
            host,
            port,
        } => {
            let settings = ConfigFile::load(config.as_deref())?.resolve(host, port, database);
            let config = ServerConfig {
                database: settings.database,
                host: settings.host,
                port: settings.port,
                clock: Arc::new(SystemClock),
            };
            start_server(config).await
        }
        Command::Import { catalog, database } => import_catalog(&catalog, &database),
        Command::Review {
            user,
            word,
            quality,
            at,
            database,
        } => {
            let clock = clock_at(at)?;
            review_word(&database, UserId(user), WordId(word), quality, clock.as_ref())
        }
        Command::Due { user, at, database } => {
            let clock = clock_at(at)?;
            print_due(&database, UserId(user), clock.now())
        }
    }
}

fn clock_at(at: Option<String>) -> Fallible<Box<dyn Clock>> {
    Ok(match at {
        Some(at) => Box::new(FixedClock(Timestamp::parse(&at)?)),
        None => Box::new(SystemClock),
    })
}
