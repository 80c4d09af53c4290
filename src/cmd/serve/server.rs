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

use std::future::pending;
use std::sync::Arc;
use std::sync::Mutex;

use axum::Json;
use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use azdili_core::Fallible;
use serde_json::Value;
use serde_json::json;
use tokio::net::TcpListener;
use tokio::signal;

use crate::cmd::serve::lessons::lessons_handler;
use crate::cmd::serve::review::due_handler;
use crate::cmd::serve::review::grade_handler;
use crate::cmd::serve::state::ServerState;
use crate::cmd::serve::state::SharedClock;
use crate::cmd::serve::user::get_user_handler;
use crate::cmd::serve::user::patch_user_handler;
use crate::db::Database;

pub struct ServerConfig {
    pub database: String,
    pub host: String,
    pub port: u16,
    pub clock: SharedClock,
}

pub async fn start_server(config: ServerConfig) -> Fallible<()> {
    let db = Database::new(&config.database)?;
    log::debug!("Opened database {}", config.database);

    let state = ServerState {
        db: Arc::new(Mutex::new(db)),
        clock: config.clock,
    };
    let app = router(state);
    let bind = format!("{}:{}", config.host, config.port);

    log::info!("Listening on http://{bind}");
    let listener = TcpListener::bind(bind).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    log::info!("Server stopped");
    Ok(())
}

pub fn router(state: ServerState) -> Router {
    let app = Router::new();
    let app = app.route("/api/lessons", get(lessons_handler));
    let app = app.route(
        "/api/user",
        get(get_user_handler).patch(patch_user_handler),
    );
    let app = app.route(
        "/api/spaced-repetition",
        get(due_handler).post(grade_handler),
    );
    let app = app.fallback(not_found_handler);
    app.with_state(state)
}

async fn not_found_handler() -> (StatusCode, Json<Value>) {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Not Found" })))
}

async fn shutdown_signal() {
    match signal::ctrl_c().await {
        Ok(()) => log::debug!("Received Ctrl+C, shutting down gracefully"),
        Err(e) => {
            log::error!("Failed to install Ctrl+C handler: {e}");
            pending::<()>().await
        }
    }
}
