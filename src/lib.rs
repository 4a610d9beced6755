pub mod api;
pub mod content;
pub mod error;
pub mod state;
pub mod storage;

use std::env;

use tracing_subscriber::{EnvFilter, fmt::time::ChronoLocal};

use state::AppState;

/// 建表语句所在文件
pub const MIGRATION_FILE: &str = "sql/01-CREATE_TABLE.sql";

/// 默认监听地址
const DEFAULT_ADDR: &str = "0.0.0.0:3000";

pub async fn run() {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S%.3f".to_string()))
        .with_env_filter(EnvFilter::from_env("HAVEN_LOG"))
        .init();

    let app = AppState::new(storage::init_db_from_env().await);

    api::run_server(app, &listen_addr()).await
}

/// 监听地址取自 `HAVEN_ADDR`，默认 [`DEFAULT_ADDR`]
fn listen_addr() -> String {
    addr_or_default(env::var("HAVEN_ADDR").ok())
}

fn addr_or_default(addr: Option<String>) -> String {
    addr.filter(|a| !a.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_ADDR.to_string())
}
