//! Logs a dashboard report for the configured task database.
//!
//! Usage:
//!
//! ```text
//! task-report [user-id]
//! ```
//!
//! Settings come from the environment (a `.env` file is honoured):
//! `DATABASE_URL` is required, `TASKBOARD_POOL_SIZE` and
//! `TASKBOARD_ACTIVITY_LIMIT` are optional. When a user identifier is given
//! the report also covers that user's personal task list. Output goes through
//! `tracing`; set `RUST_LOG` to change verbosity.

use mockable::DefaultClock;
use std::sync::Arc;
use taskboard::board::Board;
use taskboard::config::{ConfigError, StoreConfig};
use taskboard::dashboard::DashboardService;
use taskboard::task::adapters::postgres::{PostgresTaskStore, build_pool};
use taskboard::task::domain::UserId;
use taskboard::task::ports::{TaskStore, TaskStoreError};
use taskboard::views::MyTasksView;
use thiserror::Error;
use tokio::runtime::Builder;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
enum ReportError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("invalid user id '{value}': {source}")]
    UserId {
        value: String,
        #[source]
        source: uuid::Error,
    },
    #[error("task store error: {0}")]
    Store(#[from] TaskStoreError),
    #[error("failed to encode snapshot: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("runtime init failed: {0}")]
    RuntimeInit(#[source] std::io::Error),
}

fn main() -> Result<(), BoxError> {
    if let Err(err) = dotenvy::dotenv() {
        if !err.not_found() {
            return Err(err.into());
        }
    }
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let user = std::env::args().nth(1).map(parse_user).transpose()?;
    let config = StoreConfig::from_env().map_err(ReportError::from)?;
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(ReportError::RuntimeInit)?;
    runtime.block_on(report(config, user)).map_err(Into::into)
}

fn parse_user(raw: String) -> Result<UserId, ReportError> {
    Uuid::parse_str(raw.trim())
        .map(UserId::from_uuid)
        .map_err(|source| ReportError::UserId { value: raw, source })
}

async fn report(config: StoreConfig, user: Option<UserId>) -> Result<(), ReportError> {
    let pool = build_pool(&config)?;
    let store = Arc::new(PostgresTaskStore::new(pool));

    let dashboard = DashboardService::new(Arc::clone(&store), Arc::new(DefaultClock))
        .with_activity_limit(config.activity_limit());
    let snapshot = dashboard.snapshot().await?;
    debug!(snapshot = %serde_json::to_string(&snapshot)?, "dashboard snapshot");
    let stats = snapshot.stats;
    info!(
        due_today = stats.today,
        overdue = stats.overdue,
        in_progress = stats.in_progress,
        completed = stats.completed,
        "task counters"
    );
    for (priority, count) in stats.by_priority.iter() {
        info!(%priority, count, "tasks by priority");
    }
    for entry in &snapshot.recent_activity {
        info!(
            at = %entry.created_at,
            action = %entry.action,
            user = entry.user_name.as_deref().unwrap_or("unknown user"),
            task = entry.task_title.as_deref().unwrap_or("deleted task"),
            "recent activity"
        );
    }

    let Some(user_id) = user else {
        let board = Board::from_tasks(store.list_tasks().await?);
        for column in board.columns() {
            info!(column = column.title(), tasks = column.len(), "board column");
        }
        return Ok(());
    };

    let mut personal = MyTasksView::new(store, user_id);
    personal.refresh().await?;
    info!(%user_id, summary = %personal.summary(), "personal tasks");
    for task in personal.visible() {
        info!(
            title = task.title(),
            status = task.status().label(),
            priority = %task.priority(),
            due = ?task.due_date(),
            "assigned task"
        );
    }
    Ok(())
}
