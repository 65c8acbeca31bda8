//! Event log listing and clearing.

use axum::Json;
use axum::extract::{Query, State};
use serde::{Deserialize, Serialize};

use homeguard_app::ports::{Clock, Notifier, Store};
use homeguard_domain::effect::{LogEntry, LogKind};
use homeguard_domain::time::Timestamp;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct EventView {
    #[serde(rename = "type")]
    pub kind: LogKind,
    pub message: String,
    pub timestamp: Timestamp,
}

impl From<LogEntry> for EventView {
    fn from(entry: LogEntry) -> Self {
        Self {
            kind: entry.kind,
            message: entry.message,
            timestamp: entry.recorded_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Pagination {
    pub page: u32,
    pub per_page: u32,
    pub total: u64,
    pub total_pages: u64,
    pub has_next: bool,
    pub has_prev: bool,
}

#[derive(Debug, Serialize)]
pub struct ListBody {
    pub events: Vec<EventView>,
    pub pagination: Pagination,
}

#[derive(Debug, Serialize)]
pub struct ClearBody {
    pub status: &'static str,
    pub message: &'static str,
}

/// `GET /api/events?page=1&per_page=10`: newest first.
pub async fn list<S, C, N>(
    State(state): State<AppState<S, C, N>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ListBody>, ApiError>
where
    S: Store,
    C: Clock + 'static,
    N: Notifier + Send + Sync + 'static,
{
    let page = state
        .activity
        .events(query.page.unwrap_or(1), query.per_page.unwrap_or(10))
        .await?;

    let pagination = Pagination {
        page: page.page,
        per_page: page.per_page,
        total: page.total,
        total_pages: page.total_pages(),
        has_next: page.has_next(),
        has_prev: page.has_prev(),
    };

    Ok(Json(ListBody {
        events: page.items.into_iter().map(EventView::from).collect(),
        pagination,
    }))
}

/// `DELETE /api/events/clear`
pub async fn clear<S, C, N>(
    State(state): State<AppState<S, C, N>>,
) -> Result<Json<ClearBody>, ApiError>
where
    S: Store,
    C: Clock + 'static,
    N: Notifier + Send + Sync + 'static,
{
    state.activity.clear_events().await?;
    Ok(Json(ClearBody {
        status: "ok",
        message: "Event log cleared",
    }))
}
