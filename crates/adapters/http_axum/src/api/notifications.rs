//! Operator notification inbox.

use std::str::FromStr;

use axum::Json;
use axum::extract::{Path, Query, State};
use serde::{Deserialize, Serialize};

use homeguard_app::ports::{Clock, Notifier, Store};
use homeguard_domain::effect::Notification;
use homeguard_domain::error::ValidationError;
use homeguard_domain::id::NotificationId;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub limit: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct ListBody {
    pub notifications: Vec<Notification>,
}

#[derive(Debug, Serialize)]
pub struct StatusBody {
    pub status: &'static str,
}

/// `GET /api/notifications?limit=10`: newest first.
pub async fn list<S, C, N>(
    State(state): State<AppState<S, C, N>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ListBody>, ApiError>
where
    S: Store,
    C: Clock + 'static,
    N: Notifier + Send + Sync + 'static,
{
    let notifications = state
        .activity
        .notifications(query.limit.unwrap_or(10))
        .await?;
    Ok(Json(ListBody { notifications }))
}

/// `PUT /api/notifications/{id}/read`
pub async fn mark_read<S, C, N>(
    State(state): State<AppState<S, C, N>>,
    Path(id): Path<String>,
) -> Result<Json<StatusBody>, ApiError>
where
    S: Store,
    C: Clock + 'static,
    N: Notifier + Send + Sync + 'static,
{
    let id = NotificationId::from_str(&id).map_err(|_| ValidationError::MalformedId(id))?;
    state.activity.mark_read(id).await?;
    Ok(Json(StatusBody { status: "ok" }))
}

/// `DELETE /api/notifications/clear`
pub async fn clear<S, C, N>(
    State(state): State<AppState<S, C, N>>,
) -> Result<Json<StatusBody>, ApiError>
where
    S: Store,
    C: Clock + 'static,
    N: Notifier + Send + Sync + 'static,
{
    state.activity.clear_notifications().await?;
    Ok(Json(StatusBody { status: "ok" }))
}
