//! Shared application state for axum handlers.

use std::sync::Arc;

use homeguard_app::event_bus::InProcessEventBus;
use homeguard_app::ports::{Clock, Notifier, Store};
use homeguard_app::services::activity_service::ActivityService;
use homeguard_app::services::board_service::BoardService;
use homeguard_app::services::control_service::ControlService;

pub type Bus = Arc<InProcessEventBus>;

/// Application state shared across all axum handlers.
///
/// Generic over the store, clock and notifier to avoid dynamic dispatch.
/// `Clone` is implemented manually so the underlying types themselves do not
/// need to be `Clone`; only the `Arc` wrappers are cloned.
pub struct AppState<S, C, N> {
    pub control: Arc<ControlService<S, C, Bus, N>>,
    pub activity: Arc<ActivityService<S, C, Bus, N>>,
    pub board: Arc<BoardService<S, C, Bus, N>>,
    /// Subscribed to by every SSE client.
    pub event_bus: Bus,
}

impl<S, C, N> Clone for AppState<S, C, N> {
    fn clone(&self) -> Self {
        Self {
            control: Arc::clone(&self.control),
            activity: Arc::clone(&self.activity),
            board: Arc::clone(&self.board),
            event_bus: Arc::clone(&self.event_bus),
        }
    }
}

impl<S, C, N> AppState<S, C, N>
where
    S: Store,
    C: Clock + 'static,
    N: Notifier + Send + Sync + 'static,
{
    pub fn new(
        control: Arc<ControlService<S, C, Bus, N>>,
        activity: Arc<ActivityService<S, C, Bus, N>>,
        board: Arc<BoardService<S, C, Bus, N>>,
        event_bus: Bus,
    ) -> Self {
        Self {
            control,
            activity,
            board,
            event_bus,
        }
    }
}
