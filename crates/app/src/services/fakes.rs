//! In-memory port implementations shared by the service tests.

use std::future::Future;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::TimeDelta;

use homeguard_domain::board::SensorBoardSettings;
use homeguard_domain::effect::{LogEntry, Notification};
use homeguard_domain::engine::ControlState;
use homeguard_domain::error::{HomeGuardError, NotFoundError};
use homeguard_domain::id::NotificationId;
use homeguard_domain::snapshot::SensorSnapshot;
use homeguard_domain::time::Timestamp;
use homeguard_domain::toggle::{Actuator, Channel, SensorToggles};

use crate::ports::{
    BoardSettingsRepository, Clock, ControlRepository, DeliveryError, EventLog, NotificationStore,
    Notifier, Page, SnapshotRepository, ToggleRepository,
};

fn unavailable() -> HomeGuardError {
    HomeGuardError::Storage(Box::new(std::io::Error::other("store offline")))
}

#[derive(Default)]
pub struct InMemoryStore {
    snapshots: Mutex<Vec<SensorSnapshot>>,
    control: Mutex<Option<ControlState>>,
    toggles: Mutex<Option<SensorToggles>>,
    log: Mutex<Vec<LogEntry>>,
    notifications: Mutex<Vec<Notification>>,
    board: Mutex<Option<SensorBoardSettings>>,
    failing: AtomicBool,
    saves: Mutex<usize>,
}

impl InMemoryStore {
    pub fn fail_writes(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn control_saves(&self) -> usize {
        *self.saves.lock().unwrap()
    }

    fn check(&self) -> Result<(), HomeGuardError> {
        if self.failing.load(Ordering::SeqCst) {
            Err(unavailable())
        } else {
            Ok(())
        }
    }
}

impl SnapshotRepository for InMemoryStore {
    fn insert(
        &self,
        snapshot: SensorSnapshot,
    ) -> impl Future<Output = Result<SensorSnapshot, HomeGuardError>> + Send {
        let result = self.check().map(|()| {
            self.snapshots.lock().unwrap().push(snapshot.clone());
            snapshot
        });
        async move { result }
    }

    fn latest(&self) -> impl Future<Output = Result<Option<SensorSnapshot>, HomeGuardError>> + Send {
        let result = self
            .snapshots
            .lock()
            .unwrap()
            .iter()
            .max_by_key(|s| s.observed_at)
            .cloned();
        async move { Ok(result) }
    }

    fn history(
        &self,
        limit: u32,
    ) -> impl Future<Output = Result<Vec<SensorSnapshot>, HomeGuardError>> + Send {
        let mut all = self.snapshots.lock().unwrap().clone();
        all.sort_by_key(|s| s.observed_at);
        let skip = all.len().saturating_sub(limit as usize);
        let result: Vec<_> = all.into_iter().skip(skip).collect();
        async move { Ok(result) }
    }
}

impl ControlRepository for InMemoryStore {
    fn load(&self) -> impl Future<Output = Result<ControlState, HomeGuardError>> + Send {
        let result = self.control.lock().unwrap().unwrap_or_default();
        // lets a concurrent cycle run between load and save
        async move {
            tokio::task::yield_now().await;
            Ok(result)
        }
    }

    fn save(&self, state: &ControlState) -> impl Future<Output = Result<(), HomeGuardError>> + Send {
        let result = self.check().map(|()| {
            *self.control.lock().unwrap() = Some(*state);
            *self.saves.lock().unwrap() += 1;
        });
        async move { result }
    }
}

impl ToggleRepository for InMemoryStore {
    fn get_all(&self) -> impl Future<Output = Result<SensorToggles, HomeGuardError>> + Send {
        let result = self
            .toggles
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(SensorToggles::defaults);
        async move { Ok(result) }
    }

    fn set(
        &self,
        channel: Channel,
        actuator: Actuator,
        enabled: bool,
    ) -> impl Future<Output = Result<(), HomeGuardError>> + Send {
        let result = self.check().map(|()| {
            self.toggles
                .lock()
                .unwrap()
                .get_or_insert_with(SensorToggles::defaults)
                .set(channel, actuator, enabled);
        });
        async move { result }
    }
}

impl EventLog for InMemoryStore {
    fn append(&self, entry: LogEntry) -> impl Future<Output = Result<LogEntry, HomeGuardError>> + Send {
        let result = self.check().map(|()| {
            self.log.lock().unwrap().push(entry.clone());
            entry
        });
        async move { result }
    }

    fn page(
        &self,
        page: u32,
        per_page: u32,
    ) -> impl Future<Output = Result<Page<LogEntry>, HomeGuardError>> + Send {
        let log = self.log.lock().unwrap();
        let offset = (page.max(1) as usize - 1) * per_page as usize;
        let items = log
            .iter()
            .rev()
            .skip(offset)
            .take(per_page as usize)
            .cloned()
            .collect();
        let result = Page {
            items,
            page,
            per_page,
            total: log.len() as u64,
        };
        async move { Ok(result) }
    }

    fn clear_log(&self) -> impl Future<Output = Result<(), HomeGuardError>> + Send {
        let result = self.check().map(|()| self.log.lock().unwrap().clear());
        async move { result }
    }
}

impl NotificationStore for InMemoryStore {
    fn store(
        &self,
        notification: Notification,
    ) -> impl Future<Output = Result<Notification, HomeGuardError>> + Send {
        let result = self.check().map(|()| {
            self.notifications.lock().unwrap().push(notification.clone());
            notification
        });
        async move { result }
    }

    fn recent(
        &self,
        limit: u32,
    ) -> impl Future<Output = Result<Vec<Notification>, HomeGuardError>> + Send {
        let result: Vec<_> = self
            .notifications
            .lock()
            .unwrap()
            .iter()
            .rev()
            .take(limit as usize)
            .cloned()
            .collect();
        async move { Ok(result) }
    }

    fn mark_read(&self, id: NotificationId) -> impl Future<Output = Result<(), HomeGuardError>> + Send {
        let mut notifications = self.notifications.lock().unwrap();
        let result: Result<(), HomeGuardError> = match notifications.iter_mut().find(|n| n.id == id) {
            Some(n) => {
                n.read = true;
                Ok(())
            }
            None => Err(NotFoundError {
                entity: "Notification",
                id: id.to_string(),
            }
            .into()),
        };
        async move { result }
    }

    fn clear_notifications(&self) -> impl Future<Output = Result<(), HomeGuardError>> + Send {
        let result = self
            .check()
            .map(|()| self.notifications.lock().unwrap().clear());
        async move { result }
    }
}

impl BoardSettingsRepository for InMemoryStore {
    fn load_settings(&self) -> impl Future<Output = Result<SensorBoardSettings, HomeGuardError>> + Send {
        let result = self.board.lock().unwrap().unwrap_or_default();
        async move { Ok(result) }
    }

    fn save_settings(
        &self,
        settings: &SensorBoardSettings,
    ) -> impl Future<Output = Result<(), HomeGuardError>> + Send {
        let result = self
            .check()
            .map(|()| *self.board.lock().unwrap() = Some(*settings));
        async move { result }
    }
}

/// Clock that only moves when told to.
pub struct ManualClock {
    now: Mutex<Timestamp>,
}

impl ManualClock {
    pub fn new(start: Timestamp) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    pub fn advance(&self, secs: i64) {
        *self.now.lock().unwrap() += TimeDelta::seconds(secs);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        *self.now.lock().unwrap()
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    delivered: Mutex<Vec<String>>,
    failing: bool,
}

impl RecordingNotifier {
    pub fn failing() -> Self {
        Self {
            delivered: Mutex::new(Vec::new()),
            failing: true,
        }
    }

    pub fn delivered(&self) -> Vec<String> {
        self.delivered.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn deliver(
        &self,
        notification: &Notification,
    ) -> impl Future<Output = Result<(), DeliveryError>> + Send {
        let result = if self.failing {
            Err(DeliveryError {
                reason: "smtp down".to_string(),
            })
        } else {
            self.delivered
                .lock()
                .unwrap()
                .push(notification.title.clone());
            Ok(())
        };
        async move { result }
    }
}
