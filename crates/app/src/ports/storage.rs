//! Storage ports: repositories for snapshots, control state, toggles and
//! board settings.
//!
//! Every write is a single atomic statement. Implementations must not cache
//! across calls; the control service serializes cycles itself.

use std::future::Future;

use homeguard_domain::board::SensorBoardSettings;
use homeguard_domain::engine::ControlState;
use homeguard_domain::error::HomeGuardError;
use homeguard_domain::snapshot::SensorSnapshot;
use homeguard_domain::toggle::{Actuator, Channel, SensorToggles};

use super::{EventLog, NotificationStore};

pub trait SnapshotRepository {
    fn insert(
        &self,
        snapshot: SensorSnapshot,
    ) -> impl Future<Output = Result<SensorSnapshot, HomeGuardError>> + Send;

    /// Most recently observed snapshot, if any was ever stored.
    fn latest(&self) -> impl Future<Output = Result<Option<SensorSnapshot>, HomeGuardError>> + Send;

    /// Up to `limit` most recent snapshots, oldest first.
    fn history(
        &self,
        limit: u32,
    ) -> impl Future<Output = Result<Vec<SensorSnapshot>, HomeGuardError>> + Send;
}

/// The singleton control state (actuators, mode and alert memory).
pub trait ControlRepository {
    /// Stored state, or the boot default when nothing was saved yet.
    fn load(&self) -> impl Future<Output = Result<ControlState, HomeGuardError>> + Send;

    fn save(&self, state: &ControlState) -> impl Future<Output = Result<(), HomeGuardError>> + Send;
}

pub trait ToggleRepository {
    fn get_all(&self) -> impl Future<Output = Result<SensorToggles, HomeGuardError>> + Send;

    fn set(
        &self,
        channel: Channel,
        actuator: Actuator,
        enabled: bool,
    ) -> impl Future<Output = Result<(), HomeGuardError>> + Send;
}

pub trait BoardSettingsRepository {
    /// Stored settings, or the defaults when nothing was saved yet.
    fn load_settings(&self) -> impl Future<Output = Result<SensorBoardSettings, HomeGuardError>> + Send;

    fn save_settings(
        &self,
        settings: &SensorBoardSettings,
    ) -> impl Future<Output = Result<(), HomeGuardError>> + Send;
}

/// Every storage port at once, for adapters that back them all.
pub trait Store:
    SnapshotRepository
    + ControlRepository
    + ToggleRepository
    + EventLog
    + NotificationStore
    + BoardSettingsRepository
    + Send
    + Sync
    + 'static
{
}

impl<T> Store for T where
    T: SnapshotRepository
        + ControlRepository
        + ToggleRepository
        + EventLog
        + NotificationStore
        + BoardSettingsRepository
        + Send
        + Sync
        + 'static
{
}
