//! Side effects requested by the engine, and the records they produce.
//!
//! The engine never performs IO. It returns [`SideEffect`]s and the app
//! layer turns them into stored [`LogEntry`] and [`Notification`] rows.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::id::{LogEntryId, NotificationId};
use crate::time::Timestamp;

/// Classification of an event log row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogKind {
    /// Automatic activation or a detected hazard.
    Alert,
    /// Automatic deactivation.
    Auto,
    /// Operator command.
    Control,
    Info,
}

impl LogKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Alert => "ALERT",
            Self::Auto => "AUTO",
            Self::Control => "CONTROL",
            Self::Info => "INFO",
        }
    }
}

impl fmt::Display for LogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ALERT" => Ok(Self::Alert),
            "AUTO" => Ok(Self::Auto),
            "CONTROL" => Ok(Self::Control),
            "INFO" => Ok(Self::Info),
            other => Err(format!("unknown log kind: {other}")),
        }
    }
}

/// What a notification is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationCategory {
    Fire,
    Gas,
    Sound,
    Motion,
    Door,
    Info,
}

impl NotificationCategory {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fire => "fire",
            Self::Gas => "gas",
            Self::Sound => "sound",
            Self::Motion => "motion",
            Self::Door => "door",
            Self::Info => "info",
        }
    }
}

impl fmt::Display for NotificationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NotificationCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fire" => Ok(Self::Fire),
            "gas" => Ok(Self::Gas),
            "sound" => Ok(Self::Sound),
            "motion" => Ok(Self::Motion),
            "door" => Ok(Self::Door),
            "info" => Ok(Self::Info),
            other => Err(format!("unknown notification category: {other}")),
        }
    }
}

/// One effect of a decision, applied by the caller after the state is saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SideEffect {
    /// The control state changed and must be written back.
    PersistState,
    Log {
        kind: LogKind,
        message: String,
    },
    Notify {
        title: String,
        message: String,
        category: NotificationCategory,
    },
}

impl SideEffect {
    #[must_use]
    pub fn log(kind: LogKind, message: impl Into<String>) -> Self {
        Self::Log {
            kind,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn notify(
        title: impl Into<String>,
        message: impl Into<String>,
        category: NotificationCategory,
    ) -> Self {
        Self::Notify {
            title: title.into(),
            message: message.into(),
            category,
        }
    }
}

/// A row of the event log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: LogEntryId,
    pub kind: LogKind,
    pub message: String,
    pub recorded_at: Timestamp,
}

impl LogEntry {
    #[must_use]
    pub fn new(kind: LogKind, message: impl Into<String>, recorded_at: Timestamp) -> Self {
        Self {
            id: LogEntryId::new(),
            kind,
            message: message.into(),
            recorded_at,
        }
    }
}

/// A stored notification, read or unread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    pub title: String,
    pub message: String,
    pub category: NotificationCategory,
    pub created_at: Timestamp,
    pub read: bool,
}

impl Notification {
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        message: impl Into<String>,
        category: NotificationCategory,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id: NotificationId::new(),
            title: title.into(),
            message: message.into(),
            category,
            created_at,
            read: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::now;

    #[test]
    fn should_serialize_log_kind_uppercase() {
        assert_eq!(serde_json::to_string(&LogKind::Alert).unwrap(), "\"ALERT\"");
        assert_eq!("CONTROL".parse::<LogKind>().unwrap(), LogKind::Control);
    }

    #[test]
    fn should_reject_unknown_log_kind() {
        assert!("DEBUG".parse::<LogKind>().is_err());
    }

    #[test]
    fn should_roundtrip_category_through_str() {
        for category in [
            NotificationCategory::Fire,
            NotificationCategory::Gas,
            NotificationCategory::Sound,
            NotificationCategory::Motion,
            NotificationCategory::Door,
            NotificationCategory::Info,
        ] {
            assert_eq!(category.as_str().parse::<NotificationCategory>().unwrap(), category);
        }
    }

    #[test]
    fn should_create_unread_notification() {
        let n = Notification::new("Fire Alert", "smoke", NotificationCategory::Fire, now());
        assert!(!n.read);
    }

    #[test]
    fn should_tag_side_effects_by_type() {
        let json = serde_json::to_value(SideEffect::log(LogKind::Info, "hello")).unwrap();
        assert_eq!(json["type"], "log");
        assert_eq!(json["kind"], "INFO");
    }
}
