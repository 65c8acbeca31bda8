use chrono::TimeDelta;

use crate::effect::{LogKind, NotificationCategory, SideEffect};
use crate::time::elapsed;

use super::{AlertMemory, Context};

const GAS_NOTIFICATION_INTERVAL_SECS: i64 = 5 * 60;

/// Detection logs and notifications.
///
/// Everything here fires on the rising edge of its condition except the gas
/// notification, which repeats while the leak persists at most once per
/// [`GAS_NOTIFICATION_INTERVAL_SECS`].
pub(super) fn detect(memory: &mut AlertMemory, ctx: &Context<'_>, effects: &mut Vec<SideEffect>) {
    let rising = ctx.current.rising_since(&ctx.previous);
    let away = !ctx.mode.home;
    let snapshot = ctx.snapshot;

    if rising.fire {
        effects.push(SideEffect::log(LogKind::Alert, "Fire detected!"));
        effects.push(SideEffect::notify(
            "Fire Alert",
            "Fire detected in your home! Please check immediately.",
            NotificationCategory::Fire,
        ));
    }

    if rising.gas_leak {
        effects.push(SideEffect::log(
            LogKind::Alert,
            format!("Gas leak detected! Air quality: {}", snapshot.air_quality),
        ));
    }
    if ctx.current.gas_leak && gas_notification_due(memory, ctx) {
        memory.gas_notified_at = Some(ctx.now);
        effects.push(SideEffect::notify(
            "Gas Leak Alert",
            format!("Gas leak detected! Air quality reading: {}", snapshot.air_quality),
            NotificationCategory::Gas,
        ));
    }

    if rising.loud_noise {
        effects.push(SideEffect::log(
            LogKind::Alert,
            format!("Loud noise detected! Sound level: {}", snapshot.sound_level),
        ));
        effects.push(SideEffect::notify(
            "Loud Noise Alert",
            format!("Loud noise detected! Sound level: {}", snapshot.sound_level),
            NotificationCategory::Sound,
        ));
    }

    if rising.motion {
        effects.push(SideEffect::log(LogKind::Info, "Motion detected"));
        effects.push(SideEffect::notify(
            "Motion Alert",
            "Motion detected in your home",
            NotificationCategory::Motion,
        ));
        if away {
            effects.push(SideEffect::log(LogKind::Alert, "Motion detected while away!"));
            effects.push(SideEffect::notify(
                "Security Alert",
                "Motion detected while system is in away mode",
                NotificationCategory::Motion,
            ));
        }
    }

    if rising.door_open {
        effects.push(SideEffect::log(LogKind::Info, "Door/Window opened"));
        effects.push(SideEffect::notify(
            "Door Alert",
            "Door or window has been opened",
            NotificationCategory::Door,
        ));
        if away {
            effects.push(SideEffect::log(LogKind::Alert, "Door opened while away!"));
            effects.push(SideEffect::notify(
                "Security Alert",
                "Door or window opened while system is in away mode",
                NotificationCategory::Door,
            ));
        }
    }
}

fn gas_notification_due(memory: &AlertMemory, ctx: &Context<'_>) -> bool {
    memory.gas_notified_at.is_none_or(|last| {
        elapsed(last, ctx.now) >= TimeDelta::seconds(GAS_NOTIFICATION_INTERVAL_SECS)
    })
}
