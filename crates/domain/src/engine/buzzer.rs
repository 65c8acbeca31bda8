use chrono::TimeDelta;

use crate::actuator::BuzzerState;
use crate::effect::{LogKind, SideEffect};
use crate::time::elapsed;
use crate::timer::TimeoutClass;
use crate::toggle::Actuator;

use super::Context;

/// A door closing this soon after the buzzer was silenced releases the latch.
const DOOR_LATCH_WINDOW_SECS: i64 = 15;

pub(super) fn step(buzzer: &mut BuzzerState, ctx: &Context<'_>, effects: &mut Vec<SideEffect>) {
    release_latch_on_door_close(buzzer, ctx);

    let wants = ctx.demand.wants_buzzer();
    let rising = ctx
        .demand
        .has_rising(Actuator::Buzzer, &ctx.current, &ctx.previous);

    let Some(activation) = buzzer.activation else {
        if wants && (rising || !buzzer.is_latched()) {
            buzzer.switch_on(ctx.now, TimeoutClass::classify(&ctx.current));
            effects.push(SideEffect::log(
                LogKind::Alert,
                format!("Buzzer activated - {}", reasons(ctx)),
            ));
        }
        return;
    };

    if !activation.dwell_elapsed(Actuator::Buzzer, ctx.now) || ctx.mode.manual {
        return;
    }

    if !wants {
        buzzer.switch_off();
        let dwell = activation.class.dwell(Actuator::Buzzer).num_seconds();
        effects.push(SideEffect::log(
            LogKind::Auto,
            format!("Buzzer turned OFF (auto) - Timeout: {dwell}s elapsed"),
        ));
    } else if rising {
        buzzer.switch_on(ctx.now, TimeoutClass::classify(&ctx.current));
        effects.push(SideEffect::log(
            LogKind::Alert,
            format!("Buzzer re-activated - {}", reasons(ctx)),
        ));
    }
}

fn reasons(ctx: &Context<'_>) -> String {
    let labels: Vec<_> = ctx.demand.buzzer.iter().map(|r| r.label()).collect();
    labels.join(", ")
}

fn release_latch_on_door_close(buzzer: &mut BuzzerState, ctx: &Context<'_>) {
    let Some(latched_at) = buzzer.latched_at else {
        return;
    };
    let door_closed = ctx.previous.door_open && !ctx.current.door_open;
    if door_closed && elapsed(latched_at, ctx.now) < TimeDelta::seconds(DOOR_LATCH_WINDOW_SECS) {
        buzzer.clear_latch();
    }
}
