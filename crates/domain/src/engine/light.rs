use crate::actuator::{LightState, brightness_for};
use crate::effect::{LogKind, SideEffect};
use crate::mode::Route;
use crate::timer::TimeoutClass;
use crate::toggle::Actuator;

use super::Context;

pub(super) fn step(light: &mut LightState, ctx: &Context<'_>, effects: &mut Vec<SideEffect>) {
    let wants = ctx.demand.wants_light();

    let Some(activation) = light.activation else {
        if wants {
            light.switch_on(ctx.now, TimeoutClass::classify(&ctx.current));
            light.brightness = brightness_for(ctx.snapshot.light_level);
            effects.push(SideEffect::log(LogKind::Alert, switched_on_message(ctx, light.brightness)));
        }
        return;
    };

    if !activation.dwell_elapsed(Actuator::Light, ctx.now) || ctx.mode.manual {
        return;
    }

    if !wants {
        light.switch_off();
        let dwell = activation.class.dwell(Actuator::Light).num_seconds();
        effects.push(SideEffect::log(
            LogKind::Auto,
            format!("Light turned OFF (auto) - Timeout: {dwell}s elapsed"),
        ));
    } else if ctx
        .demand
        .has_rising(Actuator::Light, &ctx.current, &ctx.previous)
    {
        let class = TimeoutClass::classify(&ctx.current);
        light.switch_on(ctx.now, class);
        let dwell = class.dwell(Actuator::Light).num_seconds();
        effects.push(SideEffect::log(
            LogKind::Alert,
            format!("Light re-activated (auto) - new trigger, Timeout: {dwell}s"),
        ));
    }
}

fn switched_on_message(ctx: &Context<'_>, brightness: u8) -> String {
    if ctx.mode.manual {
        let reason = if ctx.demand.light.contains(&Route::Fire) {
            "fire"
        } else {
            "gas"
        };
        format!("Light turned ON (critical alert override - {reason})")
    } else {
        format!("Light turned ON (auto) - Brightness: {brightness}%")
    }
}
