//! Built-in proc handlers.

use crate::combat::mitigate;
use crate::procs::{ProcContext, ProcHandler, ProcKind};
use crate::state::{DamageOverTime, DotKind, Side, StatusEffect, StatusKind, StatusPayload};

const MS_PER_TICK: u64 = 1000;

pub(super) fn builtin(kind: ProcKind) -> ProcHandler {
    match kind {
        ProcKind::Fire => fire,
        ProcKind::Carnage => carnage,
        ProcKind::Overwhelm => overwhelm,
        ProcKind::Blind => blind,
        ProcKind::Stun => stun,
        ProcKind::Bleed => bleed,
    }
}

fn fire(ctx: &mut ProcContext<'_>) -> u32 {
    if ctx.target.is_immune_to(StatusKind::Burning) {
        return 0;
    }
    if ctx.data.duration_ms > 0 {
        ctx.target.apply_status(StatusEffect::new(
            StatusKind::Burning,
            ctx.now + ctx.data.duration_ms,
        ));
    }
    ctx.data.damage
}

fn carnage(ctx: &mut ProcContext<'_>) -> u32 {
    if ctx.data.damage == 0 {
        return 0;
    }
    mitigate(ctx.data.damage, ctx.target, ctx.now, &ctx.config.mitigation)
}

fn overwhelm(ctx: &mut ProcContext<'_>) -> u32 {
    ctx.target.apply_status(
        StatusEffect::new(StatusKind::AccuracyDebuff, ctx.now + ctx.data.duration_ms)
            .with_payload(StatusPayload::AccuracyPenalty(ctx.data.value)),
    );
    0
}

fn blind(ctx: &mut ProcContext<'_>) -> u32 {
    ctx.target.apply_status(StatusEffect::new(
        StatusKind::Blinded,
        ctx.now + ctx.data.duration_ms,
    ));
    0
}

fn stun(ctx: &mut ProcContext<'_>) -> u32 {
    // apply_status refuses immune targets.
    ctx.target.apply_status(StatusEffect::new(
        StatusKind::Stunned,
        ctx.now + ctx.data.duration_ms,
    ));
    0
}

fn bleed(ctx: &mut ProcContext<'_>) -> u32 {
    let ticks = (ctx.data.duration_ms / MS_PER_TICK).max(1) as u32;
    let source = (ctx.attacker.side == Side::Player).then(|| ctx.attacker.id.clone());
    ctx.target.apply_dot(
        DamageOverTime::new(DotKind::Bleed, ctx.data.damage.max(1), ticks)
            .ignoring_mitigation()
            .with_source(source),
    );
    0
}
