//! One battle's worth of mutable state and the per-tick driver.
//!
//! A [`CombatSession`] is a plain owned value: independent battles never share
//! anything, and dropping the session discards the battle. The caller owns the
//! clock and hands in `now` for every command.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::combat::{
    AttackResult, DotEvent, GrenadeResult, attack_due, resolve_attack, schedule_next_attack,
};
use crate::config::CombatConfig;
use crate::env::{EffectsOracle, ItemArchetype, ItemRecord, ItemTarget, SoldierRecord};
use crate::error::SessionError;
use crate::factory::{EnemySpec, build_enemy, build_soldier};
use crate::grenade::resolve_throw;
use crate::procs::ProcRegistry;
use crate::state::{
    Combatant, CombatantId, Roster, Side, StatusEffect, StatusKind, StatusPayload, TargetMap,
    Timestamp,
};
use crate::targeting::assign_targets;
use crate::ticker::tick_status_effects;

/// Terminal state of a battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum BattleOutcome {
    /// Every enemy is down.
    Victory,
    /// Every squad member is down.
    Defeat,
}

/// Everything that happened during one [`CombatSession::tick`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    pub now: Timestamp,
    pub attacks: Vec<AttackResult>,
    pub dot_events: Vec<DotEvent>,
    /// Set on the tick the battle ends, and on every tick after it.
    pub outcome: Option<BattleOutcome>,
}

impl TickReport {
    fn idle(now: Timestamp, outcome: Option<BattleOutcome>) -> Self {
        Self {
            now,
            outcome,
            ..Self::default()
        }
    }

    pub fn is_quiet(&self) -> bool {
        self.attacks.is_empty() && self.dot_events.is_empty()
    }
}

pub struct CombatSession {
    config: CombatConfig,
    roster: Roster,
    targets: TargetMap,
    rng: ChaCha8Rng,
    procs: ProcRegistry,
    started_at: Timestamp,
    last_dot_at: Option<Timestamp>,
    outcome: Option<BattleOutcome>,
}

impl CombatSession {
    /// Creates an empty battle starting at `started_at`, seeded from
    /// `config.seed`.
    pub fn new(config: CombatConfig, started_at: Timestamp) -> Self {
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        Self {
            config,
            roster: Roster::new(),
            targets: TargetMap::new(),
            rng,
            procs: ProcRegistry::default(),
            started_at,
            last_dot_at: Some(started_at),
            outcome: None,
        }
    }

    pub fn with_procs(mut self, procs: ProcRegistry) -> Self {
        self.procs = procs;
        self
    }

    pub fn config(&self) -> &CombatConfig {
        &self.config
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn targets(&self) -> &TargetMap {
        &self.targets
    }

    pub fn combatant(&self, id: &CombatantId) -> Option<&Combatant> {
        self.roster.get(id)
    }

    pub fn started_at(&self) -> Timestamp {
        self.started_at
    }

    pub fn outcome(&self) -> Option<BattleOutcome> {
        self.outcome
    }

    /// Adds a combatant at the end of its side's formation.
    ///
    /// Combatants without a scheduled attack get their first one a full
    /// interval after the battle start.
    pub fn add_combatant(&mut self, mut combatant: Combatant) -> Result<&Combatant, SessionError> {
        if combatant.next_attack_at.is_none() {
            schedule_next_attack(&mut combatant, self.started_at, &self.config.timing);
        }
        let id = combatant.id.clone();
        self.roster
            .push(combatant)
            .map_err(|rejected| SessionError::DuplicateCombatant(rejected.id))?;
        tracing::debug!(combatant = %id, "joined battle");
        self.roster.get(&id).ok_or(SessionError::UnknownCombatant(id))
    }

    /// Builds a squad member from its record and adds it.
    pub fn add_soldier<O>(
        &mut self,
        record: &SoldierRecord,
        oracle: &O,
    ) -> Result<&Combatant, SessionError>
    where
        O: EffectsOracle + ?Sized,
    {
        let combatant = build_soldier(record, oracle, &self.config);
        self.add_combatant(combatant)
    }

    /// Builds an enemy and adds it, first attack one interval after `now`.
    pub fn spawn_enemy(
        &mut self,
        spec: &EnemySpec,
        now: Timestamp,
    ) -> Result<&Combatant, SessionError> {
        let mut enemy = build_enemy(spec, &self.config);
        schedule_next_attack(&mut enemy, now, &self.config.timing);
        self.add_combatant(enemy)
    }

    /// Advances the battle to `now`.
    ///
    /// Targets are refreshed, every combatant whose attack is due fires once,
    /// then damage-over-time and status expiry run. Nothing happens once the
    /// battle has an outcome.
    pub fn tick(&mut self, now: Timestamp) -> TickReport {
        if self.outcome.is_some() {
            return TickReport::idle(now, self.outcome);
        }

        assign_targets(&self.roster, &mut self.targets, now, &mut self.rng);

        let mut attacks = Vec::new();
        for idx in 0..self.roster.len() {
            if let Some(result) = self.attack_if_due(idx, now) {
                attacks.push(result);
            }
        }

        let dot_events = tick_status_effects(
            &mut self.roster,
            now,
            &mut self.last_dot_at,
            &mut self.rng,
            &self.config,
        );

        self.refresh_outcome();
        TickReport {
            now,
            attacks,
            dot_events,
            outcome: self.outcome,
        }
    }

    fn attack_if_due(&mut self, idx: usize, now: Timestamp) -> Option<AttackResult> {
        let attacker = self.roster.at(idx)?;
        if !attacker.is_alive() || !attack_due(attacker, now) {
            return None;
        }

        if attacker.statuses.has(StatusKind::Stunned, now) {
            tracing::trace!(attacker = %attacker.id, "stunned, turn skipped");
            let attacker = self.roster.at_mut(idx)?;
            schedule_next_attack(attacker, now, &self.config.timing);
            return None;
        }

        let target_idx = self
            .targets
            .target_of(&attacker.id)
            .and_then(|target| self.roster.index_of(target))?;
        // Went down earlier in this tick.
        if !self.roster.at(target_idx)?.is_alive() {
            return None;
        }

        let (attacker, target) = self.roster.pair_mut(idx, target_idx)?;
        let result = resolve_attack(
            attacker,
            target,
            now,
            &mut self.rng,
            &self.config,
            &self.procs,
        );
        schedule_next_attack(attacker, now, &self.config.timing);
        Some(result)
    }

    /// Throws `item` from `thrower` at `target`.
    pub fn throw_item(
        &mut self,
        thrower: &CombatantId,
        item: &ItemRecord,
        target: &CombatantId,
        now: Timestamp,
    ) -> Result<GrenadeResult, SessionError> {
        self.ensure_running()?;
        let archetype = item.effect.archetype;
        if !archetype.is_throwable() {
            return Err(SessionError::NotThrowable {
                item: item.id.clone(),
                archetype,
            });
        }

        let thrower_idx = self.living_index(thrower)?;
        let target_idx = self.living_index(target)?;
        let same_side = self.roster.at(thrower_idx).map(|c| c.side)
            == self.roster.at(target_idx).map(|c| c.side);
        if same_side {
            return Err(SessionError::InvalidTarget {
                item: item.id.clone(),
                target: target.clone(),
            });
        }

        let result = resolve_throw(
            &mut self.roster,
            thrower_idx,
            target_idx,
            item,
            now,
            &mut self.rng,
            &self.config,
        );
        self.refresh_outcome();
        Ok(result)
    }

    /// Uses a medical item from `user` on `target`. Returns the hp restored.
    pub fn use_medical(
        &mut self,
        user: &CombatantId,
        item: &ItemRecord,
        target: &CombatantId,
    ) -> Result<u32, SessionError> {
        self.ensure_running()?;
        let archetype = item.effect.archetype;
        if archetype != ItemArchetype::Heal {
            return Err(SessionError::NotMedical {
                item: item.id.clone(),
                archetype,
            });
        }

        let user_idx = self.living_index(user)?;
        let target_idx = self.living_index(target)?;
        let user_side = self.roster.at(user_idx).map(|c| c.side);
        let target_side = self.roster.at(target_idx).map(|c| c.side);
        let allowed = match item.target {
            ItemTarget::User => user_idx == target_idx,
            ItemTarget::Ally => user_side == target_side,
            ItemTarget::Enemy => false,
        };
        if !allowed {
            return Err(SessionError::InvalidTarget {
                item: item.id.clone(),
                target: target.clone(),
            });
        }

        let patient = self
            .roster
            .at_mut(target_idx)
            .ok_or_else(|| SessionError::UnknownCombatant(target.clone()))?;
        let healed = patient.heal(item.effect.value);
        tracing::debug!(%user, %target, healed, hp = patient.hp, "medical item used");
        Ok(healed)
    }

    /// Puts `id` into cover: untargetable until `now + duration_ms`.
    pub fn take_cover(
        &mut self,
        id: &CombatantId,
        now: Timestamp,
        duration_ms: u64,
    ) -> Result<(), SessionError> {
        self.apply_timed(id, StatusEffect::new(StatusKind::TakeCover, now + duration_ms))
    }

    /// Scales `id`'s attack interval by `multiplier` until `now + duration_ms`.
    pub fn grant_attack_speed_buff(
        &mut self,
        id: &CombatantId,
        now: Timestamp,
        duration_ms: u64,
        multiplier: f64,
    ) -> Result<(), SessionError> {
        let buff = StatusEffect::new(StatusKind::AttackSpeedBuff, now + duration_ms)
            .with_payload(StatusPayload::SpeedMultiplier(multiplier));
        self.apply_timed(id, buff)
    }

    fn apply_timed(&mut self, id: &CombatantId, effect: StatusEffect) -> Result<(), SessionError> {
        self.ensure_running()?;
        let idx = self.living_index(id)?;
        if let Some(combatant) = self.roster.at_mut(idx) {
            combatant.apply_status(effect);
        }
        Ok(())
    }

    fn ensure_running(&self) -> Result<(), SessionError> {
        match self.outcome {
            Some(_) => Err(SessionError::BattleOver),
            None => Ok(()),
        }
    }

    fn living_index(&self, id: &CombatantId) -> Result<usize, SessionError> {
        let idx = self
            .roster
            .index_of(id)
            .ok_or_else(|| SessionError::UnknownCombatant(id.clone()))?;
        match self.roster.at(idx) {
            Some(c) if c.is_alive() => Ok(idx),
            _ => Err(SessionError::CombatantDown(id.clone())),
        }
    }

    fn refresh_outcome(&mut self) {
        if self.outcome.is_some() {
            return;
        }
        self.outcome = if self.roster.is_wiped(Side::Player) {
            Some(BattleOutcome::Defeat)
        } else if self.roster.is_wiped(Side::Enemy) {
            Some(BattleOutcome::Victory)
        } else {
            None
        };
        if let Some(outcome) = self.outcome {
            tracing::info!(%outcome, "battle over");
        }
    }
}
