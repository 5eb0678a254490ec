//! Battle engine: owns all simulation state and exposes the action API
//!
//! Every request is validated in full before anything changes, so a
//! rejection leaves the engine untouched. Accepted actions settle
//! casualties, objectives and the victory check before returning.

use serde::{Deserialize, Serialize};

use crate::battle::battlefield::Battlefield;
use crate::battle::combat::{
    resolve_attack, resolve_bombard, AttackOutcome, BombardOutcome, SupportAsset,
};
use crate::battle::constants::{AMMO_MAX, DEFAULT_MAX_TURN, ENTRENCHMENT_MAX};
use crate::battle::dice::Dice;
use crate::battle::events::{BattleEventLog, BattleEventType};
use crate::battle::hex::HexCoord;
use crate::battle::morale::apply_morale_gain;
use crate::battle::movement::{reachable, ReachCache, ReachKey, ReachableHex};
use crate::battle::objectives::{Objective, ObjectiveTemplate, ObjectiveTracker};
use crate::battle::supply::is_supplied;
use crate::battle::support::{SideRules, SupportPool};
use crate::battle::turn::{is_terminal, refresh_units, GameOutcome, TurnState};
use crate::battle::units::{Unit, UnitId, UnitRoster, UnitTemplate};
use crate::core::error::{ActionError, ActionResult, HexfrontError, Result};
use crate::core::types::{PerSide, Side, Turn};

/// Everything needed to start a battle
#[derive(Debug, Clone)]
pub struct BattleSetup {
    pub battlefield: Battlefield,
    pub units: Vec<UnitTemplate>,
    pub objectives: Vec<ObjectiveTemplate>,
    pub support_base: PerSide<SupportPool>,
    pub rules: PerSide<SideRules>,
    pub max_turn: Turn,
}

impl BattleSetup {
    pub fn new(battlefield: Battlefield) -> Self {
        Self {
            battlefield,
            units: Vec::new(),
            objectives: Vec::new(),
            support_base: PerSide::default_support(),
            rules: PerSide::default_rules(),
            max_turn: DEFAULT_MAX_TURN,
        }
    }

    pub fn with_unit(mut self, unit: UnitTemplate) -> Self {
        self.units.push(unit);
        self
    }

    pub fn with_objective(mut self, objective: ObjectiveTemplate) -> Self {
        self.objectives.push(objective);
        self
    }

    pub fn with_support(mut self, side: Side, pool: SupportPool) -> Self {
        *self.support_base.get_mut(side) = pool;
        self
    }

    pub fn with_rules(mut self, side: Side, rules: SideRules) -> Self {
        *self.rules.get_mut(side) = rules;
        self
    }

    pub fn with_max_turn(mut self, max_turn: Turn) -> Self {
        self.max_turn = max_turn;
        self
    }

    /// Check the roster and objectives against the battlefield
    pub fn validate(&self) -> Result<()> {
        if self.max_turn == 0 {
            return Err(HexfrontError::InvalidScenario("max_turn must be at least 1".into()));
        }
        let mut occupied = Vec::with_capacity(self.units.len());
        for unit in &self.units {
            let pos = unit.pos();
            if !self.battlefield.in_bounds(pos) {
                return Err(HexfrontError::InvalidScenario(format!(
                    "unit '{}' is off the map at ({}, {})",
                    unit.name, pos.q, pos.r
                )));
            }
            if !self.battlefield.is_passable(pos) {
                return Err(HexfrontError::InvalidScenario(format!(
                    "unit '{}' starts on impassable terrain at ({}, {})",
                    unit.name, pos.q, pos.r
                )));
            }
            if occupied.contains(&pos) {
                return Err(HexfrontError::InvalidScenario(format!(
                    "unit '{}' shares hex ({}, {}) with another unit",
                    unit.name, pos.q, pos.r
                )));
            }
            occupied.push(pos);
        }
        for objective in &self.objectives {
            if objective.vp == 0 {
                return Err(HexfrontError::InvalidScenario(format!(
                    "objective '{}' must be worth at least 1 vp",
                    objective.id
                )));
            }
            if !self.battlefield.in_bounds(objective.coord()) {
                return Err(HexfrontError::InvalidScenario(format!(
                    "objective '{}' is off the map",
                    objective.id
                )));
            }
        }
        Ok(())
    }
}

/// Result of an accepted move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    pub unit: UnitId,
    pub from: HexCoord,
    pub to: HexCoord,
    pub cost: u32,
    pub mp_left: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FortifyOutcome {
    pub unit: UnitId,
    pub entrenchment: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResupplyOutcome {
    pub unit: UnitId,
    pub ammo: i32,
    pub morale: i32,
    pub supply_left: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnOutcome {
    pub turn: Turn,
    pub active: Side,
    pub game_over: bool,
}

/// The tactical simulation
pub struct BattleEngine {
    battlefield: Battlefield,
    roster: UnitRoster,
    objectives: ObjectiveTracker,
    support_base: PerSide<SupportPool>,
    support: PerSide<SupportPool>,
    rules: PerSide<SideRules>,
    state: TurnState,
    dice: Box<dyn Dice>,
    reach_cache: ReachCache,
    log: BattleEventLog,
    selected: Option<UnitId>,
    outcome: Option<GameOutcome>,
}

impl BattleEngine {
    pub fn new(setup: BattleSetup, dice: Box<dyn Dice>) -> Result<Self> {
        setup.validate()?;

        let mut roster = UnitRoster::new();
        for template in &setup.units {
            roster.add(template);
        }

        let mut engine = Self {
            objectives: ObjectiveTracker::new(&setup.objectives),
            battlefield: setup.battlefield,
            roster,
            support_base: setup.support_base,
            support: setup.support_base,
            rules: setup.rules,
            state: TurnState::new(setup.max_turn),
            dice,
            reach_cache: ReachCache::new(),
            log: BattleEventLog::new(),
            selected: None,
            outcome: None,
        };

        engine.update_objectives();
        engine.begin_side_turn();
        engine.check_game_end();

        tracing::info!(
            units = engine.roster.all().count(),
            objectives = engine.objectives.objectives().len(),
            max_turn = engine.state.max_turn,
            "Battle started"
        );
        Ok(engine)
    }

    // ---- Queries ----

    pub fn battlefield(&self) -> &Battlefield {
        &self.battlefield
    }

    pub fn roster(&self) -> &UnitRoster {
        &self.roster
    }

    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.roster.get(id)
    }

    pub fn unit_at(&self, coord: HexCoord) -> Option<&Unit> {
        self.roster.unit_at(coord)
    }

    pub fn objectives(&self) -> &[Objective] {
        self.objectives.objectives()
    }

    pub fn victory_points(&self, side: Side) -> u32 {
        self.objectives.victory_points(side)
    }

    pub fn turn(&self) -> Turn {
        self.state.turn
    }

    pub fn active_side(&self) -> Side {
        self.state.active
    }

    pub fn max_turn(&self) -> Turn {
        self.state.max_turn
    }

    pub fn turn_state(&self) -> &TurnState {
        &self.state
    }

    pub fn is_game_over(&self) -> bool {
        self.state.game_over
    }

    pub fn outcome(&self) -> Option<&GameOutcome> {
        self.outcome.as_ref()
    }

    pub fn support(&self, side: Side) -> SupportPool {
        *self.support.get(side)
    }

    pub fn rules(&self, side: Side) -> &SideRules {
        self.rules.get(side)
    }

    pub fn log(&self) -> &BattleEventLog {
        &self.log
    }

    pub fn selected(&self) -> Option<UnitId> {
        self.selected
    }

    /// Hexes `id` can reach this turn, memoized until the next mutation
    ///
    /// Unknown or destroyed units reach nothing.
    pub fn reachable(&self, id: UnitId) -> Vec<ReachableHex> {
        let Some(unit) = self.roster.get(id).filter(|u| u.alive) else {
            return Vec::new();
        };
        let key = ReachKey::for_unit(unit, self.state.active, self.state.turn);
        self.reach_cache
            .get_or_compute(key, || reachable(&self.battlefield, &self.roster, unit))
    }

    /// Live supply trace, independent of the per-turn `supplied` flag
    pub fn traces_supply(&self, id: UnitId) -> bool {
        let Some(unit) = self.roster.get(id).filter(|u| u.alive) else {
            return false;
        };
        let edge = self.rules.get(unit.side).supply_edge;
        is_supplied(&self.battlefield, &self.roster, unit, edge)
    }

    pub fn cached_reach_sets(&self) -> usize {
        self.reach_cache.len()
    }

    // ---- Selection ----

    pub fn select(&mut self, id: UnitId) -> ActionResult<()> {
        self.living_unit(id)?;
        self.selected = Some(id);
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    // ---- Actions ----

    pub fn request_move(&mut self, id: UnitId, dest: HexCoord) -> ActionResult<MoveOutcome> {
        self.ensure_running()?;
        let unit = self.ready_unit(id)?;
        let from = unit.pos;
        if dest == from {
            return Err(ActionError::Unreachable);
        }
        if self.roster.unit_at(dest).is_some() {
            return Err(ActionError::DestinationOccupied);
        }
        if unit.mp_left == 0 {
            return Err(ActionError::NoMovementPoints);
        }
        let target = self
            .reachable(id)
            .into_iter()
            .find(|h| h.coord == dest)
            .ok_or(ActionError::Unreachable)?;

        if let Some(unit) = self.roster.get_mut(id) {
            unit.pos = dest;
            unit.mp_left = target.mp_remaining;
        }
        tracing::debug!(?id, ?from, ?dest, cost = target.cost, "Unit moved");
        let terrain = self.battlefield.terrain_at(dest);
        let into = terrain.map_or("open ground", |t| t.name());
        self.log_event(
            BattleEventType::Moved {
                unit_id: id,
                from,
                to: dest,
            },
            format!(
                "moved ({},{}) -> ({},{}) into {}",
                from.q, from.r, dest.q, dest.r, into
            ),
        );
        self.settle();

        Ok(MoveOutcome {
            unit: id,
            from,
            to: dest,
            cost: target.cost,
            mp_left: target.mp_remaining,
        })
    }

    pub fn request_attack(
        &mut self,
        attacker_id: UnitId,
        defender_id: UnitId,
    ) -> ActionResult<AttackOutcome> {
        self.ensure_running()?;
        let attacker = self.ready_unit(attacker_id)?.clone();
        let defender = self
            .roster
            .get(defender_id)
            .ok_or(ActionError::UnitNotFound(defender_id))?
            .clone();
        if !defender.alive || defender.side == attacker.side {
            return Err(ActionError::InvalidTarget(defender_id));
        }
        if !attacker.pos.is_adjacent(&defender.pos) {
            return Err(ActionError::NotAdjacent);
        }

        let terrain_bonus = self.battlefield.defense_bonus_at(defender.pos);
        let roll = self.dice.roll_d6();
        let (mut attacker, mut defender) = (attacker, defender);
        let mut outcome = resolve_attack(&mut attacker, &mut defender, terrain_bonus, roll);
        let description = if outcome.no_effect() {
            format!(
                "{} attacks {}: {} vs {}, roll {}, no effect",
                attacker.name, defender.name, outcome.attack_value, outcome.defense_value, roll
            )
        } else {
            format!(
                "{} attacks {}: {} vs {}, roll {}, dealt {}, took {}",
                attacker.name,
                defender.name,
                outcome.attack_value,
                outcome.defense_value,
                roll,
                outcome.damage,
                outcome.counter
            )
        };
        self.store(attacker);
        self.store(defender);

        tracing::debug!(
            ?attacker_id,
            ?defender_id,
            roll,
            damage = outcome.damage,
            counter = outcome.counter,
            "Melee resolved"
        );
        self.log_event(
            BattleEventType::Attacked {
                attacker: attacker_id,
                defender: defender_id,
                damage: outcome.damage,
                counter: outcome.counter,
            },
            description,
        );
        let destroyed = self.settle();
        outcome.attacker_destroyed = destroyed.contains(&attacker_id);
        outcome.defender_destroyed = destroyed.contains(&defender_id);
        Ok(outcome)
    }

    pub fn request_bombard(&mut self, target_id: UnitId) -> ActionResult<BombardOutcome> {
        self.ensure_running()?;
        let side = self.state.active;
        let asset = self
            .fire_support_asset(side)
            .ok_or(ActionError::NoSupportAvailable)?;
        let mut target = self
            .roster
            .get(target_id)
            .ok_or(ActionError::UnitNotFound(target_id))?
            .clone();
        if !target.alive || target.side == side {
            return Err(ActionError::InvalidTarget(target_id));
        }

        let pool = self.support.get_mut(side);
        match asset {
            SupportAsset::Air => pool.air -= 1,
            SupportAsset::Artillery => pool.artillery -= 1,
        }
        let terrain_bonus = self.battlefield.defense_bonus_at(target.pos);
        let roll = self.dice.roll_d6();
        let mut outcome = resolve_bombard(&mut target, terrain_bonus, roll, asset);
        let description = format!(
            "{:?} strike on {}: roll {}, {}",
            asset,
            target.name,
            roll,
            if outcome.hit { "hit" } else { "no effect" }
        );
        self.store(target);

        tracing::debug!(?target_id, ?asset, roll, hit = outcome.hit, "Bombardment resolved");
        self.log_event(
            BattleEventType::Bombarded {
                target: target_id,
                hit: outcome.hit,
            },
            description,
        );
        let destroyed = self.settle();
        outcome.target_destroyed = destroyed.contains(&target_id);
        Ok(outcome)
    }

    pub fn request_fortify(&mut self, id: UnitId) -> ActionResult<FortifyOutcome> {
        self.ensure_running()?;
        self.ready_unit(id)?;
        let mut entrenchment = 0;
        if let Some(unit) = self.roster.get_mut(id) {
            unit.entrenchment = (unit.entrenchment + 1).min(ENTRENCHMENT_MAX);
            unit.acted = true;
            entrenchment = unit.entrenchment;
        }
        tracing::debug!(?id, entrenchment, "Unit fortified");
        self.log_event(
            BattleEventType::Fortified {
                unit_id: id,
                entrenchment,
            },
            format!("dug in to level {}", entrenchment),
        );
        self.settle();
        Ok(FortifyOutcome {
            unit: id,
            entrenchment,
        })
    }

    pub fn request_resupply(&mut self, id: UnitId) -> ActionResult<ResupplyOutcome> {
        self.ensure_running()?;
        let side = self.state.active;
        if self.support.get(side).supply == 0 {
            return Err(ActionError::NoSupplyActionsLeft);
        }
        let unit = self.living_unit(id)?;
        if unit.side != side {
            return Err(ActionError::NotActiveSide);
        }

        self.support.get_mut(side).supply -= 1;
        let supply_left = self.support.get(side).supply;
        let (mut ammo, mut morale) = (0, 0);
        if let Some(unit) = self.roster.get_mut(id) {
            unit.supplied = true;
            unit.ammo = (unit.ammo + 1).min(AMMO_MAX);
            apply_morale_gain(unit);
            ammo = unit.ammo;
            morale = unit.morale;
        }
        tracing::debug!(?id, ammo, morale, supply_left, "Unit resupplied");
        self.log_event(
            BattleEventType::Resupplied { unit_id: id },
            format!("resupplied: ammo {}, morale {}", ammo, morale),
        );
        self.settle();
        Ok(ResupplyOutcome {
            unit: id,
            ammo,
            morale,
            supply_left,
        })
    }

    /// Spend the unit's action doing nothing
    pub fn request_hold(&mut self, id: UnitId) -> ActionResult<()> {
        self.ensure_running()?;
        self.ready_unit(id)?;
        if let Some(unit) = self.roster.get_mut(id) {
            unit.acted = true;
        }
        self.log_event(
            BattleEventType::Held { unit_id: id },
            "holds position".into(),
        );
        self.settle();
        Ok(())
    }

    /// Entrench one step up to `cap` without spending the unit's action
    pub(crate) fn request_dig_in(&mut self, id: UnitId, cap: i32) -> ActionResult<i32> {
        self.ensure_running()?;
        self.ready_unit(id)?;
        let mut entrenchment = 0;
        if let Some(unit) = self.roster.get_mut(id) {
            let ceiling = cap.min(ENTRENCHMENT_MAX);
            unit.entrenchment = (unit.entrenchment + 1).min(ceiling).max(unit.entrenchment);
            entrenchment = unit.entrenchment;
        }
        self.reach_cache.invalidate();
        Ok(entrenchment)
    }

    pub fn end_turn(&mut self) -> ActionResult<TurnOutcome> {
        self.ensure_running()?;
        let ending = self.state.active;
        self.update_objectives();
        self.state.advance();
        self.selected = None;
        self.begin_side_turn();

        tracing::info!(
            ended = %ending,
            turn = self.state.turn,
            active = %self.state.active,
            "Turn ended"
        );
        self.log_event(
            BattleEventType::TurnEnded {
                next_side: self.state.active,
                turn: self.state.turn,
            },
            format!(
                "{} ends turn; turn {}, {} to move",
                ending, self.state.turn, self.state.active
            ),
        );
        self.check_game_end();

        Ok(TurnOutcome {
            turn: self.state.turn,
            active: self.state.active,
            game_over: self.state.game_over,
        })
    }

    // ---- Internals ----

    fn ensure_running(&self) -> ActionResult<()> {
        if self.state.game_over {
            Err(ActionError::GameOver)
        } else {
            Ok(())
        }
    }

    fn living_unit(&self, id: UnitId) -> ActionResult<&Unit> {
        let unit = self.roster.get(id).ok_or(ActionError::UnitNotFound(id))?;
        if !unit.alive {
            return Err(ActionError::UnitDestroyed(id));
        }
        Ok(unit)
    }

    /// Living, on the active side and yet to act
    fn ready_unit(&self, id: UnitId) -> ActionResult<&Unit> {
        let unit = self.living_unit(id)?;
        if unit.side != self.state.active {
            return Err(ActionError::NotActiveSide);
        }
        if unit.acted {
            return Err(ActionError::AlreadyActed);
        }
        Ok(unit)
    }

    fn store(&mut self, unit: Unit) {
        if let Some(slot) = self.roster.get_mut(unit.id) {
            *slot = unit;
        }
    }

    /// Air when the side may use it and has some, else artillery
    fn fire_support_asset(&self, side: Side) -> Option<SupportAsset> {
        let pool = self.support.get(side);
        if pool.air > 0 && self.rules.get(side).air_qualified {
            Some(SupportAsset::Air)
        } else if pool.artillery > 0 {
            Some(SupportAsset::Artillery)
        } else {
            None
        }
    }

    fn log_event(&mut self, event_type: BattleEventType, description: String) {
        self.log
            .push(self.state.turn, self.state.active, event_type, description);
    }

    /// Post-action bookkeeping; returns units destroyed by the action
    fn settle(&mut self) -> Vec<UnitId> {
        self.reach_cache.invalidate();
        let destroyed = self.roster.cleanup_dead();
        for &id in &destroyed {
            let was_selected = self.selected == Some(id);
            if was_selected {
                self.selected = None;
            }
            let name = self
                .roster
                .get(id)
                .map(|u| u.name.clone())
                .unwrap_or_default();
            tracing::debug!(?id, %name, "Unit destroyed");
            self.log_event(
                BattleEventType::UnitDestroyed {
                    unit_id: id,
                    was_selected,
                },
                format!("{} destroyed", name),
            );
        }
        self.update_objectives();
        self.check_game_end();
        destroyed
    }

    fn update_objectives(&mut self) {
        for capture in self.objectives.update(&self.roster) {
            tracing::debug!(
                objective = %capture.objective,
                owner = %capture.owner,
                "Objective captured"
            );
            self.log_event(
                BattleEventType::ObjectiveCaptured {
                    objective: capture.objective.clone(),
                    owner: capture.owner,
                },
                format!("{} takes {}", capture.owner, capture.objective),
            );
        }
    }

    /// Refresh the newly active side's units and support pool
    fn begin_side_turn(&mut self) {
        let side = self.state.active;
        let turn = self.state.turn;
        let rules = *self.rules.get(side);
        let cut_off = refresh_units(&self.battlefield, &mut self.roster, &rules, side, turn);
        *self.support.get_mut(side) = rules.pool_for_turn(*self.support_base.get(side), turn);
        self.reach_cache.invalidate();

        for id in cut_off {
            tracing::debug!(?id, "Unit out of supply");
            self.log_event(
                BattleEventType::OutOfSupply { unit_id: id },
                "out of supply".into(),
            );
        }
    }

    fn check_game_end(&mut self) {
        if self.state.game_over || !is_terminal(&self.state, &self.roster) {
            return;
        }
        self.state.game_over = true;
        let outcome = GameOutcome::tally(&self.objectives, &self.roster);
        tracing::info!(
            ger = outcome.scores.ger,
            sov = outcome.scores.sov,
            winner = ?outcome.winner,
            "Game over"
        );
        let (ger, sov) = (outcome.scores.ger, outcome.scores.sov);
        self.log_event(
            BattleEventType::GameOver {
                winner: outcome.winner,
            },
            match outcome.winner {
                Some(side) => format!("{} wins {}-{}", side, ger, sov),
                None => format!("draw {}-{}", ger, sov),
            },
        );
        self.outcome = Some(outcome);
    }
}
