//! Turn controller: side alternation, per-turn refresh, victory check
//!
//! GER opens every round; the turn counter advances when SOV hands back.

use serde::{Deserialize, Serialize};

use crate::battle::battlefield::Battlefield;
use crate::battle::morale::apply_morale_loss;
use crate::battle::objectives::ObjectiveTracker;
use crate::battle::supply::is_supplied;
use crate::battle::support::SideRules;
use crate::battle::units::{UnitId, UnitRoster};
use crate::core::types::{PerSide, Side, Turn};

/// Turn counter and whose move it is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnState {
    pub turn: Turn,
    pub active: Side,
    pub max_turn: Turn,
    pub game_over: bool,
}

impl TurnState {
    pub fn new(max_turn: Turn) -> Self {
        Self {
            turn: 1,
            active: Side::FIRST,
            max_turn,
            game_over: false,
        }
    }

    /// Hand control to the other side, bumping the counter after a full round
    pub fn advance(&mut self) {
        if self.active != Side::FIRST {
            self.turn += 1;
        }
        self.active = self.active.opponent();
    }

    pub fn past_turn_limit(&self) -> bool {
        self.turn > self.max_turn
    }
}

/// Has the battle reached a terminal state?
pub fn is_terminal(state: &TurnState, roster: &UnitRoster) -> bool {
    let wiped_out = Side::all().iter().any(|&s| roster.living_count(s) == 0);
    state.past_turn_limit() || wiped_out
}

/// Refresh `side`'s living units at the start of its turn
///
/// Returns the units found cut off from supply.
pub fn refresh_units(
    field: &Battlefield,
    roster: &mut UnitRoster,
    rules: &SideRules,
    side: Side,
    turn: Turn,
) -> Vec<UnitId> {
    let view: &UnitRoster = roster;
    let supply: Vec<(UnitId, bool)> = view
        .living_of(side)
        .map(|u| (u.id, is_supplied(field, view, u, rules.supply_edge)))
        .collect();

    let mut cut_off = Vec::new();
    for (id, supplied) in supply {
        let Some(unit) = roster.get_mut(id) else {
            continue;
        };
        unit.mp_left = rules.mp_for_turn(unit.mp_max, turn);
        unit.acted = false;
        unit.supplied = supplied;
        if !supplied {
            apply_morale_loss(unit);
            cut_off.push(id);
        }
    }
    cut_off
}

/// Final scores and winner; `winner == None` is a draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOutcome {
    pub scores: PerSide<i32>,
    pub winner: Option<Side>,
}

impl GameOutcome {
    /// Score = victory points + surviving units
    pub fn tally(objectives: &ObjectiveTracker, roster: &UnitRoster) -> Self {
        let score = |side: Side| {
            let units = roster.living_count(side) as i32;
            objectives.victory_points(side) as i32 + units
        };
        let scores = PerSide::new(score(Side::Ger), score(Side::Sov));
        let winner = match scores.ger.cmp(&scores.sov) {
            std::cmp::Ordering::Greater => Some(Side::Ger),
            std::cmp::Ordering::Less => Some(Side::Sov),
            std::cmp::Ordering::Equal => None,
        };
        Self { scores, winner }
    }

    pub fn is_draw(&self) -> bool {
        self.winner.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::hex::HexCoord;
    use crate::battle::objectives::ObjectiveTemplate;
    use crate::battle::terrain::Terrain;
    use crate::battle::units::UnitTemplate;

    #[test]
    fn test_round_sequence() {
        let mut state = TurnState::new(18);
        assert_eq!((state.turn, state.active), (1, Side::Ger));
        state.advance();
        assert_eq!((state.turn, state.active), (1, Side::Sov));
        state.advance();
        assert_eq!((state.turn, state.active), (2, Side::Ger));
    }

    #[test]
    fn test_terminal_on_turn_limit() {
        let mut roster = UnitRoster::new();
        roster.add(&UnitTemplate::new(Side::Ger, "A", HexCoord::new(0, 0)));
        roster.add(&UnitTemplate::new(Side::Sov, "B", HexCoord::new(3, 0)));

        let mut state = TurnState::new(2);
        state.turn = 2;
        assert!(!is_terminal(&state, &roster));
        state.turn = 3;
        assert!(is_terminal(&state, &roster));
    }

    #[test]
    fn test_terminal_on_annihilation() {
        let mut roster = UnitRoster::new();
        roster.add(&UnitTemplate::new(Side::Ger, "A", HexCoord::new(0, 0)));
        let sov = roster.add(&UnitTemplate::new(Side::Sov, "B", HexCoord::new(3, 0)));
        let state = TurnState::new(10);
        assert!(!is_terminal(&state, &roster));
        roster.get_mut(sov).unwrap().alive = false;
        assert!(is_terminal(&state, &roster));
    }

    #[test]
    fn test_refresh_resets_and_checks_supply() {
        let mut field = Battlefield::new(10, 4, Terrain::Steppe);
        field.paint_rect(4..=4, 0..=3, Terrain::River);
        let mut roster = UnitRoster::new();
        let near = roster.add(&UnitTemplate::new(Side::Ger, "Near", HexCoord::new(2, 1)));
        let far = roster.add(&UnitTemplate::new(Side::Ger, "Far", HexCoord::new(7, 1)));
        for id in [near, far] {
            let unit = roster.get_mut(id).unwrap();
            unit.acted = true;
            unit.mp_left = 0;
        }

        let rules = SideRules::for_side(Side::Ger);
        let cut_off = refresh_units(&field, &mut roster, &rules, Side::Ger, 2);
        assert_eq!(cut_off, vec![far]);

        let near_unit = roster.get(near).unwrap();
        assert!(!near_unit.acted && near_unit.supplied);
        assert_eq!(near_unit.mp_left, near_unit.mp_max - 1);

        let far_unit = roster.get(far).unwrap();
        assert!(!far_unit.supplied);
        assert_eq!(far_unit.morale, 6);
    }

    #[test]
    fn test_tally_scores() {
        let mut roster = UnitRoster::new();
        roster.add(&UnitTemplate::new(Side::Ger, "A", HexCoord::new(1, 1)));
        roster.add(&UnitTemplate::new(Side::Sov, "B", HexCoord::new(3, 3)));
        roster.add(&UnitTemplate::new(Side::Sov, "C", HexCoord::new(4, 3)));
        let hill = ObjectiveTemplate::new("hill", HexCoord::new(1, 1), 2);
        let mut objectives = ObjectiveTracker::new(&[hill]);
        objectives.update(&roster);

        let outcome = GameOutcome::tally(&objectives, &roster);
        assert_eq!(outcome.scores, PerSide::new(3, 2));
        assert_eq!(outcome.winner, Some(Side::Ger));
    }

    #[test]
    fn test_equal_scores_draw() {
        let mut roster = UnitRoster::new();
        roster.add(&UnitTemplate::new(Side::Ger, "A", HexCoord::new(1, 1)));
        roster.add(&UnitTemplate::new(Side::Sov, "B", HexCoord::new(3, 3)));
        let outcome = GameOutcome::tally(&ObjectiveTracker::default(), &roster);
        assert!(outcome.is_draw());
    }
}
