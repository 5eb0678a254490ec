//! Property tests for hex math, reachability and the action API

use ahash::AHashMap;
use proptest::prelude::*;

use hexfront::battle::*;
use hexfront::core::Side;

const COLS: u32 = 8;
const ROWS: u32 = 8;

fn coord() -> impl Strategy<Value = HexCoord> {
    (-20i32..20, -20i32..20).prop_map(|(q, r)| HexCoord::new(q, r))
}

fn on_map() -> impl Strategy<Value = HexCoord> {
    (0..COLS as i32, 0..ROWS as i32).prop_map(|(q, r)| HexCoord::new(q, r))
}

fn terrain_grid() -> impl Strategy<Value = Vec<Terrain>> {
    prop::collection::vec(
        prop::sample::select(Terrain::ALL.to_vec()),
        (COLS * ROWS) as usize,
    )
}

fn build_field(grid: &[Terrain]) -> Battlefield {
    let mut field = Battlefield::new(COLS, ROWS, Terrain::Steppe);
    for (i, &terrain) in grid.iter().enumerate() {
        let q = (i as u32 % COLS) as i32;
        let r = (i as u32 / COLS) as i32;
        field.set_terrain(HexCoord::new(q, r), terrain);
    }
    field
}

/// Bellman-Ford over the whole map with the movement rules spelled out directly
fn reference_costs(
    field: &Battlefield,
    roster: &UnitRoster,
    unit: &Unit,
) -> AHashMap<HexCoord, u32> {
    let hostile = |c: HexCoord| roster.living().any(|u| u.side != unit.side && u.pos == c);
    let in_zoc = |c: HexCoord| c.neighbors().into_iter().any(hostile);

    let mut dist: AHashMap<HexCoord, u32> = AHashMap::new();
    dist.insert(unit.pos, 0);
    loop {
        let mut changed = false;
        let snapshot: Vec<(HexCoord, u32)> = dist.iter().map(|(&c, &d)| (c, d)).collect();
        for (from, d) in snapshot {
            for to in from.neighbors() {
                let Some(terrain_cost) = field.movement_cost_at(to) else {
                    continue;
                };
                if hostile(to) {
                    continue;
                }
                let penalty = u32::from(in_zoc(from) || in_zoc(to));
                let total = d + terrain_cost + penalty;
                if total <= unit.mp_left && dist.get(&to).map_or(true, |&known| total < known) {
                    dist.insert(to, total);
                    changed = true;
                }
            }
        }
        if !changed {
            return dist;
        }
    }
}

proptest! {
    #[test]
    fn test_distance_is_a_metric(a in coord(), b in coord(), c in coord()) {
        prop_assert_eq!(a.distance(&b), b.distance(&a));
        prop_assert_eq!(a.distance(&a), 0);
        prop_assert!(a.distance(&c) <= a.distance(&b) + b.distance(&c));
    }

    #[test]
    fn test_neighbors_are_adjacent(a in coord()) {
        for n in a.neighbors() {
            prop_assert_eq!(a.distance(&n), 1);
            prop_assert!(n.is_adjacent(&a));
        }
    }

    #[test]
    fn test_reachable_matches_reference(
        grid in terrain_grid(),
        start in on_map(),
        enemies in prop::collection::vec(on_map(), 0..4),
        friends in prop::collection::vec(on_map(), 0..3),
        mp in 0u32..7,
    ) {
        let field = build_field(&grid);
        prop_assume!(field.is_passable(start));

        let mut roster = UnitRoster::new();
        let template = UnitTemplate::new(Side::Ger, "Mover", start).with_stats(6, 6, mp, 8, 7);
        let mover = roster.add(&template);
        let mut taken = vec![start];
        for (i, pos) in enemies.iter().enumerate() {
            if !taken.contains(pos) {
                taken.push(*pos);
                roster.add(&UnitTemplate::new(Side::Sov, &format!("E{}", i), *pos));
            }
        }
        for (i, pos) in friends.iter().enumerate() {
            if !taken.contains(pos) {
                taken.push(*pos);
                roster.add(&UnitTemplate::new(Side::Ger, &format!("F{}", i), *pos));
            }
        }

        let unit = roster.get(mover).unwrap();
        let got = reachable(&field, &roster, unit);
        let want = reference_costs(&field, &roster, unit);

        prop_assert_eq!(got.len(), want.len());
        for hex in &got {
            prop_assert_eq!(Some(&hex.cost), want.get(&hex.coord));
            prop_assert_eq!(hex.mp_remaining, mp - hex.cost);
            prop_assert!(!roster.enemy_at(hex.coord, Side::Ger));
        }
        prop_assert!(got.windows(2).all(|w| w[0].cost <= w[1].cost));
    }
}

#[derive(Debug, Clone)]
enum Action {
    Move(usize, HexCoord),
    Attack(usize, usize),
    Bombard(usize),
    Fortify(usize),
    Resupply(usize),
    Hold(usize),
    EndTurn,
}

fn action() -> impl Strategy<Value = Action> {
    prop_oneof![
        3 => (0usize..6, on_map()).prop_map(|(u, c)| Action::Move(u, c)),
        3 => (0usize..6, 0usize..6).prop_map(|(a, d)| Action::Attack(a, d)),
        1 => (0usize..6).prop_map(Action::Bombard),
        1 => (0usize..6).prop_map(Action::Fortify),
        1 => (0usize..6).prop_map(Action::Resupply),
        1 => (0usize..6).prop_map(Action::Hold),
        2 => Just(Action::EndTurn),
    ]
}

fn template(side: Side, name: &str, q: i32, r: i32) -> UnitTemplate {
    UnitTemplate::new(side, name, HexCoord::new(q, r))
}

fn skirmish(seed: u64) -> BattleEngine {
    let mut field = Battlefield::new(COLS, ROWS, Terrain::Steppe);
    field.paint_rect(3..=4, 2..=3, Terrain::City);
    field.set_terrain(HexCoord::new(4, 6), Terrain::Marsh);
    let setup = BattleSetup::new(field)
        .with_unit(template(Side::Ger, "G1", 1, 2).with_stats(7, 5, 4, 4, 7))
        .with_unit(template(Side::Ger, "G2", 2, 4).with_stats(6, 6, 4, 4, 5))
        .with_unit(template(Side::Ger, "G3", 1, 6).with_stats(5, 6, 5, 3, 3))
        .with_unit(template(Side::Sov, "S1", 5, 2).with_stats(5, 7, 3, 4, 7))
        .with_unit(template(Side::Sov, "S2", 4, 4).with_stats(6, 6, 4, 3, 9))
        .with_unit(template(Side::Sov, "S3", 6, 6).with_stats(4, 5, 3, 2, 4))
        .with_objective(ObjectiveTemplate::new("square", HexCoord::new(3, 3), 2))
        .with_max_turn(4);
    BattleEngine::new(setup, Box::new(SeededDice::new(seed))).unwrap()
}

fn check_invariants(engine: &BattleEngine) -> Result<(), TestCaseError> {
    let mut occupied = Vec::new();
    for unit in engine.roster().all() {
        prop_assert!((MORALE_MIN..=MORALE_MAX).contains(&unit.morale));
        prop_assert!((0..=AMMO_MAX).contains(&unit.ammo));
        prop_assert!((0..=ENTRENCHMENT_MAX).contains(&unit.entrenchment));
        prop_assert!(unit.mp_left <= unit.mp_max);
        prop_assert_eq!(unit.alive, unit.hp > 0);
        if unit.alive {
            prop_assert!(engine.battlefield().is_passable(unit.pos));
            prop_assert!(!occupied.contains(&unit.pos));
            occupied.push(unit.pos);
        }
    }
    for objective in engine.objectives() {
        if let Some(unit) = engine.unit_at(objective.coord) {
            prop_assert_eq!(objective.owner, Some(unit.side));
        }
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_random_actions_keep_invariants(
        seed in any::<u64>(),
        actions in prop::collection::vec(action(), 1..60),
    ) {
        let mut engine = skirmish(seed);
        let ids: Vec<UnitId> = engine.roster().all().map(|u| u.id).collect();

        for action in actions {
            let before: Vec<Unit> = engine.roster().all().cloned().collect();
            let pools = (engine.support(Side::Ger), engine.support(Side::Sov));
            let events = engine.log().len();

            let accepted = match action {
                Action::Move(u, dest) => engine.request_move(ids[u], dest).is_ok(),
                Action::Attack(a, d) => engine.request_attack(ids[a], ids[d]).is_ok(),
                Action::Bombard(t) => engine.request_bombard(ids[t]).is_ok(),
                Action::Fortify(u) => engine.request_fortify(ids[u]).is_ok(),
                Action::Resupply(u) => engine.request_resupply(ids[u]).is_ok(),
                Action::Hold(u) => engine.request_hold(ids[u]).is_ok(),
                Action::EndTurn => engine.end_turn().is_ok(),
            };

            if !accepted {
                let after: Vec<Unit> = engine.roster().all().cloned().collect();
                prop_assert_eq!(&before, &after);
                prop_assert_eq!(pools, (engine.support(Side::Ger), engine.support(Side::Sov)));
                prop_assert_eq!(events, engine.log().len());
            }
            check_invariants(&engine)?;

            let terminal = engine.turn() > engine.max_turn()
                || Side::all().iter().any(|&s| engine.roster().living_count(s) == 0);
            prop_assert_eq!(engine.is_game_over(), terminal);
        }
    }
}
