use vitalis_core::rule::RuleSpec;
use vitalis_core::vitality::VitalityCurve;
use vitalis_core::{Automaton, Boundary, Neighborhood};

fn engine(w: usize, h: usize, rule: RuleSpec) -> Automaton {
    Automaton::with_rule(w, h, rule).expect("failed to create engine")
}

fn conway(boundary: Boundary) -> RuleSpec {
    RuleSpec {
        boundary,
        ..RuleSpec::default()
    }
}

fn place(engine: &mut Automaton, cells: &[(usize, usize)]) {
    for &(x, y) in cells {
        engine.set_cell(x, y, 1);
    }
}

fn alive_cells(engine: &Automaton) -> Vec<(usize, usize)> {
    let w = engine.width();
    engine
        .snapshot()
        .iter()
        .enumerate()
        .filter(|&(_, &s)| s == 1)
        .map(|(i, _)| (i % w, i / w))
        .collect()
}

#[test]
fn test_blinker_oscillates_period_two() {
    // 5x5 torus, Conway rule, horizontal triple at the center row.
    let mut engine = engine(5, 5, conway(Boundary::Torus));
    place(&mut engine, &[(1, 2), (2, 2), (3, 2)]);

    engine.step();
    assert_eq!(alive_cells(&engine), vec![(2, 1), (2, 2), (2, 3)]);

    engine.step();
    assert_eq!(alive_cells(&engine), vec![(1, 2), (2, 2), (3, 2)]);
}

#[test]
fn test_glider_translates_diagonally_every_four_steps() {
    let glider = [(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)];
    let mut engine = engine(16, 16, conway(Boundary::Torus));
    place(&mut engine, &glider);

    for _ in 0..4 {
        engine.step();
    }
    let mut expected: Vec<_> = glider.iter().map(|&(x, y)| (x + 1, y + 1)).collect();
    expected.sort();
    let mut moved = alive_cells(&engine);
    moved.sort();
    assert_eq!(moved, expected);

    // Another 4 steps, another diagonal hop.
    for _ in 0..4 {
        engine.step();
    }
    let mut expected: Vec<_> = glider.iter().map(|&(x, y)| (x + 2, y + 2)).collect();
    expected.sort();
    let mut moved = alive_cells(&engine);
    moved.sort();
    assert_eq!(moved, expected);
}

#[test]
fn test_plane_edge_starves_corner_cell() {
    // A single corner cell on a plane has no neighbors and no cell can
    // reach three alive neighbors, so the grid empties in one step.
    let mut engine = engine(5, 5, conway(Boundary::Plane));
    place(&mut engine, &[(0, 0)]);

    assert_eq!(engine.effective_neighbors(1, 0), 1);
    assert_eq!(engine.effective_neighbors(0, 1), 1);
    assert_eq!(engine.effective_neighbors(1, 1), 1);

    engine.step();
    assert_eq!(engine.alive_count(), 0);
    assert!(engine.snapshot().iter().all(|&s| s == 0));
}

#[test]
fn test_generations_decay_walks_the_chain() {
    // With empty masks the center cell fails survival immediately and
    // walks 1 -> 2 -> 3 -> 0.
    let rule = RuleSpec::new(&[], &[], 4, Neighborhood::Moore, Boundary::Plane).unwrap();
    let mut engine = engine(3, 3, rule);
    place(&mut engine, &[(1, 1)]);

    engine.step();
    assert_eq!(engine.get_cell(1, 1), 2);
    engine.step();
    assert_eq!(engine.get_cell(1, 1), 3);
    engine.step();
    assert_eq!(engine.get_cell(1, 1), 0);
}

#[test]
fn test_decay_chain_length_matches_state_count() {
    // A lone alive cell under an N-state rule takes exactly N - 1
    // further steps to die: 1 -> 2 -> ... -> N-1 -> 0.
    for n in [3u16, 6, 9] {
        let rule = RuleSpec::new(&[], &[], n, Neighborhood::Moore, Boundary::Plane).unwrap();
        let mut engine = engine(3, 3, rule);
        place(&mut engine, &[(1, 1)]);

        for expected in 2..n {
            engine.step();
            assert_eq!(engine.get_cell(1, 1), expected, "chain under {n} states");
        }
        engine.step();
        assert_eq!(engine.get_cell(1, 1), 0);
    }
}

#[test]
fn test_hex_ring_feeds_center_exactly_six() {
    // Odd-r hexagonal lattice: the six neighbors of the odd-row center
    // (2,1) form a ring. Under B6/S6 only the center survives.
    let rule = RuleSpec::new(&[6], &[6], 2, Neighborhood::Hexagonal, Boundary::Plane).unwrap();
    let ring = [(2, 0), (3, 0), (1, 1), (3, 1), (2, 2), (3, 2)];
    let mut engine = engine(5, 5, rule);
    place(&mut engine, &[(2, 1)]);
    place(&mut engine, &ring);

    assert_eq!(engine.effective_neighbors(2, 1), 6);
    for &(x, y) in &ring {
        // Ring members see the center plus their two ring mates.
        assert_eq!(engine.effective_neighbors(x, y), 3, "ring cell ({x},{y})");
    }

    engine.step();
    assert_eq!(alive_cells(&engine), vec![(2, 1)]);
}

#[test]
fn test_vitality_tips_survival_threshold() {
    // 3x3 torus, B3/S23 with four states. The focal cell (0,0) has one
    // alive neighbor and one fresh-decay neighbor. With the identity
    // curve the decay cell weighs in at 1, lifting the effective count
    // to 2: survival. With the neutral curve the cell starves.
    let setup = |engine: &mut Automaton| {
        place(engine, &[(0, 0), (0, 1)]);
        engine.set_cell(1, 1, 2);
    };

    let mut rule = RuleSpec::parse_rulestring("B3/S23/G4").unwrap();
    rule.boundary = Boundary::Torus;

    let mut with_vitality = engine(3, 3, rule);
    with_vitality
        .set_vitality(VitalityCurve::from_points(&[(0.0, 0.0), (1.0, 1.0)]))
        .unwrap();
    setup(&mut with_vitality);
    assert_eq!(with_vitality.effective_neighbors(0, 0), 2);
    with_vitality.step();
    assert_eq!(with_vitality.get_cell(0, 0), 1, "survives with vitality");

    let mut without = engine(3, 3, rule);
    setup(&mut without);
    assert_eq!(without.effective_neighbors(0, 0), 1);
    without.step();
    assert_eq!(without.get_cell(0, 0), 2, "starves into decay without");
}

#[test]
fn test_state_range_invariant_over_random_soup() {
    let rule = RuleSpec::parse_rulestring("B2/S35/G7").unwrap();
    let mut engine = engine(48, 32, rule);
    engine.randomize(0.4, true);
    engine
        .set_vitality(VitalityCurve::from_points(&[(0.0, -1.0), (1.0, 2.0)]))
        .unwrap();

    for _ in 0..20 {
        engine.step();
        assert!(engine.snapshot().iter().all(|&s| s < 7));
    }
}

#[test]
fn test_step_is_pure_function_of_front_buffer() {
    let mut engine = engine(16, 16, conway(Boundary::Torus));
    engine.randomize(0.35, false);
    let saved = engine.snapshot().to_vec();

    engine.step();
    let first = engine.snapshot().to_vec();

    engine.load(&saved).unwrap();
    engine.step();
    let second = engine.snapshot().to_vec();

    assert_eq!(first, second);
}

#[test]
fn test_neutral_curve_matches_classical_count() {
    // With the zero curve, decaying cells must be invisible to the
    // aggregate: counts equal those of a grid with decay cells erased.
    let mut rule = RuleSpec::parse_rulestring("B3/S23/G5").unwrap();
    rule.boundary = Boundary::Torus;
    let mut soup = engine(12, 12, rule);
    soup.randomize(0.3, true);

    let mut erased = engine(12, 12, rule);
    let projected: Vec<u16> = soup
        .snapshot()
        .iter()
        .map(|&s| u16::from(s == 1))
        .collect();
    erased.load(&projected).unwrap();

    for y in 0..12 {
        for x in 0..12 {
            assert_eq!(
                soup.effective_neighbors(x, y),
                erased.effective_neighbors(x, y),
                "cell ({x},{y})"
            );
        }
    }
}

#[test]
fn test_mobius_crossing_mirrors_row() {
    // W=3, H=4 Moebius strip along X. The right edge of the last row
    // meets the first row's left cell after the flip.
    let mut engine = engine(3, 4, conway(Boundary::MobiusX));
    place(&mut engine, &[(0, 0)]);

    assert_eq!(engine.effective_neighbors(2, 3), 1);
    assert_eq!(engine.effective_neighbors(2, 0), 0);
}

#[test]
fn test_vitality_table_endpoints_expose_anchor_values() {
    let mut engine = engine(4, 4, conway(Boundary::Torus));
    engine
        .set_vitality(VitalityCurve::from_points(&[(0.0, -0.75), (1.0, 1.25)]))
        .unwrap();
    let samples = engine.vitality_table().samples();
    assert_eq!(samples[0], -0.75);
    assert_eq!(samples[127], 1.25);
}

#[test]
fn test_rule_update_preserves_front_buffer() {
    let mut engine = engine(8, 8, conway(Boundary::Torus));
    place(&mut engine, &[(3, 3), (4, 3), (5, 3)]);
    let before = engine.snapshot().to_vec();

    let mut hex = RuleSpec::parse_rulestring("B2/S34").unwrap();
    hex.neighborhood = Neighborhood::Hexagonal;
    engine.set_rule(hex).unwrap();

    assert_eq!(engine.snapshot(), before.as_slice());
    assert_eq!(engine.rule().neighborhood, Neighborhood::Hexagonal);
}

#[test]
fn test_generation_counter_is_monotonic() {
    let mut engine = engine(8, 8, conway(Boundary::Torus));
    assert_eq!(engine.generation(), 0);
    for expected in 1..=10 {
        engine.step();
        assert_eq!(engine.generation(), expected);
    }
}

#[test]
fn test_extended_hex_wraps_torus_without_panic() {
    // Distance-two hex offsets on a tiny torus exercise multi-wrap
    // resolution on both axes.
    let rule = RuleSpec::new(
        &[2],
        &[1, 2],
        2,
        Neighborhood::ExtendedHexagonal,
        Boundary::Torus,
    )
    .unwrap();
    let mut engine = engine(2, 2, rule);
    place(&mut engine, &[(0, 0)]);
    for _ in 0..4 {
        engine.step();
    }
    assert!(engine.snapshot().iter().all(|&s| s <= 1));
}
