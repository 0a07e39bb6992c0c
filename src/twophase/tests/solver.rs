use cube_core::moves::parse_sequence;
use cube_core::{CubeError, CubieCube, FaceletCube, Move, UnsolvableReason};
use itertools::Itertools;
use std::time::Duration;
use twophase::{SolveError, SolveOptions, Tables, solve, solve_cube};

fn assert_solves(cube: &CubieCube, solution: &[Move]) {
    let mut check = cube.clone();
    check.apply_moves(solution);
    assert!(
        check.is_solved(),
        "{} does not solve the cube",
        solution.iter().join(" ")
    );
}

#[test_log::test]
fn solved_cube_needs_no_moves() {
    let tables = Tables::shared();
    let solution = solve(tables, FaceletCube::SOLVED_STR, &SolveOptions::default()).unwrap();
    assert!(solution.is_empty());
    assert_eq!(solution.to_string(), "");
}

#[test_log::test]
fn single_quarter_turn_solves_with_its_inverse() {
    let tables = Tables::shared();
    for token in ["R", "R'", "U", "F2"] {
        let mv: Move = token.parse().unwrap();
        let mut cube = CubieCube::SOLVED;
        cube.apply_move(mv);
        let facelets = cube.to_facelets().to_string();
        let solution = solve(tables, &facelets, &SolveOptions::default()).unwrap();
        assert_eq!(solution.to_string(), mv.inverse().to_string());
    }
}

#[test_log::test]
fn short_scramble_stays_short_under_a_time_budget() {
    let tables = Tables::shared();
    let scramble = parse_sequence("R U F' D2 L").unwrap();
    let mut cube = CubieCube::SOLVED;
    cube.apply_moves(&scramble);
    let options = SolveOptions {
        time_budget: Some(Duration::from_millis(5000)),
        ..SolveOptions::default()
    };
    let solution = solve_cube(tables, &cube, &options).unwrap();
    assert!(solution.len() <= scramble.len(), "{solution}");
    assert_solves(&cube, solution.moves());
}

#[test_log::test]
fn random_cubes_solve_within_the_depth_limit() {
    let tables = Tables::shared();
    for _ in 0..3 {
        let cube = CubieCube::random();
        let solution = solve_cube(tables, &cube, &SolveOptions::default()).unwrap();
        assert!(solution.len() <= 21);
        assert_solves(&cube, solution.moves());
    }
}

#[test_log::test]
fn solutions_use_canonical_notation() {
    let tables = Tables::shared();
    let scramble = parse_sequence("F2 R' D L2 B U' R F2 D2 L'").unwrap();
    let mut cube = CubieCube::SOLVED;
    cube.apply_moves(&scramble);
    let solution = solve_cube(tables, &cube, &SolveOptions::default()).unwrap();
    assert_solves(&cube, solution.moves());
    // no token repeats a face back to back
    for (a, b) in solution.moves().iter().tuple_windows() {
        assert_ne!(a.face, b.face, "{solution}");
    }
    // the rendered string parses back to the same sequence
    assert_eq!(
        parse_sequence(&solution.to_string()).unwrap(),
        solution.moves()
    );
}

#[test_log::test]
fn validation_failures_surface_before_any_search() {
    let tables = Tables::shared();
    let options = SolveOptions::default();

    let err = solve(tables, &FaceletCube::SOLVED_STR[..53], &options).unwrap_err();
    assert!(matches!(
        err,
        SolveError::InvalidCube(CubeError::MalformedInput { .. })
    ));

    let mut unbalanced = FaceletCube::SOLVED_STR.to_owned();
    unbalanced.replace_range(27..28, "U");
    let err = solve(tables, &unbalanced, &options).unwrap_err();
    assert!(matches!(
        err,
        SolveError::InvalidCube(CubeError::StickerCount { .. })
    ));

    let mut flipped = FaceletCube::SOLVED_STR.to_owned().into_bytes();
    flipped[7] = b'F';
    flipped[19] = b'U';
    let err = solve(tables, &String::from_utf8(flipped).unwrap(), &options).unwrap_err();
    assert!(matches!(
        err,
        SolveError::InvalidCube(CubeError::UnsolvableState(UnsolvableReason::EdgeFlip))
    ));
}

#[test_log::test]
fn depth_limit_exhaustion_is_reported_with_the_phase() {
    let tables = Tables::shared();
    let mut cube = CubieCube::SOLVED;
    cube.apply_moves(&parse_sequence("R U F' L B").unwrap());
    let options = SolveOptions {
        max_depth: 1,
        ..SolveOptions::default()
    };
    let err = solve_cube(tables, &cube, &options).unwrap_err();
    assert!(matches!(
        err,
        SolveError::SearchExhausted {
            max_depth: 1,
            ..
        }
    ));
}

#[test_log::test]
fn node_budget_expiry_is_reported_when_nothing_was_found() {
    let tables = Tables::shared();
    let mut cube = CubieCube::SOLVED;
    cube.apply_moves(&parse_sequence("R U F' L B D2 R' U2 F L'").unwrap());
    let options = SolveOptions {
        node_budget: Some(2),
        ..SolveOptions::default()
    };
    let err = solve_cube(tables, &cube, &options).unwrap_err();
    assert!(matches!(err, SolveError::TimeLimitExceeded { .. }));
}

#[test_log::test]
fn a_time_budget_still_returns_a_complete_solution() {
    let tables = Tables::shared();
    let mut cube = CubieCube::SOLVED;
    cube.apply_moves(&parse_sequence("B2 L' U2 F D' R2 U L2 F' D").unwrap());
    let options = SolveOptions {
        time_budget: Some(Duration::from_millis(5000)),
        ..SolveOptions::default()
    };
    let solution = solve_cube(tables, &cube, &options).unwrap();
    assert_solves(&cube, solution.moves());
}
