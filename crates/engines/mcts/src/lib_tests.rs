use std::time::Duration;

use super::*;
use xiangqi_core::legal_moves;

const BLACK_MATED: &str = "R3k4/8R/9/9/9/9/9/9/9/3K5 b";

fn quick_params() -> MctsParams {
    MctsParams {
        playout: PlayoutParams {
            max_plies: 8,
            greedy_rate: 0.8,
        },
        ..MctsParams::default()
    }
}

#[test]
fn mcts_returns_legal_move() {
    let mut engine = MctsEngine::with_seed(quick_params(), 11);
    let state = GameState::startpos();
    let limits = SearchLimits::default().with_nodes(Some(30));

    let result = engine.search(&state, limits);

    let mv = result.best_move.unwrap();
    assert!(legal_moves(&state.board, Color::Red).contains(&mv));
    assert_eq!(result.nodes, 30);
    assert_eq!(engine.iterations(), 30);
}

#[test]
fn mcts_handles_checkmate() {
    let mut engine = MctsEngine::with_seed(quick_params(), 1);
    let state = GameState::from_fen(BLACK_MATED).unwrap();

    let result = engine.search(&state, SearchLimits::default().with_nodes(Some(10)));

    assert!(result.best_move.is_none());
    assert_eq!(result.nodes, 0);
}

#[test]
fn mcts_expired_clock_still_moves() {
    let mut engine = MctsEngine::with_seed(quick_params(), 5);
    let state = GameState::startpos();

    let result = engine.search(&state, SearchLimits::time(Duration::ZERO));

    assert!(result.best_move.is_some());
    assert_eq!(result.nodes, 1);
}

#[test]
fn seeded_searches_are_reproducible() {
    let state = GameState::startpos();
    let run = |seed| {
        let mut engine = MctsEngine::with_seed(quick_params(), seed);
        engine
            .search(&state, SearchLimits::default().with_nodes(Some(40)))
            .best_move
    };
    assert_eq!(run(42), run(42));
}

#[test]
fn set_option_updates_params() {
    let mut engine = MctsEngine::default();
    assert!(engine.set_option("Exploration", "0.5"));
    assert_eq!(engine.params().exploration, 0.5);
    assert!(!engine.set_option("Exploration", "-1"));
    assert!(!engine.set_option("Exploration", "NaN"));
    assert!(engine.set_option("Seed", "9"));
    assert!(!engine.set_option("Hash", "16"));
}

#[test]
fn playout_from_mated_position() {
    let state = GameState::from_fen(BLACK_MATED).unwrap();
    let mut rng = StdRng::seed_from_u64(0);
    let params = PlayoutParams::default();
    assert_eq!(playout(&state.board, Color::Black, Color::Red, params, &mut rng), 1.0);
    assert_eq!(playout(&state.board, Color::Black, Color::Black, params, &mut rng), 0.0);
}

#[test]
fn playout_result_stays_in_unit_range() {
    let mut rng = StdRng::seed_from_u64(8);
    let params = PlayoutParams {
        max_plies: 6,
        greedy_rate: 0.8,
    };
    for _ in 0..3 {
        let r = playout(&Board::startpos(), Color::Red, Color::Red, params, &mut rng);
        assert!((0.0..=1.0).contains(&r));
    }
}

#[test]
fn eval_mapping() {
    assert_eq!(eval_to_result(2_000), 1.0);
    assert_eq!(eval_to_result(-2_000), 0.0);
    assert_eq!(eval_to_result(0), 0.5);
    assert_eq!(eval_to_result(1_000), 0.6);
}

#[test]
fn get_best_move_respects_budget() {
    let state = GameState::startpos();
    let start = std::time::Instant::now();
    let mv = get_best_move(
        &state.board,
        Color::Red,
        Duration::from_millis(100),
        &quick_params(),
    )
    .unwrap();
    assert!(legal_moves(&state.board, Color::Red).contains(&mv));
    assert!(start.elapsed() < Duration::from_secs(5));

    let mated = GameState::from_fen(BLACK_MATED).unwrap();
    assert_eq!(
        get_best_move(&mated.board, Color::Black, Duration::from_millis(50), &quick_params()),
        None
    );
}
