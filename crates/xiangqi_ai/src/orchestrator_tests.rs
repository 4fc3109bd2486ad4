use super::*;
use xiangqi_core::is_legal;

const MATE_IN_ONE: &str = "4k4/8R/9/9/9/R8/9/9/9/3K5 w";
/// Black General in check from the d-file Chariot; e9 is its only square.
const BLACK_IN_CHECK: &str = "3k5/9/9/9/9/3R5/9/9/9/5K3 b";
const BLACK_MATED: &str = "R3k4/8R/9/9/9/9/9/9/9/3K5 b";

fn quick_config(strategy: Strategy) -> SearchConfig {
    SearchConfig {
        total_time_ms: 5_000,
        max_mate_depth: 1,
        strategy,
        playout_plies: 8,
        alpha_beta_depth: 2,
        max_iterations: Some(30),
        seed: Some(11),
        ..Default::default()
    }
}

fn state(fen: &str) -> GameState {
    GameState::from_fen(fen).unwrap()
}

#[test]
fn test_escapes_check() {
    let decision = choose_move(&state(BLACK_IN_CHECK), &quick_config(Strategy::Mcts));
    assert_eq!(decision.source, DecisionSource::CheckEscape);
    assert_eq!(decision.mv, Some(Move::from_coord("d9e9").unwrap()));

    let mut board = state(BLACK_IN_CHECK).board;
    board.make_move(decision.mv.unwrap());
    assert_eq!(decision.score, evaluate(&board, Color::Black));
    assert!(decision.nodes >= 1);
}

#[test]
fn test_plays_forced_mate() {
    let decision = choose_move(&state(MATE_IN_ONE), &quick_config(Strategy::Mcts));
    assert_eq!(decision.source, DecisionSource::ForcedMate);
    assert_eq!(decision.mv, Some(Move::from_coord("a4a9").unwrap()));
    assert_eq!(decision.line.len(), 1);
    assert_eq!(decision.score, CHECKMATE_SCORE);
    assert_eq!(decision.depth, 1);
    assert!(decision.nodes >= 1);
}

#[test]
fn test_no_move_when_mated() {
    let decision = choose_move(&state(BLACK_MATED), &SearchConfig::default());
    assert_eq!(decision.mv, None);
    assert_eq!(decision.source, DecisionSource::NoMove);
}

#[test]
fn test_zero_budget_still_moves() {
    let start = GameState::startpos();
    let config = SearchConfig {
        total_time_ms: 0,
        ..quick_config(Strategy::Mcts)
    };
    let decision = choose_move(&start, &config);
    assert_eq!(decision.source, DecisionSource::Random);
    let mv = decision.mv.unwrap();
    assert!(is_legal(&start.board, mv));
}

#[test]
fn test_tree_search_strategy() {
    let start = GameState::startpos();
    let decision = choose_move(&start, &quick_config(Strategy::Mcts));
    assert_eq!(decision.source, DecisionSource::Mcts);
    assert!(is_legal(&start.board, decision.mv.unwrap()));
}

#[test]
fn test_alpha_beta_strategy() {
    let start = GameState::startpos();
    let decision = choose_move(&start, &quick_config(Strategy::AlphaBeta));
    assert_eq!(decision.source, DecisionSource::AlphaBeta);
    assert!(is_legal(&start.board, decision.mv.unwrap()));
    assert!(decision.depth >= 1);
    assert!(decision.nodes > 0);
}

#[test]
fn test_seeded_decisions_repeat() {
    let start = GameState::startpos();
    let config = quick_config(Strategy::Mcts);
    assert_eq!(choose_move(&start, &config), choose_move(&start, &config));
}

#[test]
fn test_engine_interface() {
    let mut ai = XiangqiAi::new(quick_config(Strategy::AlphaBeta));
    let result = ai.search(&state(MATE_IN_ONE), SearchLimits::depth(1));
    assert_eq!(result.best_move, Some(Move::from_coord("a4a9").unwrap()));
    assert_eq!(result.score, CHECKMATE_SCORE);
    assert_eq!(result.depth, 1);
    assert!(result.nodes > 0);

    let result = ai.search(&state(BLACK_MATED), SearchLimits::default());
    assert_eq!(result.best_move, None);
}

#[test]
fn test_set_option_updates_config() {
    let mut ai = XiangqiAi::default();
    assert!(ai.set_option("Strategy", "alpha-beta"));
    assert!(ai.set_option("MateDepth", "3"));
    assert!(ai.set_option("Seed", "5"));
    assert_eq!(ai.config().strategy, Strategy::AlphaBeta);
    assert_eq!(ai.config().max_mate_depth, 3);
    assert_eq!(ai.config().seed, Some(5));
    assert!(!ai.set_option("Strategy", "greedy"));
    assert!(!ai.set_option("Hash", "64"));
}
