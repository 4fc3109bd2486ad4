use rand::rngs::StdRng;
use rand::SeedableRng;

use super::*;
use xiangqi_core::{legal_moves, GameState};

fn start_tree() -> Tree {
    Tree::new(Board::startpos(), Color::Red)
}

#[test]
fn test_root_holds_all_legal_moves() {
    let tree = start_tree();
    assert_eq!(tree.len(), 1);
    assert_eq!(tree.root_color(), Color::Red);
    assert_eq!(tree.node(ROOT).untried.len(), 44);
    assert_eq!(tree.select(1.41, 0.1), (ROOT, 0));
}

#[test]
fn test_expand_for_root_color_closes_in_on_general() {
    let mut tree = start_tree();
    let mut rng = StdRng::seed_from_u64(1);
    let target = Board::startpos().general_sq(Color::Black).unwrap();
    let closest = legal_moves(&Board::startpos(), Color::Red)
        .iter()
        .map(|m| manhattan(m.to, target))
        .min()
        .unwrap();

    let child = tree.expand(ROOT, &mut rng);
    let node = tree.node(child);
    assert_eq!(node.parent, Some(ROOT));
    assert_eq!(node.to_move, Color::Black);
    assert_eq!(manhattan(node.mv.unwrap().to, target), closest);
    assert_eq!(tree.node(ROOT).untried.len(), 43);
    assert_eq!(tree.node(ROOT).children, vec![child]);
}

#[test]
fn test_expand_for_opponent_is_random_but_legal() {
    let mut tree = start_tree();
    let mut rng = StdRng::seed_from_u64(3);
    let child = tree.expand(ROOT, &mut rng);
    let grandchild = tree.expand(child, &mut rng);

    let parent = tree.node(child);
    let node = tree.node(grandchild);
    assert_eq!(node.to_move, Color::Red);
    assert!(legal_moves(&parent.board, Color::Black).contains(&node.mv.unwrap()));
}

#[test]
fn test_expand_without_moves_returns_same_node() {
    let state = GameState::from_fen("R3k4/8R/9/9/9/9/9/9/9/3K5 b").unwrap();
    let mut tree = Tree::new(state.board, Color::Black);
    let mut rng = StdRng::seed_from_u64(0);
    assert_eq!(tree.expand(ROOT, &mut rng), ROOT);
    assert_eq!(tree.len(), 1);
}

#[test]
fn test_backpropagate_reaches_root() {
    let mut tree = start_tree();
    let mut rng = StdRng::seed_from_u64(1);
    let child = tree.expand(ROOT, &mut rng);
    let grandchild = tree.expand(child, &mut rng);
    tree.backpropagate(grandchild, 0.25);
    tree.backpropagate(child, 1.0);

    assert_eq!(tree.node(ROOT).visits, 2);
    assert_eq!(tree.node(ROOT).wins, 1.25);
    assert_eq!(tree.node(child).visits, 2);
    assert_eq!(tree.node(grandchild).visits, 1);
}

#[test]
fn test_uct_value() {
    let mut tree = start_tree();
    let mut rng = StdRng::seed_from_u64(1);
    let child = tree.expand(ROOT, &mut rng);
    assert_eq!(tree.uct_value(child, 1.41, 0.1), f64::INFINITY);

    tree.backpropagate(child, 1.0);
    // ln(1) = 0, so only the win rate and the distance term remain.
    assert!((tree.uct_value(child, 1.41, 0.0) - 1.0).abs() < 1e-9);
    let mv = tree.node(child).mv.unwrap();
    let target = Board::startpos().general_sq(Color::Black).unwrap();
    let closer = (manhattan(mv.from, target) - manhattan(mv.to, target)) as f64;
    assert!(closer > 0.0);
    assert!((tree.uct_value(child, 1.41, 0.1) - (1.0 + 0.1 * closer)).abs() < 1e-9);
}

#[test]
fn test_most_visited() {
    let mut tree = start_tree();
    let mut rng = StdRng::seed_from_u64(1);
    assert!(tree.most_visited().is_none());

    let a = tree.expand(ROOT, &mut rng);
    let b = tree.expand(ROOT, &mut rng);
    tree.backpropagate(a, 0.0);
    tree.backpropagate(b, 1.0);
    tree.backpropagate(b, 1.0);
    let (mv, node) = tree.most_visited().unwrap();
    assert_eq!(Some(mv), tree.node(b).mv);
    assert_eq!(node.visits, 2);
}
