//! Search tree stored as an arena of nodes addressed by index.

use rand::Rng;
use xiangqi_core::{legal_moves_into, manhattan, Board, Color, Move};

pub type NodeId = usize;

pub const ROOT: NodeId = 0;

#[derive(Debug, Clone)]
pub struct Node {
    pub board: Board,
    /// Side to move in `board`.
    pub to_move: Color,
    pub parent: Option<NodeId>,
    /// Move that led here from the parent.
    pub mv: Option<Move>,
    pub children: Vec<NodeId>,
    /// Accumulated playout results, always counted for the root color.
    pub wins: f64,
    pub visits: u32,
    pub untried: Vec<Move>,
}

impl Node {
    fn new(board: Board, to_move: Color, parent: Option<NodeId>, mv: Option<Move>) -> Self {
        let mut untried = Vec::new();
        let mut scratch = board.clone();
        legal_moves_into(&mut scratch, to_move, &mut untried);
        Self {
            board,
            to_move,
            parent,
            mv,
            children: Vec::new(),
            wins: 0.0,
            visits: 0,
            untried,
        }
    }

    pub fn is_fully_expanded(&self) -> bool {
        self.untried.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct Tree {
    nodes: Vec<Node>,
    root_color: Color,
}

impl Tree {
    pub fn new(board: Board, to_move: Color) -> Self {
        Self {
            nodes: vec![Node::new(board, to_move, None, None)],
            root_color: to_move,
        }
    }

    pub fn root_color(&self) -> Color {
        self.root_color
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// UCT score of `id` as seen from its parent, with a bonus for moves of
    /// the root color that close in on the enemy General.
    pub fn uct_value(&self, id: NodeId, exploration: f64, distance_weight: f64) -> f64 {
        let node = &self.nodes[id];
        let Some(parent) = node.parent.map(|p| &self.nodes[p]) else {
            return 0.0;
        };
        if node.visits == 0 {
            return f64::INFINITY;
        }
        let visits = node.visits as f64;
        let mut uct = node.wins / visits
            + exploration * ((parent.visits as f64).ln() / visits).sqrt();

        if parent.to_move == self.root_color {
            if let (Some(mv), Some(target)) =
                (node.mv, parent.board.general_sq(self.root_color.other()))
            {
                let delta = manhattan(mv.to, target) - manhattan(mv.from, target);
                uct += distance_weight * -(delta as f64);
            }
        }
        uct
    }

    /// Walks down through fully expanded nodes, always taking the child
    /// with the highest UCT value. Returns the node reached and its depth.
    pub fn select(&self, exploration: f64, distance_weight: f64) -> (NodeId, u32) {
        let mut id = ROOT;
        let mut depth = 0;
        loop {
            let node = &self.nodes[id];
            if !node.is_fully_expanded() || node.children.is_empty() {
                return (id, depth);
            }
            let mut best = node.children[0];
            let mut best_value = f64::NEG_INFINITY;
            for &child in &node.children {
                let value = self.uct_value(child, exploration, distance_weight);
                if value > best_value {
                    best = child;
                    best_value = value;
                }
            }
            id = best;
            depth += 1;
        }
    }

    /// Materializes one untried move of `id` as a new child. On the root
    /// color's turn the move landing closest to the enemy General is taken,
    /// otherwise a random one. Returns `id` itself when nothing is left.
    pub fn expand<R: Rng>(&mut self, id: NodeId, rng: &mut R) -> NodeId {
        let node = &self.nodes[id];
        if node.untried.is_empty() {
            return id;
        }

        let target = if node.to_move == self.root_color {
            node.board.general_sq(node.to_move.other())
        } else {
            None
        };
        let pick = match target {
            Some(target) => node
                .untried
                .iter()
                .enumerate()
                .min_by_key(|(_, m)| manhattan(m.to, target))
                .map_or(0, |(i, _)| i),
            None => rng.gen_range(0..node.untried.len()),
        };

        let node = &mut self.nodes[id];
        let mv = node.untried.remove(pick);
        let mut board = node.board.clone();
        board.make_move(mv);
        let child = Node::new(board, node.to_move.other(), Some(id), Some(mv));

        let child_id = self.nodes.len();
        self.nodes.push(child);
        self.nodes[id].children.push(child_id);
        child_id
    }

    /// Adds one playout result to `id` and every ancestor.
    pub fn backpropagate(&mut self, id: NodeId, result: f64) {
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            let node = &mut self.nodes[current];
            node.visits += 1;
            node.wins += result;
            cursor = node.parent;
        }
    }

    /// The root move whose child was visited most; the earliest expanded
    /// wins a tie.
    pub fn most_visited(&self) -> Option<(Move, &Node)> {
        self.nodes[ROOT]
            .children
            .iter()
            .rev()
            .map(|&c| &self.nodes[c])
            .max_by_key(|n| n.visits)
            .and_then(|n| n.mv.map(|mv| (mv, n)))
    }
}

#[cfg(test)]
#[path = "tree_tests.rs"]
mod tree_tests;
