//! Search nodes and the arena that owns them.
//!
//! A `State` is a board snapshot plus its path cost `g`, a memoized heuristic value and
//! the index of its parent. Nodes live in a `SearchTree` and refer to their parent by
//! `NodeId`, so the chain back to the root is plain data and cannot form a cycle: every
//! child is pushed after its parent.
use crate::engine::{Board, BoardKey, Direction};
use crate::heuristics::Heuristic;
use std::ops::Index;

/// Lifecycle of a puzzle with respect to solving.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Status {
    /// Not solved yet.
    #[default]
    Ready,
    /// A search is in progress.
    Solving,
    /// A goal was reached.
    Done,
    /// The parity test failed; no search was run.
    Unsolvable,
}

/// Index of a node inside a `SearchTree`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(&self) -> usize {
        self.0
    }
}

#[derive(Clone, Debug)]
pub struct State {
    board: Board,
    g: usize,
    /// Only valid for the heuristic used by the search that evaluated it.
    h: Option<f64>,
    parent: Option<NodeId>,
    status: Status,
}

impl State {
    /// A search root: `g = 0`, no parent.
    pub fn root(board: Board) -> Self {
        State {
            board,
            g: 0,
            h: None,
            parent: None,
            status: Status::Ready,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn into_board(self) -> Board {
        self.board
    }

    pub fn size(&self) -> usize {
        self.board.size()
    }

    /// Moves from the search root.
    pub fn g(&self) -> usize {
        self.g
    }

    /// Cached heuristic value, if this node has been evaluated.
    pub fn h(&self) -> Option<f64> {
        self.h
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub(crate) fn set_status(&mut self, status: Status) {
        self.status = status;
    }

    pub fn key(&self) -> BoardKey {
        self.board.key()
    }

    pub fn is_goal(&self) -> bool {
        self.board.is_solved()
    }

    /// Evaluates `heuristic` on first call and returns the cached value afterwards.
    ///
    /// A node must only ever be evaluated against one heuristic.
    pub fn heuristic_value(&mut self, heuristic: Heuristic) -> f64 {
        if let Some(h) = self.h {
            return h;
        }
        let h = heuristic.evaluate(&self.board);
        self.h = Some(h);
        h
    }

    /// `g + h`, the A* ranking.
    pub fn total_cost(&mut self, heuristic: Heuristic) -> f64 {
        self.g as f64 + self.heuristic_value(heuristic)
    }

    /// Lazily yields one child per legal slide (up, down, right, left), each with
    /// `g + 1`. Children are detached; `SearchTree::attach` links them to a parent.
    pub fn expand(&self) -> Expand<'_> {
        Expand {
            parent: self,
            next_direction: 0,
        }
    }

    /// The node's text form: two comment lines followed by the board's canonical text.
    pub fn to_text(&self) -> String {
        let h = match self.h {
            Some(h) => h.to_string(),
            None => "unknown".to_string(),
        };
        format!(
            "# Permutations done: {}\n# Heuristic distance to finish: {}\n{}",
            self.g,
            h,
            self.board.to_text()
        )
    }
}

/// Equality is board content only; `g`, `h` and the parent link are ignored.
impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.board == other.board
    }
}

impl Eq for State {}

/// Iterator returned by `State::expand`.
pub struct Expand<'a> {
    parent: &'a State,
    next_direction: usize,
}

impl Iterator for Expand<'_> {
    type Item = State;

    fn next(&mut self) -> Option<State> {
        while let Some(&dir) = Direction::ALL.get(self.next_direction) {
            self.next_direction += 1;
            if let Some(board) = self.parent.board.slide(dir) {
                return Some(State {
                    board,
                    g: self.parent.g + 1,
                    h: None,
                    parent: None,
                    status: Status::Ready,
                });
            }
        }
        None
    }
}

/// Arena owning every node created by one search.
#[derive(Debug, Default)]
pub struct SearchTree {
    nodes: Vec<State>,
}

impl SearchTree {
    pub fn new() -> Self {
        SearchTree { nodes: Vec::new() }
    }

    /// Adds a parentless node.
    pub fn push_root(&mut self, mut state: State) -> NodeId {
        state.parent = None;
        self.nodes.push(state);
        NodeId(self.nodes.len() - 1)
    }

    /// Adds `child` and links it to `parent`.
    ///
    /// # Panics
    /// Panics if `parent` was not created by this tree.
    pub fn attach(&mut self, parent: NodeId, mut child: State) -> NodeId {
        assert!(parent.0 < self.nodes.len(), "parent {:?} is not in this tree", parent);
        child.parent = Some(parent);
        self.nodes.push(child);
        NodeId(self.nodes.len() - 1)
    }

    pub fn get(&self, id: NodeId) -> &State {
        &self.nodes[id.0]
    }

    pub fn get_mut(&mut self, id: NodeId) -> &mut State {
        &mut self.nodes[id.0]
    }

    /// Children of `id`, materialized so the tree can be mutated while attaching them.
    pub fn children(&self, id: NodeId) -> Vec<State> {
        self.get(id).expand().collect()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Follows parent links from `goal` back to the root and returns the path root first.
    ///
    /// The returned states are re-linked so that each one's parent is the index of
    /// its predecessor in the returned vector.
    pub fn history(&self, goal: NodeId) -> Vec<State> {
        let mut path = Vec::with_capacity(self.get(goal).g + 1);
        let mut cursor = Some(goal);
        while let Some(id) = cursor {
            let state = self.get(id);
            path.push(state.clone());
            cursor = state.parent;
        }
        path.reverse();
        for (i, state) in path.iter_mut().enumerate() {
            state.parent = i.checked_sub(1).map(NodeId);
        }
        path
    }
}

impl Index<NodeId> for SearchTree {
    type Output = State;

    fn index(&self, id: NodeId) -> &State {
        self.get(id)
    }
}
