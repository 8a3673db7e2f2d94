//! An explicit game tree for exercising the search. Every level of the tree belongs to whichever
//! agent the search expects to move there, so the tree has to be built with the agent order in
//! mind.

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use rand::Rng;

use crate::{Action, AgentIndex, GameState};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Branch {
    Take(usize),
    Stay,
}

impl Action for Branch {
    fn no_op() -> Self {
        Branch::Stay
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Tree {
    Node { score: f64, children: Vec<Tree> },
    Win(f64),
    Lose(f64),
}

pub(crate) fn leaf(score: f64) -> Tree {
    Tree::Node {
        score,
        children: vec![],
    }
}

pub(crate) fn node(children: Vec<Tree>) -> Tree {
    Tree::Node {
        score: 0.0,
        children,
    }
}

/// A full tree with `plies` levels below the root, where every leaf value comes from `values`
/// in order
pub(crate) fn uniform(
    plies: usize,
    branching: usize,
    values: &mut impl Iterator<Item = f64>,
) -> Tree {
    if plies == 0 {
        return leaf(values.next().unwrap_or_default());
    }

    node((0..branching).map(|_| uniform(plies - 1, branching, values)).collect())
}

/// A random tree with small integer values so ties show up often. Some subtrees end the game
/// early
pub(crate) fn random_tree(rng: &mut impl Rng, plies: usize) -> Tree {
    let score = rng.gen_range(-6..=6) as f64;

    if plies == 0 {
        return leaf(score);
    }

    match rng.gen_range(0..20) {
        0 => Tree::Win(score + 20.0),
        1 => Tree::Lose(score - 20.0),
        _ => {
            let branching = rng.gen_range(1..=3);
            Tree::Node {
                score,
                children: (0..branching).map(|_| random_tree(rng, plies - 1)).collect(),
            }
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct Calls {
    pub(crate) legal_actions: AtomicUsize,
    pub(crate) successors: AtomicUsize,
}

impl Calls {
    pub(crate) fn legal_actions(&self) -> usize {
        self.legal_actions.load(Ordering::Relaxed)
    }

    pub(crate) fn successors(&self) -> usize {
        self.successors.load(Ordering::Relaxed)
    }
}

#[derive(Debug, Clone)]
pub(crate) struct TreeState {
    tree: Arc<Tree>,
    num_agents: usize,
    pub(crate) calls: Arc<Calls>,
}

impl TreeState {
    pub(crate) fn new(tree: Tree, num_agents: usize) -> Self {
        Self {
            tree: Arc::new(tree),
            num_agents,
            calls: Default::default(),
        }
    }

    pub(crate) fn leaf(score: f64) -> Self {
        Self::new(leaf(score), 2)
    }

    fn children(&self) -> &[Tree] {
        match self.tree.as_ref() {
            Tree::Node { children, .. } => children,
            Tree::Win(_) | Tree::Lose(_) => &[],
        }
    }
}

impl GameState for TreeState {
    type Action = Branch;

    fn num_agents(&self) -> usize {
        self.num_agents
    }

    fn legal_actions(&self, agent: AgentIndex) -> Vec<Branch> {
        assert!(agent.as_index() < self.num_agents, "no such agent {agent}");
        self.calls.legal_actions.fetch_add(1, Ordering::Relaxed);

        (0..self.children().len()).map(Branch::Take).collect()
    }

    fn successor(&self, agent: AgentIndex, action: &Branch) -> Self {
        assert!(agent.as_index() < self.num_agents, "no such agent {agent}");
        self.calls.successors.fetch_add(1, Ordering::Relaxed);

        let tree = match action {
            Branch::Take(i) => self.children()[*i].clone(),
            Branch::Stay => self.tree.as_ref().clone(),
        };

        Self {
            tree: Arc::new(tree),
            num_agents: self.num_agents,
            calls: self.calls.clone(),
        }
    }

    fn is_win(&self) -> bool {
        matches!(self.tree.as_ref(), Tree::Win(_))
    }

    fn is_lose(&self) -> bool {
        matches!(self.tree.as_ref(), Tree::Lose(_))
    }

    fn score(&self) -> f64 {
        match self.tree.as_ref() {
            Tree::Node { score, .. } | Tree::Win(score) | Tree::Lose(score) => *score,
        }
    }
}
