use std::fmt::Debug;

use text_trees::StringTreeNode;

use crate::{Action, AgentIndex};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Why the search stopped at a leaf
pub enum LeafKind {
    /// The controlled agent won
    Win,
    /// The controlled agent lost
    Lose,
    /// We ran out of depth before the game ended
    Horizon,
}

#[derive(Debug, Clone, PartialEq)]
/// This is returned from a search
/// It contains everything the search learned about the game tree
pub enum SearchReturn<A: Action> {
    /// A node where one agent chose between (or averaged over) its actions
    Node {
        /// Which agent was moving at this node
        agent: AgentIndex,
        /// Remaining depth, in rounds, when this node was visited
        depth: usize,
        /// Every action we looked at, in the order the game enumerated them, with the subtree
        /// below it. When the agent had no legal actions this is a single no-op
        options: Vec<(A, Self)>,
        /// Index into `options` of the branch this node's value came from. `None` for nodes that
        /// average over their children
        chosen: Option<usize>,
        /// The value of this node
        value: f64,
        /// Whether the remaining actions were pruned after the last entry in `options`
        cutoff: bool,
    },
    /// Represents a leaf node in the game tree
    /// This happens when we reach a terminal state (win/lose)
    /// or when we reach the maximum depth
    Leaf {
        #[allow(missing_docs)]
        value: f64,
        #[allow(missing_docs)]
        kind: LeafKind,
    },
}

impl<A: Action> SearchReturn<A> {
    /// Returns the value for this node
    pub fn value(&self) -> f64 {
        match self {
            SearchReturn::Node { value, .. } => *value,
            SearchReturn::Leaf { value, .. } => *value,
        }
    }

    /// Returns the action the moving agent picked at this node
    ///
    /// Leaves and averaging nodes didn't pick anything, so they return the no-op action
    pub fn best_action(&self) -> A {
        match self {
            SearchReturn::Leaf { .. } => A::no_op(),
            SearchReturn::Node {
                options, chosen, ..
            } => chosen
                .and_then(|i| options.get(i))
                .map(|(action, _)| action.clone())
                .unwrap_or_else(A::no_op),
        }
    }

    /// Returns all the moves in the 'route' through the game tree that the search expects
    ///
    /// The route stops at the first node that averages over its children, since there is no
    /// single expected move there
    pub fn chosen_route(&self) -> Vec<(AgentIndex, A)> {
        let mut route = vec![];
        let mut current = self;

        while let SearchReturn::Node {
            agent,
            options,
            chosen: Some(chosen),
            ..
        } = current
        {
            let Some((action, next)) = options.get(*chosen) else {
                break;
            };

            route.push((*agent, action.clone()));
            current = next;
        }

        route
    }

    /// Whether any explored path stopped because it ran out of depth rather than reaching the
    /// end of the game. When this is false searching deeper can't change anything
    pub fn reached_horizon(&self) -> bool {
        match self {
            SearchReturn::Leaf { kind, .. } => *kind == LeafKind::Horizon,
            SearchReturn::Node { options, .. } => {
                options.iter().any(|(_, next)| next.reached_horizon())
            }
        }
    }

    /// Number of nodes, leaves included, in this tree
    pub fn explored_nodes(&self) -> usize {
        match self {
            SearchReturn::Leaf { .. } => 1,
            SearchReturn::Node { options, .. } => {
                1 + options
                    .iter()
                    .map(|(_, next)| next.explored_nodes())
                    .sum::<usize>()
            }
        }
    }

    /// This returns a visual representation of the game tree that the search generated
    /// It shows the value, the moving agent and each action at each level
    pub fn to_text_tree(&self) -> String {
        format!("{}", self.to_text_tree_node("root".to_owned()))
    }

    fn to_text_tree_node(&self, label: String) -> StringTreeNode {
        match self {
            SearchReturn::Leaf { value, kind } => {
                StringTreeNode::new(format!("{} {} ({:?})", label, value, kind))
            }
            SearchReturn::Node {
                agent,
                options,
                chosen,
                value,
                cutoff,
                ..
            } => {
                let cutoff = if *cutoff { " [cutoff]" } else { "" };
                let mut node = StringTreeNode::new(format!("{} {}{}", label, value, cutoff));
                for (i, (action, result)) in options.iter().enumerate() {
                    let marker = if *chosen == Some(i) { "*" } else { "" };
                    node.push_node(
                        result.to_text_tree_node(format!("{}{:?} {}", marker, action, agent)),
                    );
                }

                node
            }
        }
    }
}
