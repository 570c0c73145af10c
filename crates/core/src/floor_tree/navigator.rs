//! Traversal over a generated tree: child lookup, bounded look-ahead, and end-of-run detection.

use std::collections::{BTreeMap, VecDeque};

use super::curve::MAX_FLOOR;
use super::model::{FloorNode, FloorTree, NodeChildren};
use crate::types::NodeId;

/// How many child hops past the current node a map view may reveal.
pub const DEFAULT_VISIBLE_DEPTH: u8 = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NextStep {
    Choose(NodeChildren),
    /// Leaf on the boss floor.
    RunCleared,
    /// Leaf above the boss floor, or an unknown id. Treated as the end of progression.
    NoFurtherFloors,
}

impl FloorTree {
    /// `(left, right)`; a single forced child is returned on both sides.
    pub fn children(&self, id: NodeId) -> (Option<&FloorNode>, Option<&FloorNode>) {
        let Some(node) = self.node(id) else {
            return (None, None);
        };
        match node.children {
            NodeChildren::Leaf => (None, None),
            NodeChildren::Single(only) => (self.node(only), self.node(only)),
            NodeChildren::Pair(left, right) => (self.node(left), self.node(right)),
        }
    }

    /// `current` plus every node within `depth` child hops of it, ordered by id.
    pub fn visible_subtree(&self, current: NodeId, depth: u8) -> BTreeMap<NodeId, &FloorNode> {
        let mut visible = BTreeMap::new();
        let Some(start) = self.node(current) else {
            return visible;
        };
        visible.insert(current, start);

        let mut queue = VecDeque::from([(current, 0_u8)]);
        while let Some((id, hops)) = queue.pop_front() {
            if hops >= depth {
                continue;
            }
            let Some(node) = self.node(id) else {
                continue;
            };
            for child in node.children.ids() {
                if let Some(child_node) = self.node(child)
                    && visible.insert(child, child_node).is_none()
                {
                    queue.push_back((child, hops + 1));
                }
            }
        }
        visible
    }

    pub fn next_step(&self, id: NodeId) -> NextStep {
        match self.node(id) {
            Some(node) if node.children != NodeChildren::Leaf => NextStep::Choose(node.children),
            Some(node) if node.floor == MAX_FLOOR => NextStep::RunCleared,
            _ => NextStep::NoFurtherFloors,
        }
    }

    /// Returns `false` for an unknown id.
    pub fn mark_visited(&mut self, id: NodeId) -> bool {
        match self.node_mut(id) {
            Some(node) => {
                node.visited = true;
                true
            }
            None => false,
        }
    }
}
