//! Tree data: nodes stored densely by id, with explicit child edges.

use serde::{Deserialize, Serialize};

use crate::types::{EnemyKind, NodeId, NodeKind, Side};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeChildren {
    Leaf,
    /// One forced continuation; both sides lead here.
    Single(NodeId),
    Pair(NodeId, NodeId),
}

impl NodeChildren {
    pub fn on(self, side: Side) -> Option<NodeId> {
        match (self, side) {
            (Self::Leaf, _) => None,
            (Self::Single(id), _) => Some(id),
            (Self::Pair(left, _), Side::Left) => Some(left),
            (Self::Pair(_, right), Side::Right) => Some(right),
        }
    }

    /// Distinct child ids, left first.
    pub fn ids(self) -> Vec<NodeId> {
        match self {
            Self::Leaf => Vec::new(),
            Self::Single(id) => vec![id],
            Self::Pair(left, right) => vec![left, right],
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FloorNode {
    pub id: NodeId,
    pub floor: u8,
    pub kind: NodeKind,
    pub difficulty: u8,
    pub enemy: Option<EnemyKind>,
    pub parent: Option<NodeId>,
    pub children: NodeChildren,
    pub visited: bool,
}

impl FloorNode {
    pub fn label(&self) -> String {
        match (self.kind, self.enemy) {
            (NodeKind::Battle, Some(enemy)) => format!("{} Lv.{}", enemy.name(), self.difficulty),
            (NodeKind::Battle, None) => format!("Battle Lv.{}", self.difficulty),
            (NodeKind::Rest, _) => "Rest".to_string(),
            (NodeKind::Shop, _) => "Shop".to_string(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FloorTree {
    nodes: Vec<FloorNode>,
}

impl FloorTree {
    pub const ROOT: NodeId = NodeId(0);

    pub fn root(&self) -> Option<&FloorNode> {
        self.nodes.first()
    }

    pub fn node(&self, id: NodeId) -> Option<&FloorNode> {
        self.nodes.get(id.0 as usize)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FloorNode> {
        self.nodes.iter()
    }

    pub(super) fn node_mut(&mut self, id: NodeId) -> Option<&mut FloorNode> {
        self.nodes.get_mut(id.0 as usize)
    }

    pub(super) fn push(&mut self, mut node: FloorNode) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        node.id = id;
        self.nodes.push(node);
        id
    }

    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend((self.nodes.len() as u32).to_le_bytes());
        for node in &self.nodes {
            bytes.extend(node.id.0.to_le_bytes());
            bytes.push(node.floor);
            bytes.push(match node.kind {
                NodeKind::Battle => 0,
                NodeKind::Rest => 1,
                NodeKind::Shop => 2,
            });
            bytes.push(node.difficulty);
            bytes.push(node.enemy.map_or(0, |enemy| enemy as u8 + 1));
            match node.children {
                NodeChildren::Leaf => bytes.push(0),
                NodeChildren::Single(id) => {
                    bytes.push(1);
                    bytes.extend(id.0.to_le_bytes());
                }
                NodeChildren::Pair(left, right) => {
                    bytes.push(2);
                    bytes.extend(left.0.to_le_bytes());
                    bytes.extend(right.0.to_le_bytes());
                }
            }
            bytes.push(u8::from(node.visited));
        }
        bytes
    }
}
