//! Recursive tree construction. Both children of a branch are created before either subtree
//! grows, and the left subtree is grown to completion before the right.

use super::curve::{
    MAX_FLOOR, branch_chance, difficulty_for, is_fixed_battle_floor, node_kind_for_roll,
};
use super::model::{FloorNode, FloorTree, NodeChildren};
use crate::rng::GameRng;
use crate::types::{EnemyKind, NodeId, NodeKind};

pub struct FloorTreeGenerator<'a> {
    rng: &'a mut GameRng,
    tree: FloorTree,
}

impl<'a> FloorTreeGenerator<'a> {
    pub fn new(rng: &'a mut GameRng) -> Self {
        Self { rng, tree: FloorTree::default() }
    }

    pub fn generate(mut self) -> FloorTree {
        let root = self.create_node(1, None);
        self.grow(root);
        self.tree
    }

    fn grow(&mut self, id: NodeId) {
        let Some(floor) = self.tree.node(id).map(|node| node.floor) else {
            return;
        };
        if floor >= MAX_FLOOR {
            return;
        }
        let next_floor = floor + 1;
        let branches = self.rng.unit_f64() < branch_chance(next_floor);

        if branches {
            let left = self.create_node(next_floor, Some(id));
            let right = self.create_node(next_floor, Some(id));
            self.set_children(id, NodeChildren::Pair(left, right));
            self.grow(left);
            self.grow(right);
        } else {
            let only = self.create_node(next_floor, Some(id));
            self.set_children(id, NodeChildren::Single(only));
            self.grow(only);
        }
    }

    fn create_node(&mut self, floor: u8, parent: Option<NodeId>) -> NodeId {
        let kind = if is_fixed_battle_floor(floor) {
            NodeKind::Battle
        } else {
            node_kind_for_roll(self.rng.unit_f64())
        };
        let difficulty =
            if floor == 1 { 1 } else { difficulty_for(floor, self.rng.range_i32(-1, 2)) };
        let enemy = (kind == NodeKind::Battle).then(|| EnemyKind::for_difficulty(difficulty));
        self.tree.push(FloorNode {
            id: NodeId(0),
            floor,
            kind,
            difficulty,
            enemy,
            parent,
            children: NodeChildren::Leaf,
            visited: false,
        })
    }

    fn set_children(&mut self, id: NodeId, children: NodeChildren) {
        if let Some(node) = self.tree.node_mut(id) {
            node.children = children;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::floor_tree::generate;

    #[test]
    fn root_is_first_floor_battle_at_difficulty_one() {
        let tree = generate(1);
        let root = tree.root().expect("tree has a root");
        assert_eq!(root.id, FloorTree::ROOT);
        assert_eq!((root.floor, root.kind, root.difficulty), (1, NodeKind::Battle, 1));
        assert_eq!(root.enemy, Some(EnemyKind::Slime));
        assert_eq!(root.parent, None);
    }

    #[test]
    fn every_path_ends_in_a_boss_floor_battle() {
        for seed in 0..200 {
            let tree = generate(seed);
            for node in tree.iter() {
                match node.children {
                    NodeChildren::Leaf => assert_eq!(node.floor, MAX_FLOOR, "seed {seed}"),
                    NodeChildren::Single(child) => {
                        let child = tree.node(child).expect("child exists");
                        assert_eq!(child.floor, node.floor + 1);
                        assert_eq!(child.parent, Some(node.id));
                    }
                    NodeChildren::Pair(left, right) => {
                        assert_ne!(left, right);
                        assert!(node.floor + 1 < MAX_FLOOR, "boss floor is never a choice");
                        for child in [left, right] {
                            let child = tree.node(child).expect("child exists");
                            assert_eq!(child.floor, node.floor + 1);
                            assert_eq!(child.parent, Some(node.id));
                        }
                    }
                }
                if node.floor == MAX_FLOOR {
                    assert_eq!(node.kind, NodeKind::Battle);
                }
            }
        }
    }

    #[test]
    fn battle_nodes_carry_enemies_matching_difficulty() {
        for seed in 0..100 {
            let tree = generate(seed);
            for node in tree.iter() {
                assert!((1..=10).contains(&node.difficulty));
                assert!(node.difficulty + 1 >= node.floor || node.difficulty == 10);
                match node.kind {
                    NodeKind::Battle => {
                        assert_eq!(node.enemy, Some(EnemyKind::for_difficulty(node.difficulty)))
                    }
                    NodeKind::Rest | NodeKind::Shop => assert_eq!(node.enemy, None),
                }
            }
        }
    }

    #[test]
    fn same_seed_same_tree() {
        assert_eq!(generate(77), generate(77));
        assert_eq!(generate(77).canonical_bytes(), generate(77).canonical_bytes());
    }

    #[test]
    fn middle_floors_mix_node_kinds() {
        let mut kinds = [0_usize; 3];
        for seed in 0..50 {
            for node in generate(seed).iter().filter(|node| (2..=9).contains(&node.floor)) {
                kinds[node.kind as usize] += 1;
            }
        }
        assert!(kinds.iter().all(|count| *count > 0), "{kinds:?}");
        assert!(kinds[NodeKind::Battle as usize] > kinds[NodeKind::Rest as usize]);
    }
}
