use crate::types::{EvolutionFamily, EvolutionNode};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// Coarse shape of a family, used downstream to pick a rendering strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// One unbranched chain
    Linear,

    /// Some fan-out under a single root
    Branching,

    /// Several roots or heavily cross-linked
    Complex,
}

impl Layout {
    pub const fn as_str(self) -> &'static str {
        match self {
            Layout::Linear => "linear",
            Layout::Branching => "branching",
            Layout::Complex => "complex",
        }
    }
}

/// One placed member within a tree view
#[derive(Debug, Clone, Serialize)]
pub struct TreeNode<'f> {
    pub node: &'f EvolutionNode,

    /// Method leading here from the parent; `None` for roots
    pub method: Option<&'f str>,

    pub children: Vec<TreeNode<'f>>,

    /// Root = 0
    pub depth: usize,

    pub is_current: bool,
}

impl<'f> TreeNode<'f> {
    /// Ids in this subtree, pre-order
    pub fn ids(&self) -> Vec<u32> {
        let mut ids = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            ids.push(node.node.id);
            stack.extend(node.children.iter().rev());
        }
        ids
    }

    pub fn find(&self, id: u32) -> Option<&TreeNode<'f>> {
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            if node.node.id == id {
                return Some(node);
            }
            stack.extend(node.children.iter());
        }
        None
    }
}

/// Forest view of one family centered on a focal member
#[derive(Debug, Clone, Serialize)]
pub struct EvolutionTreeData<'f> {
    pub roots: Vec<TreeNode<'f>>,
    pub max_depth: usize,

    /// Always the family's node count, even when some members were not
    /// reachable from any base
    pub total_members: usize,

    /// Ids from the owning root down to the focal member; empty when the
    /// focal member was not placed
    pub current_path: Vec<u32>,

    pub layout: Layout,
}

impl<'f> EvolutionTreeData<'f> {
    /// Ids placed across all roots, pre-order
    pub fn placed_ids(&self) -> Vec<u32> {
        self.roots.iter().flat_map(TreeNode::ids).collect()
    }

    /// Number of members actually placed in the forest
    pub fn placed_members(&self) -> usize {
        self.placed_ids().len()
    }

    pub fn find(&self, id: u32) -> Option<&TreeNode<'f>> {
        self.roots.iter().find_map(|root| root.find(id))
    }

    /// The focal node, if it was placed
    pub fn current(&self) -> Option<&TreeNode<'f>> {
        self.current_path.last().and_then(|&id| self.find(id))
    }
}

struct Slot<'f> {
    node: &'f EvolutionNode,
    method: Option<&'f str>,
    depth: usize,
    children: Vec<usize>,
}

/// Builds render-ready trees from families
pub struct TreeBuilder;

impl TreeBuilder {
    /// Build the forest for `family`, marking `focus_id` as current.
    ///
    /// Each base is expanded depth-first in `base_ids` order. A single
    /// visited set spans all bases, so a member reachable from two bases
    /// appears only under the first one and cycles terminate. A `focus_id`
    /// outside the family yields a full forest with nothing marked.
    pub fn build_tree(family: &EvolutionFamily, focus_id: u32) -> EvolutionTreeData<'_> {
        let mut adjacency: HashMap<u32, Vec<(u32, &str)>> = HashMap::new();
        for edge in &family.edges {
            adjacency
                .entry(edge.from)
                .or_default()
                .push((edge.to, edge.method.as_str()));
        }

        let mut slots: Vec<Slot<'_>> = Vec::with_capacity(family.node_count());
        let mut root_slots = Vec::new();
        let mut visited: HashSet<u32> = HashSet::new();
        let mut current_path = Vec::new();

        for &base_id in &family.base_ids {
            let Some(base) = family.node(base_id) else {
                continue;
            };
            if !visited.insert(base_id) {
                continue;
            }

            let root = slots.len();
            slots.push(Slot {
                node: base,
                method: None,
                depth: 0,
                children: Vec::new(),
            });
            root_slots.push(root);
            if base_id == focus_id {
                current_path = vec![base_id];
            }

            // (slot, next child position)
            let mut stack: Vec<(usize, usize)> = vec![(root, 0)];
            while let Some(&(slot, next)) = stack.last() {
                let id = slots[slot].node.id;
                let Some(&(child_id, method)) = adjacency.get(&id).and_then(|c| c.get(next))
                else {
                    stack.pop();
                    continue;
                };
                if let Some(frame) = stack.last_mut() {
                    frame.1 += 1;
                }

                if visited.contains(&child_id) {
                    continue;
                }
                let Some(child) = family.node(child_id) else {
                    continue;
                };
                visited.insert(child_id);

                let child_slot = slots.len();
                let depth = slots[slot].depth + 1;
                slots.push(Slot {
                    node: child,
                    method: Some(method),
                    depth,
                    children: Vec::new(),
                });
                slots[slot].children.push(child_slot);
                stack.push((child_slot, 0));

                if child_id == focus_id {
                    current_path = stack.iter().map(|&(s, _)| slots[s].node.id).collect();
                }
            }
        }

        let max_depth = slots.iter().map(|s| s.depth).max().unwrap_or(0);
        let layout = Self::classify(family, root_slots.len());
        let roots = Self::assemble(slots, &root_slots, focus_id);

        EvolutionTreeData {
            roots,
            max_depth,
            total_members: family.node_count(),
            current_path,
            layout,
        }
    }

    /// Classify the family shape given how many roots the forest produced
    pub fn classify(family: &EvolutionFamily, root_count: usize) -> Layout {
        let nodes = family.node_count();
        let edges = family.edge_count();

        if edges + 1 == nodes && family.max_out_degree() <= 1 {
            return Layout::Linear;
        }
        if root_count > 1 || edges > nodes + 2 {
            return Layout::Complex;
        }
        Layout::Branching
    }

    // Children are always pushed after their parent, so a reverse sweep sees
    // every child before the slot that owns it.
    fn assemble<'f>(slots: Vec<Slot<'f>>, roots: &[usize], focus_id: u32) -> Vec<TreeNode<'f>> {
        let mut built: Vec<Option<TreeNode<'f>>> = Vec::with_capacity(slots.len());
        built.resize_with(slots.len(), || None);

        for (idx, slot) in slots.into_iter().enumerate().rev() {
            let children = slot
                .children
                .iter()
                .filter_map(|&child| built[child].take())
                .collect();
            built[idx] = Some(TreeNode {
                node: slot.node,
                method: slot.method,
                children,
                depth: slot.depth,
                is_current: slot.node.id == focus_id,
            });
        }

        roots.iter().filter_map(|&root| built[root].take()).collect()
    }
}
