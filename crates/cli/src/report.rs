use dex_graph::{EvolutionFamily, EvolutionIndex, EvolutionTreeData, Layout, TreeBuilder, TreeNode};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Serialize)]
pub struct FamilySummary<'a> {
    pub family: &'a str,
    pub members: usize,
    pub edges: usize,
    pub bases: &'a [u32],
    pub layout: Layout,

    /// Members reachable from a base; less than `members` means some were
    /// left out of the tree view
    pub placed: usize,
}

impl<'a> FamilySummary<'a> {
    pub fn new(family: &'a EvolutionFamily) -> Self {
        // catalog ids are positive, so focus 0 marks nothing
        let tree = TreeBuilder::build_tree(family, 0);
        Self {
            family: &family.id,
            members: family.node_count(),
            edges: family.edge_count(),
            bases: &family.base_ids,
            layout: tree.layout,
            placed: tree.placed_members(),
        }
    }
}

#[derive(Debug, Default, Serialize)]
pub struct CatalogStats {
    pub records: usize,
    pub families: usize,
    pub edges: usize,
    pub layouts: BTreeMap<&'static str, usize>,
    pub multi_base_families: Vec<String>,
    pub synthetic_base_families: Vec<String>,
    pub cyclic_families: Vec<String>,
    pub unreachable_members: Vec<u32>,
}

pub fn collect_stats(index: &EvolutionIndex) -> CatalogStats {
    let registry = index.registry();
    let mut stats = CatalogStats {
        records: index.catalog().len(),
        families: registry.len(),
        edges: registry.edge_count(),
        ..Default::default()
    };

    for family in registry.families() {
        let tree = TreeBuilder::build_tree(family, 0);
        *stats.layouts.entry(tree.layout.as_str()).or_default() += 1;

        if family.base_ids.len() > 1 {
            stats.multi_base_families.push(family.id.clone());
        }
        if family.synthetic_base {
            stats.synthetic_base_families.push(family.id.clone());
        }
        if family.is_cyclic() {
            stats.cyclic_families.push(family.id.clone());
        }

        if tree.placed_members() < tree.total_members {
            let placed = tree.placed_ids();
            stats.unreachable_members.extend(
                family
                    .nodes
                    .keys()
                    .copied()
                    .filter(|id| !placed.contains(id)),
            );
        }
    }

    stats
}

/// Indented plain-text rendering of a tree, one member per line
pub fn render_tree_text(tree: &EvolutionTreeData<'_>) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "layout: {} | members: {} | depth: {}\n",
        tree.layout.as_str(),
        tree.total_members,
        tree.max_depth
    ));

    let mut stack: Vec<&TreeNode<'_>> = tree.roots.iter().rev().collect();
    while let Some(node) = stack.pop() {
        let indent = "  ".repeat(node.depth);
        let marker = if node.is_current { " *" } else { "" };
        match node.method {
            Some(method) => out.push_str(&format!(
                "{indent}└─ [{method}] #{:03} {}{marker}\n",
                node.node.id, node.node.name
            )),
            None => out.push_str(&format!(
                "{indent}#{:03} {}{marker}\n",
                node.node.id, node.node.name
            )),
        }
        stack.extend(node.children.iter().rev());
    }

    out
}
