use crate::types::{EvolutionEdge, EvolutionFamily, EvolutionNode};
use petgraph::algo::is_cyclic_directed;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;

/// Directed petgraph view of one family, borrowing its nodes and labels
pub struct FamilyDiGraph<'f> {
    pub graph: DiGraph<&'f EvolutionNode, &'f str>,

    /// Member id -> NodeIndex mapping
    pub index: HashMap<u32, NodeIndex>,
}

impl EvolutionFamily {
    /// Build a petgraph view for traversal algorithms and rendering adapters
    pub fn to_digraph(&self) -> FamilyDiGraph<'_> {
        let mut graph = DiGraph::with_capacity(self.nodes.len(), self.edges.len());
        let mut index = HashMap::with_capacity(self.nodes.len());

        for (id, node) in &self.nodes {
            index.insert(*id, graph.add_node(node));
        }

        for edge in &self.edges {
            if let (Some(&from), Some(&to)) = (index.get(&edge.from), index.get(&edge.to)) {
                graph.add_edge(from, to, edge.method.as_str());
            }
        }

        FamilyDiGraph { graph, index }
    }

    /// Whether the edge list contains a directed cycle (self-loops included)
    pub fn is_cyclic(&self) -> bool {
        is_cyclic_directed(&self.to_digraph().graph)
    }

    /// Outgoing edges of `id`, in edge-list order
    pub fn outgoing(&self, id: u32) -> impl Iterator<Item = &EvolutionEdge> {
        self.edges.iter().filter(move |e| e.from == id)
    }

    /// Incoming edges of `id`, in edge-list order
    pub fn incoming(&self, id: u32) -> impl Iterator<Item = &EvolutionEdge> {
        self.edges.iter().filter(move |e| e.to == id)
    }

    pub fn out_degree(&self, id: u32) -> usize {
        self.outgoing(id).count()
    }

    /// Largest out-degree over all members (0 for an edgeless family)
    pub fn max_out_degree(&self) -> usize {
        let mut degrees: HashMap<u32, usize> = HashMap::new();
        for edge in &self.edges {
            *degrees.entry(edge.from).or_default() += 1;
        }
        degrees.into_values().max().unwrap_or(0)
    }
}
