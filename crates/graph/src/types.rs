use dex_catalog::Record;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One normalized `(id, method)` evolution reference
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EvolutionLink {
    /// Referenced catalog id
    pub target: u32,

    /// How the transition happens (e.g. "Level 16", "Trade")
    pub method: String,
}

/// Predecessor and successor references after normalization.
///
/// Both lists are possibly empty; nothing downstream ever sees the raw
/// upstream shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvolutionDescriptor {
    pub prev: Vec<EvolutionLink>,
    pub next: Vec<EvolutionLink>,
}

/// Lightweight projection of a catalog record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvolutionNode {
    pub id: u32,
    pub name: String,
    pub sprite: String,
    pub image: String,
    pub types: Vec<String>,
    pub species: String,
}

impl From<&Record> for EvolutionNode {
    fn from(record: &Record) -> Self {
        Self {
            id: record.id,
            name: record.display_name().to_string(),
            sprite: record.image.sprite.clone(),
            image: record.image.hires.clone(),
            types: record.types.clone(),
            species: record.species.clone(),
        }
    }
}

/// `from` can become `to` via `method`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EvolutionEdge {
    pub from: u32,
    pub to: u32,
    pub method: String,
}

/// A maximal set of records connected by evolution links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvolutionFamily {
    /// Smallest base id, as a string
    pub id: String,

    /// Members by id
    pub nodes: BTreeMap<u32, EvolutionNode>,

    /// Directed edges between members, stable within one build
    pub edges: Vec<EvolutionEdge>,

    /// Members with no predecessor, ascending
    pub base_ids: Vec<u32>,

    /// True when no member lacked a predecessor and the smallest id was
    /// promoted to base
    #[serde(default)]
    pub synthetic_base: bool,
}

impl EvolutionFamily {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            nodes: BTreeMap::new(),
            edges: Vec::new(),
            base_ids: Vec::new(),
            synthetic_base: false,
        }
    }

    pub fn add_node(&mut self, node: EvolutionNode) {
        self.nodes.insert(node.id, node);
    }

    pub fn add_edge(&mut self, edge: EvolutionEdge) {
        self.edges.push(edge);
    }

    pub fn has_edge(&self, from: u32, to: u32) -> bool {
        self.edges.iter().any(|e| e.from == from && e.to == to)
    }

    pub fn contains(&self, id: u32) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn node(&self, id: u32) -> Option<&EvolutionNode> {
        self.nodes.get(&id)
    }

    pub fn is_base(&self, id: u32) -> bool {
        self.base_ids.contains(&id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}
