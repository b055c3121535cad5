//! # Dex Graph
//!
//! Evolution families reconstructed from a flat catalog.
//!
//! ## Features
//!
//! - **Normalization** - inconsistent `prev`/`next` descriptors become plain link lists
//! - **Partitioning** - every record lands in exactly one family
//! - **Registry** - built once per process, shared by reference
//! - **Tree views** - forest centered on any member, with a layout tag
//!
//! ## Architecture
//!
//! ```text
//! Catalog (dex-catalog)
//!     │
//!     ├──> Graph Builder
//!     │      ├─ Project records into nodes
//!     │      ├─ Normalize evolution descriptors
//!     │      ├─ Undirected BFS per unprocessed record
//!     │      └─ Bases, family key, edges
//!     │
//!     ├──> Family Registry (lazy, once)
//!     │      ├─ Family key -> family
//!     │      └─ Member id -> family key
//!     │
//!     └──> Tree Builder (per request)
//!            ├─ Depth-first from each base, shared visited set
//!            ├─ Mark focal member, record its path
//!            └─ Classify linear / branching / complex
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use dex_graph::EvolutionIndex;
//!
//! fn main() -> dex_graph::Result<()> {
//!     let index = EvolutionIndex::load("data/pokedex.json")?;
//!     let tree = index.tree_for(133)?;
//!     println!("{} members, layout {}", tree.total_members, tree.layout.as_str());
//!     Ok(())
//! }
//! ```

mod builder;
mod chain;
mod error;
mod graph;
mod index;
mod normalize;
mod registry;
mod tree;
mod types;

pub use builder::GraphBuilder;
pub use chain::{flat_chain, ChainLink};
pub use error::{GraphError, Result};
pub use graph::FamilyDiGraph;
pub use index::EvolutionIndex;
pub use normalize::normalize_links;
pub use registry::FamilyRegistry;
pub use tree::{EvolutionTreeData, Layout, TreeBuilder, TreeNode};
pub use types::{EvolutionDescriptor, EvolutionEdge, EvolutionFamily, EvolutionLink, EvolutionNode};
