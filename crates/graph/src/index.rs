use crate::builder::GraphBuilder;
use crate::chain::{flat_chain, ChainLink};
use crate::error::{GraphError, Result};
use crate::registry::FamilyRegistry;
use crate::tree::{EvolutionTreeData, TreeBuilder};
use crate::types::EvolutionFamily;
use dex_catalog::Catalog;
use once_cell::sync::OnceCell;
use std::path::Path;

/// Owns the catalog and its lazily built family registry.
///
/// Construct one per process and share it by reference. The first lookup
/// builds the registry; concurrent first callers block until that single
/// build finishes and then all read the same instance.
pub struct EvolutionIndex {
    catalog: Catalog,
    registry: OnceCell<FamilyRegistry>,
}

impl EvolutionIndex {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            registry: OnceCell::new(),
        }
    }

    /// Load the catalog file; the registry is still built on first use
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(Catalog::load(path)?))
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The family registry, building it on first call
    pub fn registry(&self) -> &FamilyRegistry {
        self.registry
            .get_or_init(|| GraphBuilder::new(&self.catalog).build())
    }

    pub fn is_built(&self) -> bool {
        self.registry.get().is_some()
    }

    /// Family containing `member_id`; `None` is an ordinary miss
    pub fn get_family(&self, member_id: u32) -> Option<&EvolutionFamily> {
        self.registry().get_family(member_id)
    }

    pub fn family_for(&self, member_id: u32) -> Result<&EvolutionFamily> {
        self.get_family(member_id)
            .ok_or(GraphError::MemberNotFound(member_id))
    }

    pub fn family_by_key(&self, key: &str) -> Result<&EvolutionFamily> {
        self.registry()
            .family_by_key(key)
            .ok_or_else(|| GraphError::FamilyNotFound(key.to_string()))
    }

    /// Tree for the family of `member_id`, centered on it
    pub fn tree_for(&self, member_id: u32) -> Result<EvolutionTreeData<'_>> {
        let family = self.family_for(member_id)?;
        Ok(TreeBuilder::build_tree(family, member_id))
    }

    /// Flat line through the family of `member_id`
    pub fn chain_for(&self, member_id: u32) -> Result<Vec<ChainLink<'_>>> {
        let family = self.family_for(member_id)?;
        Ok(flat_chain(family, member_id))
    }
}
