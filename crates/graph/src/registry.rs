use crate::types::EvolutionFamily;
use std::collections::{BTreeMap, HashMap};

/// Every family of a catalog plus the member -> family reverse index.
///
/// Built once by [`crate::GraphBuilder`] and never mutated afterwards.
#[derive(Debug, Default)]
pub struct FamilyRegistry {
    /// Numeric family key -> family, ascending
    families: BTreeMap<u32, EvolutionFamily>,

    /// Member id -> numeric family key
    member_index: HashMap<u32, u32>,
}

impl FamilyRegistry {
    /// Add a family under its numeric key.
    ///
    /// A key that is already taken is refused and the existing family is
    /// kept; returns whether the family was added.
    pub(crate) fn insert(&mut self, family: EvolutionFamily) -> bool {
        let key = family.base_ids.first().copied().unwrap_or_default();
        if self.families.contains_key(&key) {
            log::error!("Evolution family {key} already registered; duplicate dropped");
            return false;
        }
        for id in family.nodes.keys() {
            self.member_index.insert(*id, key);
        }
        self.families.insert(key, family);
        true
    }

    /// Family containing `member_id`, or `None` when the id is not in the
    /// catalog
    pub fn get_family(&self, member_id: u32) -> Option<&EvolutionFamily> {
        let key = self.member_index.get(&member_id)?;
        self.families.get(key)
    }

    /// Family by its string key (the smallest base id)
    pub fn family_by_key(&self, key: &str) -> Option<&EvolutionFamily> {
        let key = key.trim().parse::<u32>().ok()?;
        self.families.get(&key)
    }

    /// Family key for a member
    pub fn family_key(&self, member_id: u32) -> Option<&str> {
        self.get_family(member_id).map(|f| f.id.as_str())
    }

    /// All families ordered by numeric key
    pub fn families(&self) -> impl Iterator<Item = &EvolutionFamily> {
        self.families.values()
    }

    pub fn len(&self) -> usize {
        self.families.len()
    }

    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }

    /// Total members across all families
    pub fn member_count(&self) -> usize {
        self.member_index.len()
    }

    /// Total edges across all families
    pub fn edge_count(&self) -> usize {
        self.families.values().map(EvolutionFamily::edge_count).sum()
    }
}
