use crate::registry::FamilyRegistry;
use crate::types::*;
use dex_catalog::Catalog;
use std::collections::{HashMap, HashSet, VecDeque};

/// Partition a catalog into evolution families
pub struct GraphBuilder<'a> {
    catalog: &'a Catalog,
}

impl<'a> GraphBuilder<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    /// Build every family in one pass over the catalog
    pub fn build(&self) -> FamilyRegistry {
        // Phase 1: project nodes and normalize descriptors for all records
        let mut nodes: HashMap<u32, EvolutionNode> = HashMap::with_capacity(self.catalog.len());
        let mut descriptors: HashMap<u32, EvolutionDescriptor> =
            HashMap::with_capacity(self.catalog.len());

        for record in self.catalog.records() {
            nodes.insert(record.id, EvolutionNode::from(record));
            descriptors.insert(record.id, EvolutionDescriptor::from_raw(&record.evolution));
        }

        // Phase 2: discover components and assemble families
        let links = Self::undirected_links(&descriptors);
        let mut registry = FamilyRegistry::default();
        let mut processed: HashSet<u32> = HashSet::with_capacity(self.catalog.len());

        for id in self.catalog.ids() {
            if processed.contains(&id) {
                continue;
            }

            let members = Self::component(id, &links);
            processed.extend(members.iter().copied());

            let family = Self::assemble(&members, &descriptors, &mut nodes);
            if family.is_cyclic() {
                log::warn!(
                    "Evolution family {} contains a cycle; tree views will break it",
                    family.id
                );
            }
            registry.insert(family);
        }

        log::info!(
            "Built evolution graph: {} families, {} members, {} edges",
            registry.len(),
            registry.member_count(),
            registry.edge_count()
        );

        registry
    }

    /// Symmetric neighbour lists over every prev/next link between catalog
    /// records.
    ///
    /// A link counts for both endpoints, so a record that lists nothing still
    /// reaches the records that list it. Links to ids absent from the catalog
    /// are dropped here.
    fn undirected_links(
        descriptors: &HashMap<u32, EvolutionDescriptor>,
    ) -> HashMap<u32, Vec<u32>> {
        let mut links: HashMap<u32, Vec<u32>> = HashMap::with_capacity(descriptors.len());
        let mut entries: Vec<(&u32, &EvolutionDescriptor)> = descriptors.iter().collect();
        entries.sort_unstable_by_key(|(id, _)| **id);

        for (&id, descriptor) in entries {
            links.entry(id).or_default();
            for link in descriptor.prev.iter().chain(&descriptor.next) {
                if !descriptors.contains_key(&link.target) {
                    log::debug!("Evolution link {id} -> {} to unknown id ignored", link.target);
                    continue;
                }
                links.entry(id).or_default().push(link.target);
                links.entry(link.target).or_default().push(id);
            }
        }

        links
    }

    /// Undirected BFS over `links` starting at `start`.
    ///
    /// Returns members in discovery order.
    fn component(start: u32, links: &HashMap<u32, Vec<u32>>) -> Vec<u32> {
        let mut members = Vec::new();
        let mut visited = HashSet::from([start]);
        let mut queue = VecDeque::from([start]);

        while let Some(id) = queue.pop_front() {
            members.push(id);
            for &neighbour in links.get(&id).into_iter().flatten() {
                if visited.insert(neighbour) {
                    queue.push_back(neighbour);
                }
            }
        }

        members
    }

    fn assemble(
        members: &[u32],
        descriptors: &HashMap<u32, EvolutionDescriptor>,
        nodes: &mut HashMap<u32, EvolutionNode>,
    ) -> EvolutionFamily {
        let member_set: HashSet<u32> = members.iter().copied().collect();
        let mut ordered = members.to_vec();
        ordered.sort_unstable();

        let mut base_ids: Vec<u32> = ordered
            .iter()
            .filter(|id| descriptors.get(*id).is_some_and(|d| d.prev.is_empty()))
            .copied()
            .collect();

        // A component whose every member claims a predecessor has lost its
        // root; the smallest id stands in so the family stays renderable.
        let synthetic_base = base_ids.is_empty();
        if synthetic_base {
            if let Some(&min) = ordered.first() {
                log::warn!("Evolution family of {min} has no base; using {min} as synthetic base");
                base_ids.push(min);
            }
        }

        let key = base_ids.first().copied().unwrap_or_default();
        let mut family = EvolutionFamily::new(key.to_string());
        family.base_ids = base_ids;
        family.synthetic_base = synthetic_base;

        for id in &ordered {
            if let Some(node) = nodes.remove(id) {
                family.add_node(node);
            }
        }

        for &id in &ordered {
            let Some(descriptor) = descriptors.get(&id) else {
                continue;
            };
            for link in &descriptor.next {
                if !member_set.contains(&link.target) {
                    log::debug!("Dropping edge {id} -> {} (not a member)", link.target);
                    continue;
                }
                family.add_edge(EvolutionEdge {
                    from: id,
                    to: link.target,
                    method: link.method.clone(),
                });
            }
        }

        // Predecessor links the other side forgot to mirror as a successor
        for &id in &ordered {
            let Some(descriptor) = descriptors.get(&id) else {
                continue;
            };
            for link in &descriptor.prev {
                if member_set.contains(&link.target) && !family.has_edge(link.target, id) {
                    log::debug!("Inferring edge {} -> {id} from predecessor link", link.target);
                    family.add_edge(EvolutionEdge {
                        from: link.target,
                        to: id,
                        method: link.method.clone(),
                    });
                }
            }
        }

        family
    }
}
