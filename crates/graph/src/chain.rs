use crate::types::{EvolutionFamily, EvolutionNode};
use serde::Serialize;
use std::collections::HashSet;

/// One step of a flat evolution line
#[derive(Debug, Clone, Serialize)]
pub struct ChainLink<'f> {
    pub node: &'f EvolutionNode,

    /// Method from the previous link; `None` for the first
    pub method: Option<&'f str>,

    pub is_current: bool,
}

/// Single-line view of a family: walk back from `focus_id` along first
/// incoming edges to a member with none, then forward along first outgoing
/// edges.
///
/// Side branches are not shown, so a focal member on a non-first branch is
/// absent from the line. An unknown `focus_id` starts from the first base.
pub fn flat_chain(family: &EvolutionFamily, focus_id: u32) -> Vec<ChainLink<'_>> {
    let start = if family.contains(focus_id) {
        let mut current = focus_id;
        let mut seen = HashSet::from([current]);
        while let Some(edge) = family.incoming(current).next() {
            if !seen.insert(edge.from) {
                break;
            }
            current = edge.from;
        }
        current
    } else {
        match family.base_ids.first() {
            Some(&base) => base,
            None => return Vec::new(),
        }
    };

    let mut links = Vec::new();
    let mut seen = HashSet::new();
    let mut current = start;
    let mut method = None;

    while let Some(node) = family.node(current) {
        if !seen.insert(current) {
            break;
        }
        links.push(ChainLink {
            node,
            method,
            is_current: current == focus_id,
        });

        let Some(edge) = family.outgoing(current).next() else {
            break;
        };
        method = Some(edge.method.as_str());
        current = edge.to;
    }

    links
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EvolutionEdge;

    fn family(bases: &[u32], ids: &[u32], edges: &[(u32, u32, &str)]) -> EvolutionFamily {
        let mut family = EvolutionFamily::new(bases[0].to_string());
        family.base_ids = bases.to_vec();
        for &id in ids {
            family.add_node(EvolutionNode {
                id,
                name: format!("#{id}"),
                sprite: String::new(),
                image: String::new(),
                types: Vec::new(),
                species: String::new(),
            });
        }
        for &(from, to, method) in edges {
            family.add_edge(EvolutionEdge {
                from,
                to,
                method: method.to_string(),
            });
        }
        family
    }

    fn ids(chain: &[ChainLink<'_>]) -> Vec<u32> {
        chain.iter().map(|l| l.node.id).collect()
    }

    #[test]
    fn walks_back_to_base_then_forward() {
        let family = family(&[1], &[1, 2, 3], &[(1, 2, "Level 16"), (2, 3, "Level 32")]);
        let chain = flat_chain(&family, 3);

        assert_eq!(ids(&chain), vec![1, 2, 3]);
        assert_eq!(chain[0].method, None);
        assert_eq!(chain[2].method, Some("Level 32"));
        assert!(chain[2].is_current);
        assert!(!chain[0].is_current);
    }

    #[test]
    fn follows_first_branch_only() {
        let family = family(
            &[43],
            &[43, 44, 45, 182],
            &[(43, 44, "Level 21"), (44, 45, "Leaf Stone"), (44, 182, "Sun Stone")],
        );

        let chain = flat_chain(&family, 182);
        assert_eq!(ids(&chain), vec![43, 44, 45]);
        assert!(chain.iter().all(|l| !l.is_current));
    }

    #[test]
    fn unknown_focus_starts_at_base() {
        let family = family(&[1], &[1, 2], &[(1, 2, "Level 16")]);
        let chain = flat_chain(&family, 999);
        assert_eq!(ids(&chain), vec![1, 2]);
    }

    #[test]
    fn cycle_is_cut() {
        let family = family(&[1], &[1, 2], &[(1, 2, "a"), (2, 1, "b")]);
        assert_eq!(ids(&flat_chain(&family, 2)), vec![1, 2]);
    }
}
