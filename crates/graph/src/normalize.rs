use crate::types::{EvolutionDescriptor, EvolutionLink};
use dex_catalog::RawEvolution;
use serde_json::Value;

impl EvolutionDescriptor {
    /// Normalize both sides of a raw descriptor
    pub fn from_raw(raw: &RawEvolution) -> Self {
        Self {
            prev: normalize_links(raw.prev.as_ref()),
            next: normalize_links(raw.next.as_ref()),
        }
    }
}

/// Turn one raw `prev`/`next` field into an ordered list of links.
///
/// Accepted shapes are a list of `[id, method]` pairs or a single
/// `["id", "method"]` pair. Anything else, including an empty list, yields
/// no links. Malformed pairs inside a list are skipped individually.
pub fn normalize_links(raw: Option<&Value>) -> Vec<EvolutionLink> {
    let Some(Value::Array(items)) = raw else {
        if let Some(other) = raw.filter(|v| !v.is_null()) {
            log::debug!("Ignoring non-list evolution descriptor: {other}");
        }
        return Vec::new();
    };

    match items.first() {
        Some(Value::Array(_)) => items.iter().filter_map(parse_pair).collect(),
        Some(Value::String(_)) if items.len() == 2 && items[1].is_string() => {
            parse_parts(items).into_iter().collect()
        }
        None => Vec::new(),
        Some(_) => {
            log::debug!("Ignoring unrecognized evolution descriptor: {items:?}");
            Vec::new()
        }
    }
}

fn parse_pair(value: &Value) -> Option<EvolutionLink> {
    let Value::Array(parts) = value else {
        log::debug!("Skipping non-pair evolution entry: {value}");
        return None;
    };
    parse_parts(parts)
}

fn parse_parts(parts: &[Value]) -> Option<EvolutionLink> {
    let [id, method, ..] = parts else {
        log::debug!("Skipping short evolution entry: {parts:?}");
        return None;
    };
    let Some(target) = parse_id(id) else {
        log::debug!("Skipping evolution entry with bad id: {id}");
        return None;
    };
    let method = method.as_str()?.to_string();
    Some(EvolutionLink { target, method })
}

fn parse_id(value: &Value) -> Option<u32> {
    let id = match value {
        Value::String(s) => s.trim().parse::<u32>().ok(),
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        _ => None,
    };
    id.filter(|&id| id > 0)
}
