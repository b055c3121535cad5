use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One catalog entry as it appears in the dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Unique positive id
    pub id: u32,

    pub name: RecordName,

    /// Type tags (e.g. "Grass", "Poison")
    #[serde(rename = "type", default)]
    pub types: Vec<String>,

    /// Species label (e.g. "Seed Pokémon")
    #[serde(default)]
    pub species: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub image: RecordImage,

    /// Raw evolution descriptor, uninterpreted
    #[serde(default)]
    pub evolution: RawEvolution,
}

impl Record {
    /// Display name used everywhere outside the raw record
    pub fn display_name(&self) -> &str {
        &self.name.english
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordName {
    #[serde(default)]
    pub english: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub japanese: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chinese: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub french: Option<String>,
}

/// Visual asset references
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordImage {
    #[serde(default)]
    pub sprite: String,

    #[serde(default)]
    pub thumbnail: String,

    #[serde(default)]
    pub hires: String,
}

/// Predecessor/successor fields exactly as loaded.
///
/// Upstream data is inconsistent here: a field may be absent, a single
/// `[id, method]` pair, or a list of pairs. The catalog keeps the raw JSON
/// and leaves interpretation to the evolution graph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawEvolution {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prev: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<Value>,
}
