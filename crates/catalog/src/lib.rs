//! # Dex Catalog
//!
//! The static creature dataset, loaded once and indexed by id.
//!
//! The catalog is deliberately dumb: it decodes records and answers id
//! lookups. Evolution descriptors are carried through untouched as raw JSON;
//! `dex-graph` owns their interpretation.
//!
//! ## Example
//!
//! ```no_run
//! use dex_catalog::Catalog;
//!
//! fn main() -> dex_catalog::Result<()> {
//!     let catalog = Catalog::load("data/pokedex.json")?;
//!     if let Some(record) = catalog.get(25) {
//!         println!("{} ({})", record.display_name(), record.types.join("/"));
//!     }
//!     Ok(())
//! }
//! ```

mod catalog;
mod error;
mod types;

pub use catalog::Catalog;
pub use error::{CatalogError, Result};
pub use types::{RawEvolution, Record, RecordImage, RecordName};
