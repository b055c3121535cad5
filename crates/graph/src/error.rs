use thiserror::Error;

pub type Result<T> = std::result::Result<T, GraphError>;

#[derive(Error, Debug)]
pub enum GraphError {
    #[error("Pokemon {0} not found")]
    MemberNotFound(u32),

    #[error("Evolution family not found: {0}")]
    FamilyNotFound(String),

    #[error("Catalog error: {0}")]
    Catalog(#[from] dex_catalog::CatalogError),
}
