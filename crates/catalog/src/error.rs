use thiserror::Error;

pub type Result<T> = std::result::Result<T, CatalogError>;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Catalog parse error: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Invalid catalog path: {0}")]
    InvalidPath(String),
}
