use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("duplicate value for unique column: {0}")]
    Duplicate(String),
    #[error("database error: {0}")]
    Db(String),
}
