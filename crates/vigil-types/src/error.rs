use thiserror::Error;

#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("malformed envelope: {0}")]
    Malformed(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SchemaError>;
