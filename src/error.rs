use thiserror::Error;

#[derive(Error, Debug)]
pub enum BlockStoreError {
    #[error("Invalid file size: {0} bytes")]
    InvalidSize(u64),

    #[error("Insufficient space: {required} blocks required, {free} free")]
    InsufficientSpace { required: usize, free: usize },

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("File already exists: {0}")]
    DuplicateName(String),

    #[error("Invalid block index: {0}")]
    InvalidBlockIndex(usize),

    #[error("Internal consistency fault: {0}")]
    InternalInconsistency(String),
}

pub type Result<T> = std::result::Result<T, BlockStoreError>;
