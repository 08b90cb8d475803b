use thiserror::Error;

use crate::ShapeId;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("Shape path has no points")]
    EmptyPath,
    #[error("No shape with id {0}")]
    InvalidShape(ShapeId),
    #[error("Snapshot entry {0} is inconsistent")]
    InvalidSnapshot(usize),
}

pub type Result<T> = core::result::Result<T, GridError>;
