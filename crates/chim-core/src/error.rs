//! Errors returned by fallible board operations.

use crate::id::NodeId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BoardError {
    #[error("node {0} already exists on the board")]
    DuplicateNode(NodeId),

    #[error("node {0} does not exist on the board")]
    UnknownNode(NodeId),

    #[error("invalid geometry for {id}: {reason}")]
    InvalidGeometry { id: NodeId, reason: &'static str },

    #[error("invalid seed data: {0}")]
    Seed(#[source] serde_json::Error),

    #[error("invalid board config: {0}")]
    Config(#[source] serde_json::Error),
}

pub type Result<T, E = BoardError> = std::result::Result<T, E>;
