pub mod config;
pub mod error;
pub mod geometry;
pub mod id;
pub mod model;
pub mod seed;

pub use config::BoardConfig;
pub use error::{BoardError, Result};
pub use geometry::Bounds;
pub use id::NodeId;
pub use model::*;
