pub mod hit;
pub mod paint;

pub use hit::{Anchor, Hit};
