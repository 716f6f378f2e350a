pub mod input;
pub mod rubber_band;
pub mod selection;
pub mod shortcuts;
pub mod surface;
pub mod tools;
pub mod transform;

pub use input::{InputEvent, Modifiers};
pub use rubber_band::SelectionBox;
pub use selection::{Selection, SelectionController};
pub use surface::{BoardMutation, EditingSurface};
pub use tools::ToolKind;
