//! Model types - documents, selections, and the workspace

pub mod document;
pub mod selection;
pub mod workspace;

pub use document::{DepthMap, Document};
pub use selection::{Position, Selection};
pub use workspace::{DocumentId, ViewState, Workspace};
