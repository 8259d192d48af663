//! Widget descriptor data model.
pub mod types;

pub use types::{WidgetDescriptor, WidgetKind};
