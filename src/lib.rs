//! A horizontal dock of items for egui that can be reordered by drag and drop.
//!
//! While an item is dragged its neighbors slide over to show where it will land, the slot under
//! the pointer grows and the dragged item shrinks. Letting go outside the dock animates the item
//! back to its slot. [`Dock`] is the egui widget, [`DockModel`] is the same state machine without
//! egui for custom hosts and tests.

pub use animation::{AnimationPoll, ReturnAnimation};
pub use config::{ConfigError, DockConfig};
pub use dock::{Dock, DockResponse};
pub use geometry::SlotTransform;
pub use items::ItemList;
pub use model::{DockModel, DragRelease};
pub use state::{DragOutcome, DragPhase, DragState};

pub mod animation;
pub mod config;
mod dock;
pub mod geometry;
mod handle;
mod items;
mod model;
mod state;
pub mod utils;
