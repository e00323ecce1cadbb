//! Per slot offsets and scales derived from the drag state.
//!
//! Slots between the dragged item and the target slide one item width toward the dragged item's
//! old slot, which opens a gap at the target and closes the one the dragged item left behind.

use egui::{Pos2, Rect, Vec2};

use crate::{config::DockConfig, state::DragState};

/// Visual displacement of a slot relative to its resting rect.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SlotTransform {
    pub offset: Vec2,
    pub scale: f32,
}

impl SlotTransform {
    pub const IDENTITY: Self = Self {
        offset: Vec2::ZERO,
        scale: 1.0,
    };

    /// Translates `rect` by the offset, then scales it about its center.
    pub fn apply(&self, rect: Rect) -> Rect {
        Rect::from_center_size(rect.center() + self.offset, rect.size() * self.scale)
    }
}

impl Default for SlotTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Horizontal shift of the slot at `index`.
pub fn slot_offset(
    drag_index: Option<usize>,
    target_index: Option<usize>,
    index: usize,
    item_width: f32,
) -> f32 {
    let (Some(drag), Some(target)) = (drag_index, target_index) else {
        return 0.0;
    };
    if index == drag {
        return 0.0;
    }

    if drag < target {
        if drag < index && index <= target {
            return -item_width;
        }
    } else if target <= index && index < drag {
        return item_width;
    }
    0.0
}

pub fn slot_scale(
    drag_index: Option<usize>,
    target_index: Option<usize>,
    index: usize,
    config: &DockConfig,
) -> f32 {
    if target_index == Some(index) {
        config.target_scale
    } else if drag_index == Some(index) {
        config.dragged_scale
    } else {
        1.0
    }
}

/// Transform of the slot at `index`, ignoring the return animation. While an item is returning
/// every slot rests, the returning item's displacement is added separately.
pub fn slot_transform(state: &DragState, index: usize, config: &DockConfig) -> SlotTransform {
    if state.last_drag_index().is_some() {
        return SlotTransform::IDENTITY;
    }

    let drag = state.drag_index();
    let target = state.target_index();
    SlotTransform {
        offset: Vec2::new(slot_offset(drag, target, index, config.item_width), 0.0),
        scale: slot_scale(drag, target, index, config),
    }
}

/// Where the dragged item was released relative to its resting slot. The release position is
/// projected forward along the release velocity so the snap back starts where the item appears
/// to be on the next frame.
pub fn release_offset(
    release_pos: Pos2,
    velocity: Vec2,
    resting_pos: Pos2,
    extrapolation: f32,
) -> Vec2 {
    (release_pos + velocity * extrapolation) - resting_pos
}
