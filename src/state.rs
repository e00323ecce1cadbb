use egui::Vec2;

use crate::animation::{AnimationPoll, ReturnAnimation};

/// The phase a [`DragState`] is in, derived from its fields.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DragPhase {
    Idle,
    Dragging {
        drag_index: usize,
    },
    DraggingOverTarget {
        drag_index: usize,
        target_index: usize,
    },
    /// A cancelled drag is animating back to its slot.
    Returning {
        last_drag_index: usize,
        release_offset: Vec2,
    },
}

/// Result of ending a drag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragOutcome {
    /// Released over a slot. The item at `from` should move to `to`.
    Dropped { from: usize, to: usize },
    /// Released outside every slot. The item returns to `index`.
    Cancelled { index: usize },
    /// There was no drag to end.
    Ignored,
}

/// Drag indices and the return animation of a dock.
///
/// `drag_index` is only set during a drag and `target_index` only alongside it.
/// `last_drag_index` and `release_offset` are set together when a drag is cancelled and cleared
/// together when the return animation finishes or is stopped, so a drag and a return never
/// overlap.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DragState {
    drag_index: Option<usize>,
    target_index: Option<usize>,
    last_drag_index: Option<usize>,
    release_offset: Option<Vec2>,
    animation: Option<ReturnAnimation>,
}

impl DragState {
    pub fn drag_index(&self) -> Option<usize> {
        self.drag_index
    }

    pub fn target_index(&self) -> Option<usize> {
        self.target_index
    }

    pub fn last_drag_index(&self) -> Option<usize> {
        self.last_drag_index
    }

    pub fn release_offset(&self) -> Option<Vec2> {
        self.release_offset
    }

    pub fn animation(&self) -> Option<&ReturnAnimation> {
        self.animation.as_ref()
    }

    pub fn phase(&self) -> DragPhase {
        match (
            self.drag_index,
            self.target_index,
            self.last_drag_index,
            self.release_offset,
        ) {
            (Some(drag_index), Some(target_index), ..) => DragPhase::DraggingOverTarget {
                drag_index,
                target_index,
            },
            (Some(drag_index), None, ..) => DragPhase::Dragging { drag_index },
            (None, _, Some(last_drag_index), Some(release_offset)) => DragPhase::Returning {
                last_drag_index,
                release_offset,
            },
            _ => DragPhase::Idle,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.phase() == DragPhase::Idle
    }

    /// A drag began on the item at `index`. Any running return animation is stopped first.
    pub fn start(&mut self, index: usize) {
        self.stop_return();
        self.target_index = None;
        self.drag_index = Some(index);
        tracing::debug!(drag_index = index, "drag started");
    }

    /// The pointer entered the slot at `index`. Entering the dragged item's own slot is allowed.
    pub fn enter(&mut self, index: usize) {
        let Some(drag_index) = self.drag_index else {
            tracing::trace!(index, "ignoring target enter without a drag");
            return;
        };
        if self.target_index != Some(index) {
            tracing::debug!(drag_index, target_index = index, "drag entered target");
        }
        self.target_index = Some(index);
    }

    /// The pointer left every slot.
    pub fn leave(&mut self) {
        if self.drag_index.is_none() {
            tracing::trace!("ignoring target leave without a drag");
            return;
        }
        if let Some(target_index) = self.target_index.take() {
            tracing::debug!(target_index, "drag left target");
        }
    }

    /// Ends the drag. With a target the drop is accepted, otherwise the dragged item starts
    /// returning to its slot from `release_offset` at time `now`.
    pub fn release(&mut self, release_offset: Vec2, now: f64, duration: f32) -> DragOutcome {
        let Some(drag_index) = self.drag_index.take() else {
            tracing::trace!("ignoring release without a drag");
            return DragOutcome::Ignored;
        };

        if let Some(target_index) = self.target_index.take() {
            self.stop_return();
            tracing::debug!(from = drag_index, to = target_index, "drag dropped");
            return DragOutcome::Dropped {
                from: drag_index,
                to: target_index,
            };
        }

        self.last_drag_index = Some(drag_index);
        self.release_offset = Some(release_offset);
        self.animation = Some(ReturnAnimation::start(now, duration));
        tracing::debug!(
            index = drag_index,
            offset_x = release_offset.x,
            offset_y = release_offset.y,
            "drag cancelled, returning"
        );
        DragOutcome::Cancelled { index: drag_index }
    }

    /// Advances the return animation. Once it completes the state settles to idle. Returns
    /// `None` when nothing is returning.
    pub fn poll(&mut self, now: f64) -> Option<AnimationPoll> {
        let animation = self.animation.as_mut()?;
        let poll = animation.poll(now);
        if !matches!(poll, AnimationPoll::Running { .. }) {
            self.clear_return();
            tracing::debug!("return animation finished");
        }
        Some(poll)
    }

    /// Index and current offset of the returning item.
    pub fn return_offset(&self, now: f64) -> Option<(usize, Vec2)> {
        let index = self.last_drag_index?;
        let release_offset = self.release_offset?;
        let animation = self.animation.as_ref()?;
        Some((index, animation.offset(release_offset, now)))
    }

    /// Stops a running return animation and forgets the returning item.
    pub fn stop_return(&mut self) {
        if let Some(animation) = self.animation.as_mut() {
            if animation.is_running() {
                tracing::debug!(index = ?self.last_drag_index, "return animation stopped early");
            }
            animation.stop();
        }
        self.clear_return();
    }

    /// Back to idle, stopping anything in flight.
    pub fn reset(&mut self) {
        self.stop_return();
        self.drag_index = None;
        self.target_index = None;
    }

    fn clear_return(&mut self) {
        self.animation = None;
        self.last_drag_index = None;
        self.release_offset = None;
    }
}
