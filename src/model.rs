use egui::{Pos2, Vec2};

use crate::{
    animation::AnimationPoll,
    config::{ConfigError, DockConfig},
    geometry::{self, SlotTransform},
    items::ItemList,
    state::{DragOutcome, DragPhase, DragState},
};

/// Pointer data at the moment a drag ends.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragRelease {
    /// Top left corner of the dragged item when it was let go.
    pub position: Pos2,
    pub velocity: Vec2,
    /// Top left corner of the dragged item's slot.
    pub resting: Pos2,
}

type ReorderCallback = Box<dyn FnMut(usize, usize)>;

/// Items, drag state and settings of a dock, independent of any [`egui::Ui`].
///
/// [`crate::Dock`] feeds it from egui input, but it can be driven directly by any host that
/// reports drag start, target enter/leave, drag end and frame time in order.
pub struct DockModel<T> {
    items: ItemList<T>,
    state: DragState,
    config: DockConfig,
    on_reorder: Option<ReorderCallback>,
}

impl<T> DockModel<T> {
    pub fn new(items: impl IntoIterator<Item = T>) -> Self {
        Self {
            items: ItemList::new(items),
            state: DragState::default(),
            config: DockConfig::default(),
            on_reorder: None,
        }
    }

    /// Replaces the default settings after checking them with [`DockConfig::validate`].
    pub fn with_config(mut self, config: DockConfig) -> Result<Self, ConfigError> {
        self.config = config.validate()?;
        Ok(self)
    }

    /// Called with the old and new index after every reorder that changed the list.
    pub fn on_reorder(mut self, callback: impl FnMut(usize, usize) + 'static) -> Self {
        self.on_reorder = Some(Box::new(callback));
        self
    }

    pub fn items(&self) -> &[T] {
        self.items.as_slice()
    }

    pub fn item_list(&self) -> &ItemList<T> {
        &self.items
    }

    pub fn into_items(self) -> Vec<T> {
        self.items.into_vec()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn phase(&self) -> DragPhase {
        self.state.phase()
    }

    pub fn config(&self) -> &DockConfig {
        &self.config
    }

    pub fn drag_start(&mut self, index: usize) {
        self.check_index(index);
        self.state.start(index);
    }

    pub fn drag_enter(&mut self, index: usize) {
        self.check_index(index);
        self.state.enter(index);
    }

    pub fn drag_leave(&mut self) {
        self.state.leave();
    }

    /// Ends the current drag at time `now`. A drop over a slot reorders the items and runs the
    /// reorder callback, anything else starts the return animation.
    pub fn drag_end(&mut self, release: DragRelease, now: f64) -> DragOutcome {
        let offset = geometry::release_offset(
            release.position,
            release.velocity,
            release.resting,
            self.config.release_extrapolation,
        );
        let outcome = self
            .state
            .release(offset, now, self.config.return_duration);

        if let DragOutcome::Dropped { from, to } = outcome {
            if from != to {
                self.items.reorder(from, to);
                if let Some(on_reorder) = &mut self.on_reorder {
                    on_reorder(from, to);
                }
            }
        }
        outcome
    }

    /// Advances the return animation, see [`DragState::poll`].
    pub fn tick(&mut self, now: f64) -> Option<AnimationPoll> {
        self.state.poll(now)
    }

    /// Where and how large the slot at `index` is drawn at time `now`, relative to its resting
    /// rect. Includes the return animation for the returning item.
    pub fn slot_transform(&self, index: usize, now: f64) -> SlotTransform {
        let mut transform = geometry::slot_transform(&self.state, index, &self.config);
        if let Some((returning, offset)) = self.state.return_offset(now) {
            if returning == index {
                transform.offset += offset;
            }
        }
        transform
    }

    /// Stops any animation and drops the drag state.
    pub fn dispose(&mut self) {
        if !self.state.is_idle() {
            tracing::debug!(phase = ?self.state.phase(), "dock disposed mid interaction");
        }
        self.state.reset();
    }

    fn check_index(&self, index: usize) {
        assert!(
            index < self.items.len(),
            "slot index {index} out of bounds for a dock of {} items",
            self.items.len()
        );
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for DockModel<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DockModel")
            .field("items", &self.items)
            .field("state", &self.state)
            .field("config", &self.config)
            .field("on_reorder", &self.on_reorder.is_some())
            .finish()
    }
}
