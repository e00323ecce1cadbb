use egui::{Area, CursorIcon, Direction, Id, Layout, Order, Rect, ScrollArea, Sense, Ui, Vec2};
use std::hash::Hash;

use crate::{
    animation::AnimationPoll,
    config::{ConfigError, DockConfig},
    geometry::SlotTransform,
    handle::Handle,
    model::{DockModel, DragRelease},
    state::DragOutcome,
};

/// What happened in the dock during the last [`Dock::ui`] call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DockResponse {
    Idle,
    /// An item is being dragged, `target` is the slot under the pointer.
    Dragging { from: usize, target: Option<usize> },
    /// A drag was dropped over a slot this frame. The dock's items are already reordered.
    Reordered { from: usize, to: usize },
    /// A drag was let go outside the dock this frame and starts returning.
    Cancelled { index: usize },
    /// The item at `index` is animating back to its slot.
    Returning { index: usize, progress: f32 },
}

/// A horizontal row of fixed width slots that can be reordered by drag and drop.
///
/// `builder` draws one item into the ui of its slot. The ui is sized to a square of
/// [`DockConfig::item_width`] and may be scaled while dragging.
///
/// # Example
/// ```rust,no_run
/// use eframe::egui;
/// use egui_dnd_dock::Dock;
///
/// struct DockApp {
///     dock: Dock<String>,
/// }
///
/// impl eframe::App for DockApp {
///     fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
///         egui::CentralPanel::default().show(ctx, |ui| {
///             self.dock.ui(ui);
///             ui.label(self.dock.items().join(", "));
///         });
///     }
/// }
///
/// fn main() -> eframe::Result<()> {
///     let items = ["a", "b", "c"].map(String::from);
///     let dock = Dock::new("dock", items, |ui: &mut egui::Ui, item: &String| {
///         ui.label(item.as_str());
///     })
///     .on_reorder(|from, to| println!("moved {from} to {to}"));
///
///     eframe::run_native(
///         "Dock Example",
///         eframe::NativeOptions::default(),
///         Box::new(|_| Box::new(DockApp { dock })),
///     )
/// }
/// ```
pub struct Dock<T> {
    id: Id,
    model: DockModel<T>,
    builder: Box<dyn FnMut(&mut Ui, &T)>,
    /// Slot origin relative to the pointer when dragging began
    grab_offset: Option<Vec2>,
}

impl<T> Dock<T> {
    pub fn new(
        id_source: impl Hash,
        items: impl IntoIterator<Item = T>,
        builder: impl FnMut(&mut Ui, &T) + 'static,
    ) -> Self {
        Self {
            id: Id::new(id_source),
            model: DockModel::new(items),
            builder: Box::new(builder),
            grab_offset: None,
        }
    }

    /// Replaces the default settings. Rejects the settings if [`DockConfig::validate`] fails.
    pub fn with_config(mut self, config: DockConfig) -> Result<Self, ConfigError> {
        self.model = self.model.with_config(config)?;
        Ok(self)
    }

    /// Called with the old and new index after every drop that changed the order.
    pub fn on_reorder(mut self, callback: impl FnMut(usize, usize) + 'static) -> Self {
        self.model = self.model.on_reorder(callback);
        self
    }

    pub fn items(&self) -> &[T] {
        self.model.items()
    }

    pub fn model(&self) -> &DockModel<T> {
        &self.model
    }

    pub fn into_items(self) -> Vec<T> {
        self.model.into_items()
    }

    /// Stops a running return animation and forgets any drag in progress.
    pub fn dispose(&mut self) {
        self.model.dispose();
        self.grab_offset = None;
    }

    pub fn ui(&mut self, ui: &mut Ui) -> DockResponse {
        let now = ui.input(|i| i.time);
        let Self {
            id,
            model,
            builder,
            grab_offset,
        } = self;
        let id = *id;

        let mut response = match model.tick(now) {
            Some(AnimationPoll::Running { progress }) => {
                ui.ctx().request_repaint();
                model
                    .state()
                    .last_drag_index()
                    .map_or(DockResponse::Idle, |index| DockResponse::Returning {
                        index,
                        progress,
                    })
            }
            _ => DockResponse::Idle,
        };

        let config = *model.config();
        let slot_size = Vec2::new(
            config.item_width,
            config.item_width * config.target_scale.max(1.0),
        );
        let mut slot_rects = Vec::with_capacity(model.len());
        let mut drag_started = None;
        let mut viewport = Rect::NOTHING;

        // sense every slot first so a drag that starts this frame is not also painted in its slot
        let is_drop_target = model.state().drag_index().is_some();
        Self::draw_row(ui, config.row_margin, is_drop_target, |ui| {
            ScrollArea::horizontal()
                .id_source(id)
                .drag_to_scroll(false)
                .auto_shrink([false, true])
                .show(ui, |ui| {
                    viewport = ui.clip_rect();
                    ui.horizontal(|ui| {
                        ui.spacing_mut().item_spacing.x = 0.0;
                        for index in 0..model.len() {
                            let (rect, _) = ui.allocate_exact_size(slot_size, Sense::hover());
                            let handle = Handle {
                                grab_offset: &mut *grab_offset,
                            };
                            if handle.interact(ui, rect, id.with(index)).drag_started() {
                                drag_started = Some(index);
                            }
                            slot_rects.push(rect);
                        }
                    });

                    if let Some(index) = drag_started {
                        model.drag_start(index);
                    }

                    for (index, (item, rect)) in model.items().iter().zip(&slot_rects).enumerate()
                    {
                        // the dragged and the returning item float above the row
                        let state = model.state();
                        if state.drag_index() == Some(index)
                            || state.last_drag_index() == Some(index)
                        {
                            continue;
                        }

                        let painted = model
                            .slot_transform(index, now)
                            .apply(item_rect(*rect, config.item_width));
                        let mut item_ui = ui.child_ui(
                            painted,
                            Layout::centered_and_justified(Direction::LeftToRight),
                        );
                        builder(&mut item_ui, item);
                    }
                });
        });

        if let Some(index) = drag_started {
            response = DockResponse::Dragging {
                from: index,
                target: None,
            };
        }

        if let Some(drag_index) = model.state().drag_index() {
            ui.output_mut(|o| o.cursor_icon = CursorIcon::Grabbing);

            let (pointer_pos, velocity, released) = ui.input(|i| {
                (
                    i.pointer.hover_pos().or(i.pointer.interact_pos()),
                    i.pointer.velocity(),
                    i.pointer.any_released(),
                )
            });
            let released = released || !ui.memory(|m| m.is_anything_being_dragged());

            // the slot under the pointer, if it is visible
            let hovering_idx = pointer_pos
                .filter(|pos| viewport.contains(*pos))
                .and_then(|pos| slot_rects.iter().position(|rect| rect.contains(pos)));
            match hovering_idx {
                Some(target_idx) => model.drag_enter(target_idx),
                None => model.drag_leave(),
            }

            let resting = slot_rects[drag_index].min;
            let position = pointer_pos
                .map(|pos| pos + grab_offset.unwrap_or_default())
                .unwrap_or(resting);

            if released {
                *grab_offset = None;
                let release = DragRelease {
                    position,
                    velocity,
                    resting,
                };
                response = match model.drag_end(release, now) {
                    DragOutcome::Dropped { from, to } => {
                        ui.ctx().request_repaint();
                        DockResponse::Reordered { from, to }
                    }
                    DragOutcome::Cancelled { index } => {
                        ui.ctx().request_repaint();
                        DockResponse::Cancelled { index }
                    }
                    DragOutcome::Ignored => DockResponse::Idle,
                };
            } else {
                let transform = SlotTransform {
                    offset: Vec2::ZERO,
                    scale: model.slot_transform(drag_index, now).scale,
                };
                let rect = transform.apply(item_rect(
                    Rect::from_min_size(position, slot_size),
                    config.item_width,
                ));
                Self::draw_floating(
                    ui,
                    id.with("dragged"),
                    rect,
                    &model.items()[drag_index],
                    builder.as_mut(),
                );
                response = DockResponse::Dragging {
                    from: drag_index,
                    target: model.state().target_index(),
                };
            }
        }

        if let Some((index, offset)) = model.state().return_offset(now) {
            let rect = item_rect(slot_rects[index].translate(offset), config.item_width);
            Self::draw_floating(
                ui,
                id.with("returning"),
                rect,
                &model.items()[index],
                builder.as_mut(),
            );
        }

        response
    }

    /// Draws `item` on top of everything else at `rect`.
    fn draw_floating(
        ui: &Ui,
        id: Id,
        rect: Rect,
        item: &T,
        builder: &mut dyn FnMut(&mut Ui, &T),
    ) {
        // Items in `Order::Tooltip` never receive interaction, which is fine since the dragged
        // slot keeps sensing the drag in the row.
        Area::new(id)
            .order(Order::Tooltip)
            .interactable(false)
            .fixed_pos(rect.min)
            .show(ui.ctx(), |ui| {
                let (rect, _) = ui.allocate_exact_size(rect.size(), Sense::hover());
                let mut item_ui =
                    ui.child_ui(rect, Layout::centered_and_justified(Direction::LeftToRight));
                builder(&mut item_ui, item);
            });
    }

    /// Draws the row background around `row_body`, highlighted while a drag is over it.
    fn draw_row<R>(
        ui: &mut Ui,
        margin: f32,
        is_drop_target: bool,
        row_body: impl FnOnce(&mut Ui) -> R,
    ) -> R {
        let margin = Vec2::splat(margin);

        let outer_rect_bounds = ui.available_rect_before_wrap();
        let inner_rect = outer_rect_bounds.shrink2(margin);
        let where_to_put_background = ui.painter().add(epaint::Shape::Noop);

        let mut content_ui = ui.child_ui(inner_rect, *ui.layout());

        let inner = row_body(&mut content_ui);
        let outer_rect =
            Rect::from_min_max(outer_rect_bounds.min, content_ui.min_rect().max + margin);
        let (rect, _) = ui.allocate_at_least(outer_rect.size(), Sense::hover());

        // determine row coloring depending on whether a drag is currently over it
        let style = if is_drop_target && ui.rect_contains_pointer(rect) {
            ui.visuals().widgets.active
        } else {
            ui.visuals().widgets.inactive
        };

        ui.painter().set(
            where_to_put_background,
            epaint::Shape::Vec(vec![
                epaint::Shape::rect_filled(rect, style.rounding, style.bg_fill),
                epaint::Shape::rect_stroke(rect, style.rounding, style.bg_stroke),
            ]),
        );

        inner
    }
}

/// The square an item is drawn in, centered in its slot.
fn item_rect(slot: Rect, item_width: f32) -> Rect {
    Rect::from_center_size(slot.center(), Vec2::splat(item_width))
}

impl<T: std::fmt::Debug> std::fmt::Debug for Dock<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dock")
            .field("id", &self.id)
            .field("model", &self.model)
            .field("grab_offset", &self.grab_offset)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{Event, Modifiers, PointerButton, Pos2, RawInput};
    use std::{cell::RefCell, rc::Rc};

    type Painted = Rc<RefCell<Vec<(&'static str, Rect)>>>;

    /// Runs a dock headless, one egui frame per call, recording where each item was painted.
    struct Harness {
        ctx: egui::Context,
        dock: Dock<&'static str>,
        painted: Painted,
        screen: Rect,
        time: f64,
    }

    impl Harness {
        fn new(items: &[&'static str], screen_size: Vec2) -> Self {
            let painted = Painted::default();
            let record = painted.clone();
            let dock = Dock::new("dock", items.to_vec(), move |ui: &mut Ui, item: &&'static str| {
                record.borrow_mut().push((*item, ui.max_rect()));
            });
            let mut harness = Self {
                ctx: egui::Context::default(),
                dock,
                painted,
                screen: Rect::from_min_size(Pos2::ZERO, screen_size),
                time: 0.0,
            };
            // egui hit tests against the layers of the previous frame
            harness.frame(Vec::new());
            harness
        }

        fn frame(&mut self, events: Vec<Event>) -> DockResponse {
            self.painted.borrow_mut().clear();
            let input = RawInput {
                screen_rect: Some(self.screen),
                time: Some(self.time),
                events,
                ..Default::default()
            };
            self.time += 1.0 / 60.0;

            let mut response = DockResponse::Idle;
            let dock = &mut self.dock;
            let _ = self.ctx.run(input, |ctx| {
                egui::CentralPanel::default().show(ctx, |ui| {
                    response = dock.ui(ui);
                });
            });
            response
        }

        /// Center of `item` as painted in the last frame.
        fn center_of(&self, item: &str) -> Pos2 {
            self.painted
                .borrow()
                .iter()
                .find(|(painted, _)| *painted == item)
                .map(|(_, rect)| rect.center())
                .expect("item painted last frame")
        }

        fn paint_count(&self, item: &str) -> usize {
            self.painted
                .borrow()
                .iter()
                .filter(|(painted, _)| *painted == item)
                .count()
        }

        fn press(&mut self, pos: Pos2) -> DockResponse {
            self.frame(vec![Event::PointerMoved(pos), primary_button(pos, true)])
        }

        fn move_to(&mut self, pos: Pos2) -> DockResponse {
            self.frame(vec![Event::PointerMoved(pos)])
        }

        fn release(&mut self, pos: Pos2) -> DockResponse {
            self.frame(vec![Event::PointerMoved(pos), primary_button(pos, false)])
        }

        /// Moves the pointer from `from` to `to` in 16 point steps, one frame per step.
        fn drag_to(&mut self, from: Pos2, to: Pos2) -> Vec<DockResponse> {
            let steps = ((to - from).length() / 16.0).ceil().max(1.0) as usize;
            (1..=steps)
                .map(|step| self.move_to(from + (to - from) * (step as f32 / steps as f32)))
                .collect()
        }
    }

    fn primary_button(pos: Pos2, pressed: bool) -> Event {
        Event::PointerButton {
            pos,
            button: PointerButton::Primary,
            pressed,
            modifiers: Modifiers::NONE,
        }
    }

    #[test]
    fn idle_dock_lays_out_without_dragging() {
        let mut harness = Harness::new(&["a", "b", "c"], Vec2::new(800.0, 600.0));
        assert_eq!(harness.frame(Vec::new()), DockResponse::Idle);
        assert_eq!(harness.dock.items(), ["a", "b", "c"]);
        let (a, b) = (harness.center_of("a"), harness.center_of("b"));
        assert_eq!(b.x - a.x, 64.0);
        assert_eq!(a.y, b.y);
    }

    #[test]
    fn drag_over_a_slot_and_drop_reorders() {
        let mut harness = Harness::new(&["A", "B", "C", "D"], Vec2::new(800.0, 600.0));
        let start = harness.center_of("A");
        let target = harness.center_of("C");

        assert!(matches!(
            harness.press(start),
            DockResponse::Dragging { from: 0, .. }
        ));
        let responses = harness.drag_to(start, target);
        assert_eq!(
            responses.last(),
            Some(&DockResponse::Dragging {
                from: 0,
                target: Some(2)
            })
        );

        assert_eq!(
            harness.release(target),
            DockResponse::Reordered { from: 0, to: 2 }
        );
        assert_eq!(harness.dock.items(), ["B", "C", "A", "D"]);
        assert_eq!(harness.frame(Vec::new()), DockResponse::Idle);
    }

    #[test]
    fn dragged_item_is_only_painted_floating() {
        let mut harness = Harness::new(&["A", "B", "C"], Vec2::new(800.0, 600.0));
        let start = harness.center_of("A");

        // the frame the drag starts on
        harness.press(start);
        assert_eq!(harness.paint_count("A"), 1);

        harness.move_to(start + Vec2::new(40.0, 0.0));
        assert_eq!(harness.paint_count("A"), 1);
        assert_eq!(harness.paint_count("B"), 1);
    }

    #[test]
    fn release_outside_the_dock_returns_the_item() {
        let mut harness = Harness::new(&["A", "B"], Vec2::new(800.0, 600.0));
        let start = harness.center_of("A");
        let outside = start + Vec2::new(0.0, 320.0);

        harness.press(start);
        let responses = harness.drag_to(start, outside);
        assert_eq!(
            responses.last(),
            Some(&DockResponse::Dragging {
                from: 0,
                target: None
            })
        );
        assert_eq!(
            harness.release(outside),
            DockResponse::Cancelled { index: 0 }
        );
        let offset = harness
            .dock
            .model()
            .state()
            .release_offset()
            .expect("returning");
        assert!(offset.y > 319.0, "offset {offset:?}");

        let mut returning_frames = 0;
        let mut response = harness.frame(Vec::new());
        while let DockResponse::Returning { index, .. } = response {
            assert_eq!(index, 0);
            assert_eq!(harness.paint_count("A"), 1);
            returning_frames += 1;
            assert!(returning_frames < 60, "return animation never finished");
            response = harness.frame(Vec::new());
        }

        assert!(returning_frames > 0);
        assert_eq!(response, DockResponse::Idle);
        assert!(harness.dock.model().state().is_idle());
        assert_eq!(harness.dock.items(), ["A", "B"]);
    }

    #[test]
    fn slots_scrolled_out_of_view_are_not_targets() {
        let items = ["A", "B", "C", "D", "E", "F", "G", "H"];
        let mut harness = Harness::new(&items, Vec2::new(200.0, 400.0));
        let start = harness.center_of("A");
        let hidden = harness.center_of("E");
        assert!(hidden.x > 200.0);

        harness.press(start);
        let responses = harness.drag_to(start, hidden);
        assert_eq!(
            responses.last(),
            Some(&DockResponse::Dragging {
                from: 0,
                target: None
            })
        );
        assert_eq!(
            harness.release(hidden),
            DockResponse::Cancelled { index: 0 }
        );
        assert_eq!(harness.dock.items(), items);
    }

    #[test]
    fn drag_lost_without_release_is_cancelled() {
        let mut harness = Harness::new(&["A", "B", "C"], Vec2::new(800.0, 600.0));
        let start = harness.center_of("A");
        let outside = start + Vec2::new(0.0, 200.0);

        harness.press(start);
        harness.drag_to(start, outside);
        harness.ctx.memory_mut(|m| m.stop_dragging());

        assert_eq!(
            harness.move_to(outside + Vec2::new(0.0, 16.0)),
            DockResponse::Cancelled { index: 0 }
        );
        assert_eq!(harness.dock.items(), ["A", "B", "C"]);
    }

    #[test]
    fn new_drag_during_return_paints_both_items_once() {
        let mut harness = Harness::new(&["A", "B", "C"], Vec2::new(800.0, 600.0));
        let a = harness.center_of("A");
        let b = harness.center_of("B");
        let outside = a + Vec2::new(0.0, 200.0);

        harness.press(a);
        harness.drag_to(a, outside);
        assert_eq!(
            harness.release(outside),
            DockResponse::Cancelled { index: 0 }
        );
        assert!(matches!(
            harness.frame(Vec::new()),
            DockResponse::Returning { index: 0, .. }
        ));

        assert_eq!(
            harness.press(b),
            DockResponse::Dragging {
                from: 1,
                target: Some(1)
            }
        );
        assert_eq!(harness.dock.model().state().last_drag_index(), None);
        assert_eq!(harness.paint_count("A"), 1);
        assert_eq!(harness.paint_count("B"), 1);
    }

    #[test]
    fn invalid_config_is_rejected_by_the_builder() {
        let config = DockConfig {
            item_width: f32::NAN,
            ..Default::default()
        };
        let result = Dock::new("dock", [1, 2], |_: &mut Ui, _: &i32| {}).with_config(config);
        assert!(matches!(result, Err(ConfigError::InvalidItemWidth(_))));

        let dock = Dock::new("dock", [1, 2], |_: &mut Ui, _: &i32| {})
            .with_config(DockConfig {
                item_width: 48.0,
                ..Default::default()
            })
            .expect("valid config");
        assert_eq!(dock.model().config().item_width, 48.0);
    }

    #[test]
    fn item_rect_is_centered_square() {
        let slot = Rect::from_min_size(Pos2::new(64.0, 0.0), Vec2::new(64.0, 70.4));
        let rect = item_rect(slot, 64.0);
        assert_eq!(rect.size(), Vec2::splat(64.0));
        assert_eq!(rect.center(), slot.center());
    }

    #[test]
    fn dispose_clears_grab() {
        let mut dock = Dock::new("dock", [1, 2], |_: &mut Ui, _: &i32| {});
        dock.grab_offset = Some(Vec2::new(-3.0, -4.0));
        dock.dispose();
        assert_eq!(dock.grab_offset, None);
        assert!(dock.model().state().is_idle());
    }
}
