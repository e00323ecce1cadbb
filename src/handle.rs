use egui::{CursorIcon, Id, Pos2, Rect, Response, Sense, Ui, Vec2};

/// The draggable area of a dock slot. Records where inside the slot the pointer grabbed it so the
/// floating item keeps that grab point under the pointer.
pub(crate) struct Handle<'a> {
    pub grab_offset: &'a mut Option<Vec2>,
}

impl<'a> Handle<'a> {
    pub fn interact(self, ui: &mut Ui, rect: Rect, id: Id) -> Response {
        let response = ui.interact(rect, id, Sense::drag());

        // if pointer hovering above this slot, update pointer icon
        if response.hovered() {
            ui.output_mut(|o| o.cursor_icon = CursorIcon::Grab);
        }

        // if dragging this slot just began, store the slot origin relative to the pointer
        if response.drag_started() {
            let pointer_pos = response.interact_pointer_pos().unwrap_or(Pos2::default());
            *self.grab_offset = Some(rect.min - pointer_pos);
        }

        response
    }
}
