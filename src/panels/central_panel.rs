use crate::app::{APP_NAME, SketchApp};
use crate::input::InputHandler;
use crate::surface::PainterSurface;

pub fn central_panel(app: &mut SketchApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        ui.vertical_centered(|ui| {
            ui.heading(APP_NAME);

            let canvas_size = app.session.config().canvas_size();
            let (response, painter) = ui.allocate_painter(canvas_size, egui::Sense::drag());
            let rect = response.rect;

            // Handle input
            let input = app
                .input
                .get_or_insert_with(|| InputHandler::new(rect, canvas_size));
            input.set_canvas_rect(rect);
            let events = input.process_input(ctx);

            let mut changed = false;
            for event in events {
                changed |= app.session.handle_pointer(event);
            }
            if changed {
                ctx.request_repaint();
            }

            if response.hovered() {
                ctx.set_cursor_icon(egui::CursorIcon::None);
            }

            // Render the canvas
            let painter = painter.with_clip_rect(rect);
            let mut surface = PainterSurface::new(&painter, rect, canvas_size);
            app.session.redraw(&mut surface);
            painter.rect_stroke(rect, 0.0, egui::Stroke::new(1.0, egui::Color32::GRAY));

            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui.button("Clear Drawing").clicked() {
                    app.clear();
                }
                if ui
                    .add_enabled(app.session.history().can_undo(), egui::Button::new("Undo"))
                    .clicked()
                {
                    app.undo();
                }
                if ui
                    .add_enabled(app.session.history().can_redo(), egui::Button::new("Redo"))
                    .clicked()
                {
                    app.redo();
                }
                if ui.button("Export Drawing").clicked() {
                    app.export();
                }
            });

            ui.label(format!("Marks: {}", app.mark_count()));
            if let Some(message) = &app.status_message {
                ui.label(message);
            }
        });
    });
}
