use crate::app::SketchApp;

pub fn tools_panel(app: &mut SketchApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(true)
        .default_width(200.0)
        .show(ctx, |ui| {
            ui.heading("Pens");

            let active_glyph = app.session.tools().active_glyph().map(str::to_owned);
            let presets: Vec<String> = app
                .session
                .config()
                .pen_presets
                .iter()
                .map(|preset| preset.label.clone())
                .collect();

            for (index, label) in presets.iter().enumerate() {
                let is_selected = active_glyph.is_none() && app.pen_label.as_deref() == Some(label);
                if ui.selectable_label(is_selected, label).clicked() {
                    log::info!("Pen selected from UI: {}", label);
                    app.select_pen_preset(index);
                }
            }

            ui.horizontal(|ui| {
                ui.label("Hue:");
                if ui.add(egui::Slider::new(&mut app.hue, 0.0..=360.0)).changed() {
                    app.session.set_pen_hue(app.hue);
                }
            });

            ui.horizontal(|ui| {
                let pen_style = app.pen_label.as_deref().unwrap_or("None");
                ui.label(format!("Pen Style: {pen_style}"));
                let (swatch, _) = ui.allocate_exact_size(egui::vec2(16.0, 16.0), egui::Sense::hover());
                ui.painter().rect_filled(swatch, 2.0, app.session.tools().pen_color());
            });

            ui.separator();
            ui.heading("Emoji");

            let glyphs: Vec<String> = app.session.glyphs().map(str::to_owned).collect();
            ui.horizontal_wrapped(|ui| {
                for glyph in &glyphs {
                    let is_selected = active_glyph.as_deref() == Some(glyph.as_str());
                    if ui.selectable_label(is_selected, glyph).clicked() {
                        app.session.select_glyph(glyph);
                    }
                }
            });

            if ui.button("Choose Your Own Emoji!").clicked() {
                app.custom_glyph_prompt = Some(String::new());
            }

            let selected = active_glyph.as_deref().unwrap_or("None");
            ui.label(format!("Selected Emoji: {selected}"));

            ui.separator();
            let history = app.session.history();
            ui.label(format!("Undo stack size: {}", history.len()));
            ui.label(format!("Redo stack size: {}", history.redo_marks().len()));
            ui.label(format!("Gesture: {}", app.session.gesture().current_state_name()));
        });

    custom_glyph_prompt(app, ctx);
}

/// Small modal asking for free-text glyph entry
fn custom_glyph_prompt(app: &mut SketchApp, ctx: &egui::Context) {
    let Some(text) = app.custom_glyph_prompt.as_mut() else {
        return;
    };

    let mut submitted = false;
    let mut cancelled = false;
    egui::Window::new("Enter your custom emoji")
        .collapsible(false)
        .resizable(false)
        .show(ctx, |ui| {
            let response = ui.text_edit_singleline(text);
            response.request_focus();
            if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                submitted = true;
            }
            ui.horizontal(|ui| {
                submitted |= ui.button("OK").clicked();
                cancelled |= ui.button("Cancel").clicked();
            });
        });

    if submitted {
        let entry = app.custom_glyph_prompt.take().unwrap_or_default();
        if !app.session.select_custom_glyph(&entry) {
            log::info!("Custom emoji entry was blank, keeping current tool");
        }
    } else if cancelled {
        app.custom_glyph_prompt = None;
    }
}
