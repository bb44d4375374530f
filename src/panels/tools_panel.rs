use egui::Color32;
use egui::color_picker::{Alpha, color_edit_button_srgba};

use crate::app::{PaintApp, ToolButton};
use crate::brush::{MAX_BRUSH_SIZE, MIN_BRUSH_SIZE};

pub fn tools_panel(app: &mut PaintApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(true)
        .default_width(200.0)
        .show(ctx, |ui| {
            ui.heading("Tools");
            ui.separator();

            ui.horizontal(|ui| {
                ui.label("Canvas color:");
                let mut background = Color32::from(app.controller().background());
                if color_edit_button_srgba(ui, &mut background, Alpha::Opaque).changed() {
                    app.controller_mut().set_background_color(background.into());
                }
            });

            ui.horizontal(|ui| {
                ui.label("Brush color:");
                let mut brush_color = Color32::from(app.controller().brush().stroke_color);
                if color_edit_button_srgba(ui, &mut brush_color, Alpha::Opaque).changed() {
                    app.controller_mut().set_brush_color(brush_color.into());
                }
            });

            ui.horizontal(|ui| {
                ui.label("Brush size:");
                let mut size = app.controller().brush().line_width;
                if ui
                    .add(egui::Slider::new(&mut size, MIN_BRUSH_SIZE..=MAX_BRUSH_SIZE))
                    .changed()
                {
                    app.controller_mut().set_brush_size(size);
                }
            });

            ui.separator();

            let eraser = ui.button(app.eraser_button_label());
            app.set_tool_button_rect(ToolButton::Eraser, eraser.rect);
            if eraser.clicked() {
                let mode = app.controller_mut().toggle_eraser();
                log::info!("Switched to {} mode", mode.name());
            }

            ui.separator();

            let clear = ui.button("Clear Canvas");
            app.set_tool_button_rect(ToolButton::Clear, clear.rect);
            if clear.clicked() {
                app.controller_mut().clear_surface();
            }

            let save = ui.button("Save Drawing");
            app.set_tool_button_rect(ToolButton::Save, save.rect);
            if save.clicked() {
                app.save_drawing();
            }
        });
}
