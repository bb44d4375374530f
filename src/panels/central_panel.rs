use crate::PaintApp;

pub fn central_panel(app: &mut PaintApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        // Create a painting area that fills the remaining space
        let (response, painter) =
            ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());
        let canvas_rect = response.rect;

        // The surface takes the canvas size from the first frame that has one
        if !app.controller().is_initialized() {
            let background = app.controller().background();
            let (width, height) = (canvas_rect.width() as u32, canvas_rect.height() as u32);
            if let Err(err) = app.controller_mut().initialize(width, height, background) {
                log::debug!("Canvas not ready yet: {}", err);
            }
        }

        // Handle input
        app.input_mut().set_canvas_rect(canvas_rect);
        app.input_mut().set_canvas_layer(ui.layer_id());
        let events = app.input_mut().process_input(ctx);
        for event in events {
            app.controller_mut().handle_event(event);
        }

        // Render the canvas
        app.paint_canvas(ctx, &painter, canvas_rect);
    });
}
