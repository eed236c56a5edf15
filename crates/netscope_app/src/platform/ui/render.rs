use eframe::egui;
use netscope_core::{AppViewModel, DisplayContent, Msg, NO_DATA_MESSAGE};

use super::constants::*;

/// Draws the main panel. User actions are queued in `inbox` instead of
/// being applied, so the caller can run them through `update`.
pub fn draw(ui: &mut egui::Ui, view: &AppViewModel, inbox: &mut Vec<Msg>) {
    ui.heading(WINDOW_TITLE);
    ui.add_space(6.0);

    ui.horizontal(|ui| {
        let mut url_buffer = view.url_input.clone();
        let response = ui.add(
            egui::TextEdit::singleline(&mut url_buffer)
                .hint_text(URL_HINT)
                .desired_width(URL_INPUT_WIDTH),
        );
        if response.changed() {
            inbox.push(Msg::UrlChanged(url_buffer));
        }
        let entered =
            response.lost_focus() && ui.input(|input| input.key_pressed(egui::Key::Enter));
        if ui.button(FETCH_LABEL).clicked() || entered {
            inbox.push(Msg::FetchClicked);
        }
    });

    ui.horizontal_wrapped(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;
        for button in &view.facets {
            if ui
                .selectable_label(button.selected, button.label.as_str())
                .clicked()
            {
                inbox.push(Msg::FacetSelected(button.facet));
            }
        }
    });

    ui.separator();

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| draw_display(ui, &view.display));
}

pub fn status_bar(ui: &mut egui::Ui, view: &AppViewModel) {
    ui.horizontal(|ui| {
        if view.is_loading {
            ui.spinner();
        }
        ui.label(view.status.as_str());
    });
}

fn draw_display(ui: &mut egui::Ui, content: &DisplayContent) {
    match content {
        DisplayContent::Loading(text) | DisplayContent::Placeholder(text) => {
            ui.label(text.as_str());
        }
        DisplayContent::Error(message) => {
            ui.colored_label(ui.visuals().error_fg_color, message.as_str());
        }
        DisplayContent::Text(text) => {
            ui.label(egui::RichText::new(text.as_str()).monospace());
        }
        DisplayContent::List(items) if items.is_empty() => {
            ui.weak(EMPTY_LIST);
        }
        DisplayContent::List(items) => {
            for (index, item) in items.iter().enumerate() {
                ui.push_id(index, |ui| {
                    ui.label(format!("{}. {}", index + 1, item));
                });
            }
        }
        DisplayContent::NoData(facet) => {
            ui.weak(format!("{} ({})", NO_DATA_MESSAGE, facet.label()));
        }
    }
}
