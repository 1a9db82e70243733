//! Map overlays: title/legend box and zoom controls.

use super::colors::{self, ui as ui_colors};
use super::icons;
use eframe::egui::{self, RichText};
use region_atlas::data::{category_label, CategoryKind};
use region_atlas::{AppViewModel, Message};

/// Legend entries, one per category kind with a fixed color.
const LEGEND: [(&str, CategoryKind); 3] = [
    ("üniversiteler", CategoryKind::Universities),
    ("okullar", CategoryKind::Schools),
    ("dernekler", CategoryKind::Associations),
];

pub fn render_title(ctx: &egui::Context, model: &AppViewModel) {
    egui::Area::new(egui::Id::new("title_legend"))
        .anchor(egui::Align2::LEFT_TOP, [12.0, 12.0])
        .interactable(false)
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                ui.label(
                    RichText::new("Region Atlas")
                        .strong()
                        .size(16.0)
                        .color(egui::Color32::WHITE),
                );
                ui.label(
                    RichText::new(format!(
                        "{} regions · click one for details",
                        model.regions().len()
                    ))
                    .size(12.0)
                    .color(ui_colors::LABEL),
                );
                ui.add_space(4.0);

                for (key, kind) in LEGEND {
                    ui.label(
                        RichText::new(format!(
                            "{} {}",
                            icons::category_icon(kind),
                            category_label(key)
                        ))
                        .size(12.0)
                        .color(colors::category_color(kind)),
                    );
                }
            });
        });
}

pub fn render_zoom_controls(ctx: &egui::Context, model: &AppViewModel, outbox: &mut Vec<Message>) {
    egui::Area::new(egui::Id::new("zoom_controls"))
        .anchor(egui::Align2::RIGHT_TOP, [-12.0, 12.0])
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                ui.horizontal(|ui| {
                    if ui
                        .button(icons::RESET)
                        .on_hover_text("Reset view")
                        .clicked()
                    {
                        outbox.push(Message::ResetView);
                    }

                    ui.add(
                        egui::ProgressBar::new(model.zoom_fraction() as f32)
                            .desired_width(90.0)
                            .text(model.zoom_label()),
                    );
                });
            });
        });
}
