//! Region and facility detail views.

use super::colors::{self, ui as ui_colors};
use super::icons;
use eframe::egui::{self, RichText, ScrollArea, TextEdit};
use region_atlas::data::{category_label, CategoryKind, FacilityRef};
use region_atlas::state::{FacilityDetail, RegionDetail};
use region_atlas::{AppViewModel, Message};

/// Opacity while a detail view plays its exit.
const CLOSING_OPACITY: f32 = 0.4;

pub fn render_region_modal(ctx: &egui::Context, model: &AppViewModel, outbox: &mut Vec<Message>) {
    let Some(detail) = model.region_detail() else {
        return;
    };

    let modal = egui::Modal::new(egui::Id::new("region_detail")).show(ctx, |ui| {
        ui.set_width(420.0);
        if detail.closing {
            ui.multiply_opacity(CLOSING_OPACITY);
        }

        ui.horizontal(|ui| {
            ui.label(
                RichText::new(format!("{} {}", icons::REGION, detail.region.name))
                    .strong()
                    .size(18.0),
            );
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button(icons::CLOSE).on_hover_text("Close").clicked() {
                    outbox.push(Message::CloseRegion);
                }
            });
        });
        ui.separator();

        render_region_stats(ui, &detail);
        ui.add_space(6.0);

        render_category_filter(ui, &detail, outbox);
        ui.add_space(6.0);

        let mut query = detail.query.to_string();
        let response = ui.add(
            TextEdit::singleline(&mut query)
                .hint_text(format!("{} Search facilities...", icons::SEARCH))
                .desired_width(ui.available_width()),
        );
        if response.changed() {
            outbox.push(Message::SetQuery(query));
        }
        ui.add_space(6.0);

        render_facility_list(ui, &detail, outbox);
    });

    if modal.backdrop_response.clicked() {
        outbox.push(Message::BackdropClick { on_backdrop: true });
    }
}

fn render_region_stats(ui: &mut egui::Ui, detail: &RegionDetail<'_>) {
    ui.horizontal(|ui| {
        ui.label(RichText::new("Facilities").color(ui_colors::LABEL));
        ui.label(
            RichText::new(detail.total.to_string())
                .strong()
                .color(ui_colors::VALUE),
        );
    });

    ui.horizontal_wrapped(|ui| {
        for (category, list) in detail.region.institutions.iter() {
            let kind = CategoryKind::from_key(category);
            ui.label(
                RichText::new(format!(
                    "{} {} {}",
                    icons::category_icon(kind),
                    category_label(category),
                    list.len()
                ))
                .size(12.0)
                .color(colors::category_color(kind)),
            );
        }
    });
}

fn render_category_filter(
    ui: &mut egui::Ui,
    detail: &RegionDetail<'_>,
    outbox: &mut Vec<Message>,
) {
    if detail.categories.is_empty() {
        return;
    }

    ui.horizontal_wrapped(|ui| {
        if ui
            .selectable_label(detail.selected_category.is_none(), "All")
            .clicked()
        {
            outbox.push(Message::ClearCategory);
        }

        for category in &detail.categories {
            let kind = CategoryKind::from_key(category);
            let selected = detail.selected_category == Some(*category);
            let text = format!("{} {}", icons::category_icon(kind), category_label(category));
            if ui.selectable_label(selected, text).clicked() {
                outbox.push(Message::SelectCategory(category.to_string()));
            }
        }
    });
}

fn render_facility_list(ui: &mut egui::Ui, detail: &RegionDetail<'_>, outbox: &mut Vec<Message>) {
    if detail.facilities.is_empty() {
        ui.label(RichText::new("No facilities match").color(ui_colors::PLACEHOLDER));
        return;
    }

    ScrollArea::vertical().max_height(260.0).show(ui, |ui| {
        for tagged in &detail.facilities {
            ui.push_id(tagged.list_key(), |ui| {
                let kind = CategoryKind::from_key(tagged.category);
                let text = RichText::new(format!(
                    "{} {}",
                    icons::category_icon(kind),
                    tagged.facility.name
                ));
                let response = ui
                    .add(egui::Button::new(text).frame(false))
                    .on_hover_text(tagged.facility.address.as_str());
                if response.clicked() {
                    outbox.push(Message::ClickFacility(FacilityRef {
                        region_id: detail.region.id.clone(),
                        category: tagged.category.to_string(),
                        index: tagged.index,
                    }));
                }
            });
        }
    });
}

pub fn render_facility_modal(
    ctx: &egui::Context,
    model: &AppViewModel,
    outbox: &mut Vec<Message>,
) {
    let Some(detail) = model.facility_detail() else {
        return;
    };

    let modal = egui::Modal::new(egui::Id::new("facility_detail")).show(ctx, |ui| {
        ui.set_width(380.0);
        if detail.closing {
            ui.multiply_opacity(CLOSING_OPACITY);
        }

        let kind = CategoryKind::from_key(&detail.facility.category);
        ui.horizontal(|ui| {
            ui.label(
                RichText::new(format!(
                    "{} {}",
                    icons::category_icon(kind),
                    detail.facility.name
                ))
                .strong()
                .size(17.0),
            );
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button(icons::CLOSE).on_hover_text("Close").clicked() {
                    outbox.push(Message::CloseFacility);
                }
            });
        });
        if !detail.facility.category.is_empty() {
            ui.label(
                RichText::new(category_label(&detail.facility.category))
                    .size(12.0)
                    .color(colors::category_color(kind)),
            );
        }
        ui.separator();

        render_contact(ui, &detail);
        ui.add_space(8.0);
        render_map_links(ui, &detail);
    });

    if modal.backdrop_response.clicked() {
        outbox.push(Message::BackdropClick { on_backdrop: true });
    }
}

fn render_contact(ui: &mut egui::Ui, detail: &FacilityDetail<'_>) {
    egui::Grid::new("facility_contact")
        .num_columns(2)
        .spacing([8.0, 4.0])
        .show(ui, |ui| {
            ui.label(RichText::new(icons::ADDRESS).color(ui_colors::LABEL));
            ui.label(detail.facility.address.as_str());
            ui.end_row();

            ui.label(RichText::new(icons::PHONE).color(ui_colors::LABEL));
            ui.label(field_text(detail.facility.phone().is_some(), detail.phone));
            ui.end_row();

            ui.label(RichText::new(icons::WEBSITE).color(ui_colors::LABEL));
            match &detail.website_href {
                Some(href) => {
                    ui.hyperlink_to(detail.website, href);
                }
                None => {
                    ui.label(field_text(false, detail.website));
                }
            }
            ui.end_row();
        });
}

fn field_text(present: bool, text: &str) -> RichText {
    if present {
        RichText::new(text).color(ui_colors::VALUE)
    } else {
        RichText::new(text).italics().color(ui_colors::PLACEHOLDER)
    }
}

fn render_map_links(ui: &mut egui::Ui, detail: &FacilityDetail<'_>) {
    ui.horizontal(|ui| {
        ui.hyperlink_to(
            format!("{} Open in Maps", icons::OPEN_MAP),
            &detail.open_in_maps_url,
        );
        ui.hyperlink_to(
            format!("{} Directions", icons::DIRECTIONS),
            &detail.directions_url,
        );
    });

    match &detail.embed_url {
        Some(url) => {
            ui.hyperlink_to("Map preview", url);
        }
        None => {
            ui.label(RichText::new("Map preview not available").color(ui_colors::PLACEHOLDER));
        }
    }
}
