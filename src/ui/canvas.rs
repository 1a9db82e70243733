//! Central canvas UI: region map surface.

use super::colors::{self, map};
use super::outline::RegionOutline;
use super::projection::SurfaceProjection;
use eframe::egui::{self, Color32, CursorIcon, Painter, Pos2, Rect, Sense, Stroke, Vec2};
use region_atlas::data::{flatten_facilities, CategoryKind, FacilityRef, Point};
use region_atlas::geo::{GestureDelta, Visibility};
use region_atlas::{AppViewModel, Message};

/// A facility marker drawn this frame, kept for hit testing.
struct MarkerHit {
    facility: FacilityRef,
    pos: Pos2,
    radius: f32,
}

/// Render the map canvas and forward pointer input as messages.
pub fn render_canvas(
    ctx: &egui::Context,
    model: &AppViewModel,
    outlines: &[RegionOutline],
    projection: &mut SurfaceProjection,
    outbox: &mut Vec<Message>,
) {
    egui::CentralPanel::default()
        .frame(egui::Frame::NONE.fill(map::BACKGROUND))
        .show(ctx, |ui| {
            let available_size = ui.available_size();

            // Allocate the full available space for the canvas
            let (response, painter) =
                ui.allocate_painter(available_size, Sense::click_and_drag());
            let rect = response.rect;

            projection.update(model.transform(), rect);
            let visibility = model.visibility();

            draw_surface(&painter, projection);

            let hover_world = response.hover_pos().map(|p| projection.screen_to_world(p));
            let hovered = hover_world.and_then(|p| outlines.iter().position(|o| o.contains(p)));
            let selected = model
                .interaction()
                .selected_region()
                .map(|r| r.id.as_str());

            for (i, outline) in outlines.iter().enumerate() {
                let fill = if selected == Some(outline.id.as_str()) {
                    map::REGION_SELECTED
                } else if hovered == Some(i) {
                    map::REGION_HOVER
                } else {
                    map::REGION_FILL
                };
                draw_outline(&painter, projection, outline, fill);
            }

            if visibility.show_region_labels {
                for outline in outlines {
                    draw_region_label(&painter, projection, outline);
                }
            }

            let markers = if visibility.show_facility_markers {
                draw_markers(&painter, projection, model, &visibility)
            } else {
                Vec::new()
            };

            if model.scroll_locked() {
                painter.rect_filled(rect, 0.0, map::OVERLAY);
            }

            handle_canvas_interaction(ctx, &response, projection, outlines, &markers, outbox);

            if model.is_gesturing() {
                ctx.set_cursor_icon(CursorIcon::Grabbing);
            } else if hovered.is_some() {
                ctx.set_cursor_icon(CursorIcon::PointingHand);
            } else if response.hovered() {
                ctx.set_cursor_icon(CursorIcon::Grab);
            }
        });
}

/// Draws the logical map surface under the regions.
fn draw_surface(painter: &Painter, projection: &SurfaceProjection) {
    let [width, height] = projection.viewport;
    let surface = Rect::from_min_max(
        projection.world_to_screen(Point { x: 0.0, y: 0.0 }),
        projection.world_to_screen(Point {
            x: width,
            y: height,
        }),
    );
    painter.rect_filled(surface, 4.0, map::SURFACE);
}

fn draw_outline(
    painter: &Painter,
    projection: &SurfaceProjection,
    outline: &RegionOutline,
    fill: Color32,
) {
    let mut mesh = egui::Mesh::default();
    for triangle in &outline.fill {
        let base = mesh.vertices.len() as u32;
        for p in triangle {
            mesh.colored_vertex(projection.world_to_screen(*p), fill);
        }
        mesh.add_triangle(base, base + 1, base + 2);
    }
    painter.add(egui::Shape::mesh(mesh));

    let stroke = Stroke::new(1.0, map::REGION_STROKE);
    for ring in &outline.rings {
        let points: Vec<Pos2> = ring.iter().map(|p| projection.world_to_screen(*p)).collect();
        painter.add(egui::Shape::closed_line(points, stroke));
    }
}

/// Region name plus a facility count badge.
fn draw_region_label(painter: &Painter, projection: &SurfaceProjection, outline: &RegionOutline) {
    let center = projection.world_to_screen(outline.center);
    painter.text(
        center,
        egui::Align2::CENTER_CENTER,
        &outline.name,
        egui::FontId::proportional(12.0),
        map::REGION_LABEL,
    );

    if outline.facility_count > 0 {
        let badge = center + Vec2::new(0.0, 14.0);
        painter.circle_filled(badge, 7.0, map::BADGE);
        painter.text(
            badge,
            egui::Align2::CENTER_CENTER,
            outline.facility_count.to_string(),
            egui::FontId::proportional(9.0),
            Color32::WHITE,
        );
    }
}

fn draw_markers(
    painter: &Painter,
    projection: &SurfaceProjection,
    model: &AppViewModel,
    visibility: &Visibility,
) -> Vec<MarkerHit> {
    let radius = projection.world_len_to_screen(visibility.marker_radius);
    let mut hits = Vec::new();

    for region in model.regions().iter() {
        for tagged in flatten_facilities(region) {
            let position = tagged.facility.position;
            if !projection.is_visible(position, radius) {
                continue;
            }

            let pos = projection.world_to_screen(position);
            let color = colors::category_color(CategoryKind::from_key(tagged.category));
            painter.circle(pos, radius, color, Stroke::new(1.0, Color32::WHITE));

            if visibility.show_facility_labels {
                let label_at = projection.world_to_screen(Point {
                    x: position.x,
                    y: position.y + visibility.label_offset_y,
                });
                painter.text(
                    label_at,
                    egui::Align2::CENTER_BOTTOM,
                    &tagged.facility.name,
                    egui::FontId::proportional(9.0),
                    map::REGION_LABEL,
                );
            }

            hits.push(MarkerHit {
                facility: FacilityRef {
                    region_id: region.id.clone(),
                    category: tagged.category.to_string(),
                    index: tagged.index,
                },
                pos,
                radius,
            });
        }
    }

    hits
}

fn handle_canvas_interaction(
    ctx: &egui::Context,
    response: &egui::Response,
    projection: &SurfaceProjection,
    outlines: &[RegionOutline],
    markers: &[MarkerHit],
    outbox: &mut Vec<Message>,
) {
    // Handle dragging for panning
    if response.drag_started() {
        outbox.push(Message::GestureStart);
    }
    if response.dragged() {
        let delta = projection.screen_delta_to_viewport(response.drag_delta());
        if delta.x != 0.0 || delta.y != 0.0 {
            outbox.push(Message::Gesture(GestureDelta::pan(delta.x, delta.y)));
        }
    }
    if response.drag_stopped() {
        outbox.push(Message::GestureEnd);
    }

    // Handle scroll and pinch for zooming relative to cursor position
    if response.hovered() {
        let anchor = response.hover_pos().map(|p| projection.screen_to_viewport(p));
        let (scroll_delta, zoom_delta) = ctx.input(|i| (i.raw_scroll_delta, i.zoom_delta()));

        // Ctrl+scroll arrives as a zoom delta too; take only one of them.
        if zoom_delta != 1.0 {
            outbox.push(Message::Gesture(GestureDelta::zoom(zoom_delta as f64, anchor)));
        } else if scroll_delta.y != 0.0 {
            // egui reports scrolling up as positive; wheel deltas are the reverse.
            outbox.push(Message::Gesture(GestureDelta::wheel(
                -scroll_delta.y as f64,
                anchor,
            )));
        }
    }

    if response.clicked() {
        let Some(pos) = response.interact_pointer_pos() else {
            return;
        };

        // Markers sit on top of regions, so they win.
        if let Some(hit) = markers
            .iter()
            .rev()
            .find(|m| m.pos.distance(pos) <= m.radius.max(4.0))
        {
            outbox.push(Message::ClickFacility(hit.facility.clone()));
            return;
        }

        let world = projection.screen_to_world(pos);
        if let Some(outline) = outlines.iter().find(|o| o.contains(world)) {
            outbox.push(Message::ClickRegion(outline.id.clone()));
        }
    }
}
