//! Surface projection and coordinate transformation.
//!
//! The core works in two spaces: the fixed logical map surface ("world",
//! 800x350 by default) and the viewport the transform maps it into, which
//! has the same logical size. This projection fits that viewport into the
//! canvas rectangle on screen, letterboxed to keep the aspect ratio.

use eframe::egui::{Pos2, Rect, Vec2};
use region_atlas::data::Point;
use region_atlas::geo::ViewTransform;

/// Fits the logical viewport into a screen rectangle.
#[derive(Debug, Clone)]
pub struct SurfaceProjection {
    /// Logical viewport size `[width, height]`
    pub viewport: [f64; 2],
    /// Current map transform
    pub transform: ViewTransform,
    /// Screen rectangle for the canvas
    pub screen_rect: Rect,
}

impl Default for SurfaceProjection {
    fn default() -> Self {
        Self {
            viewport: [800.0, 350.0],
            transform: ViewTransform::IDENTITY,
            screen_rect: Rect::from_min_size(Pos2::ZERO, Vec2::new(800.0, 350.0)),
        }
    }
}

impl SurfaceProjection {
    pub fn new(viewport: [f64; 2]) -> Self {
        Self {
            viewport,
            ..Default::default()
        }
    }

    /// Updates the projection with current view state.
    pub fn update(&mut self, transform: ViewTransform, screen_rect: Rect) {
        self.transform = transform;
        self.screen_rect = screen_rect;
    }

    /// Screen pixels per logical viewport unit.
    pub fn fit_scale(&self) -> f64 {
        let sx = self.screen_rect.width() as f64 / self.viewport[0];
        let sy = self.screen_rect.height() as f64 / self.viewport[1];
        let fit = sx.min(sy);
        if fit.is_finite() && fit > 0.0 {
            fit
        } else {
            1.0
        }
    }

    /// Top-left corner of the letterboxed viewport on screen.
    fn origin(&self) -> Pos2 {
        let fit = self.fit_scale();
        let used = Vec2::new(
            (self.viewport[0] * fit) as f32,
            (self.viewport[1] * fit) as f32,
        );
        self.screen_rect.center() - used / 2.0
    }

    /// World point to screen position.
    pub fn world_to_screen(&self, p: Point) -> Pos2 {
        self.viewport_to_screen(self.transform.apply(p))
    }

    /// Screen position to world point.
    pub fn screen_to_world(&self, pos: Pos2) -> Point {
        self.transform.invert(self.screen_to_viewport(pos))
    }

    pub fn viewport_to_screen(&self, p: Point) -> Pos2 {
        let fit = self.fit_scale();
        let origin = self.origin();
        Pos2::new(
            origin.x + (p.x * fit) as f32,
            origin.y + (p.y * fit) as f32,
        )
    }

    /// Screen position to logical viewport point (gesture anchor space).
    pub fn screen_to_viewport(&self, pos: Pos2) -> Point {
        let fit = self.fit_scale();
        let origin = self.origin();
        Point {
            x: (pos.x - origin.x) as f64 / fit,
            y: (pos.y - origin.y) as f64 / fit,
        }
    }

    /// Screen pixel delta to logical viewport delta.
    pub fn screen_delta_to_viewport(&self, delta: Vec2) -> Point {
        let fit = self.fit_scale();
        Point {
            x: delta.x as f64 / fit,
            y: delta.y as f64 / fit,
        }
    }

    /// World length to screen pixels at the current scale.
    pub fn world_len_to_screen(&self, len: f64) -> f32 {
        (len * self.transform.scale * self.fit_scale()) as f32
    }

    /// Checks if a world point lands inside the canvas (with a pixel margin).
    pub fn is_visible(&self, p: Point, margin_px: f32) -> bool {
        self.screen_rect
            .expand(margin_px)
            .contains(self.world_to_screen(p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn projection(width: f32, height: f32) -> SurfaceProjection {
        let mut p = SurfaceProjection::default();
        p.update(
            ViewTransform::IDENTITY,
            Rect::from_min_size(Pos2::new(10.0, 20.0), Vec2::new(width, height)),
        );
        p
    }

    #[test]
    fn test_fit_letterboxes_tall_canvas() {
        let p = projection(400.0, 400.0);
        assert!((p.fit_scale() - 0.5).abs() < 1e-9);

        // 400x175 centred vertically in 400x400.
        let top_left = p.viewport_to_screen(Point { x: 0.0, y: 0.0 });
        let bottom_right = p.viewport_to_screen(Point { x: 800.0, y: 350.0 });
        assert!((top_left.x - 10.0).abs() < 1e-4);
        assert!((top_left.y - 132.5).abs() < 1e-4);
        assert!((bottom_right.y - top_left.y - 175.0).abs() < 1e-4);
    }

    #[test]
    fn test_screen_world_round_trip_under_transform() {
        let mut p = projection(1600.0, 700.0);
        p.update(ViewTransform::new(200.0, -25.0, 2.0), p.screen_rect);

        let world = Point { x: 100.0, y: 100.0 };
        let screen = p.world_to_screen(world);
        // Focused point sits in the middle of the canvas.
        assert!((screen.x - p.screen_rect.center().x).abs() < 1e-3);
        assert!((screen.y - p.screen_rect.center().y).abs() < 1e-3);

        let back = p.screen_to_world(screen);
        assert!((back.x - world.x).abs() < 1e-3);
        assert!((back.y - world.y).abs() < 1e-3);
    }

    #[test]
    fn test_delta_scales_with_fit() {
        let p = projection(1600.0, 700.0);
        let d = p.screen_delta_to_viewport(Vec2::new(20.0, -10.0));
        assert!((d.x - 10.0).abs() < 1e-9);
        assert!((d.y - -5.0).abs() < 1e-9);
    }

    #[test]
    fn test_degenerate_rect_falls_back() {
        let p = projection(0.0, 0.0);
        assert_eq!(p.fit_scale(), 1.0);
    }
}
