//! Translate + uniform scale transform for the map surface.

use crate::config::TransformConfig;
use crate::data::Point;
use serde::{Deserialize, Serialize};

/// Maps world (map-surface) coordinates to viewport coordinates:
/// `viewport = world * scale + translate`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewTransform {
    pub translate_x: f64,
    pub translate_y: f64,
    pub scale: f64,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ViewTransform {
    pub const IDENTITY: ViewTransform = ViewTransform {
        translate_x: 0.0,
        translate_y: 0.0,
        scale: 1.0,
    };

    pub fn new(translate_x: f64, translate_y: f64, scale: f64) -> Self {
        Self {
            translate_x,
            translate_y,
            scale,
        }
    }

    /// World point to viewport point.
    pub fn apply(&self, p: Point) -> Point {
        Point {
            x: p.x * self.scale + self.translate_x,
            y: p.y * self.scale + self.translate_y,
        }
    }

    /// Viewport point to world point.
    pub fn invert(&self, p: Point) -> Point {
        Point {
            x: (p.x - self.translate_x) / self.scale,
            y: (p.y - self.translate_y) / self.scale,
        }
    }

    /// Shifts by a world-space offset (scaled into viewport space).
    fn translate_by(&self, dx: f64, dy: f64) -> Self {
        Self {
            translate_x: self.translate_x + self.scale * dx,
            translate_y: self.translate_y + self.scale * dy,
            scale: self.scale,
        }
    }

    /// Component-wise interpolation, `t` in `[0, 1]`.
    pub fn lerp(&self, to: &ViewTransform, t: f64) -> Self {
        Self {
            translate_x: self.translate_x + (to.translate_x - self.translate_x) * t,
            translate_y: self.translate_y + (to.translate_y - self.translate_y) * t,
            scale: self.scale + (to.scale - self.scale) * t,
        }
    }

    /// Clamps translate so the configured extent stays reachable in the
    /// viewport. When the extent is smaller than the viewport on an axis it
    /// is centred on that axis.
    pub fn constrained(&self, config: &TransformConfig) -> Self {
        let [[x0, y0], [x1, y1]] = config.translate_extent;
        let [width, height] = config.viewport;

        let top_left = self.invert(Point { x: 0.0, y: 0.0 });
        let bottom_right = self.invert(Point {
            x: width,
            y: height,
        });

        let dx0 = top_left.x - x0;
        let dx1 = bottom_right.x - x1;
        let dy0 = top_left.y - y0;
        let dy1 = bottom_right.y - y1;

        self.translate_by(axis_correction(dx0, dx1), axis_correction(dy0, dy1))
    }
}

fn axis_correction(d0: f64, d1: f64) -> f64 {
    if d1 > d0 {
        (d0 + d1) / 2.0
    } else if d0 < 0.0 {
        d0
    } else {
        d1.max(0.0)
    }
}

/// Cubic ease-out: fast start, gentle landing.
pub fn ease_cubic_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0) - 1.0;
    t * t * t + 1.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> TransformConfig {
        TransformConfig::default()
    }

    #[test]
    fn test_apply_invert_inverse() {
        let t = ViewTransform::new(30.0, -12.0, 2.5);
        let p = Point { x: 100.0, y: 40.0 };
        let back = t.invert(t.apply(p));
        assert!((back.x - p.x).abs() < 1e-9);
        assert!((back.y - p.y).abs() < 1e-9);
    }

    #[test]
    fn test_identity_is_already_constrained() {
        assert_eq!(
            ViewTransform::IDENTITY.constrained(&config()),
            ViewTransform::IDENTITY
        );
    }

    #[test]
    fn test_pan_past_edge_is_clamped() {
        // At scale 2 the surface is twice the viewport; panning right past the
        // left edge snaps back to it.
        let t = ViewTransform::new(100.0, 0.0, 2.0).constrained(&config());
        assert!((t.translate_x - 0.0).abs() < 1e-9);

        let t = ViewTransform::new(-900.0, -400.0, 2.0).constrained(&config());
        assert!((t.translate_x - -800.0).abs() < 1e-9);
        assert!((t.translate_y - -350.0).abs() < 1e-9);
    }

    #[test]
    fn test_zoomed_out_surface_is_centred() {
        let t = ViewTransform::new(0.0, 0.0, 0.8).constrained(&config());
        assert!((t.translate_x - 80.0).abs() < 1e-9);
        assert!((t.translate_y - 35.0).abs() < 1e-9);
    }

    #[test]
    fn test_in_bounds_translate_untouched() {
        let t = ViewTransform::new(-200.0, -100.0, 2.0);
        assert_eq!(t.constrained(&config()), t);
    }

    #[test]
    fn test_ease_cubic_out() {
        assert_eq!(ease_cubic_out(0.0), 0.0);
        assert_eq!(ease_cubic_out(1.0), 1.0);
        assert!((ease_cubic_out(0.5) - 0.875).abs() < 1e-9);
        assert_eq!(ease_cubic_out(2.0), 1.0);
    }

    #[test]
    fn test_lerp_endpoints() {
        let a = ViewTransform::IDENTITY;
        let b = ViewTransform::new(200.0, -25.0, 2.0);
        assert_eq!(a.lerp(&b, 0.0), a);
        assert_eq!(a.lerp(&b, 1.0), b);
        assert_eq!(a.lerp(&b, 0.5), ViewTransform::new(100.0, -12.5, 1.5));
    }
}
