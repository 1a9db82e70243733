//! Pan/zoom engine for the map surface.
//!
//! Turns normalized gesture deltas and programmatic transitions into a
//! clamped `ViewTransform`. Also exposes the observable zoom level, which is
//! debounced during continuous gestures so downstream visibility work does
//! not rerun on every pointer event.

use super::transform::{ease_cubic_out, ViewTransform};
use crate::config::TransformConfig;
use crate::data::Point;
use crate::state::schedule::{Debouncer, Millis};

/// Wheel delta to zoom factor exponent per unit of `delta_y`.
const WHEEL_ZOOM_RATE: f64 = 0.002;

/// A pointer-driven pan/zoom step in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureDelta {
    /// Viewport-space translation.
    pub pan: Point,
    /// Multiplicative scale change (1.0 = none).
    pub zoom_factor: f64,
    /// Viewport point that stays fixed while zooming. Defaults to the
    /// viewport center.
    pub anchor: Option<Point>,
}

impl GestureDelta {
    pub fn pan(dx: f64, dy: f64) -> Self {
        Self {
            pan: Point { x: dx, y: dy },
            zoom_factor: 1.0,
            anchor: None,
        }
    }

    pub fn zoom(factor: f64, anchor: Option<Point>) -> Self {
        Self {
            pan: Point { x: 0.0, y: 0.0 },
            zoom_factor: factor,
            anchor,
        }
    }

    /// Wheel scroll; positive `delta_y` (scrolling down) zooms out.
    pub fn wheel(delta_y: f64, anchor: Option<Point>) -> Self {
        Self::zoom(2f64.powf(-delta_y * WHEEL_ZOOM_RATE), anchor)
    }
}

/// In-flight programmatic transition.
#[derive(Debug, Clone)]
struct Animation {
    from: ViewTransform,
    to: ViewTransform,
    started_at: Millis,
    duration: Millis,
}

/// Owns the current view transform.
#[derive(Debug, Clone)]
pub struct GeometryEngine {
    config: TransformConfig,
    transform: ViewTransform,
    zoom_level: f64,
    zoom_debounce: Debouncer<f64>,
    gesturing: bool,
    animation: Option<Animation>,
}

impl GeometryEngine {
    pub fn new(config: TransformConfig, zoom_debounce_ms: Millis) -> Self {
        Self {
            config: config.sanitized(),
            transform: ViewTransform::IDENTITY,
            zoom_level: 1.0,
            zoom_debounce: Debouncer::new(zoom_debounce_ms),
            gesturing: false,
            animation: None,
        }
    }

    pub fn transform(&self) -> ViewTransform {
        self.transform
    }

    /// Debounced scale, rounded to one decimal (exact after animations).
    pub fn zoom_level(&self) -> f64 {
        self.zoom_level
    }

    pub fn is_gesturing(&self) -> bool {
        self.gesturing
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Animating, or holding a zoom level that has not been published yet.
    pub fn is_settling(&self) -> bool {
        self.animation.is_some() || self.zoom_debounce.is_pending()
    }

    pub fn config(&self) -> &TransformConfig {
        &self.config
    }

    /// Position of the zoom level within the scale range, in `[0, 1]`.
    pub fn zoom_fraction(&self) -> f64 {
        let span = self.config.max_scale - self.config.min_scale;
        if span <= 0.0 {
            return 0.0;
        }
        ((self.zoom_level - self.config.min_scale) / span).clamp(0.0, 1.0)
    }

    /// Marks a gesture as in progress. A gesture supersedes any animation.
    pub fn start_gesture(&mut self) {
        self.gesturing = true;
        if self.animation.take().is_some() {
            log::debug!("Gesture interrupted view animation");
        }
    }

    /// Composes a gesture delta with the current transform, then clamps.
    pub fn apply_gesture(&mut self, delta: GestureDelta, now: Millis) {
        if self.animation.take().is_some() {
            log::debug!("Gesture interrupted view animation");
        }

        let current = self.transform;
        let factor = if delta.zoom_factor.is_finite() && delta.zoom_factor > 0.0 {
            delta.zoom_factor
        } else {
            1.0
        };
        let scale = self.config.clamp_scale(current.scale * factor);

        let anchor = delta
            .anchor
            .filter(|a| a.x.is_finite() && a.y.is_finite())
            .unwrap_or_else(|| self.viewport_center());
        let ratio = scale / current.scale;
        let limit = self.translate_limit();
        let pan_x = saturate(finite_or_zero(delta.pan.x), limit);
        let pan_y = saturate(finite_or_zero(delta.pan.y), limit);

        let next = ViewTransform {
            translate_x: saturate(
                anchor.x - (anchor.x - current.translate_x) * ratio + pan_x,
                limit,
            ),
            translate_y: saturate(
                anchor.y - (anchor.y - current.translate_y) * ratio + pan_y,
                limit,
            ),
            scale,
        };

        self.transform = next.constrained(&self.config);
        self.zoom_debounce.push(self.transform.scale, now);
    }

    pub fn end_gesture(&mut self) {
        self.gesturing = false;
    }

    /// Starts an eased transition to `target`. Scale is clamped; translate is
    /// taken as given.
    pub fn animate_to(&mut self, target: ViewTransform, duration: Millis, now: Millis) {
        let to = ViewTransform {
            scale: self.config.clamp_scale(target.scale),
            ..target
        };
        log::debug!(
            "Animating view to ({:.1}, {:.1}) x{:.2} over {}ms",
            to.translate_x,
            to.translate_y,
            to.scale,
            duration
        );

        self.animation = Some(Animation {
            from: self.transform,
            to,
            started_at: now,
            duration,
        });
        self.tick(now);
    }

    /// Animates back to the identity transform.
    pub fn reset(&mut self, duration: Millis, now: Millis) {
        self.animate_to(ViewTransform::IDENTITY, duration, now);
    }

    /// Animates so `center` sits in the middle of the viewport at `scale`.
    pub fn focus_on(&mut self, center: Point, scale: f64, duration: Millis, now: Millis) {
        let target = self.focus_transform(center, scale);
        self.animate_to(target, duration, now);
    }

    /// `translate = viewport / 2 - center * scale`.
    pub fn focus_transform(&self, center: Point, scale: f64) -> ViewTransform {
        let scale = self.config.clamp_scale(scale);
        let mid = self.viewport_center();
        ViewTransform {
            translate_x: mid.x - center.x * scale,
            translate_y: mid.y - center.y * scale,
            scale,
        }
    }

    /// Advances animation and debounce state. Returns true while the
    /// transform is still changing.
    pub fn tick(&mut self, now: Millis) -> bool {
        if let Some(level) = self.zoom_debounce.poll(now) {
            self.zoom_level = round_to_tenth(level);
        }

        let Some(animation) = &self.animation else {
            return false;
        };

        let progress = if animation.duration > 0.0 {
            ((now - animation.started_at) / animation.duration).clamp(0.0, 1.0)
        } else {
            1.0
        };

        if progress >= 1.0 {
            let target = animation.to;
            self.transform = target;
            self.animation = None;
            // Exact landing value; skip the debounce.
            self.zoom_debounce.cancel();
            self.zoom_level = target.scale;
            self.gesturing = false;
            return false;
        }

        self.transform = animation
            .from
            .lerp(&animation.to, ease_cubic_out(progress));
        self.zoom_debounce.push(self.transform.scale, now);
        true
    }

    /// Bound on any translate a gesture can reach, so the extent clamp never
    /// sees values that overflow when inverted.
    fn translate_limit(&self) -> f64 {
        let [[x0, y0], [x1, y1]] = self.config.translate_extent;
        let [width, height] = self.config.viewport;
        let reach = x0.abs().max(x1.abs()).max(y0.abs()).max(y1.abs());
        reach * self.config.max_scale + width.max(height)
    }

    fn viewport_center(&self) -> Point {
        Point {
            x: self.config.viewport[0] / 2.0,
            y: self.config.viewport[1] / 2.0,
        }
    }
}

fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() {
        v
    } else {
        0.0
    }
}

fn saturate(v: f64, limit: f64) -> f64 {
    v.max(-limit).min(limit)
}

fn round_to_tenth(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> GeometryEngine {
        GeometryEngine::new(TransformConfig::default(), 100.0)
    }

    #[test]
    fn test_scale_stays_in_range() {
        let mut e = engine();
        let deltas = [
            GestureDelta::zoom(1e9, None),
            GestureDelta::zoom(1e-9, Some(Point { x: 5.0, y: 5.0 })),
            GestureDelta::wheel(-50_000.0, None),
            GestureDelta::wheel(50_000.0, Some(Point { x: 790.0, y: 10.0 })),
            GestureDelta::zoom(f64::NAN, None),
            GestureDelta::zoom(-3.0, None),
            GestureDelta::pan(1e12, -1e12),
            GestureDelta::pan(f64::INFINITY, f64::NAN),
            GestureDelta::zoom(0.5, None),
            GestureDelta::pan(f64::MAX, -f64::MAX),
            GestureDelta::pan(-f64::MAX, f64::MAX),
        ];

        for (i, delta) in deltas.iter().cycle().take(64).enumerate() {
            e.apply_gesture(*delta, i as f64);
            let t = e.transform();
            assert!(t.scale >= 0.8 && t.scale <= 5.0, "scale {} out of range", t.scale);
            assert!(t.translate_x.is_finite() && t.translate_y.is_finite());
        }
    }

    #[test]
    fn test_huge_pan_when_zoomed_out_recovers() {
        let mut e = engine();
        e.apply_gesture(GestureDelta::zoom(0.5, None), 0.0);
        e.apply_gesture(GestureDelta::pan(f64::MAX, 0.0), 1.0);
        e.apply_gesture(GestureDelta::pan(1.0, 0.0), 2.0);

        let t = e.transform();
        assert_eq!(t.scale, 0.8);
        // Extent narrower than the viewport stays centred.
        assert!((t.translate_x - 80.0).abs() < 1e-6);
        assert!((t.translate_y - 35.0).abs() < 1e-6);
    }

    #[test]
    fn test_invalid_config_is_repaired_before_use() {
        let config = TransformConfig {
            max_scale: -1.0,
            ..Default::default()
        };
        let mut e = GeometryEngine::new(config, 100.0);
        for i in 0..8 {
            e.apply_gesture(GestureDelta::zoom(1e-300, None), i as f64);
        }
        let t = e.transform();
        assert_eq!(t.scale, 0.8);
        assert!(t.translate_x.is_finite() && t.translate_y.is_finite());
    }

    #[test]
    fn test_zoom_keeps_anchor_fixed() {
        let mut e = engine();
        e.apply_gesture(GestureDelta::zoom(2.0, Some(Point { x: 400.0, y: 175.0 })), 0.0);
        let anchor = Point { x: 400.0, y: 175.0 };
        let world = e.transform().invert(anchor);
        assert!((world.x - 400.0).abs() < 1e-9);
        assert!((world.y - 175.0).abs() < 1e-9);
        assert!((e.transform().scale - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_pan_is_clamped_to_extent() {
        let mut e = engine();
        e.apply_gesture(GestureDelta::zoom(2.0, Some(Point { x: 0.0, y: 0.0 })), 0.0);
        e.apply_gesture(GestureDelta::pan(500.0, 500.0), 1.0);
        let t = e.transform();
        assert!((t.translate_x - 0.0).abs() < 1e-9);
        assert!((t.translate_y - 0.0).abs() < 1e-9);
    }

    #[test]
    fn test_zoom_level_is_debounced_and_rounded() {
        let mut e = engine();
        e.apply_gesture(GestureDelta::zoom(1.26, None), 0.0);
        e.tick(50.0);
        assert_eq!(e.zoom_level(), 1.0);

        e.apply_gesture(GestureDelta::zoom(1.5, None), 60.0);
        e.tick(150.0);
        assert_eq!(e.zoom_level(), 1.0);

        e.tick(160.0);
        assert_eq!(e.zoom_level(), 1.9);
    }

    #[test]
    fn test_gesture_flag() {
        let mut e = engine();
        assert!(!e.is_gesturing());
        e.start_gesture();
        assert!(e.is_gesturing());
        assert_eq!(e.transform(), ViewTransform::IDENTITY);
        e.end_gesture();
        assert!(!e.is_gesturing());
    }

    #[test]
    fn test_focus_transform_centres_point() {
        let e = engine();
        let t = e.focus_transform(Point { x: 100.0, y: 100.0 }, 2.0);
        assert_eq!(t, ViewTransform::new(200.0, -25.0, 2.0));
    }

    #[test]
    fn test_animation_eases_then_lands_exactly() {
        let mut e = engine();
        e.focus_on(Point { x: 100.0, y: 100.0 }, 2.0, 1000.0, 0.0);
        assert!(e.is_animating());

        assert!(e.tick(500.0));
        let mid = e.transform();
        // Ease-out is past halfway at the half-time mark.
        assert!((mid.scale - 1.875).abs() < 1e-9);

        assert!(!e.tick(1000.0));
        assert!(!e.is_animating());
        assert_eq!(e.transform(), ViewTransform::new(200.0, -25.0, 2.0));
        assert_eq!(e.zoom_level(), 2.0);

        // The pending debounced value from mid-flight must not overwrite it.
        e.tick(5000.0);
        assert_eq!(e.zoom_level(), 2.0);
    }

    #[test]
    fn test_animation_clears_gesture_flag() {
        let mut e = engine();
        e.start_gesture();
        e.reset(750.0, 0.0);
        e.tick(750.0);
        assert!(!e.is_gesturing());
    }

    #[test]
    fn test_gesture_supersedes_animation() {
        let mut e = engine();
        e.focus_on(Point { x: 100.0, y: 100.0 }, 2.0, 1000.0, 0.0);
        e.tick(200.0);
        e.start_gesture();
        assert!(!e.is_animating());

        let before = e.transform();
        e.tick(2000.0);
        assert_eq!(e.transform(), before);
    }

    #[test]
    fn test_zero_duration_applies_immediately() {
        let mut e = engine();
        e.animate_to(ViewTransform::new(-10.0, -10.0, 3.0), 0.0, 0.0);
        assert_eq!(e.transform(), ViewTransform::new(-10.0, -10.0, 3.0));
        assert_eq!(e.zoom_level(), 3.0);
    }

    #[test]
    fn test_animation_target_scale_clamped() {
        let mut e = engine();
        e.animate_to(ViewTransform::new(0.0, 0.0, 50.0), 0.0, 0.0);
        assert_eq!(e.transform().scale, 5.0);
    }

    #[test]
    fn test_zoom_fraction() {
        let mut e = engine();
        assert!((e.zoom_fraction() - (0.2 / 4.2)).abs() < 1e-9);
        e.animate_to(ViewTransform::new(0.0, 0.0, 5.0), 0.0, 0.0);
        assert_eq!(e.zoom_fraction(), 1.0);
    }
}
