// SPDX: CC0-1.0

//! Mapping between world coordinates and screen pixels.
//!
//! The visible half-extent along the shorter screen axis is `zoom`; the
//! longer axis is stretched by the aspect ratio so one world unit is the same
//! number of pixels horizontally and vertically.

use crate::{Number, Point, Window};

pub const DEFAULT_ZOOM: Number = 10.0;
pub const ZOOM_IN_FACTOR: Number = 0.9;
pub const ZOOM_OUT_FACTOR: Number = 1.1;
/// Screen pixels dragged per unit of zoom panned.
pub const PAN_DIVISOR: Number = 200.0;

/// Zoom is clamped to this range so that repeated ticks cannot underflow it
/// to zero or push sampling and gridlines out of floating point range.
pub const MIN_ZOOM: Number = 1e-6;
pub const MAX_ZOOM: Number = 1e9;

#[derive(Clone, Debug, PartialEq)]
pub struct Viewport {
    zoom: Number,
    offset: Point<Number>,
    size: Point<Number>,
}

impl Viewport {
    /// # Panics
    ///
    /// If the screen size is not positive and finite.
    pub fn new(width: Number, height: Number) -> Self {
        assert!(is_valid_size(width, height), "invalid screen size {width}x{height}");
        Self {
            zoom: DEFAULT_ZOOM,
            offset: Point::new(0.0, 0.0),
            size: Point::new(width, height),
        }
    }

    pub fn with_zoom(mut self, zoom: Number) -> Self {
        if zoom.is_finite() && zoom > 0.0 {
            self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        }
        self
    }

    pub const fn zoom(&self) -> Number {
        self.zoom
    }

    pub const fn offset(&self) -> Point<Number> {
        self.offset
    }

    pub const fn size(&self) -> Point<Number> {
        self.size
    }

    pub fn aspect(&self) -> Number {
        self.size.x / self.size.y
    }

    /// Half of the visible world width and height.
    pub fn half_extents(&self) -> Point<Number> {
        let aspect = self.aspect();
        if aspect > 1.0 {
            Point::new(self.zoom * aspect, self.zoom)
        } else {
            Point::new(self.zoom, self.zoom / aspect)
        }
    }

    /// Visible world rectangle.
    pub fn bounds(&self) -> Window {
        let half = self.half_extents();
        Window {
            x: (-half.x + self.offset.x)..(half.x + self.offset.x),
            y: (-half.y + self.offset.y)..(half.y + self.offset.y),
        }
    }

    pub fn to_screen(&self, world: Point<Number>) -> Point<Number> {
        let Window { x, y } = self.bounds();
        Point::new(
            self.size.x * (world.x - x.start) / (x.end - x.start),
            self.size.y * (1.0 - (world.y - y.start) / (y.end - y.start)),
        )
    }

    pub fn to_world(&self, screen: Point<Number>) -> Point<Number> {
        let Window { x, y } = self.bounds();
        Point::new(
            x.start + screen.x / self.size.x * (x.end - x.start),
            y.start + (1.0 - screen.y / self.size.y) * (y.end - y.start),
        )
    }

    /// Multiplies zoom by `factor`. Factors below one zoom in.
    ///
    /// Returns `false` and leaves the zoom alone if `factor` is not a positive
    /// finite number.
    pub fn set_zoom(&mut self, factor: Number) -> bool {
        if !(factor.is_finite() && factor > 0.0) {
            tracing::warn!(factor, "ignoring invalid zoom factor");
            return false;
        }
        self.zoom = (self.zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);
        tracing::trace!(zoom = self.zoom, "zoomed");
        true
    }

    pub fn zoom_in(&mut self) {
        self.set_zoom(ZOOM_IN_FACTOR);
    }

    pub fn zoom_out(&mut self) {
        self.set_zoom(ZOOM_OUT_FACTOR);
    }

    /// Moves the view by a pointer delta in screen pixels. Screen y grows
    /// downwards, world y grows upwards.
    pub fn pan(&mut self, dx_screen: Number, dy_screen: Number) {
        if !(dx_screen.is_finite() && dy_screen.is_finite()) {
            return;
        }
        self.offset.x += dx_screen * self.zoom / PAN_DIVISOR;
        self.offset.y -= dy_screen * self.zoom / PAN_DIVISOR;
        tracing::trace!(x = self.offset.x, y = self.offset.y, "panned");
    }

    /// Returns whether the size changed. Degenerate sizes (a minimized
    /// window) are ignored.
    pub fn resize(&mut self, width: Number, height: Number) -> bool {
        if !is_valid_size(width, height) {
            tracing::debug!(width, height, "ignoring degenerate screen size");
            return false;
        }
        let size = Point::new(width, height);
        if size == self.size {
            return false;
        }
        self.size = size;
        tracing::debug!(width, height, "resized viewport");
        true
    }
}

fn is_valid_size(width: Number, height: Number) -> bool {
    width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Point<Number>, b: Point<Number>) -> bool {
        (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9
    }

    #[test]
    fn wide_screen_extents() {
        let vp = Viewport::new(800.0, 400.0);
        assert_eq!(vp.half_extents(), Point::new(20.0, 10.0));
        assert_eq!(
            vp.bounds(),
            Window {
                x: -20.0..20.0,
                y: -10.0..10.0
            }
        );
    }

    #[test]
    fn tall_screen_extents() {
        let vp = Viewport::new(400.0, 800.0);
        assert_eq!(vp.half_extents(), Point::new(10.0, 20.0));
        let square = Viewport::new(500.0, 500.0);
        assert_eq!(square.half_extents(), Point::new(10.0, 10.0));
    }

    #[test]
    fn pixels_are_square() {
        for (w, h) in [(800.0, 400.0), (400.0, 800.0), (640.0, 480.0)] {
            let vp = Viewport::new(w, h);
            let half = vp.half_extents();
            let per_px_x = 2.0 * half.x / w;
            let per_px_y = 2.0 * half.y / h;
            assert!((per_px_x - per_px_y).abs() < 1e-12);
        }
    }

    #[test]
    fn screen_corners() {
        let vp = Viewport::new(800.0, 400.0);
        assert!(close(vp.to_screen(Point::new(-20.0, 10.0)), Point::new(0.0, 0.0)));
        assert!(close(vp.to_screen(Point::new(20.0, -10.0)), Point::new(800.0, 400.0)));
        assert!(close(vp.to_screen(Point::new(0.0, 0.0)), Point::new(400.0, 200.0)));
        assert!(close(vp.to_world(Point::new(400.0, 0.0)), Point::new(0.0, 10.0)));
    }

    #[test]
    fn zoom_is_multiplicative() {
        let mut vp = Viewport::new(800.0, 600.0);
        for n in 1..=50 {
            vp.zoom_in();
            let want = DEFAULT_ZOOM * ZOOM_IN_FACTOR.powi(n);
            assert!((vp.zoom() - want).abs() <= want * 1e-12);
            assert!(vp.zoom() > 0.0);
        }
        vp.zoom_out();
        assert!(vp.zoom() > DEFAULT_ZOOM * ZOOM_IN_FACTOR.powi(50));
    }

    #[test]
    fn zoom_stays_positive() {
        let mut vp = Viewport::new(800.0, 600.0);
        for _ in 0..100_000 {
            vp.zoom_in();
        }
        assert_eq!(vp.zoom(), MIN_ZOOM);
        assert!(!vp.set_zoom(0.0));
        assert!(!vp.set_zoom(-2.0));
        assert!(!vp.set_zoom(Number::NAN));
        assert_eq!(vp.zoom(), MIN_ZOOM);
    }

    #[test]
    fn pan_inverts_y() {
        let mut vp = Viewport::new(800.0, 600.0);
        vp.pan(20.0, 40.0);
        assert!(close(vp.offset(), Point::new(1.0, -2.0)));
        let Window { x, y } = vp.bounds();
        assert!((x.start + x.end - 2.0).abs() < 1e-12);
        assert!((y.start + y.end + 4.0).abs() < 1e-12);
    }

    #[test]
    fn resize_rejects_degenerate() {
        let mut vp = Viewport::new(800.0, 600.0);
        assert!(!vp.resize(0.0, 600.0));
        assert!(!vp.resize(800.0, 600.0));
        assert!(vp.resize(1024.0, 768.0));
        assert_eq!(vp.size(), Point::new(1024.0, 768.0));
    }

    #[test]
    fn round_trip_after_pan_and_zoom() {
        let mut vp = Viewport::new(1280.0, 720.0);
        vp.pan(-130.0, 75.0);
        vp.zoom_in();
        vp.zoom_in();
        let Window { x, y } = vp.bounds();
        for fx in [0.0, 0.25, 0.5, 0.99] {
            for fy in [0.0, 0.3, 1.0] {
                let p = Point::new(x.start + fx * (x.end - x.start), y.start + fy * (y.end - y.start));
                assert!(close(vp.to_world(vp.to_screen(p)), p));
            }
        }
    }
}
