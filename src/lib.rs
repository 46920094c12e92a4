// SPDX: CC0-1.0

pub mod app;
pub mod config;
pub mod controller;
pub mod equation;
pub mod eval;
pub mod grid;
pub mod lex;
pub mod parse;
pub mod sample;
pub mod scene;
pub mod stdlib;
pub mod viewport;

use core::{fmt, ops::Range};

pub type Number = f64;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point<T> {
    pub x: T,
    pub y: T,
}

impl<T> Point<T> {
    #[inline]
    pub const fn new(x: T, y: T) -> Self {
        Self { x, y }
    }
}

/// Visible world rectangle.
#[derive(Clone, Debug, PartialEq)]
pub struct Window {
    pub x: Range<Number>,
    pub y: Range<Number>,
}

impl Window {
    pub fn contains(&self, p: Point<Number>) -> bool {
        (self.x.start..=self.x.end).contains(&p.x) && (self.y.start..=self.y.end).contains(&p.y)
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Window")
            .field("x range", &self.x)
            .field("y range", &self.y)
            .finish()
    }
}

/// Axis-aligned rectangle in screen pixels, `min` inclusive and `max` exclusive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub min: Point<Number>,
    pub max: Point<Number>,
}

impl Rect {
    pub fn from_min_size(min: Point<Number>, width: Number, height: Number) -> Self {
        Self {
            min,
            max: Point::new(min.x + width, min.y + height),
        }
    }

    pub fn contains(&self, p: Point<Number>) -> bool {
        p.x >= self.min.x && p.x < self.max.x && p.y >= self.min.y && p.y < self.max.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_contains_is_half_open() {
        let rect = Rect::from_min_size(Point::new(10.0, 20.0), 12.0, 12.0);
        assert!(rect.contains(Point::new(10.0, 20.0)));
        assert!(rect.contains(Point::new(21.9, 31.9)));
        assert!(!rect.contains(Point::new(22.0, 25.0)));
        assert!(!rect.contains(Point::new(9.9, 25.0)));
    }

    #[test]
    fn window_contains_edges() {
        let win = Window {
            x: -2.0..2.0,
            y: -1.0..1.0,
        };
        assert!(win.contains(Point::new(2.0, -1.0)));
        assert!(!win.contains(Point::new(2.1, 0.0)));
    }
}
