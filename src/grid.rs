// SPDX: CC0-1.0

//! Gridlines and their labels, computed from a [`Viewport`] without
//! reference to any particular painter.

use crate::{viewport::Viewport, Number, Point};
use core::ops::Range;

/// Most gridlines generated per axis. Only reachable at extreme aspect
/// ratios, where the lines would be a solid fill anyway.
pub const MAX_LINES_PER_AXIS: usize = 500;

/// Screen distance between a label and the axis it sits on.
pub const LABEL_OFFSET: Number = 4.0;
/// Room kept free for a label when it is pinned to a screen edge.
pub const LABEL_MARGIN: Point<Number> = Point { x: 48.0, y: 18.0 };

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    /// Constant x, spans the visible y range.
    Vertical,
    /// Constant y, spans the visible x range.
    Horizontal,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GridLine {
    pub orientation: Orientation,
    pub value: Number,
    /// The line through the origin, drawn heavier.
    pub is_axis: bool,
}

impl GridLine {
    /// World-space end points spanning the visible rectangle.
    pub fn endpoints(&self, viewport: &Viewport) -> [Point<Number>; 2] {
        let win = viewport.bounds();
        match self.orientation {
            Orientation::Vertical => [
                Point::new(self.value, win.y.start),
                Point::new(self.value, win.y.end),
            ],
            Orientation::Horizontal => [
                Point::new(win.x.start, self.value),
                Point::new(win.x.end, self.value),
            ],
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Label {
    pub text: String,
    /// Top-left corner in screen pixels.
    pub pos: Point<Number>,
}

/// Power of ten between gridlines, keeping roughly 5 to 50 lines visible.
pub fn spacing(zoom: Number) -> Number {
    Number::powf(10.0, (zoom / 5.0).log10().floor())
}

fn multiples(range: &Range<Number>, spacing: Number) -> Range<i64> {
    let first = (range.start / spacing).ceil() as i64;
    let last = (range.end / spacing).floor() as i64;
    let count = (last - first + 1).clamp(0, MAX_LINES_PER_AXIS as i64);
    first..first + count
}

/// Every gridline inside the visible rectangle, vertical lines first.
pub fn lines(viewport: &Viewport) -> Vec<GridLine> {
    let spacing = spacing(viewport.zoom());
    let win = viewport.bounds();
    let vertical = multiples(&win.x, spacing).map(|i| GridLine {
        orientation: Orientation::Vertical,
        value: i as Number * spacing,
        is_axis: i == 0,
    });
    let horizontal = multiples(&win.y, spacing).map(|i| GridLine {
        orientation: Orientation::Horizontal,
        value: i as Number * spacing,
        is_axis: i == 0,
    });
    vertical.chain(horizontal).collect()
}

/// Formats a gridline value with just enough decimals for `spacing`.
pub fn format_value(value: Number, spacing: Number) -> String {
    let decimals = (-spacing.log10()).round().max(0.0) as usize;
    format!("{value:.decimals$}")
}

/// Labels for every non-axis gridline, placed next to the perpendicular axis
/// and pinned to the screen edge when that axis is scrolled out of view.
pub fn labels(viewport: &Viewport) -> Vec<Label> {
    let spacing = spacing(viewport.zoom());
    let size = viewport.size();
    let origin = viewport.to_screen(Point::new(0.0, 0.0));
    let along_x = (origin.y + LABEL_OFFSET).clamp(0.0, (size.y - LABEL_MARGIN.y).max(0.0));
    let along_y = (origin.x + LABEL_OFFSET).clamp(0.0, (size.x - LABEL_MARGIN.x).max(0.0));

    lines(viewport)
        .into_iter()
        .filter(|line| !line.is_axis)
        .map(|line| {
            let pos = match line.orientation {
                Orientation::Vertical => {
                    let sx = viewport.to_screen(Point::new(line.value, 0.0)).x;
                    Point::new(sx + LABEL_OFFSET, along_x)
                }
                Orientation::Horizontal => {
                    let sy = viewport.to_screen(Point::new(0.0, line.value)).y;
                    Point::new(along_y, sy + LABEL_OFFSET)
                }
            };
            Label {
                text: format_value(line.value, spacing),
                pos,
            }
        })
        .collect()
}
