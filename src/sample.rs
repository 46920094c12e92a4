// SPDX: CC0-1.0

//! Curve sampling.
//!
//! A curve is sampled at equally spaced abscissas and split into strips
//! wherever a sample is undefined or too far off-screen, so asymptotes and
//! holes show up as gaps instead of spurious connecting lines.

use crate::{Number, Point};
use core::ops::Range;

/// Fewest samples taken across the visible range.
pub const MIN_POINT_BUDGET: usize = 1000;
/// Samples taken when the visible half-width equals the reference half-width.
pub const BASE_POINT_BUDGET: usize = 2000;
/// Most samples taken across the visible range, however far zoomed out.
pub const MAX_POINT_BUDGET: usize = 100_000;
/// Samples with `|y|` beyond this many zoom units are treated as off-screen
/// and break the curve.
pub const OFFSCREEN_MARGIN: Number = 10.0;

/// One continuous run of admissible samples.
pub type Strip = Vec<Point<Number>>;

/// Number of sampling intervals for a visible half-width, growing in
/// proportion to it so per-pixel resolution stays about the same.
pub fn point_budget(visible_half_width: Number, reference_half_width: Number) -> usize {
    let scaled = (BASE_POINT_BUDGET as Number * visible_half_width / reference_half_width).floor();
    if scaled.is_nan() || scaled < MIN_POINT_BUDGET as Number {
        MIN_POINT_BUDGET
    } else if scaled > MAX_POINT_BUDGET as Number {
        MAX_POINT_BUDGET
    } else {
        scaled as usize
    }
}

/// Samples `f` at `budget + 1` points covering `x` inclusively.
///
/// A sample is admissible when `f` is defined there and `|y| < y_limit`.
/// Every strip returned is non-empty, but may hold a single point.
pub fn sample<F>(mut f: F, x: Range<Number>, budget: usize, y_limit: Number) -> Vec<Strip>
where
    F: FnMut(Number) -> Option<Number>,
{
    let budget = budget.max(1);
    let step = (x.end - x.start) / budget as Number;

    let mut strips = Vec::new();
    let mut current = Strip::new();
    for i in 0..=budget {
        // computing from `i` keeps the last abscissa exactly on `x.end`
        let px = if i == budget {
            x.end
        } else {
            x.start + step * i as Number
        };
        match f(px) {
            Some(py) if py.is_finite() && py.abs() < y_limit => current.push(Point::new(px, py)),
            _ => {
                if !current.is_empty() {
                    strips.push(core::mem::take(&mut current));
                }
            }
        }
    }
    if !current.is_empty() {
        strips.push(current);
    }

    tracing::trace!(strips = strips.len(), budget, "sampled curve");
    strips
}

/// Strips with enough points to draw a line through.
pub fn drawable(strips: &[Strip]) -> impl Iterator<Item = &Strip> {
    strips.iter().filter(|strip| strip.len() >= 2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equation::compile;
    use core::f64::consts::FRAC_PI_2;

    #[test]
    fn budget_scales_with_width() {
        assert_eq!(point_budget(10.0, 10.0), 2000);
        assert_eq!(point_budget(20.0, 10.0), 4000);
        assert_eq!(point_budget(16.0, 10.0), 3200);
        assert_eq!(point_budget(1.0, 10.0), MIN_POINT_BUDGET);
        assert_eq!(point_budget(1e12, 10.0), MAX_POINT_BUDGET);
        assert_eq!(point_budget(Number::NAN, 10.0), MIN_POINT_BUDGET);
    }

    #[test]
    fn samples_inclusive_range() {
        let strips = sample(Some, -1.0..1.0, 4, 10.0);
        assert_eq!(strips.len(), 1);
        let xs: Vec<_> = strips[0].iter().map(|p| p.x).collect();
        assert_eq!(xs, [-1.0, -0.5, 0.0, 0.5, 1.0]);
    }

    #[test]
    fn tan_splits_at_asymptotes() {
        let tan = compile("tan(x)").unwrap();
        let limit = 100.0;
        let strips = sample(|x| tan.eval(x), -5.0..5.0, 1000, limit);

        // asymptotes at -3pi/2, -pi/2, pi/2 and 3pi/2 fall inside [-5, 5]
        assert!(strips.len() >= 2);
        assert_eq!(strips.len(), 5);
        for strip in &strips {
            assert!(strip.iter().all(|p| p.y.abs() < limit));
            let lo = strip.first().unwrap().x;
            let hi = strip.last().unwrap().x;
            for k in [-3.0, -1.0, 1.0, 3.0] {
                let asymptote = k * FRAC_PI_2;
                assert!(!(lo < asymptote && asymptote < hi), "strip straddles {asymptote}");
            }
        }
    }

    #[test]
    fn undefined_samples_break_strips() {
        let f = compile("1/x").unwrap();
        let strips = sample(|x| f.eval(x), -1.0..1.0, 4, 100.0);
        // x = 0 is undefined, leaving [-1, -0.5] and [0.5, 1]
        assert_eq!(strips.len(), 2);
        assert_eq!(strips[0], vec![Point::new(-1.0, -1.0), Point::new(-0.5, -2.0)]);
        assert_eq!(strips[1], vec![Point::new(0.5, 2.0), Point::new(1.0, 1.0)]);
    }

    #[test]
    fn single_point_strips_are_kept_but_not_drawable() {
        // defined only at x = 0 among the abscissas
        let strips = sample(
            |x| if x == 0.0 { Some(1.0) } else { None },
            -1.0..1.0,
            2,
            10.0,
        );
        assert_eq!(strips, vec![vec![Point::new(0.0, 1.0)]]);
        assert_eq!(drawable(&strips).count(), 0);
    }

    #[test]
    fn nothing_admissible() {
        assert!(sample(|_| None, 0.0..1.0, 10, 1.0).is_empty());
        assert!(sample(|_| Some(5.0), 0.0..1.0, 10, 1.0).is_empty());
    }
}
