//! Shared helpers for the integration tests

#![allow(dead_code)] // Not every helper is used in every test file

use chrono::{DateTime, Local, TimeZone};
use equation_grapher::{
    config::Config,
    controller::{Input, Plotter},
    Number, Point, Rect,
};

/// A fixed instant so status expiry is deterministic.
pub fn epoch() -> DateTime<Local> {
    Local
        .timestamp_opt(1_700_000_000, 0)
        .single()
        .expect("unambiguous timestamp")
}

/// A plotter with a 800x600 plot area and no content.
pub fn plotter() -> Plotter {
    Plotter::new(Config::default(), 800.0, 600.0)
}

pub fn submit(plotter: &mut Plotter, text: &str) {
    plotter.handle(Input::Submit(text.to_string()), epoch());
}

pub fn center(rect: &Rect) -> Point<Number> {
    Point::new(
        (rect.min.x + rect.max.x) / 2.0,
        (rect.min.y + rect.max.y) / 2.0,
    )
}

/// Assert two floats are approximately equal
pub fn assert_float_eq(a: Number, b: Number, epsilon: Number) {
    assert!(
        (a - b).abs() < epsilon,
        "Expected {} to be approximately equal to {} (epsilon: {})",
        a,
        b,
        epsilon
    );
}
