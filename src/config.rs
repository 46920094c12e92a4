// SPDX: CC0-1.0

use crate::{viewport::DEFAULT_ZOOM, Number};
use chrono::Duration;

pub const TITLE: &str = "Dynamic Equation Grapher";

/// Startup constants. There are no config files; `RUST_LOG` is read
/// separately by the log subscriber.
#[derive(Clone, Debug)]
pub struct Config {
    /// Half-extent of the shorter screen axis at startup, in world units.
    pub initial_zoom: Number,
    /// Sampling density is relative to this half-width.
    pub reference_half_width: Number,
    /// Fraction of the monitor the window is resized to on the first frame.
    pub monitor_fraction: f32,
    /// Window size used until the monitor size is known.
    pub fallback_size: [f32; 2],
    pub status_duration: Duration,
    pub help_duration: Duration,
    pub curve_width: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            initial_zoom: DEFAULT_ZOOM,
            reference_half_width: DEFAULT_ZOOM,
            monitor_fraction: 0.9,
            fallback_size: [800.0, 600.0],
            status_duration: Duration::milliseconds(5000),
            help_duration: Duration::milliseconds(10_000),
            curve_width: 2.0,
        }
    }
}
