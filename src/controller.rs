// SPDX: CC0-1.0

//! Interaction state: applies input events to the viewport and scene and
//! keeps the transient status message.

use crate::{
    config::{Config, TITLE},
    equation,
    sample::{self, Strip, OFFSCREEN_MARGIN},
    scene::{Equation, Scene, ShapeKind, SHAPE_PREFIX},
    viewport::Viewport,
    Number, Point, Rect,
};
use chrono::{DateTime, Duration, Local};

/// Legend rows start this far from the right screen edge.
pub const LEGEND_INSET: Number = 220.0;
pub const LEGEND_TOP: Number = 20.0;
pub const LEGEND_ROW: Number = 20.0;
pub const CHECKBOX_SIZE: Number = 12.0;
/// Gap between a checkbox and its equation text.
pub const LEGEND_TEXT_GAP: Number = 40.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Help,
    About,
    Clear,
}

impl Command {
    pub const fn exhaustive() -> &'static [Command] {
        &[Self::Help, Self::About, Self::Clear]
    }

    pub const fn help(&self) -> &'static str {
        match self {
            Self::Help => "show these instructions",
            Self::About => "show what this program is",
            Self::Clear => "remove all equations and shapes (also Ctrl+Delete)",
        }
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Self::Help => "help",
            Self::About => "about",
            Self::Clear => "clear",
        }
    }
}

impl core::str::FromStr for Command {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        for c in Self::exhaustive() {
            if s.eq_ignore_ascii_case(c.name()) {
                return Ok(*c);
            }
        }
        Err(())
    }
}

pub fn help_text() -> String {
    let mut text = format!(
        "{TITLE}\n\
         Type an equation and press Enter to plot it\n\
         Use the mouse wheel to zoom, drag to pan\n\
         Click checkboxes to show or hide equations\n\
         Press Ctrl+Delete to clear all equations and shapes\n\
         Example equations: x^2, sin(x), y = x^3 - 2*x\n\
         Example shapes: shape:circle:0:0:5, shape:rectangle:-1:-1:1:1, \
         shape:line:-5:0:5:0, shape:ellipse:0:0:4:2"
    );
    for c in Command::exhaustive() {
        text.push_str(&format!("\n{name}: {help}", name = c.name(), help = c.help()));
    }
    text
}

pub fn about_text() -> String {
    format!(
        "{TITLE} {version}: plots functions of x over a pannable, zoomable grid",
        version = env!("CARGO_PKG_VERSION")
    )
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Failure,
    Info,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Status {
    pub text: String,
    pub kind: StatusKind,
    pub posted: DateTime<Local>,
    pub duration: Duration,
}

impl Status {
    pub fn expires_at(&self) -> DateTime<Local> {
        self.posted + self.duration
    }

    pub fn is_expired(&self, now: DateTime<Local>) -> bool {
        now - self.posted >= self.duration
    }
}

/// Everything the frontend feeds into the plotter. Positions and deltas are
/// in screen pixels relative to the plot area.
#[derive(Clone, Debug, PartialEq)]
pub enum Input {
    Submit(String),
    ZoomIn,
    ZoomOut,
    /// Pointer moved with the primary button held.
    Drag {
        pos: Point<Number>,
        delta: Point<Number>,
    },
    /// Primary button clicked.
    Click(Point<Number>),
    Clear,
    Resize {
        width: Number,
        height: Number,
    },
}

/// Checkbox rectangles for `count` legend rows.
pub fn checkbox_rects(count: usize, screen_width: Number) -> Vec<Rect> {
    (0..count)
        .map(|i| {
            Rect::from_min_size(
                Point::new(
                    screen_width - LEGEND_INSET,
                    LEGEND_TOP + i as Number * LEGEND_ROW,
                ),
                CHECKBOX_SIZE,
                CHECKBOX_SIZE,
            )
        })
        .collect()
}

/// Owner of all mutable application state.
#[derive(Debug)]
pub struct Plotter {
    config: Config,
    viewport: Viewport,
    scene: Scene,
    checkboxes: Vec<Rect>,
    status: Option<Status>,
}

impl Plotter {
    pub fn new(config: Config, width: Number, height: Number) -> Self {
        let viewport = Viewport::new(width, height).with_zoom(config.initial_zoom);
        Self {
            config,
            viewport,
            scene: Scene::default(),
            checkboxes: Vec::new(),
            status: None,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// One rectangle per equation, in the same order.
    pub fn checkboxes(&self) -> &[Rect] {
        &self.checkboxes
    }

    pub fn status(&self) -> Option<&Status> {
        self.status.as_ref()
    }

    pub fn post(&mut self, kind: StatusKind, text: impl Into<String>, now: DateTime<Local>) {
        self.post_for(kind, text, self.config.status_duration, now);
    }

    pub fn post_for(
        &mut self,
        kind: StatusKind,
        text: impl Into<String>,
        duration: Duration,
        now: DateTime<Local>,
    ) {
        self.status = Some(Status {
            text: text.into(),
            kind,
            posted: now,
            duration,
        });
    }

    pub fn show_help(&mut self, now: DateTime<Local>) {
        let help = help_text();
        tracing::info!("{help}");
        self.post_for(StatusKind::Info, help, self.config.help_duration, now);
    }

    /// Drops the status message once it has expired.
    pub fn tick(&mut self, now: DateTime<Local>) {
        if self.status.as_ref().is_some_and(|s| s.is_expired(now)) {
            self.status = None;
        }
    }

    pub fn handle(&mut self, input: Input, now: DateTime<Local>) {
        match input {
            Input::Submit(text) => self.submit(&text, now),
            Input::ZoomIn => self.viewport.zoom_in(),
            Input::ZoomOut => self.viewport.zoom_out(),
            Input::Drag { pos, delta } => {
                if !self.over_checkbox(pos) {
                    self.viewport.pan(delta.x, delta.y);
                }
            }
            Input::Click(pos) => {
                self.click(pos);
            }
            Input::Clear => self.clear(now),
            Input::Resize { width, height } => {
                if self.viewport.resize(width, height) {
                    self.layout_checkboxes();
                }
            }
        }
    }

    fn over_checkbox(&self, pos: Point<Number>) -> bool {
        self.checkboxes.iter().any(|rect| rect.contains(pos))
    }

    fn layout_checkboxes(&mut self) {
        self.checkboxes = checkbox_rects(self.scene.equations().len(), self.viewport.size().x);
    }

    /// Toggles the equation whose checkbox is under `pos`, returning its index.
    pub fn click(&mut self, pos: Point<Number>) -> Option<usize> {
        let idx = self.checkboxes.iter().position(|rect| rect.contains(pos))?;
        let visible = self.scene.toggle(idx)?;
        tracing::debug!(idx, visible, "toggled equation");
        Some(idx)
    }

    /// Empties the scene and the checkbox registry together.
    pub fn clear(&mut self, now: DateTime<Local>) {
        self.scene.clear();
        self.checkboxes.clear();
        tracing::info!("cleared all equations and shapes");
        self.post(StatusKind::Success, "Cleared all equations and shapes", now);
    }

    pub fn submit(&mut self, text: &str, now: DateTime<Local>) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }

        if let Ok(cmd) = text.parse::<Command>() {
            match cmd {
                Command::Help => self.show_help(now),
                Command::About => {
                    let about = about_text();
                    tracing::info!("{about}");
                    self.post_for(StatusKind::Success, about, self.config.help_duration, now);
                }
                Command::Clear => self.clear(now),
            }
        } else if text.to_ascii_lowercase().starts_with(SHAPE_PREFIX) {
            self.submit_shape(text, now);
        } else {
            self.submit_equation(text, now);
        }
    }

    fn submit_shape(&mut self, text: &str, now: DateTime<Local>) {
        let directive = format!("{SHAPE_PREFIX}{}", &text[SHAPE_PREFIX.len()..]);
        match ShapeKind::parse_directive(&directive) {
            Ok(kind) => {
                let shape = self.scene.add_shape(kind);
                tracing::info!(shape = %shape.kind, "added shape");
                let msg = format!("Shape added: {}", shape.kind);
                self.post(StatusKind::Success, msg, now);
            }
            Err(err) => {
                tracing::warn!(input = text, %err, "rejected shape directive");
                self.post(StatusKind::Failure, format!("Failed to add shape: {err}"), now);
            }
        }
    }

    fn submit_equation(&mut self, text: &str, now: DateTime<Local>) {
        match equation::compile(text) {
            Ok(evaluator) => {
                tracing::info!(source = text, compiled = %evaluator, "added equation");
                self.scene.add_equation(evaluator, text);
                self.layout_checkboxes();
                self.post(StatusKind::Success, "Equation added successfully", now);
            }
            Err(err) => {
                tracing::warn!(input = text, %err, "rejected equation");
                let msg = format!(
                    "Failed to add equation, type help for instructions\n{}",
                    err.report()
                );
                self.post(StatusKind::Failure, msg, now);
            }
        }
    }

    /// Samples every visible equation across the visible x range.
    pub fn curves(&self) -> impl Iterator<Item = (&Equation, Vec<Strip>)> + '_ {
        let half = self.viewport.half_extents();
        let budget = sample::point_budget(half.x, self.config.reference_half_width);
        let y_limit = self.viewport.zoom() * OFFSCREEN_MARGIN;
        let x = self.viewport.bounds().x;
        self.scene
            .equations()
            .iter()
            .filter(|eq| eq.visible)
            .map(move |eq| {
                let strips = sample::sample(|x| eq.evaluator.eval(x), x.clone(), budget, y_limit);
                (eq, strips)
            })
    }
}
