// SPDX: CC0-1.0

//! egui frontend. Translates egui input into [`Input`] events and paints the
//! plotter state every frame.

use crate::{
    config::Config,
    controller::{Input, Plotter, StatusKind, LEGEND_TEXT_GAP},
    grid,
    sample,
    scene::Color,
    viewport::Viewport,
    Number, Point,
};
use chrono::Local;
use egui::{Align2, Color32, FontId, Key, Modifiers, Pos2, Sense, Shape, Stroke, StrokeKind};

const GRID_COLOR: Color32 = Color32::from_gray(204);
const AXIS_COLOR: Color32 = Color32::from_rgb(0, 0, 128);
const LABEL_COLOR: Color32 = Color32::from_gray(80);
const SUCCESS_COLOR: Color32 = Color32::from_rgb(0, 128, 0);
const FAILURE_COLOR: Color32 = Color32::from_rgb(255, 0, 0);
const SHAPE_WIDTH: f32 = 2.0;
const STATUS_LINE_HEIGHT: f32 = 18.0;

fn color32(color: Color) -> Color32 {
    let [r, g, b] = color.to_rgb8();
    Color32::from_rgb(r, g, b)
}

/// Converts a point in plot-area pixels to an egui position.
fn to_pos(origin: Pos2, p: Point<Number>) -> Pos2 {
    Pos2::new(origin.x + p.x as f32, origin.y + p.y as f32)
}

fn from_pos(origin: Pos2, pos: Pos2) -> Point<Number> {
    Point::new((pos.x - origin.x) as Number, (pos.y - origin.y) as Number)
}

fn world_to_pos(viewport: &Viewport, origin: Pos2, p: Point<Number>) -> Pos2 {
    to_pos(origin, viewport.to_screen(p))
}

pub struct PlotterApp {
    plotter: Plotter,
    input: String,
    /// Set once the window has been fitted to the monitor.
    sized: bool,
}

impl PlotterApp {
    pub fn new(config: Config) -> Self {
        let [width, height] = config.fallback_size;
        let mut plotter = Plotter::new(config, width as Number, height as Number);
        plotter.show_help(Local::now());
        Self {
            plotter,
            input: String::new(),
            sized: false,
        }
    }

    fn fit_to_monitor(&mut self, ctx: &egui::Context) {
        if self.sized {
            return;
        }
        if let Some(monitor) = ctx.input(|i| i.viewport().monitor_size) {
            let size = monitor * self.plotter.config().monitor_fraction;
            tracing::debug!(width = size.x, height = size.y, "fitting window to monitor");
            ctx.send_viewport_cmd(egui::ViewportCommand::InnerSize(size));
            self.sized = true;
        }
    }

    fn input_bar(&mut self, ui: &mut egui::Ui) {
        let response = ui.add(
            egui::TextEdit::singleline(&mut self.input)
                .hint_text("equation, shape:<kind>:<values> or help")
                .desired_width(f32::INFINITY),
        );
        if response.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter)) {
            let text = core::mem::take(&mut self.input);
            self.plotter.handle(Input::Submit(text), Local::now());
            response.request_focus();
        }
    }

    fn plot_area(&mut self, ui: &mut egui::Ui) {
        let now = Local::now();
        let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::click_and_drag());
        let rect = response.rect;
        let origin = rect.min;

        self.plotter.handle(
            Input::Resize {
                width: rect.width() as Number,
                height: rect.height() as Number,
            },
            now,
        );

        if response.hovered() {
            let scroll = ui.input(|i| i.raw_scroll_delta.y);
            if scroll > 0.0 {
                self.plotter.handle(Input::ZoomIn, now);
            } else if scroll < 0.0 {
                self.plotter.handle(Input::ZoomOut, now);
            }
        }
        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                self.plotter.handle(Input::Click(from_pos(origin, pos)), now);
            }
        }
        if response.dragged_by(egui::PointerButton::Primary) {
            if let Some(pos) = response.interact_pointer_pos() {
                let delta = response.drag_delta();
                self.plotter.handle(
                    Input::Drag {
                        pos: from_pos(origin, pos),
                        delta: Point::new(delta.x as Number, delta.y as Number),
                    },
                    now,
                );
            }
        }

        painter.rect_filled(rect, 0.0, Color32::WHITE);
        let plotter = &self.plotter;
        let viewport = plotter.viewport();

        for line in grid::lines(viewport) {
            let [a, b] = line.endpoints(viewport);
            let stroke = if line.is_axis {
                Stroke::new(2.0, AXIS_COLOR)
            } else {
                Stroke::new(1.0, GRID_COLOR)
            };
            painter.line_segment(
                [
                    world_to_pos(viewport, origin, a),
                    world_to_pos(viewport, origin, b),
                ],
                stroke,
            );
        }
        for label in grid::labels(viewport) {
            painter.text(
                to_pos(origin, label.pos),
                Align2::LEFT_TOP,
                label.text,
                FontId::proportional(12.0),
                LABEL_COLOR,
            );
        }

        let curve_width = plotter.config().curve_width;
        for (eq, strips) in plotter.curves() {
            let stroke = Stroke::new(curve_width, color32(eq.color));
            for strip in sample::drawable(&strips) {
                let points = strip
                    .iter()
                    .map(|p| world_to_pos(viewport, origin, *p))
                    .collect();
                painter.add(Shape::line(points, stroke));
            }
        }

        for shape in plotter.scene().shapes() {
            let outline = shape.kind.outline();
            let points: Vec<Pos2> = outline
                .points
                .iter()
                .map(|p| world_to_pos(viewport, origin, *p))
                .collect();
            let stroke = Stroke::new(SHAPE_WIDTH, color32(shape.color));
            if outline.closed {
                painter.add(Shape::closed_line(points, stroke));
            } else {
                painter.add(Shape::line(points, stroke));
            }
        }

        for (eq, checkbox) in plotter.scene().equations().iter().zip(plotter.checkboxes()) {
            let min = to_pos(origin, checkbox.min);
            let max = to_pos(origin, checkbox.max);
            let box_rect = egui::Rect::from_min_max(min, max);
            if eq.visible {
                painter.rect_filled(box_rect.shrink(2.0), 0.0, color32(eq.color));
            }
            painter.rect_stroke(box_rect, 0.0, Stroke::new(1.0, Color32::BLACK), StrokeKind::Inside);
            painter.text(
                Pos2::new(min.x + LEGEND_TEXT_GAP as f32, min.y),
                Align2::LEFT_TOP,
                &eq.source,
                FontId::proportional(14.0),
                color32(eq.color),
            );
        }

        if let Some(status) = plotter.status() {
            let color = match status.kind {
                StatusKind::Success => SUCCESS_COLOR,
                StatusKind::Failure => FAILURE_COLOR,
                StatusKind::Info => Color32::BLACK,
            };
            let lines: Vec<&str> = status.text.lines().collect();
            for (i, line) in lines.iter().enumerate() {
                let from_bottom = (lines.len() - 1 - i) as f32;
                painter.text(
                    Pos2::new(
                        rect.left() + 10.0,
                        rect.bottom() - 10.0 - from_bottom * STATUS_LINE_HEIGHT,
                    ),
                    Align2::LEFT_BOTTOM,
                    *line,
                    FontId::monospace(13.0),
                    color,
                );
            }
        }
    }
}

impl eframe::App for PlotterApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Local::now();
        self.plotter.tick(now);
        self.fit_to_monitor(ctx);

        if ctx.input_mut(|i| i.consume_key(Modifiers::COMMAND, Key::Delete)) {
            self.plotter.handle(Input::Clear, now);
        }

        egui::TopBottomPanel::bottom("input").show(ctx, |ui| self.input_bar(ui));
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| self.plot_area(ui));

        if let Some(status) = self.plotter.status() {
            let remaining = (status.expires_at() - Local::now()).to_std().unwrap_or_default();
            ctx.request_repaint_after(remaining);
        }
    }
}
