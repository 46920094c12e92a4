// SPDX: CC0-1.0

use crate::{equation::Evaluator, Number, Point};
use core::{f64::consts::TAU, fmt};

/// Prefix marking a submission as a shape directive.
pub const SHAPE_PREFIX: &str = "shape:";

/// Segments used to approximate circles and ellipses.
pub const ROUND_SEGMENTS: usize = 100;

/// Linear RGB, each channel in `0.0..=1.0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub fn to_rgb8(self) -> [u8; 3] {
        [self.r, self.g, self.b].map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8)
    }
}

pub const PALETTE: [Color; 6] = [
    Color::rgb(0.0, 0.0, 0.0), // black
    Color::rgb(1.0, 0.0, 0.0), // red
    Color::rgb(0.0, 0.0, 1.0), // blue
    Color::rgb(0.0, 0.5, 0.0), // green
    Color::rgb(0.5, 0.0, 0.5), // purple
    Color::rgb(1.0, 0.5, 0.0), // orange
];

pub const fn palette_color(index: usize) -> Color {
    PALETTE[index % PALETTE.len()]
}

#[derive(Clone, Debug)]
pub struct Equation {
    pub evaluator: Evaluator,
    pub color: Color,
    /// Text as the user submitted it.
    pub source: String,
    pub visible: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ShapeKind {
    Circle {
        center: Point<Number>,
        radius: Number,
    },
    Ellipse {
        center: Point<Number>,
        radii: Point<Number>,
    },
    Rectangle {
        corner1: Point<Number>,
        corner2: Point<Number>,
    },
    Line {
        p1: Point<Number>,
        p2: Point<Number>,
    },
}

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ShapeErr {
    #[error("shape directives look like 'shape:<kind>:<values...>'")]
    MissingKind,
    #[error("unknown shape '{0}', expected one of: circle, ellipse, rectangle, line")]
    UnknownKind(String),
    #[error("shape '{kind}' takes {expected} values ({fields}), but found {found}")]
    FieldCount {
        kind: &'static str,
        fields: String,
        expected: usize,
        found: usize,
    },
    #[error("{field} of '{kind}' must be a number, but found '{text}'")]
    NotANumber {
        kind: &'static str,
        field: &'static str,
        text: String,
    },
    #[error("{field} of '{kind}' must be finite")]
    NotFinite {
        kind: &'static str,
        field: &'static str,
    },
    #[error("{field} of '{kind}' must not be negative")]
    NegativeRadius {
        kind: &'static str,
        field: &'static str,
    },
}

/// Closed polygon or open polyline in world coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct Outline {
    pub points: Vec<Point<Number>>,
    pub closed: bool,
}

impl ShapeKind {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Circle { .. } => "circle",
            Self::Ellipse { .. } => "ellipse",
            Self::Rectangle { .. } => "rectangle",
            Self::Line { .. } => "line",
        }
    }

    fn fields(kind: &str) -> Option<(&'static str, &'static [&'static str])> {
        match kind {
            "circle" => Some(("circle", &["cx", "cy", "r"])),
            "ellipse" => Some(("ellipse", &["cx", "cy", "rx", "ry"])),
            "rectangle" => Some(("rectangle", &["x1", "y1", "x2", "y2"])),
            "line" => Some(("line", &["x1", "y1", "x2", "y2"])),
            _ => None,
        }
    }

    /// Parses `shape:<kind>:<values...>`, for example `shape:circle:0:0:5`.
    pub fn parse_directive(text: &str) -> Result<Self, ShapeErr> {
        let rest = text
            .trim()
            .strip_prefix(SHAPE_PREFIX)
            .ok_or(ShapeErr::MissingKind)?;
        let mut parts = rest.split(':').map(str::trim);
        let kind = parts
            .next()
            .filter(|kind| !kind.is_empty())
            .ok_or(ShapeErr::MissingKind)?;
        let (kind, fields) = Self::fields(&kind.to_ascii_lowercase())
            .ok_or_else(|| ShapeErr::UnknownKind(kind.to_string()))?;

        let texts: Vec<&str> = parts.collect();
        if texts.len() != fields.len() {
            return Err(ShapeErr::FieldCount {
                kind,
                fields: fields.join(":"),
                expected: fields.len(),
                found: texts.len(),
            });
        }

        let mut vals = [0.0; 4];
        for ((dst, text), field) in vals.iter_mut().zip(&texts).zip(fields.iter().copied()) {
            let val: Number = text.parse().map_err(|_| ShapeErr::NotANumber {
                kind,
                field,
                text: text.to_string(),
            })?;
            if !val.is_finite() {
                return Err(ShapeErr::NotFinite { kind, field });
            }
            *dst = val;
        }

        let radius = |idx: usize| {
            if vals[idx] < 0.0 {
                Err(ShapeErr::NegativeRadius {
                    kind,
                    field: fields[idx],
                })
            } else {
                Ok(vals[idx])
            }
        };
        let [a, b, c, d] = vals;
        Ok(match kind {
            "circle" => Self::Circle {
                center: Point::new(a, b),
                radius: radius(2)?,
            },
            "ellipse" => Self::Ellipse {
                center: Point::new(a, b),
                radii: Point::new(radius(2)?, radius(3)?),
            },
            "rectangle" => Self::Rectangle {
                corner1: Point::new(a, b),
                corner2: Point::new(c, d),
            },
            _ => Self::Line {
                p1: Point::new(a, b),
                p2: Point::new(c, d),
            },
        })
    }

    pub fn outline(&self) -> Outline {
        let round = |center: Point<Number>, radii: Point<Number>| Outline {
            points: (0..ROUND_SEGMENTS)
                .map(|i| {
                    let theta = TAU * i as Number / ROUND_SEGMENTS as Number;
                    Point::new(
                        center.x + radii.x * theta.cos(),
                        center.y + radii.y * theta.sin(),
                    )
                })
                .collect(),
            closed: true,
        };
        match *self {
            Self::Circle { center, radius } => round(center, Point::new(radius, radius)),
            Self::Ellipse { center, radii } => round(center, radii),
            Self::Rectangle { corner1, corner2 } => Outline {
                points: vec![
                    corner1,
                    Point::new(corner2.x, corner1.y),
                    corner2,
                    Point::new(corner1.x, corner2.y),
                ],
                closed: true,
            },
            Self::Line { p1, p2 } => Outline {
                points: vec![p1, p2],
                closed: false,
            },
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Circle { center, radius } => {
                write!(f, "circle at ({}, {}) r={radius}", center.x, center.y)
            }
            Self::Ellipse { center, radii } => write!(
                f,
                "ellipse at ({}, {}) rx={} ry={}",
                center.x, center.y, radii.x, radii.y
            ),
            Self::Rectangle { corner1, corner2 } => write!(
                f,
                "rectangle ({}, {}) to ({}, {})",
                corner1.x, corner1.y, corner2.x, corner2.y
            ),
            Self::Line { p1, p2 } => {
                write!(f, "line ({}, {}) to ({}, {})", p1.x, p1.y, p2.x, p2.y)
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shape {
    pub kind: ShapeKind,
    pub color: Color,
}

/// Everything that gets plotted, in insertion order.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    equations: Vec<Equation>,
    shapes: Vec<Shape>,
}

impl Scene {
    pub fn equations(&self) -> &[Equation] {
        &self.equations
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Appends a visible equation colored by its position in the list.
    pub fn add_equation(&mut self, evaluator: Evaluator, source: impl Into<String>) -> &Equation {
        let color = palette_color(self.equations.len());
        let idx = self.equations.len();
        self.equations.push(Equation {
            evaluator,
            color,
            source: source.into(),
            visible: true,
        });
        &self.equations[idx]
    }

    /// Appends a shape colored by its position in the list.
    pub fn add_shape(&mut self, kind: ShapeKind) -> &Shape {
        let color = palette_color(self.shapes.len());
        let idx = self.shapes.len();
        self.shapes.push(Shape { kind, color });
        &self.shapes[idx]
    }

    /// Flips visibility of one equation, returning the new state.
    pub fn toggle(&mut self, idx: usize) -> Option<bool> {
        let eq = self.equations.get_mut(idx)?;
        eq.visible = !eq.visible;
        Some(eq.visible)
    }

    pub fn clear(&mut self) {
        self.equations.clear();
        self.shapes.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.equations.is_empty() && self.shapes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equation::compile;

    #[test]
    fn parses_each_kind() {
        assert_eq!(
            ShapeKind::parse_directive("shape:circle:0:0:5").unwrap(),
            ShapeKind::Circle {
                center: Point::new(0.0, 0.0),
                radius: 5.0
            }
        );
        assert_eq!(
            ShapeKind::parse_directive("shape:rectangle:-1:-1:1:1").unwrap(),
            ShapeKind::Rectangle {
                corner1: Point::new(-1.0, -1.0),
                corner2: Point::new(1.0, 1.0)
            }
        );
        assert_eq!(
            ShapeKind::parse_directive("shape:line:-5:0:5:0").unwrap(),
            ShapeKind::Line {
                p1: Point::new(-5.0, 0.0),
                p2: Point::new(5.0, 0.0)
            }
        );
        assert_eq!(
            ShapeKind::parse_directive(" shape:Ellipse: 1 : 2 : 3 : 0.5 ").unwrap(),
            ShapeKind::Ellipse {
                center: Point::new(1.0, 2.0),
                radii: Point::new(3.0, 0.5)
            }
        );
    }

    #[test]
    fn rejects_wrong_field_count() {
        let err = ShapeKind::parse_directive("shape:circle:0:0").unwrap_err();
        assert_eq!(
            err,
            ShapeErr::FieldCount {
                kind: "circle",
                fields: String::from("cx:cy:r"),
                expected: 3,
                found: 2
            }
        );
        assert_eq!(
            err.to_string(),
            "shape 'circle' takes 3 values (cx:cy:r), but found 2"
        );
        assert!(matches!(
            ShapeKind::parse_directive("shape:line:0:0:1:1:1"),
            Err(ShapeErr::FieldCount { found: 5, .. })
        ));
    }

    #[test]
    fn rejects_bad_values() {
        assert_eq!(
            ShapeKind::parse_directive("shape:circle:0:zero:5").unwrap_err(),
            ShapeErr::NotANumber {
                kind: "circle",
                field: "cy",
                text: String::from("zero")
            }
        );
        assert_eq!(
            ShapeKind::parse_directive("shape:line:0:0:inf:1").unwrap_err(),
            ShapeErr::NotFinite {
                kind: "line",
                field: "x2"
            }
        );
        assert_eq!(
            ShapeKind::parse_directive("shape:circle:0:0:-1").unwrap_err(),
            ShapeErr::NegativeRadius {
                kind: "circle",
                field: "r"
            }
        );
    }

    #[test]
    fn rejects_unknown_kind() {
        assert_eq!(
            ShapeKind::parse_directive("shape:triangle:0:0:1").unwrap_err(),
            ShapeErr::UnknownKind(String::from("triangle"))
        );
        assert_eq!(
            ShapeKind::parse_directive("shape:").unwrap_err(),
            ShapeErr::MissingKind
        );
    }

    #[test]
    fn outlines() {
        let circle = ShapeKind::Circle {
            center: Point::new(1.0, 1.0),
            radius: 2.0,
        }
        .outline();
        assert!(circle.closed);
        assert_eq!(circle.points.len(), ROUND_SEGMENTS);
        for p in &circle.points {
            let r = ((p.x - 1.0).powi(2) + (p.y - 1.0).powi(2)).sqrt();
            assert!((r - 2.0).abs() < 1e-12);
        }

        let rect = ShapeKind::Rectangle {
            corner1: Point::new(0.0, 0.0),
            corner2: Point::new(2.0, 1.0),
        }
        .outline();
        assert_eq!(rect.points[1], Point::new(2.0, 0.0));
        assert_eq!(rect.points[3], Point::new(0.0, 1.0));

        let line = ShapeKind::Line {
            p1: Point::new(0.0, 0.0),
            p2: Point::new(1.0, 1.0),
        }
        .outline();
        assert!(!line.closed);
        assert_eq!(line.points.len(), 2);
    }

    #[test]
    fn colors_cycle_by_list_length() {
        let mut scene = Scene::default();
        for i in 0..8 {
            let eq = scene.add_equation(compile("x").unwrap(), "x");
            assert_eq!(eq.color, PALETTE[i % PALETTE.len()]);
        }
        let shape = scene.add_shape(ShapeKind::Line {
            p1: Point::new(0.0, 0.0),
            p2: Point::new(1.0, 0.0),
        });
        assert_eq!(shape.color, PALETTE[0]);
    }

    #[test]
    fn toggle_and_clear() {
        let mut scene = Scene::default();
        scene.add_equation(compile("x").unwrap(), "x");
        scene.add_equation(compile("x^2").unwrap(), "x^2");
        assert_eq!(scene.toggle(1), Some(false));
        assert!(scene.equations()[0].visible);
        assert!(!scene.equations()[1].visible);
        assert_eq!(scene.toggle(2), None);

        scene.clear();
        assert!(scene.is_empty());
    }

    #[test]
    fn rgb8() {
        assert_eq!(PALETTE[5].to_rgb8(), [255, 128, 0]);
    }
}
