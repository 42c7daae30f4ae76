// src/io/svg.rs

use crate::error::{AssemblyError, PolygoniseResult};
use crate::io::sink::ResultSink;
use crate::topology::{Assembly, ErrorLedger};
use crate::types::{Bounds2D, FeatureArena, Point};
use log::info;
use std::path::PathBuf;
use svg::Document;
use svg::node::element::{Circle, Group, Polygon, Polyline, Rectangle, Text, Title};

mod colors {
    pub const BACKGROUND: &str = "#f0f0f0";
    pub const INPUT_LINE: &str = "#888888";
    pub const POLYGON_FILL: &str = "rgba(200, 150, 255, 0.5)";
    pub const POLYGON_STROKE: &str = "#5500aa";
    pub const USED_POINT: &str = "#000000";
    pub const ERROR_POINT: &str = "#cc0000";
}

/// Zeichnet Eingabelinien, Ergebnisring mit Punktreihenfolge oder Fehlerpunkte als SVG.
pub struct SvgSink {
    path: PathBuf,
    lines: Vec<Vec<Point>>,
    svg_pixel_size: f64,
}

impl SvgSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lines: Vec::new(),
            svg_pixel_size: 800.0,
        }
    }

    /// Eingabelinien als Hintergrund mitzeichnen.
    pub fn with_lines(mut self, arena: &FeatureArena) -> Self {
        self.lines = arena.iter().map(|f| f.vertices().to_vec()).collect();
        self
    }

    pub fn with_pixel_size(mut self, size: f64) -> Self {
        self.svg_pixel_size = size;
        self
    }

    fn save(&self, document: Document) -> PolygoniseResult<()> {
        svg::save(&self.path, &document)?;
        info!("SVG '{}' written", self.path.display());
        Ok(())
    }
}

/// Layer-Koordinaten (y nach oben) auf SVG-Koordinaten (y nach unten).
fn screen(p: Point) -> (f64, f64) {
    (p.x, -p.y)
}

fn points_attr(points: &[Point]) -> String {
    points
        .iter()
        .map(|&p| {
            let (x, y) = screen(p);
            format!("{x:.3},{y:.3}")
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Leinwand mit ViewBox, Hintergrund und Eingabelinien.
struct Canvas {
    document: Document,
    stroke_width: f64,
    point_radius: f64,
    font_size: f64,
}

impl Canvas {
    fn new(sink: &SvgSink, extra: &[Point]) -> Self {
        let all = sink.lines.iter().flatten().chain(extra).copied();
        let bounds = Bounds2D::from_points_iter(all)
            .unwrap_or(Bounds2D {
                min: Point::new(0.0, 0.0),
                max: Point::new(1.0, 1.0),
            });
        let extent = bounds.width().max(bounds.height()).max(f64::EPSILON);
        let bounds = bounds.expanded(extent * 0.05);

        let stroke_width = extent * 0.004;
        let point_radius = extent * 0.008;
        let font_size = point_radius * 2.5;

        let view_box = (
            bounds.min.x,
            -bounds.max.y,
            bounds.width(),
            bounds.height(),
        );

        let mut document = Document::new()
            .set("width", sink.svg_pixel_size)
            .set("height", sink.svg_pixel_size)
            .set("viewBox", view_box)
            .add(
                Rectangle::new()
                    .set("x", view_box.0)
                    .set("y", view_box.1)
                    .set("width", view_box.2)
                    .set("height", view_box.3)
                    .set("fill", colors::BACKGROUND),
            );

        let mut lines = Group::new().set("id", "input-lines");
        for line in &sink.lines {
            lines = lines.add(
                Polyline::new()
                    .set("points", points_attr(line))
                    .set("fill", "none")
                    .set("stroke", colors::INPUT_LINE)
                    .set("stroke-width", stroke_width),
            );
        }
        document = document.add(lines);

        Self {
            document,
            stroke_width,
            point_radius,
            font_size,
        }
    }

    fn labelled_point(&self, p: Point, label: &str, color: &str) -> Group {
        let (x, y) = screen(p);
        Group::new()
            .add(
                Circle::new()
                    .set("cx", x)
                    .set("cy", y)
                    .set("r", self.point_radius)
                    .set("fill", color),
            )
            .add(
                Text::new(label)
                    .set("x", x + self.point_radius * 1.5)
                    .set("y", y - self.point_radius * 1.5)
                    .set("font-family", "monospace")
                    .set("font-size", self.font_size)
                    .set("fill", color)
                    .set("stroke", "white")
                    .set("stroke-width", self.stroke_width * 0.5)
                    .set("paint-order", "stroke fill"),
            )
    }
}

impl ResultSink for SvgSink {
    fn accept_polygon(&mut self, assembly: &Assembly, _crs: &str) -> PolygoniseResult<()> {
        let ring = assembly.polygon.ring();
        let canvas = Canvas::new(self, ring);

        let mut points = Group::new().set("id", "used-points");
        for (order, &p) in assembly.used_points.iter().enumerate() {
            points = points.add(canvas.labelled_point(p, &order.to_string(), colors::USED_POINT));
        }

        let stroke_width = canvas.stroke_width;
        let document = canvas
            .document
            .add(
                Polygon::new()
                    .set("points", points_attr(ring))
                    .set("fill", colors::POLYGON_FILL)
                    .set("stroke", colors::POLYGON_STROKE)
                    .set("stroke-width", stroke_width),
            )
            .add(points);

        self.save(document)
    }

    fn accept_errors(&mut self, ledger: &ErrorLedger, _crs: &str) -> PolygoniseResult<()> {
        let locations: Vec<Point> = ledger.iter().map(|r| r.location).collect();
        let canvas = Canvas::new(self, &locations);

        let mut errors = Group::new().set("id", "geometry-errors");
        for record in ledger {
            errors = errors.add(canvas.labelled_point(
                record.location,
                &record.kind.tag(),
                colors::ERROR_POINT,
            ));
        }

        let document = canvas.document.add(errors);
        self.save(document)
    }

    fn accept_degenerate(
        &mut self,
        error: &AssemblyError,
        chain: &[Point],
        _crs: &str,
    ) -> PolygoniseResult<()> {
        let canvas = Canvas::new(self, chain);

        let mut points = Group::new().set("id", "used-points");
        for (order, &p) in chain.iter().enumerate() {
            points = points.add(canvas.labelled_point(p, &order.to_string(), colors::ERROR_POINT));
        }

        let stroke_width = canvas.stroke_width;
        let document = canvas
            .document
            .add(
                Polyline::new()
                    .set("points", points_attr(chain))
                    .set("fill", "none")
                    .set("stroke", colors::ERROR_POINT)
                    .set("stroke-width", stroke_width),
            )
            .add(points)
            .add(Title::new(error.to_string()));

        self.save(document)
    }
}
