// src/types/point.rs

use geo::line_measures::Distance;
use geo::{Coord, Euclidean};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 2D-Punkt in Layer-Koordinaten.
///
/// Werttyp, frei kopierbar. Serialisiert als `[x, y]`, wie Koordinaten in GeoJSON.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: Point) -> f64 {
        Euclidean.distance(geo::Point::from(*self), geo::Point::from(other))
    }

    /// Punktgleichheit mit expliziter Toleranz.
    ///
    /// `tolerance == 0.0` bedeutet exakte Wertgleichheit (bitgenaue Koordinaten),
    /// sonst gilt der euklidische Abstand `<= tolerance`.
    pub fn coincides(&self, other: Point, tolerance: f64) -> bool {
        if tolerance == 0.0 {
            *self == other
        } else {
            self.distance_to(other) <= tolerance
        }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

// Conversion traits
impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

impl From<Point> for [f64; 2] {
    fn from(p: Point) -> Self {
        [p.x, p.y]
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl From<Coord<f64>> for Point {
    fn from(c: Coord<f64>) -> Self {
        Self { x: c.x, y: c.y }
    }
}

impl From<Point> for Coord<f64> {
    fn from(p: Point) -> Self {
        Coord { x: p.x, y: p.y }
    }
}

impl From<Point> for geo::Point<f64> {
    fn from(p: Point) -> Self {
        geo::Point::new(p.x, p.y)
    }
}
