// src/geometry/crossing.rs

use crate::geometry::intersection::{SegmentContact, segment_contact};
use crate::types::{FeatureArena, FeatureId, LineFeature, Point};

/// Echter Schnitt zweier verschiedener Linien.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Crossing {
    pub first: FeatureId,
    pub second: FeatureId,
    pub location: Point,
}

/// Paarweise Kreuzungsprüfung über alle Linien.
///
/// Quadratisch in der Anzahl der Linien, ohne räumlichen Index. Die Eingaben bleiben
/// klein (wenige hundert Linien).
#[derive(Debug, Clone)]
pub struct CrossingDetector {
    tolerance: f64,
}

impl CrossingDetector {
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }

    /// Alle Kreuzungen, Paare in aufsteigender ID-Reihenfolge `(a, b)` mit `a < b`.
    pub fn detect(&self, arena: &FeatureArena) -> Vec<Crossing> {
        let features: Vec<&LineFeature> = arena.iter().collect();
        let mut crossings = Vec::new();

        for (i, first) in features.iter().enumerate() {
            for second in &features[i + 1..] {
                for location in self.crossings_between(first, second) {
                    crossings.push(Crossing {
                        first: first.id(),
                        second: second.id(),
                        location,
                    });
                }
            }
        }

        crossings
    }

    /// Schnittpunkte, an denen sich die Inneren beider Linien treffen.
    ///
    /// Ein gemeinsamer Endpunkt ist legitime Topologie, kein Fehler. Kollineare
    /// Überlappungen zählen nicht als Kreuzung.
    pub fn crossings_between(&self, a: &LineFeature, b: &LineFeature) -> Vec<Point> {
        let boundary_a = a.boundary();
        let boundary_b = b.boundary();
        let on_boundary = |boundary: &[Point], p: Point| {
            boundary.iter().any(|e| e.coincides(p, self.tolerance))
        };

        // Segmente der Länge 0 meldet der Validator
        let segments_b: Vec<_> = b.segments().filter(|s| s.start != s.end).collect();

        let mut points: Vec<Point> = Vec::new();
        for seg_a in a.segments().filter(|s| s.start != s.end) {
            for &seg_b in &segments_b {
                let Some(SegmentContact::Point(p)) = segment_contact(seg_a, seg_b) else {
                    continue;
                };
                if on_boundary(&boundary_a, p) || on_boundary(&boundary_b, p) {
                    continue;
                }
                // Kreuzung an einem Vertex taucht in mehreren Segmentpaaren auf
                if !points.iter().any(|q| q.coincides(p, self.tolerance)) {
                    points.push(p);
                }
            }
        }
        points
    }
}
