// src/geometry/intersection.rs

use crate::types::{LineFeature, Point};
use geo::algorithm::line_intersection::{LineIntersection, line_intersection};
use geo::Line;

/// Berührung zweier Segmente, in eigenen Punkttypen ausgedrückt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SegmentContact {
    /// Genau ein gemeinsamer Punkt (echter Schnitt oder Berührung).
    Point(Point),
    /// Kollineare Überlappung.
    Overlap { start: Point, end: Point },
}

/// Schnitt zweier Segmente über `geo::line_intersection`.
pub fn segment_contact(a: Line<f64>, b: Line<f64>) -> Option<SegmentContact> {
    match line_intersection(a, b)? {
        LineIntersection::SinglePoint { intersection, .. } => {
            Some(SegmentContact::Point(intersection.into()))
        }
        LineIntersection::Collinear { intersection } => Some(SegmentContact::Overlap {
            start: intersection.start.into(),
            end: intersection.end.into(),
        }),
    }
}

/// Berührt `point` die Linie im Sinne von OGC `touches`?
///
/// Der Rand einer offenen Linie sind ihre beiden Endpunkte, eine geschlossene Linie
/// hat keinen Rand. Innere Vertices und Segmentinneres zählen nicht.
pub fn touches(feature: &LineFeature, point: Point, tolerance: f64) -> bool {
    feature
        .boundary()
        .iter()
        .any(|endpoint| endpoint.coincides(point, tolerance))
}
