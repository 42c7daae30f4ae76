// src/geometry/validation.rs

use crate::geometry::intersection::{SegmentContact, segment_contact};
use crate::types::{LineFeature, Point};
use geo::Line;
use std::fmt;

/// Grund, warum eine einzelne Linie in sich ungültig ist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidityReason {
    /// Zwei aufeinanderfolgende Vertices fallen zusammen (Segment der Länge 0).
    DuplicateNode,
    /// Zwei nicht benachbarte Segmente schneiden oder berühren sich.
    SelfIntersection,
    /// Benachbarte Segmente laufen kollinear zurück (Spike).
    SelfOverlap,
    /// Geschlossene Linie mit weniger als 3 unterschiedlichen Punkten.
    RingTooFewPoints,
}

impl fmt::Display for InvalidityReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            InvalidityReason::DuplicateNode => "duplicate node",
            InvalidityReason::SelfIntersection => "self intersection",
            InvalidityReason::SelfOverlap => "self overlap",
            InvalidityReason::RingTooFewPoints => "ring has too few points",
        };
        f.write_str(text)
    }
}

/// Ein Befund des Validators: Ort und Grund.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidityIssue {
    pub location: Point,
    pub reason: InvalidityReason,
}

/// Prüft eine einzelne Linie auf Selbst-Gültigkeit, unabhängig von allen anderen Linien.
#[derive(Debug, Clone)]
pub struct GeometryValidator {
    tolerance: f64,
}

impl GeometryValidator {
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }

    /// Liefert alle Befunde in der Reihenfolge: doppelte Knoten, Ringschluss, Selbstschnitte.
    pub fn validate(&self, feature: &LineFeature) -> Vec<ValidityIssue> {
        let mut issues = Vec::new();

        self.validate_consecutive_duplicates(feature, &mut issues);
        self.validate_ring_closure(feature, &mut issues);
        self.validate_self_intersections(feature, &mut issues);

        issues
    }

    fn validate_consecutive_duplicates(&self, feature: &LineFeature, issues: &mut Vec<ValidityIssue>) {
        for pair in feature.vertices().windows(2) {
            if pair[0].coincides(pair[1], self.tolerance) {
                issues.push(ValidityIssue {
                    location: pair[0],
                    reason: InvalidityReason::DuplicateNode,
                });
            }
        }
    }

    fn validate_ring_closure(&self, feature: &LineFeature, issues: &mut Vec<ValidityIssue>) {
        if !feature.is_closed() {
            return;
        }
        let mut distinct: Vec<Point> = Vec::new();
        for &vertex in feature.vertices() {
            if !distinct.iter().any(|d| d.coincides(vertex, self.tolerance)) {
                distinct.push(vertex);
            }
        }
        if distinct.len() < 3 {
            issues.push(ValidityIssue {
                location: feature.first(),
                reason: InvalidityReason::RingTooFewPoints,
            });
        }
    }

    fn validate_self_intersections(&self, feature: &LineFeature, issues: &mut Vec<ValidityIssue>) {
        // Segmente der Länge 0 sind schon als DuplicateNode gemeldet
        let segments: Vec<Line<f64>> = feature
            .segments()
            .filter(|seg| !Point::from(seg.start).coincides(seg.end.into(), self.tolerance))
            .collect();
        let n = segments.len();
        if n < 2 {
            return;
        }
        let closed = feature.is_closed();

        let mut found: Vec<ValidityIssue> = Vec::new();
        for i in 0..n {
            for j in (i + 1)..n {
                // Benachbart: teilen sich einen Vertex, auch über den Ringschluss hinweg
                let adjacent = j == i + 1 || (closed && i == 0 && j == n - 1);

                let issue = match segment_contact(segments[i], segments[j]) {
                    None => continue,
                    Some(SegmentContact::Overlap { start, .. }) => ValidityIssue {
                        location: start,
                        reason: if adjacent {
                            InvalidityReason::SelfOverlap
                        } else {
                            InvalidityReason::SelfIntersection
                        },
                    },
                    Some(SegmentContact::Point(_)) if adjacent => continue,
                    Some(SegmentContact::Point(location)) => ValidityIssue {
                        location,
                        reason: InvalidityReason::SelfIntersection,
                    },
                };

                if !found
                    .iter()
                    .any(|f| f.reason == issue.reason && f.location.coincides(issue.location, self.tolerance))
                {
                    found.push(issue);
                }
            }
        }
        issues.extend(found);
    }
}
