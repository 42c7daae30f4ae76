// src/types/feature.rs

use crate::error::InputError;
use crate::types::Point;
use geo::{Line, LineString};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stabile, extern vergebene Feature-ID. Bestimmt die Verarbeitungsreihenfolge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureId(pub i64);

impl fmt::Display for FeatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for FeatureId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// Eine offene (oder in sich geschlossene) Polylinie aus dem Eingabe-Layer.
///
/// Unveränderlich nach der Konstruktion; mindestens zwei endliche Vertices.
#[derive(Debug, Clone, PartialEq)]
pub struct LineFeature {
    id: FeatureId,
    vertices: Vec<Point>,
}

impl LineFeature {
    pub fn new(id: impl Into<FeatureId>, vertices: Vec<Point>) -> Result<Self, InputError> {
        let id = id.into();
        if vertices.len() < 2 {
            return Err(InputError::TooFewVertices {
                id,
                count: vertices.len(),
            });
        }
        if vertices.iter().any(|v| !v.is_finite()) {
            return Err(InputError::NonFiniteCoordinate { id });
        }
        Ok(Self { id, vertices })
    }

    pub fn id(&self) -> FeatureId {
        self.id
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    pub fn first(&self) -> Point {
        self.vertices[0]
    }

    pub fn last(&self) -> Point {
        self.vertices[self.vertices.len() - 1]
    }

    /// Erster Vertex == letzter Vertex (exakt).
    pub fn is_closed(&self) -> bool {
        self.first() == self.last()
    }

    /// Liegt `point` (innerhalb der Toleranz) auf einem der beiden Endpunkte?
    pub fn has_endpoint(&self, point: Point, tolerance: f64) -> bool {
        self.first().coincides(point, tolerance) || self.last().coincides(point, tolerance)
    }

    /// Rand im Sinne von OGC: die beiden Endpunkte einer offenen Linie, leer bei geschlossenen.
    pub fn boundary(&self) -> Vec<Point> {
        if self.is_closed() {
            Vec::new()
        } else {
            vec![self.first(), self.last()]
        }
    }

    /// Alle Segmente als `geo::Line`, in Zeichenrichtung.
    pub fn segments(&self) -> impl Iterator<Item = Line<f64>> + '_ {
        self.vertices
            .windows(2)
            .map(|pair| Line::new(pair[0], pair[1]))
    }

    pub fn to_line_string(&self) -> LineString<f64> {
        self.vertices.iter().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(coords: &[(f64, f64)]) -> Vec<Point> {
        coords.iter().copied().map(Point::from).collect()
    }

    #[test]
    fn test_rejects_single_vertex() {
        let err = LineFeature::new(7, pts(&[(0.0, 0.0)])).unwrap_err();
        assert_eq!(
            err,
            InputError::TooFewVertices {
                id: FeatureId(7),
                count: 1
            }
        );
    }

    #[test]
    fn test_rejects_non_finite() {
        let err = LineFeature::new(1, pts(&[(0.0, 0.0), (f64::NAN, 1.0)])).unwrap_err();
        assert_eq!(err, InputError::NonFiniteCoordinate { id: FeatureId(1) });
    }

    #[test]
    fn test_endpoints_and_boundary() {
        let open = LineFeature::new(1, pts(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)])).unwrap();
        assert!(!open.is_closed());
        assert_eq!(open.first(), Point::new(0.0, 0.0));
        assert_eq!(open.last(), Point::new(1.0, 1.0));
        assert_eq!(open.boundary().len(), 2);
        assert!(open.has_endpoint(Point::new(1.0, 1.0), 0.0));
        assert!(!open.has_endpoint(Point::new(1.0, 0.0), 0.0));
        assert_eq!(open.segments().count(), 2);

        let closed =
            LineFeature::new(2, pts(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 0.0)])).unwrap();
        assert!(closed.is_closed());
        assert!(closed.boundary().is_empty());
        assert_eq!(closed.to_line_string().0.len(), 4);
    }
}
