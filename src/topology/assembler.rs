// src/topology/assembler.rs

use crate::error::AssemblyError;
use crate::topology::chain::Chain;
use crate::topology::ledger::ErrorLedger;
use crate::types::Point;
use chrono::{Local, NaiveDate};
use geo::{Area, LineString};

/// Mindestanzahl unterschiedlicher Punkte für einen Ring.
pub const MIN_RING_POINTS: usize = 3;

/// Fertiges Polygon. Wird nur bei leerem Fehlerbuch erzeugt, nie teilweise.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    ring: Vec<Point>,
    source_line_count: usize,
    created_at: NaiveDate,
}

impl Polygon {
    /// Geschlossener Ring: erster Punkt == letzter Punkt.
    pub fn ring(&self) -> &[Point] {
        &self.ring
    }

    pub fn source_line_count(&self) -> usize {
        self.source_line_count
    }

    pub fn created_at(&self) -> NaiveDate {
        self.created_at
    }

    pub fn to_geo(&self) -> geo::Polygon<f64> {
        let exterior: LineString<f64> = self.ring.iter().copied().collect();
        geo::Polygon::new(exterior, Vec::new())
    }

    pub fn area(&self) -> f64 {
        self.to_geo().unsigned_area()
    }
}

/// Schließt eine fehlerfreie Kette zum Ring.
#[derive(Debug, Clone, Default)]
pub struct PolygonAssembler {
    created_at: Option<NaiveDate>,
}

impl PolygonAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fixes Erstellungsdatum statt des heutigen (reproduzierbare Ausgaben).
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.created_at = Some(date);
        self
    }

    pub fn assemble(
        &self,
        chain: &Chain,
        source_line_count: usize,
        ledger: &ErrorLedger,
    ) -> Result<Polygon, AssemblyError> {
        if !ledger.is_empty() {
            return Err(AssemblyError::DefectsPresent {
                count: ledger.count(),
            });
        }

        // Vor dem Schließen prüfen
        let distinct = chain.distinct_count();
        if distinct < MIN_RING_POINTS {
            return Err(AssemblyError::TooFewDistinctPoints {
                expected: MIN_RING_POINTS,
                actual: distinct,
            });
        }

        let mut ring = chain.points().to_vec();
        let first = ring[0];
        let last_idx = ring.len() - 1;
        if ring[last_idx].coincides(first, chain.tolerance()) {
            // innerhalb der Toleranz geschlossen: exakt schließen
            ring[last_idx] = first;
        } else {
            ring.push(first);
        }

        Ok(Polygon {
            ring,
            source_line_count,
            created_at: self
                .created_at
                .unwrap_or_else(|| Local::now().date_naive()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::ledger::ErrorKind;
    use approx::assert_relative_eq;

    fn chain(coords: &[(f64, f64)]) -> Chain {
        let mut chain = Chain::new(0.0);
        chain.seed(&coords.iter().copied().map(Point::from).collect::<Vec<_>>());
        chain
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 17).unwrap()
    }

    #[test]
    fn test_closes_open_chain() {
        let polygon = PolygonAssembler::new()
            .with_date(date())
            .assemble(
                &chain(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]),
                4,
                &ErrorLedger::new(),
            )
            .unwrap();

        assert_eq!(polygon.ring().len(), 5);
        assert_eq!(polygon.ring().first(), polygon.ring().last());
        assert_eq!(polygon.source_line_count(), 4);
        assert_eq!(polygon.created_at(), date());
        assert_relative_eq!(polygon.area(), 1.0);
    }

    #[test]
    fn test_keeps_already_closed_chain() {
        let polygon = PolygonAssembler::new()
            .assemble(
                &chain(&[(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 0.0)]),
                1,
                &ErrorLedger::new(),
            )
            .unwrap();
        assert_eq!(polygon.ring().len(), 4);
        assert_relative_eq!(polygon.area(), 2.0);
    }

    #[test]
    fn test_degenerate_chain() {
        let err = PolygonAssembler::new()
            .assemble(&chain(&[(0.0, 0.0), (1.0, 0.0), (0.0, 0.0)]), 1, &ErrorLedger::new())
            .unwrap_err();
        assert_eq!(
            err,
            AssemblyError::TooFewDistinctPoints {
                expected: 3,
                actual: 2
            }
        );
    }

    #[test]
    fn test_refuses_with_defects() {
        let mut ledger = ErrorLedger::new();
        ledger.record(Point::new(0.0, 0.0), ErrorKind::DanglingEndpoint);
        let err = PolygonAssembler::new()
            .assemble(&chain(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]), 3, &ledger)
            .unwrap_err();
        assert_eq!(err, AssemblyError::DefectsPresent { count: 1 });
    }
}
