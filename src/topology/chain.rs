// src/topology/chain.rs

use crate::geometry::touches;
use crate::topology::ledger::{ErrorKind, ErrorLedger};
use crate::types::{FeatureArena, FeatureId, LineFeature, Point};
use log::debug;
use std::collections::{BTreeMap, BTreeSet};

/// Geordnete Punktfolge, die beim Zusammensetzen der Linien wächst.
///
/// Einmal angehängte Punkte werden nie entfernt.
#[derive(Debug, Clone, PartialEq)]
pub struct Chain {
    points: Vec<Point>,
    tolerance: f64,
}

impl Chain {
    pub fn new(tolerance: f64) -> Self {
        Self {
            points: Vec::new(),
            tolerance,
        }
    }

    /// Startet die Kette mit allen Vertices, unverändert und ohne Deduplizierung.
    pub fn seed(&mut self, vertices: &[Point]) {
        self.points.extend_from_slice(vertices);
    }

    /// Hängt jeden Punkt an, der noch nirgends in der Kette vorkommt. Liefert die Anzahl neuer Punkte.
    pub fn extend_unique(&mut self, vertices: impl IntoIterator<Item = Point>) -> usize {
        let mut appended = 0;
        for vertex in vertices {
            if !self.contains(vertex) {
                self.points.push(vertex);
                appended += 1;
            }
        }
        appended
    }

    pub fn contains(&self, point: Point) -> bool {
        self.points.iter().any(|p| p.coincides(point, self.tolerance))
    }

    /// Zuletzt angehängter Punkt.
    pub fn tail(&self) -> Option<Point> {
        self.points.last().copied()
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Anzahl paarweise unterschiedlicher Punkte (unter der Toleranz der Kette).
    pub fn distinct_count(&self) -> usize {
        let mut distinct: Vec<Point> = Vec::with_capacity(self.points.len());
        for &p in &self.points {
            if !distinct.iter().any(|d| d.coincides(p, self.tolerance)) {
                distinct.push(p);
            }
        }
        distinct.len()
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }
}

/// Ergebnis der Endpunktprüfung für ein Ende einer Linie.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointCheck {
    Unmatched,
    Matched,
}

/// Endzustand einer Linie nach dem Kettenbau.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StitchState {
    /// Beide Enden haben ein Gegenstück, die Linie steckt in der Kette.
    Matched,
    /// Mindestens ein Ende hängt frei.
    Dangling,
    /// Beide Enden haben ein Gegenstück, die Kette hat die Linie aber nie erreicht
    /// (z. B. eine zweite, getrennte Gruppe).
    Unreached,
}

impl StitchState {
    fn settle(first: EndpointCheck, last: EndpointCheck, stitched: bool) -> Self {
        match (first, last) {
            (EndpointCheck::Matched, EndpointCheck::Matched) if stitched => StitchState::Matched,
            (EndpointCheck::Matched, EndpointCheck::Matched) => StitchState::Unreached,
            _ => StitchState::Dangling,
        }
    }
}

/// Wie eine Kandidatenlinie an das Kettenende angesetzt wurde.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Splice {
    NoContact,
    Forward,
    Reversed,
    Ambiguous,
}

#[derive(Debug, Clone)]
pub struct ChainReport {
    pub chain: Chain,
    pub states: BTreeMap<FeatureId, StitchState>,
    /// IDs aller Linien, die in die Kette eingegangen sind.
    pub stitched: BTreeSet<FeatureId>,
    pub feature_count: usize,
}

impl ChainReport {
    /// Linien, die die Kette nie erreicht hat (z. B. eine zweite, getrennte Gruppe).
    pub fn unreached(&self) -> Vec<FeatureId> {
        self.states
            .keys()
            .filter(|id| !self.stitched.contains(id))
            .copied()
            .collect()
    }
}

/// Setzt alle Linien in einem einzigen Durchlauf nach aufsteigender ID zu einer Kette zusammen.
///
/// Angesetzt wird immer am aktuellen Ende der wachsenden Kette, nicht an der gerade
/// besuchten Linie. So lassen sich Linien mit gemischter Zeichenrichtung verbinden,
/// ohne separate Graphsuche. Es wird nur die vom ersten Feature erreichbare Gruppe
/// zusammengesetzt.
#[derive(Debug, Clone)]
pub struct ChainBuilder {
    tolerance: f64,
}

impl ChainBuilder {
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }

    pub fn build(&self, arena: &FeatureArena, ledger: &mut ErrorLedger) -> ChainReport {
        let mut chain = Chain::new(self.tolerance);
        let mut checks: BTreeMap<FeatureId, (EndpointCheck, EndpointCheck)> = BTreeMap::new();
        let mut stitched = BTreeSet::new();
        let single_feature = arena.len() == 1;

        for feature in arena.iter() {
            let fid = feature.id();

            if chain.is_empty() {
                chain.seed(feature.vertices());
                stitched.insert(fid);
                debug!("Kette mit Feature {} gestartet ({} Punkte)", fid, chain.len());
            }

            let mut first_check = EndpointCheck::Unmatched;
            let mut last_check = EndpointCheck::Unmatched;

            for other in arena.iter().filter(|g| g.id() != fid) {
                if other.has_endpoint(feature.first(), self.tolerance) {
                    first_check = EndpointCheck::Matched;
                }
                if other.has_endpoint(feature.last(), self.tolerance) {
                    last_check = EndpointCheck::Matched;
                }

                match self.splice(&mut chain, other, ledger) {
                    Splice::Forward | Splice::Reversed => {
                        stitched.insert(other.id());
                    }
                    Splice::NoContact | Splice::Ambiguous => {}
                }
            }

            // Eine einzelne, in sich geschlossene Linie ist bereits der fertige Ring
            if single_feature && feature.first().coincides(feature.last(), self.tolerance) {
                first_check = EndpointCheck::Matched;
                last_check = EndpointCheck::Matched;
            }

            if first_check == EndpointCheck::Unmatched {
                ledger.record(feature.first(), ErrorKind::DanglingEndpoint);
            }
            if last_check == EndpointCheck::Unmatched {
                ledger.record(feature.last(), ErrorKind::DanglingEndpoint);
            }

            checks.insert(fid, (first_check, last_check));
        }

        // Erst nach dem Durchlauf steht fest, welche Linien die Kette erreicht hat
        let states = checks
            .into_iter()
            .map(|(id, (first, last))| (id, StitchState::settle(first, last, stitched.contains(&id))))
            .collect();

        ChainReport {
            chain,
            states,
            stitched,
            feature_count: arena.len(),
        }
    }

    /// Versucht `candidate` an das aktuelle Kettenende anzusetzen.
    fn splice(&self, chain: &mut Chain, candidate: &LineFeature, ledger: &mut ErrorLedger) -> Splice {
        let Some(tail) = chain.tail() else {
            return Splice::NoContact;
        };
        // Nur der Rand zählt: innere Vertices einer Linie sind kein Anschluss
        if !touches(candidate, tail, self.tolerance) {
            return Splice::NoContact;
        }

        if candidate.first().coincides(tail, self.tolerance) {
            let added = chain.extend_unique(candidate.vertices().iter().copied());
            debug!("Feature {} vorwärts angesetzt (+{} Punkte)", candidate.id(), added);
            Splice::Forward
        } else if candidate.last().coincides(tail, self.tolerance) {
            let added = chain.extend_unique(candidate.vertices().iter().rev().copied());
            debug!("Feature {} rückwärts angesetzt (+{} Punkte)", candidate.id(), added);
            Splice::Reversed
        } else {
            // Berührung am Rand ohne erkannten Endpunkt
            ledger.record(candidate.first(), ErrorKind::AmbiguousOrder);
            Splice::Ambiguous
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(id: i64, coords: &[(f64, f64)]) -> LineFeature {
        LineFeature::new(id, coords.iter().copied().map(Point::from).collect()).unwrap()
    }

    fn pts(coords: &[(f64, f64)]) -> Vec<Point> {
        coords.iter().copied().map(Point::from).collect()
    }

    fn unit_square() -> Vec<LineFeature> {
        vec![
            line(1, &[(0.0, 0.0), (1.0, 0.0)]),
            line(2, &[(1.0, 0.0), (1.0, 1.0)]),
            line(3, &[(1.0, 1.0), (0.0, 1.0)]),
            line(4, &[(0.0, 1.0), (0.0, 0.0)]),
        ]
    }

    #[test]
    fn test_chain_dedup_and_tail() {
        let mut chain = Chain::new(0.0);
        assert!(chain.tail().is_none());
        chain.seed(&pts(&[(0.0, 0.0), (1.0, 0.0)]));
        let added = chain.extend_unique(pts(&[(1.0, 0.0), (1.0, 1.0), (0.0, 0.0)]));
        assert_eq!(added, 1);
        assert_eq!(chain.tail(), Some(Point::new(1.0, 1.0)));
        assert_eq!(chain.distinct_count(), 3);
    }

    #[test]
    fn test_square_in_order() {
        let arena = FeatureArena::new(unit_square()).unwrap();
        let mut ledger = ErrorLedger::new();
        let report = ChainBuilder::new(0.0).build(&arena, &mut ledger);

        assert!(ledger.is_empty(), "{:?}", ledger);
        assert_eq!(
            report.chain.points(),
            pts(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]).as_slice()
        );
        assert_eq!(report.stitched.len(), 4);
        assert!(report.states.values().all(|s| *s == StitchState::Matched));
    }

    #[test]
    fn test_mixed_directions() {
        let arena = FeatureArena::new(vec![
            line(1, &[(0.0, 0.0), (1.0, 0.0)]),
            line(2, &[(1.0, 1.0), (1.0, 0.0)]),
            line(3, &[(1.0, 1.0), (0.0, 1.0)]),
            line(4, &[(0.0, 0.0), (0.0, 1.0)]),
        ])
        .unwrap();
        let mut ledger = ErrorLedger::new();
        let report = ChainBuilder::new(0.0).build(&arena, &mut ledger);

        assert!(ledger.is_empty());
        assert_eq!(
            report.chain.points(),
            pts(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]).as_slice()
        );
    }

    #[test]
    fn test_shuffled_ids_need_several_sweeps() {
        // Die Seiten liegen nicht in ID-Reihenfolge hintereinander
        let arena = FeatureArena::new(vec![
            line(1, &[(0.0, 0.0), (1.0, 0.0)]),
            line(2, &[(1.0, 1.0), (0.0, 1.0)]),
            line(3, &[(0.0, 1.0), (0.0, 0.0)]),
            line(4, &[(1.0, 0.0), (1.0, 1.0)]),
        ])
        .unwrap();
        let mut ledger = ErrorLedger::new();
        let report = ChainBuilder::new(0.0).build(&arena, &mut ledger);

        assert!(ledger.is_empty());
        assert_eq!(report.chain.distinct_count(), 4);
        assert_eq!(report.chain.len(), 4);
        assert_eq!(report.stitched.len(), 4);
    }

    #[test]
    fn test_open_chain_dangles_at_both_ends() {
        let mut features = unit_square();
        features.pop();
        let arena = FeatureArena::new(features).unwrap();
        let mut ledger = ErrorLedger::new();
        let report = ChainBuilder::new(0.0).build(&arena, &mut ledger);

        let locations: Vec<Point> = ledger.iter().map(|r| r.location).collect();
        assert_eq!(locations, pts(&[(0.0, 0.0), (0.0, 1.0)]));
        assert!(ledger.iter().all(|r| r.kind == ErrorKind::DanglingEndpoint));
        assert_eq!(report.states[&FeatureId(1)], StitchState::Dangling);
        assert_eq!(report.states[&FeatureId(2)], StitchState::Matched);
        assert_eq!(report.states[&FeatureId(3)], StitchState::Dangling);
    }

    #[test]
    fn test_single_closed_line() {
        let ring = [(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 0.0)];
        let arena = FeatureArena::new(vec![line(7, &ring)]).unwrap();
        let mut ledger = ErrorLedger::new();
        let report = ChainBuilder::new(0.0).build(&arena, &mut ledger);

        assert!(ledger.is_empty());
        assert_eq!(report.chain.points(), pts(&ring).as_slice());
        assert_eq!(report.states[&FeatureId(7)], StitchState::Matched);
    }

    #[test]
    fn test_single_open_line_dangles() {
        let arena = FeatureArena::new(vec![line(1, &[(0.0, 0.0), (1.0, 0.0)])]).unwrap();
        let mut ledger = ErrorLedger::new();
        ChainBuilder::new(0.0).build(&arena, &mut ledger);
        assert_eq!(ledger.count(), 2);
    }

    #[test]
    fn test_t_junction_is_not_a_join() {
        // Das Kettenende (1, 0) liegt im Inneren von Linie 2, nicht auf ihrem Rand
        let arena = FeatureArena::new(vec![
            line(1, &[(0.0, 0.0), (1.0, 0.0)]),
            line(2, &[(1.0, -1.0), (1.0, 1.0)]),
        ])
        .unwrap();
        let mut ledger = ErrorLedger::new();
        let report = ChainBuilder::new(0.0).build(&arena, &mut ledger);

        assert_eq!(ledger.count_where(|k| *k == ErrorKind::AmbiguousOrder), 0);
        assert_eq!(
            ledger.iter().map(|r| r.location).collect::<Vec<_>>(),
            pts(&[(0.0, 0.0), (1.0, 0.0), (1.0, -1.0), (1.0, 1.0)])
        );
        assert_eq!(report.stitched, BTreeSet::from([FeatureId(1)]));
        assert_eq!(report.states[&FeatureId(2)], StitchState::Dangling);
    }

    #[test]
    fn test_closing_line_with_inner_vertex() {
        // Nach dem Ringschluss ist (0, 1) das Kettenende: ein innerer Vertex von Linie 3
        let arena = FeatureArena::new(vec![
            line(1, &[(0.0, 0.0), (1.0, 0.0)]),
            line(2, &[(1.0, 0.0), (1.0, 1.0)]),
            line(3, &[(1.0, 1.0), (0.0, 1.0), (0.0, 0.0)]),
        ])
        .unwrap();
        let mut ledger = ErrorLedger::new();
        let report = ChainBuilder::new(0.0).build(&arena, &mut ledger);

        assert!(ledger.is_empty(), "{:?}", ledger);
        assert_eq!(
            report.chain.points(),
            pts(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]).as_slice()
        );
        assert!(report.states.values().all(|s| *s == StitchState::Matched));
    }

    #[test]
    fn test_multi_vertex_lines_in_mixed_directions() {
        let arena = FeatureArena::new(vec![
            line(1, &[(2.0, 0.0), (1.0, -1.0), (0.0, 0.0)]),
            line(2, &[(2.0, 2.0), (3.0, 1.0), (2.0, 0.0)]),
            line(3, &[(0.0, 0.0), (-1.0, 1.0), (0.0, 2.0), (2.0, 2.0)]),
        ])
        .unwrap();
        let mut ledger = ErrorLedger::new();
        let report = ChainBuilder::new(0.0).build(&arena, &mut ledger);

        assert!(ledger.is_empty(), "{:?}", ledger);
        assert_eq!(
            report.chain.points(),
            pts(&[
                (2.0, 0.0),
                (1.0, -1.0),
                (0.0, 0.0),
                (-1.0, 1.0),
                (0.0, 2.0),
                (2.0, 2.0),
                (3.0, 1.0),
            ])
            .as_slice()
        );
    }

    #[test]
    fn test_tolerance_joins_noisy_endpoints() {
        let noisy = vec![
            line(1, &[(0.0, 0.0), (1.0, 0.0)]),
            line(2, &[(1.0 + 1e-9, 0.0), (1.0, 1.0)]),
            line(3, &[(1.0, 1.0), (0.0, 1.0)]),
            line(4, &[(0.0, 1.0), (0.0, 1e-9)]),
        ];

        let arena = FeatureArena::new(noisy).unwrap();
        let mut exact = ErrorLedger::new();
        ChainBuilder::new(0.0).build(&arena, &mut exact);
        assert!(exact.count_where(|k| *k == ErrorKind::DanglingEndpoint) > 0);

        let mut tolerant = ErrorLedger::new();
        let report = ChainBuilder::new(1e-6).build(&arena, &mut tolerant);
        assert!(tolerant.is_empty(), "{:?}", tolerant);
        assert_eq!(report.chain.distinct_count(), 4);
    }

    #[test]
    fn test_disjoint_group_is_not_reached() {
        let mut features = unit_square();
        features.extend([
            line(10, &[(5.0, 5.0), (6.0, 5.0)]),
            line(11, &[(6.0, 5.0), (6.0, 6.0)]),
            line(12, &[(6.0, 6.0), (5.0, 5.0)]),
        ]);
        let arena = FeatureArena::new(features).unwrap();
        let mut ledger = ErrorLedger::new();
        let report = ChainBuilder::new(0.0).build(&arena, &mut ledger);

        assert!(ledger.is_empty());
        assert_eq!(report.stitched.len(), 4);
        assert_eq!(
            report.unreached(),
            vec![FeatureId(10), FeatureId(11), FeatureId(12)]
        );
        assert_eq!(report.states[&FeatureId(11)], StitchState::Unreached);
        assert_eq!(report.states[&FeatureId(4)], StitchState::Matched);
    }
}
