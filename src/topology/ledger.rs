// src/topology/ledger.rs

use crate::geometry::InvalidityReason;
use crate::types::Point;
use std::fmt;

/// Art eines topologischen Defekts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Linie ist in sich ungültig (Befund des Validators).
    SelfInvalid(InvalidityReason),
    /// Zwei Linien schneiden sich außerhalb gemeinsamer Endpunkte.
    Crossing,
    /// Endpunkt ohne Gegenstück an irgendeiner anderen Linie ("afloat").
    DanglingEndpoint,
    /// Linie berührt das Kettenende, aber nicht an einem ihrer Endpunkte.
    AmbiguousOrder,
}

impl ErrorKind {
    /// Lesbares Kürzel für die Fehlerausgabe (Feld `Type` im Fehler-Layer).
    pub fn tag(&self) -> String {
        match self {
            ErrorKind::SelfInvalid(reason) => reason.to_string(),
            ErrorKind::Crossing => "crossing".to_string(),
            ErrorKind::DanglingEndpoint => "afloat".to_string(),
            ErrorKind::AmbiguousOrder => "node order".to_string(),
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tag())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ErrorRecord {
    pub location: Point,
    pub kind: ErrorKind,
}

impl fmt::Display for ErrorRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.kind, self.location)
    }
}

/// Geordnete, nur anhängbare Fehlerliste eines Laufs.
///
/// Die Länge ist die maßgebliche Fehlerzahl; ist sie nicht 0, wird kein Polygon gebaut.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrorLedger {
    records: Vec<ErrorRecord>,
}

impl ErrorLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, location: Point, kind: ErrorKind) {
        self.records.push(ErrorRecord { location, kind });
    }

    pub fn count(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ErrorRecord> {
        self.records.iter()
    }

    pub fn records(&self) -> &[ErrorRecord] {
        &self.records
    }

    /// Anzahl der Einträge, deren Art `predicate` erfüllt.
    pub fn count_where(&self, predicate: impl Fn(&ErrorKind) -> bool) -> usize {
        self.records.iter().filter(|r| predicate(&r.kind)).count()
    }
}

impl<'a> IntoIterator for &'a ErrorLedger {
    type Item = &'a ErrorRecord;
    type IntoIter = std::slice::Iter<'a, ErrorRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
