// src/topology/pipeline.rs

use crate::config::PolygoniseConfig;
use crate::error::{AssemblyError, PolygoniseResult};
use crate::geometry::{CrossingDetector, GeometryValidator};
use crate::topology::assembler::{Polygon, PolygonAssembler};
use crate::topology::chain::{Chain, ChainBuilder};
use crate::topology::ledger::{ErrorKind, ErrorLedger};
use crate::types::{FeatureArena, Point};
use chrono::NaiveDate;
use log::{info, warn};

/// Erfolgreich zusammengesetztes Polygon samt Reihenfolge der verwendeten Punkte.
#[derive(Debug, Clone, PartialEq)]
pub struct Assembly {
    pub polygon: Polygon,
    /// Punkte in Kettenreihenfolge, ohne den schließenden Punkt.
    pub used_points: Vec<Point>,
    /// Anzahl der Linien im Lauf.
    pub feature_count: usize,
}

/// Ergebnis eines Laufs.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Assembled(Assembly),
    /// Defekte gefunden, kein Polygon.
    Defects(ErrorLedger),
    /// Fehlerfrei, aber die Kette ist zu kurz für einen Ring.
    Degenerate { error: AssemblyError, chain: Chain },
}

impl Outcome {
    pub fn error_count(&self) -> usize {
        match self {
            Outcome::Defects(ledger) => ledger.count(),
            Outcome::Assembled(_) | Outcome::Degenerate { .. } => 0,
        }
    }

    pub fn polygon(&self) -> Option<&Polygon> {
        match self {
            Outcome::Assembled(assembly) => Some(&assembly.polygon),
            _ => None,
        }
    }
}

/// Führt Validator, Kreuzungsprüfung, Kettenbau und Ringschluss in fester Reihenfolge aus.
#[derive(Debug, Clone, Default)]
pub struct Polygoniser {
    config: PolygoniseConfig,
    assembler: PolygonAssembler,
}

impl Polygoniser {
    pub fn new(config: PolygoniseConfig) -> Self {
        Self {
            config,
            assembler: PolygonAssembler::new(),
        }
    }

    pub fn with_creation_date(mut self, date: NaiveDate) -> Self {
        self.assembler = self.assembler.with_date(date);
        self
    }

    pub fn config(&self) -> &PolygoniseConfig {
        &self.config
    }

    pub fn run(&self, arena: &FeatureArena) -> PolygoniseResult<Outcome> {
        self.config.validate()?;
        let tolerance = self.config.tolerance;
        let mut ledger = ErrorLedger::new();

        // 1. Selbst-Gültigkeit je Linie, aufsteigend nach ID
        if self.config.check_self_validity {
            let validator = GeometryValidator::new(tolerance);
            for feature in arena.iter() {
                for issue in validator.validate(feature) {
                    ledger.record(issue.location, ErrorKind::SelfInvalid(issue.reason));
                }
            }
        }

        // 2. Kreuzungen zwischen Linien
        if self.config.check_crossings {
            for crossing in CrossingDetector::new(tolerance).detect(arena) {
                ledger.record(crossing.location, ErrorKind::Crossing);
            }
        }

        // 3. Kette aufbauen, hängende Enden und Reihenfolgefehler sammeln
        let report = ChainBuilder::new(tolerance).build(arena, &mut ledger);

        let unreached = report.unreached();
        if !unreached.is_empty() {
            warn!(
                "{} of {} features not reachable from feature {}: {:?}",
                unreached.len(),
                report.feature_count,
                arena.ids().next().map(|id| id.to_string()).unwrap_or_default(),
                unreached
            );
        }

        if !ledger.is_empty() {
            warn!("{} geometry errors found", ledger.count());
            return Ok(Outcome::Defects(ledger));
        }
        info!("No geometry errors found.");

        match self
            .assembler
            .assemble(&report.chain, report.feature_count, &ledger)
        {
            Ok(polygon) => {
                info!(
                    "Polygon from {} lines: {} ring points, area {:.3}",
                    polygon.source_line_count(),
                    polygon.ring().len(),
                    polygon.area()
                );
                Ok(Outcome::Assembled(Assembly {
                    used_points: report.chain.points().to_vec(),
                    polygon,
                    feature_count: report.feature_count,
                }))
            }
            Err(error) => {
                warn!("{}", error);
                Ok(Outcome::Degenerate {
                    error,
                    chain: report.chain,
                })
            }
        }
    }
}

/// Kurzform für einen Lauf mit gegebener Konfiguration.
pub fn polygonise(arena: &FeatureArena, config: &PolygoniseConfig) -> PolygoniseResult<Outcome> {
    Polygoniser::new(config.clone()).run(arena)
}
