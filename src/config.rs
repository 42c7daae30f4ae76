// src/config.rs

use crate::error::{PolygoniseError, PolygoniseResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Konfiguration eines Polygonisierungs-Laufs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolygoniseConfig {
    /// Toleranz für Punktgleichheit (euklidischer Abstand).
    /// `0.0` heißt exakte Gleichheit der Koordinaten, wie beim Digitalisieren mit Snapping.
    pub tolerance: f64,
    /// Einzelne Linien auf Selbst-Gültigkeit prüfen.
    pub check_self_validity: bool,
    /// Linien paarweise auf Kreuzungen prüfen.
    pub check_crossings: bool,
}

impl Default for PolygoniseConfig {
    fn default() -> Self {
        Self {
            tolerance: 0.0,
            check_self_validity: true,
            check_crossings: true,
        }
    }
}

impl PolygoniseConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_self_validity_check(mut self, enabled: bool) -> Self {
        self.check_self_validity = enabled;
        self
    }

    pub fn with_crossing_check(mut self, enabled: bool) -> Self {
        self.check_crossings = enabled;
        self
    }

    /// Lädt eine Konfiguration aus einer JSON-Datei; fehlende Felder nehmen den Standardwert.
    pub fn from_path(path: impl AsRef<Path>) -> PolygoniseResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> PolygoniseResult<()> {
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(PolygoniseError::InvalidConfiguration {
                message: format!(
                    "tolerance must be a finite, non-negative number, got {}",
                    self.tolerance
                ),
            });
        }
        Ok(())
    }
}
