// src/io/source.rs

use crate::error::{InputError, PolygoniseResult};
use crate::types::{FeatureId, LineFeature, Point};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Read;
use std::path::Path;

/// Geometrietyp eines Layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GeometryType {
    Point,
    MultiPoint,
    LineString,
    MultiLineString,
    Polygon,
    MultiPolygon,
}

impl GeometryType {
    pub fn is_line(&self) -> bool {
        matches!(self, GeometryType::LineString | GeometryType::MultiLineString)
    }
}

impl fmt::Display for GeometryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Geometrie im GeoJSON-Schema (`{"type": ..., "coordinates": ...}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "coordinates")]
pub enum Geometry {
    Point(Point),
    MultiPoint(Vec<Point>),
    LineString(Vec<Point>),
    MultiLineString(Vec<Vec<Point>>),
    Polygon(Vec<Vec<Point>>),
    MultiPolygon(Vec<Vec<Vec<Point>>>),
}

impl Geometry {
    pub fn geometry_type(&self) -> GeometryType {
        match self {
            Geometry::Point(_) => GeometryType::Point,
            Geometry::MultiPoint(_) => GeometryType::MultiPoint,
            Geometry::LineString(_) => GeometryType::LineString,
            Geometry::MultiLineString(_) => GeometryType::MultiLineString,
            Geometry::Polygon(_) => GeometryType::Polygon,
            Geometry::MultiPolygon(_) => GeometryType::MultiPolygon,
        }
    }

    /// Vertices einer Liniengeometrie. Mehrteilige Linien werden aneinandergehängt.
    pub fn line_vertices(&self) -> Option<Vec<Point>> {
        match self {
            Geometry::LineString(vertices) => Some(vertices.clone()),
            Geometry::MultiLineString(parts) => Some(parts.iter().flatten().copied().collect()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerFeature {
    pub id: FeatureId,
    pub geometry: Geometry,
}

/// Vektor-Layer im Speicher: Features, CRS-Kennung und optionale Auswahl.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    pub name: String,
    pub crs: String,
    /// Ausgewählte Feature-IDs. Leer heißt: alle Features verwenden.
    #[serde(default)]
    pub selection: Vec<FeatureId>,
    pub features: Vec<LayerFeature>,
}

impl Layer {
    pub fn new(name: impl Into<String>, crs: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            crs: crs.into(),
            selection: Vec::new(),
            features: Vec::new(),
        }
    }

    pub fn with_feature(mut self, id: impl Into<FeatureId>, geometry: Geometry) -> Self {
        self.features.push(LayerFeature {
            id: id.into(),
            geometry,
        });
        self
    }

    pub fn with_selection(mut self, ids: impl IntoIterator<Item = FeatureId>) -> Self {
        self.selection = ids.into_iter().collect();
        self
    }

    /// Geometrietyp, bestimmt am ersten Feature.
    pub fn geometry_type(&self) -> Option<GeometryType> {
        self.features.first().map(|f| f.geometry.geometry_type())
    }
}

/// Quelle der Linien-Features eines Laufs.
pub trait FeatureSource {
    /// CRS-Kennung, wird unverändert an die Ausgabe durchgereicht.
    fn crs(&self) -> &str;

    /// Lädt alle Features (oder nur die ausgewählten) vollständig in den Speicher.
    fn load_features(&self) -> Result<Vec<LineFeature>, InputError>;
}

impl FeatureSource for Layer {
    fn crs(&self) -> &str {
        &self.crs
    }

    fn load_features(&self) -> Result<Vec<LineFeature>, InputError> {
        let geometry_type = self.geometry_type().ok_or(InputError::EmptyLayer)?;
        if !geometry_type.is_line() {
            return Err(InputError::WrongGeometryType {
                found: geometry_type.to_string(),
            });
        }

        let selected = |feature: &&LayerFeature| {
            self.selection.is_empty() || self.selection.contains(&feature.id)
        };

        let mut lines = Vec::new();
        for feature in self.features.iter().filter(selected) {
            let vertices =
                feature
                    .geometry
                    .line_vertices()
                    .ok_or_else(|| InputError::WrongGeometryType {
                        found: feature.geometry.geometry_type().to_string(),
                    })?;
            lines.push(LineFeature::new(feature.id, vertices)?);
        }

        if lines.is_empty() {
            return Err(InputError::EmptyLayer);
        }
        Ok(lines)
    }
}

/// Projektdatei mit mehreren Layern, einer davon aktiv.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    #[serde(default)]
    pub active_layer: Option<String>,
    pub layers: Vec<Layer>,
}

impl Project {
    pub fn from_reader(reader: impl Read) -> PolygoniseResult<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> PolygoniseResult<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    /// Aktiver Layer. Ohne Markierung gilt ein einzelner Layer als aktiv.
    pub fn active(&self) -> Result<&Layer, InputError> {
        match &self.active_layer {
            Some(name) => self
                .layers
                .iter()
                .find(|layer| &layer.name == name)
                .ok_or_else(|| InputError::NoActiveLayer {
                    reason: format!("layer '{name}' not found in project"),
                }),
            None => match self.layers.as_slice() {
                [] => Err(InputError::NoActiveLayer {
                    reason: "empty project".to_string(),
                }),
                [layer] => Ok(layer),
                _ => Err(InputError::NoActiveLayer {
                    reason: "no layer marked as active".to_string(),
                }),
            },
        }
    }
}
