// src/io/sink.rs

use crate::error::{AssemblyError, PolygoniseResult};
use crate::io::source::Geometry;
use crate::topology::{Assembly, ErrorLedger, ErrorRecord};
use crate::types::Point;
use serde::Serialize;
use serde_json::{Map, Value, json};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub const POLYGON_LAYER: &str = "Polygon From Lines";
pub const USED_POINTS_LAYER: &str = "Used Points";
pub const ERROR_LAYER: &str = "Geometry Errors";

/// Abnehmer der Ergebnisse eines Laufs.
pub trait ResultSink {
    fn accept_polygon(&mut self, assembly: &Assembly, crs: &str) -> PolygoniseResult<()>;

    fn accept_errors(&mut self, ledger: &ErrorLedger, crs: &str) -> PolygoniseResult<()>;

    /// Fehlerfreier Lauf, dessen Kette sich nicht zum Ring schließen ließ.
    fn accept_degenerate(
        &mut self,
        error: &AssemblyError,
        chain: &[Point],
        crs: &str,
    ) -> PolygoniseResult<()>;
}

impl ResultSink for Vec<Box<dyn ResultSink>> {
    fn accept_polygon(&mut self, assembly: &Assembly, crs: &str) -> PolygoniseResult<()> {
        self.iter_mut()
            .try_for_each(|sink| sink.accept_polygon(assembly, crs))
    }

    fn accept_errors(&mut self, ledger: &ErrorLedger, crs: &str) -> PolygoniseResult<()> {
        self.iter_mut()
            .try_for_each(|sink| sink.accept_errors(ledger, crs))
    }

    fn accept_degenerate(
        &mut self,
        error: &AssemblyError,
        chain: &[Point],
        crs: &str,
    ) -> PolygoniseResult<()> {
        self.iter_mut()
            .try_for_each(|sink| sink.accept_degenerate(error, chain, crs))
    }
}

/// Sammelt die Ergebnisse im Speicher.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    pub crs: Option<String>,
    pub assembly: Option<Assembly>,
    pub errors: Vec<ErrorRecord>,
    pub degenerate: Option<AssemblyError>,
}

impl ResultSink for MemorySink {
    fn accept_polygon(&mut self, assembly: &Assembly, crs: &str) -> PolygoniseResult<()> {
        self.crs = Some(crs.to_string());
        self.assembly = Some(assembly.clone());
        Ok(())
    }

    fn accept_errors(&mut self, ledger: &ErrorLedger, crs: &str) -> PolygoniseResult<()> {
        self.crs = Some(crs.to_string());
        self.errors.extend(ledger.iter().copied());
        Ok(())
    }

    fn accept_degenerate(
        &mut self,
        error: &AssemblyError,
        _chain: &[Point],
        crs: &str,
    ) -> PolygoniseResult<()> {
        self.crs = Some(crs.to_string());
        self.degenerate = Some(error.clone());
        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct OutputDocument<'a> {
    crs: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    layers: Vec<OutputLayer>,
}

#[derive(Debug, Serialize)]
struct OutputLayer {
    name: &'static str,
    #[serde(rename = "type")]
    kind: &'static str,
    features: Vec<OutputFeature>,
}

#[derive(Debug, Serialize)]
struct OutputFeature {
    #[serde(rename = "type")]
    kind: &'static str,
    geometry: Geometry,
    properties: Map<String, Value>,
}

impl OutputLayer {
    fn new(name: &'static str) -> Self {
        Self {
            name,
            kind: "FeatureCollection",
            features: Vec::new(),
        }
    }

    fn push(&mut self, geometry: Geometry, properties: Value) {
        let properties = match properties {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        self.features.push(OutputFeature {
            kind: "Feature",
            geometry,
            properties,
        });
    }
}

/// Schreibt Ergebnisse als JSON-Dokument mit GeoJSON-FeatureCollections je Layer.
pub struct JsonSink<W: Write> {
    writer: W,
}

impl JsonSink<BufWriter<File>> {
    pub fn to_path(path: impl AsRef<Path>) -> PolygoniseResult<Self> {
        Ok(Self::new(BufWriter::new(File::create(path)?)))
    }
}

impl<W: Write> JsonSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write(&mut self, document: &OutputDocument<'_>) -> PolygoniseResult<()> {
        serde_json::to_writer_pretty(&mut self.writer, document)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}

impl<W: Write> ResultSink for JsonSink<W> {
    fn accept_polygon(&mut self, assembly: &Assembly, crs: &str) -> PolygoniseResult<()> {
        let polygon = &assembly.polygon;

        let mut polygon_layer = OutputLayer::new(POLYGON_LAYER);
        polygon_layer.push(
            Geometry::Polygon(vec![polygon.ring().to_vec()]),
            json!({
                "CreationDate": polygon.created_at().to_string(),
                "FromLines": polygon.source_line_count(),
            }),
        );

        self.write(&OutputDocument {
            crs,
            error: None,
            layers: vec![polygon_layer, used_points_layer(&assembly.used_points)],
        })
    }

    fn accept_errors(&mut self, ledger: &ErrorLedger, crs: &str) -> PolygoniseResult<()> {
        let mut error_layer = OutputLayer::new(ERROR_LAYER);
        for record in ledger {
            error_layer.push(
                Geometry::Point(record.location),
                json!({ "Type": record.kind.tag() }),
            );
        }

        self.write(&OutputDocument {
            crs,
            error: None,
            layers: vec![error_layer],
        })
    }

    fn accept_degenerate(
        &mut self,
        error: &AssemblyError,
        chain: &[Point],
        crs: &str,
    ) -> PolygoniseResult<()> {
        self.write(&OutputDocument {
            crs,
            error: Some(error.to_string()),
            layers: vec![used_points_layer(chain)],
        })
    }
}

/// Punkte in Kettenreihenfolge mit laufender Nummer im Feld `Order`.
fn used_points_layer(points: &[Point]) -> OutputLayer {
    let mut layer = OutputLayer::new(USED_POINTS_LAYER);
    for (order, point) in points.iter().enumerate() {
        layer.push(Geometry::Point(*point), json!({ "Order": order }));
    }
    layer
}
