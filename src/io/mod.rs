// src/io/mod.rs
pub mod sink;
pub mod source;
pub mod svg;

pub use sink::{JsonSink, MemorySink, ResultSink};
pub use source::{FeatureSource, Geometry, GeometryType, Layer, LayerFeature, Project};
pub use self::svg::SvgSink;

use crate::error::PolygoniseResult;
use crate::topology::{Outcome, Polygoniser};
use crate::types::FeatureArena;
use log::info;

/// Lädt die Features aus `source`, führt den Lauf aus und übergibt das Ergebnis an `sink`.
///
/// Eingabefehler brechen ab, bevor der Kern läuft. Jedes `Outcome` erreicht die Senke.
pub fn run<S, K>(source: &S, polygoniser: &Polygoniser, sink: &mut K) -> PolygoniseResult<Outcome>
where
    S: FeatureSource + ?Sized,
    K: ResultSink + ?Sized,
{
    let features = source.load_features()?;
    info!(
        "{} line features loaded (crs {})",
        features.len(),
        source.crs()
    );

    let arena = FeatureArena::new(features)?;
    let outcome = polygoniser.run(&arena)?;

    match &outcome {
        Outcome::Assembled(assembly) => sink.accept_polygon(assembly, source.crs())?,
        Outcome::Defects(ledger) => sink.accept_errors(ledger, source.crs())?,
        Outcome::Degenerate { error, chain } => {
            sink.accept_degenerate(error, chain.points(), source.crs())?
        }
    }

    Ok(outcome)
}
