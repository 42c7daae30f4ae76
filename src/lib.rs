// src/lib.rs
pub mod config;
pub mod error;
pub mod geometry;
pub mod io;
pub mod topology;
pub mod types;

// Re-exports für einfache Verwendung
pub use config::PolygoniseConfig;
pub use error::{AssemblyError, InputError, PolygoniseError, PolygoniseResult};
pub use topology::{Outcome, Polygoniser, polygonise};
pub use types::*;

// Öffentliche API
pub mod prelude {
    pub use super::{
        config::PolygoniseConfig,
        error::{AssemblyError, InputError, PolygoniseError, PolygoniseResult},
        geometry::{CrossingDetector, GeometryValidator, InvalidityReason},
        io::{FeatureSource, JsonSink, Layer, MemorySink, Project, ResultSink, SvgSink},
        topology::{
            Assembly, ChainBuilder, ErrorKind, ErrorLedger, ErrorRecord, Outcome, Polygon,
            PolygonAssembler, Polygoniser, polygonise,
        },
        types::*,
    };
}
