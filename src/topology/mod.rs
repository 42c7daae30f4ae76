// src/topology/mod.rs
pub mod assembler;
pub mod chain;
pub mod ledger;
pub mod pipeline;

pub use assembler::{PolygonAssembler, Polygon};
pub use chain::{Chain, ChainBuilder, ChainReport, EndpointCheck, StitchState};
pub use ledger::{ErrorKind, ErrorLedger, ErrorRecord};
pub use pipeline::{Assembly, Outcome, Polygoniser, polygonise};
