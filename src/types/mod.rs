// src/types/mod.rs
pub mod arena;
pub mod bounds;
pub mod feature;
pub mod point;

pub use arena::*;
pub use bounds::*;
pub use feature::*;
pub use point::*;
