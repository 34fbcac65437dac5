//! Pipeline module - loading, splitting and feature transforms

pub mod drop;
pub mod encode;
pub mod error;
pub mod impute;
pub mod loader;
pub mod matrix;
pub mod missing;
pub mod split;
pub mod transform;

pub use drop::*;
pub use encode::*;
pub use error::PipelineError;
pub use impute::*;
pub use loader::*;
pub use matrix::*;
pub use missing::*;
pub use split::*;
pub use transform::*;
