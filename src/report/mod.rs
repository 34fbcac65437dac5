//! Report module - summarizing search and prediction results

pub mod cv_table;
pub mod search_export;
pub mod summary;

pub use cv_table::*;
pub use search_export::*;
pub use summary::*;
