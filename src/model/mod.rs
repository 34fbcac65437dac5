//! Model module - scaling, cross-validated selection and the forest learner

pub mod cv;
pub mod error;
pub mod forest;
pub mod grid;
pub mod scaler;

pub use cv::*;
pub use error::ModelError;
pub use forest::*;
pub use grid::*;
pub use scaler::*;
