pub mod method;

pub use method::{PredictionMethod, RawScores};
