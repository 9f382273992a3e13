//! Prediction methods backed by external MHC binding predictors
//!
//! This crate wraps the NetMHC family of command-line tools (NetMHC,
//! NetMHCpan, NetMHCII, NetMHCIIpan, PickPocket, NetCTLpan). Each tool and
//! version is one [`PredictionMethod`]; the [`Predictor`] drives it through
//! batching, process execution, output parsing and score normalization into a
//! single [`ResultTable`].

// Modules
pub mod alleles;
pub mod batching;
pub mod locator;
pub mod normalize;
pub mod predict;
pub mod predictors;
pub mod result;
pub mod runner;
pub mod testing;
pub mod traits;
pub mod types;

// Re-exports for convenience
pub use alleles::AlleleTable;
pub use locator::ToolLocator;
pub use normalize::ScoreTransform;
pub use predict::{PredictionRequest, Predictor};
pub use result::{NestedScores, PredictionWarning, ResultTable};
pub use runner::CommandTemplate;
pub use testing::MockMethod;
pub use traits::{PredictionMethod, RawScores};
pub use types::Method;
