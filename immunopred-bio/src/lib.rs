//! Immunology domain types for immunopred

pub mod allele;
pub mod input;
pub mod peptide;

// Re-export commonly used types
pub use allele::Allele;
pub use input::{IntoAlleles, IntoPeptides};
pub use peptide::Peptide;
