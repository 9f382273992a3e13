use immunopred_core::{ImmunopredError, ImmunopredResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Standard amino acids plus the ambiguity codes predictors tolerate
const RESIDUES: &[u8] = b"ACDEFGHIKLMNPQRSTVWYBJOUXZ";

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Peptide {
    pub sequence: String,
    pub id: Option<String>,
}

impl Peptide {
    pub fn new(sequence: impl Into<String>) -> Self {
        Self {
            sequence: sequence.into(),
            id: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn sequence(&self) -> &str {
        &self.sequence
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// Reject sequences an external predictor cannot read
    pub fn validate(&self) -> ImmunopredResult<()> {
        if self.sequence.is_empty() {
            return Err(ImmunopredError::InvalidInput(
                "peptide sequence is empty".to_string(),
            ));
        }
        if let Some(bad) = self.sequence.bytes().find(|b| !RESIDUES.contains(b)) {
            return Err(ImmunopredError::InvalidInput(format!(
                "peptide '{}' contains invalid residue '{}'",
                self.sequence, bad as char
            )));
        }
        Ok(())
    }
}

impl fmt::Display for Peptide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sequence)
    }
}

impl From<&str> for Peptide {
    fn from(sequence: &str) -> Self {
        Peptide::new(sequence)
    }
}

impl From<String> for Peptide {
    fn from(sequence: String) -> Self {
        Peptide::new(sequence)
    }
}
