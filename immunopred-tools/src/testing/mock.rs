//! Configurable prediction method for exercising the driver

use crate::alleles::AlleleTable;
use crate::normalize::ScoreTransform;
use crate::predictors::{insert_score, parse_number, read_output, write_plain};
use crate::traits::{PredictionMethod, RawScores};
use immunopred_bio::Allele;
use immunopred_core::ImmunopredResult;
use std::io::{self, Write};
use std::path::Path;

/// A method whose tool writes `allele<TAB>peptide<TAB>score` lines.
///
/// Alleles are spelled `HLA-A02:01`. Any executable honouring that output
/// format (usually a shell script) can stand in for a real predictor.
pub struct MockMethod {
    command: String,
    alleles: AlleleTable,
    lengths: Vec<usize>,
    transform: ScoreTransform,
    version: Option<String>,
}

impl Default for MockMethod {
    fn default() -> Self {
        Self::new("mockpred -p {peptides} -a {alleles} -o {out} {options}")
    }
}

impl MockMethod {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            alleles: AlleleTable::from_names(["A*01:01", "A*02:01", "B*07:02"]),
            lengths: vec![8, 9, 10, 11],
            transform: ScoreTransform::Ic50,
            version: None,
        }
    }

    pub fn with_alleles(mut self, alleles: AlleleTable) -> Self {
        self.alleles = alleles;
        self
    }

    pub fn with_lengths(mut self, lengths: Vec<usize>) -> Self {
        self.lengths = lengths;
        self
    }

    pub fn with_transform(mut self, transform: ScoreTransform) -> Self {
        self.transform = transform;
        self
    }

    /// Version the "installed" binary claims to be
    pub fn with_external_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }
}

impl PredictionMethod for MockMethod {
    fn name(&self) -> &'static str {
        "mockpred"
    }

    fn version(&self) -> &'static str {
        "1.0"
    }

    fn supported_alleles(&self) -> &AlleleTable {
        &self.alleles
    }

    fn supported_lengths(&self) -> &[usize] {
        &self.lengths
    }

    fn command(&self) -> &str {
        &self.command
    }

    fn score_transform(&self) -> ScoreTransform {
        self.transform
    }

    fn convert_allele(&self, allele: &Allele) -> String {
        format!("HLA-{}{}:{}", allele.locus, allele.supertype, allele.subtype)
    }

    fn write_input(&self, peptides: &[String], out: &mut dyn Write) -> io::Result<()> {
        write_plain(peptides, out)
    }

    fn parse_output(&self, path: &Path) -> ImmunopredResult<RawScores> {
        let text = read_output(path)?;
        let mut scores = RawScores::new();
        for line in text.lines() {
            let cells: Vec<&str> = line.split('\t').collect();
            if let [allele, peptide, score] = cells.as_slice() {
                if let Some(score) = parse_number(score) {
                    insert_score(&mut scores, allele.trim(), peptide.trim(), score);
                }
            }
        }
        Ok(scores)
    }

    fn external_version(&self, _executable: &Path) -> Option<String> {
        self.version.clone()
    }
}
