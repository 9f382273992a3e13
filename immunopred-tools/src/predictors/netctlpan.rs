//! NetCTLpan 1.1

use super::{insert_score, parse_number, read_output, write_pseudo_fasta, CLASS_I_LENGTHS};
use crate::alleles::AlleleTable;
use crate::normalize::ScoreTransform;
use crate::traits::{PredictionMethod, RawScores};
use immunopred_bio::Allele;
use immunopred_core::ImmunopredResult;
use std::io::{self, Write};
use std::path::Path;

const ALLELE_TOKEN: usize = 2;
const PEPTIDE_TOKEN: usize = 3;
/// Combined MHC/TAP/cleavage score
const COMBINED_TOKEN: usize = 7;

pub struct NetCtlPan11 {
    alleles: AlleleTable,
}

impl Default for NetCtlPan11 {
    fn default() -> Self {
        Self::new()
    }
}

impl NetCtlPan11 {
    pub fn new() -> Self {
        Self {
            alleles: AlleleTable::parse(include_str!("../../data/alleles/netctlpan-1.1.txt")),
        }
    }
}

impl PredictionMethod for NetCtlPan11 {
    fn name(&self) -> &'static str {
        "netctlpan"
    }

    fn version(&self) -> &'static str {
        "1.1"
    }

    fn supported_alleles(&self) -> &AlleleTable {
        &self.alleles
    }

    fn supported_lengths(&self) -> &[usize] {
        CLASS_I_LENGTHS
    }

    fn command(&self) -> &str {
        "netctlpan -f {peptides} -a {alleles} {options} > {out}"
    }

    fn score_transform(&self) -> ScoreTransform {
        ScoreTransform::PassThrough
    }

    fn convert_allele(&self, allele: &Allele) -> String {
        format!("HLA-{}{}:{}", allele.locus, allele.supertype, allele.subtype)
    }

    fn write_input(&self, peptides: &[String], out: &mut dyn Write) -> io::Result<()> {
        write_pseudo_fasta(peptides, out)
    }

    fn parse_output(&self, path: &Path) -> ImmunopredResult<RawScores> {
        let text = read_output(path)?;
        let mut scores = RawScores::new();

        for line in text.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('-') {
                continue;
            }
            let tokens: Vec<&str> = trimmed.split_whitespace().collect();
            // Data rows start with the peptide index
            if !tokens[0].bytes().all(|b| b.is_ascii_digit()) {
                continue;
            }
            let parsed = match (
                tokens.get(ALLELE_TOKEN),
                tokens.get(PEPTIDE_TOKEN),
                tokens.get(COMBINED_TOKEN),
            ) {
                (Some(allele), Some(peptide), Some(score)) => {
                    parse_number(score).map(|s| (allele.replace('*', ""), *peptide, s))
                }
                _ => None,
            };
            match parsed {
                Some((allele, peptide, score)) => insert_score(&mut scores, &allele, peptide, score),
                None => tracing::debug!("Skipping unparseable {} line: {}", self.name(), line),
            }
        }
        Ok(scores)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use immunopred_test::fixtures;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_fixture() {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(file.path(), fixtures::NETCTLPAN_11_OUTPUT).unwrap();

        let scores = NetCtlPan11::new().parse_output(file.path()).unwrap();
        assert_eq!(scores.len(), 1);
        assert_eq!(scores["HLA-A02:01"]["SIINFEKL"], 0.6012);
        assert_eq!(scores["HLA-A02:01"]["GILGFVFTL"], 1.2231);
    }

    #[test]
    fn test_input_is_pseudo_fasta() {
        let mut out = Vec::new();
        NetCtlPan11::new()
            .write_input(&["SIINFEKL".to_string(), "GILGFVFTL".to_string()], &mut out)
            .unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            ">pepe_0\nSIINFEKL\n>pepe_1\nGILGFVFTL\n"
        );
    }
}
