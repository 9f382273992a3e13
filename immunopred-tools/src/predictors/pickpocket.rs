//! PickPocket 1.1

use super::{insert_score, parse_number, read_output, write_plain, CLASS_I_LENGTHS};
use crate::alleles::AlleleTable;
use crate::normalize::ScoreTransform;
use crate::traits::{PredictionMethod, RawScores};
use immunopred_bio::Allele;
use immunopred_core::ImmunopredResult;
use std::io::{self, Write};
use std::path::Path;

pub struct PickPocket11 {
    alleles: AlleleTable,
}

impl Default for PickPocket11 {
    fn default() -> Self {
        Self::new()
    }
}

impl PickPocket11 {
    pub fn new() -> Self {
        Self {
            alleles: AlleleTable::parse(include_str!("../../data/alleles/pickpocket-1.1.txt")),
        }
    }
}

impl PredictionMethod for PickPocket11 {
    fn name(&self) -> &'static str {
        "pickpocket"
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
        r##"PickPocket -p {peptides} -a {alleles} {options} | grep -v "#" > {out}"##
    }

    fn score_transform(&self) -> ScoreTransform {
        ScoreTransform::PassThrough
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
            let trimmed = line.trim();
            if trimmed.is_empty()
                || trimmed.starts_with('#')
                || trimmed.starts_with('-')
                || line.contains("pos")
            {
                continue;
            }
            let tokens: Vec<&str> = trimmed.split_whitespace().collect();
            let parsed = match (tokens.get(1), tokens.get(2), tokens.get(4)) {
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
    fn test_command_filters_comments() {
        let method = PickPocket11::new();
        assert!(method.command().ends_with(r##"| grep -v "#" > {out}"##));
        assert_eq!(method.executable(), "PickPocket");
    }

    #[test]
    fn test_parse_fixture() {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(file.path(), fixtures::PICKPOCKET_11_OUTPUT).unwrap();

        let scores = PickPocket11::new().parse_output(file.path()).unwrap();
        assert_eq!(scores.len(), 2);
        assert_eq!(scores["HLA-A02:01"]["SIINFEKL"], 0.211);
        assert_eq!(scores["HLA-A01:01"]["GILGFVFTL"], 0.032);
    }

    #[test]
    fn test_scores_pass_through() {
        assert_eq!(
            PickPocket11::new().score_transform(),
            ScoreTransform::PassThrough
        );
    }
}
