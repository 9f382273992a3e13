//! NetMHCII 2.2 (class II, 15-mers only)

use super::{insert_score, parse_number, read_output, write_pseudo_fasta};
use crate::alleles::AlleleTable;
use crate::normalize::ScoreTransform;
use crate::traits::{PredictionMethod, RawScores};
use immunopred_bio::Allele;
use immunopred_core::ImmunopredResult;
use std::io::{self, Write};
use std::path::Path;

const PEPTIDE_TOKEN: usize = 2;
const AFFINITY_TOKEN: usize = 5;

pub struct NetMhcIi22 {
    alleles: AlleleTable,
}

impl Default for NetMhcIi22 {
    fn default() -> Self {
        Self::new()
    }
}

impl NetMhcIi22 {
    pub fn new() -> Self {
        Self {
            alleles: AlleleTable::parse(include_str!("../../data/alleles/netmhcii-2.2.txt")),
        }
    }
}

impl PredictionMethod for NetMhcIi22 {
    fn name(&self) -> &'static str {
        "netmhcII"
    }

    fn version(&self) -> &'static str {
        "2.2"
    }

    fn supported_alleles(&self) -> &AlleleTable {
        &self.alleles
    }

    fn supported_lengths(&self) -> &[usize] {
        &[15]
    }

    fn command(&self) -> &str {
        r##"netMHCII {peptides} -a {alleles} {options} | grep -v "#" > {out}"##
    }

    fn score_transform(&self) -> ScoreTransform {
        ScoreTransform::Ic50
    }

    fn convert_allele(&self, allele: &Allele) -> String {
        format!("HLA-{}{}{}", allele.locus, allele.supertype, allele.subtype)
    }

    fn write_input(&self, peptides: &[String], out: &mut dyn Write) -> io::Result<()> {
        write_pseudo_fasta(peptides, out)
    }

    /// Whitespace-delimited report; only rows led by an `HLA-` allele carry scores
    fn parse_output(&self, path: &Path) -> ImmunopredResult<RawScores> {
        let text = read_output(path)?;
        let mut scores = RawScores::new();

        for line in text.lines() {
            let tokens: Vec<&str> = line.split_whitespace().collect();
            let Some(allele) = tokens.first() else {
                continue;
            };
            if !allele.contains("HLA-") {
                continue;
            }
            let parsed = tokens
                .get(PEPTIDE_TOKEN)
                .zip(tokens.get(AFFINITY_TOKEN).and_then(|t| parse_number(t)));
            match parsed {
                Some((peptide, affinity)) => insert_score(&mut scores, allele, peptide, affinity),
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
    fn test_convert_allele() {
        let drb = Allele::new("DRB1", "01", "01");
        assert_eq!(NetMhcIi22::new().convert_allele(&drb), "HLA-DRB10101");
    }

    #[test]
    fn test_input_is_pseudo_fasta() {
        let mut out = Vec::new();
        NetMhcIi22::new()
            .write_input(&["PKYVKQNTLKLATGM".to_string()], &mut out)
            .unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), ">pepe_0\nPKYVKQNTLKLATGM\n");
    }

    #[test]
    fn test_command_filters_comments() {
        let method = NetMhcIi22::new();
        assert!(method.command().ends_with(r##"| grep -v "#" > {out}"##));
        assert_eq!(method.executable(), "netMHCII");
    }

    #[test]
    fn test_parse_fixture() {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(file.path(), fixtures::NETMHCII_22_OUTPUT).unwrap();

        let scores = NetMhcIi22::new().parse_output(file.path()).unwrap();
        assert_eq!(scores.len(), 2);
        assert_eq!(scores["HLA-DRB10101"]["PKYVKQNTLKLATGM"], 22.5);
        assert_eq!(scores["HLA-DRB10401"]["PKYVKQNTLKLATGM"], 1950.0);
    }

    #[test]
    fn test_only_fifteen_mers() {
        let method = NetMhcIi22::new();
        assert!(method.supports_length(15));
        assert!(!method.supports_length(9));
        assert!(!method.supports_length(16));
    }
}
