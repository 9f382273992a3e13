//! NetMHCIIpan 3.0

use super::{insert_score, parse_number, read_output, write_plain, BlockHeader};
use crate::alleles::AlleleTable;
use crate::normalize::ScoreTransform;
use crate::traits::{PredictionMethod, RawScores};
use immunopred_bio::Allele;
use immunopred_core::ImmunopredResult;
use std::io::{self, Write};
use std::path::Path;

const LENGTHS: &[usize] = &[8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20];

/// Header alleles come as `DRB1*01:01` or `DRB1_0101`; both map to `DRB1_0101`
fn normalize_header_allele(cell: &str) -> String {
    cell.replace('*', "_").replace(':', "")
}

pub struct NetMhcIiPan30 {
    alleles: AlleleTable,
}

impl Default for NetMhcIiPan30 {
    fn default() -> Self {
        Self::new()
    }
}

impl NetMhcIiPan30 {
    pub fn new() -> Self {
        Self {
            alleles: AlleleTable::parse(include_str!("../../data/alleles/netmhciipan-3.0.txt")),
        }
    }
}

impl PredictionMethod for NetMhcIiPan30 {
    fn name(&self) -> &'static str {
        "netmhcIIpan"
    }

    fn version(&self) -> &'static str {
        "3.0"
    }

    fn supported_alleles(&self) -> &AlleleTable {
        &self.alleles
    }

    fn supported_lengths(&self) -> &[usize] {
        LENGTHS
    }

    fn command(&self) -> &str {
        "netMHCIIpan -f {peptides} -inptype 1 -a {alleles} {options} -xls -xlsfile {out}"
    }

    fn score_transform(&self) -> ScoreTransform {
        ScoreTransform::PassThrough
    }

    fn convert_allele(&self, allele: &Allele) -> String {
        format!("{}_{}{}", allele.locus, allele.supertype, allele.subtype)
    }

    fn write_input(&self, peptides: &[String], out: &mut dyn Write) -> io::Result<()> {
        write_plain(peptides, out)
    }

    /// First column of each allele block (`1-log50k`), reported as-is
    fn parse_output(&self, path: &Path) -> ImmunopredResult<RawScores> {
        let text = read_output(path)?;
        let mut lines = text.lines();
        let header = BlockHeader::parse(self.name(), &mut lines)?;
        let blocks: Vec<(String, usize)> = header
            .blocks
            .iter()
            .map(|(allele, start)| (normalize_header_allele(allele), *start))
            .collect();

        let mut scores = RawScores::new();
        for line in lines {
            if line.trim().is_empty() {
                continue;
            }
            let row: Vec<&str> = line.split('\t').collect();
            let values: Option<Vec<f64>> = blocks
                .iter()
                .map(|(_, col)| row.get(*col).and_then(|c| parse_number(c)))
                .collect();
            let (Some(peptide), Some(values)) = (row.get(1), values) else {
                tracing::debug!("Skipping unparseable {} line: {}", self.name(), line);
                continue;
            };
            for ((allele, _), value) in blocks.iter().zip(values) {
                insert_score(&mut scores, allele, peptide.trim(), value);
            }
        }
        Ok(scores)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use immunopred_test::fixtures;
    use pretty_assertions::assert_eq;
    use tempfile::NamedTempFile;

    #[test]
    fn test_convert_and_header_spelling_agree() {
        let method = NetMhcIiPan30::new();
        let drb = Allele::new("DRB1", "04", "01");
        assert_eq!(method.convert_allele(&drb), "DRB1_0401");
        assert_eq!(normalize_header_allele("DRB1*04:01"), "DRB1_0401");
        assert_eq!(normalize_header_allele("DRB1_0401"), "DRB1_0401");
    }

    #[test]
    fn test_parse_fixture() {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(file.path(), fixtures::NETMHCIIPAN_30_OUTPUT).unwrap();

        let scores = NetMhcIiPan30::new().parse_output(file.path()).unwrap();
        let alleles: Vec<&String> = scores.keys().collect();
        assert_eq!(alleles, vec!["DRB1_0101", "DRB1_0401"]);
        assert_eq!(scores["DRB1_0101"]["PKYVKQNTLKLAT"], 0.712);
        assert_eq!(scores["DRB1_0401"]["PKYVKQNTLKLAT"], 0.301);
    }

    #[test]
    fn test_length_range() {
        let method = NetMhcIiPan30::new();
        assert!(method.supports_length(8));
        assert!(method.supports_length(20));
        assert!(!method.supports_length(21));
        assert_eq!(method.score_transform(), ScoreTransform::PassThrough);
    }
}
