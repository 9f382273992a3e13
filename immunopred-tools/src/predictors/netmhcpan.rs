//! NetMHCpan 2.x
//!
//! Both versions are run with `-xls`. Version 2.4 writes a single header
//! line with one IC50 column per allele followed by an average column;
//! version 2.8 writes the two-line block layout, three columns per allele.

use super::{
    insert_score, missing_header, parse_number, read_output, write_plain, BlockHeader,
    CLASS_I_LENGTHS,
};
use crate::alleles::AlleleTable;
use crate::normalize::ScoreTransform;
use crate::traits::{PredictionMethod, RawScores};
use immunopred_bio::Allele;
use immunopred_core::ImmunopredResult;
use std::io::{self, Write};
use std::path::Path;

const NETMHCPAN_COMMAND: &str = "netMHCpan -p {peptides} -a {alleles} {options} -ic50 -xls -xlsfile {out}";

/// Columns per allele in the 2.8 layout (`1-log50k`, `nM`, `Rank`)
const BLOCK_WIDTH: usize = 3;

fn convert_hla(allele: &Allele) -> String {
    format!("HLA-{}{}:{}", allele.locus, allele.supertype, allele.subtype)
}

/// NetMHCpan 2.4
pub struct NetMhcPan24 {
    alleles: AlleleTable,
}

impl Default for NetMhcPan24 {
    fn default() -> Self {
        Self::new()
    }
}

impl NetMhcPan24 {
    pub fn new() -> Self {
        Self {
            alleles: AlleleTable::parse(include_str!("../../data/alleles/netmhcpan-2.4.txt")),
        }
    }
}

impl PredictionMethod for NetMhcPan24 {
    fn name(&self) -> &'static str {
        "netmhcpan"
    }

    fn version(&self) -> &'static str {
        "2.4"
    }

    fn supported_alleles(&self) -> &AlleleTable {
        &self.alleles
    }

    fn supported_lengths(&self) -> &[usize] {
        CLASS_I_LENGTHS
    }

    fn command(&self) -> &str {
        NETMHCPAN_COMMAND
    }

    fn score_transform(&self) -> ScoreTransform {
        ScoreTransform::Ic50
    }

    fn convert_allele(&self, allele: &Allele) -> String {
        convert_hla(allele)
    }

    fn write_input(&self, peptides: &[String], out: &mut dyn Write) -> io::Result<()> {
        write_plain(peptides, out)
    }

    fn parse_output(&self, path: &Path) -> ImmunopredResult<RawScores> {
        let text = read_output(path)?;
        let mut lines = text.lines();

        let header = lines
            .next()
            .ok_or_else(|| missing_header(self.name(), "allele header"))?;
        let cells: Vec<&str> = header.split('\t').map(str::trim).collect();
        // Last column is the per-peptide average
        let alleles: &[&str] = if cells.len() > 4 {
            &cells[3..cells.len() - 1]
        } else {
            &[]
        };

        let mut scores = RawScores::new();
        for line in lines {
            if line.trim().is_empty() {
                continue;
            }
            let row: Vec<&str> = line.split('\t').collect();
            if row.len() < 3 + alleles.len() {
                tracing::debug!("Skipping short {} line: {}", self.name(), line);
                continue;
            }
            let values: Option<Vec<f64>> = row[3..3 + alleles.len()]
                .iter()
                .map(|c| parse_number(c))
                .collect();
            let Some(values) = values else {
                tracing::debug!("Skipping unparseable {} line: {}", self.name(), line);
                continue;
            };
            let peptide = row[1].trim();
            for (allele, value) in alleles.iter().zip(values) {
                insert_score(&mut scores, allele, peptide, value);
            }
        }
        Ok(scores)
    }
}

/// NetMHCpan 2.8
pub struct NetMhcPan28 {
    alleles: AlleleTable,
}

impl Default for NetMhcPan28 {
    fn default() -> Self {
        Self::new()
    }
}

impl NetMhcPan28 {
    pub fn new() -> Self {
        Self {
            alleles: AlleleTable::parse(include_str!("../../data/alleles/netmhcpan-2.8.txt")),
        }
    }
}

impl PredictionMethod for NetMhcPan28 {
    fn name(&self) -> &'static str {
        "netmhcpan"
    }

    fn version(&self) -> &'static str {
        "2.8"
    }

    fn supported_alleles(&self) -> &AlleleTable {
        &self.alleles
    }

    fn supported_lengths(&self) -> &[usize] {
        CLASS_I_LENGTHS
    }

    fn command(&self) -> &str {
        NETMHCPAN_COMMAND
    }

    fn score_transform(&self) -> ScoreTransform {
        ScoreTransform::Ic50
    }

    fn convert_allele(&self, allele: &Allele) -> String {
        convert_hla(allele)
    }

    fn write_input(&self, peptides: &[String], out: &mut dyn Write) -> io::Result<()> {
        write_plain(peptides, out)
    }

    fn parse_output(&self, path: &Path) -> ImmunopredResult<RawScores> {
        let text = read_output(path)?;
        let mut lines = text.lines();
        let header = BlockHeader::parse(self.name(), &mut lines)?;

        // nM column of each allele block; blocks without one are not read
        let columns: Vec<(&str, usize)> = header
            .blocks
            .iter()
            .filter_map(|(allele, start)| {
                let col = header.column_in_block(*start, BLOCK_WIDTH, "nM");
                if col.is_none() {
                    tracing::debug!("No nM column for {} in {} output", allele, self.name());
                }
                col.map(|col| (allele.as_str(), col))
            })
            .collect();

        let mut scores = RawScores::new();
        for line in lines {
            if line.trim().is_empty() {
                continue;
            }
            let row: Vec<&str> = line.split('\t').collect();
            let values: Option<Vec<f64>> = columns
                .iter()
                .map(|(_, col)| row.get(*col).and_then(|c| parse_number(c)))
                .collect();
            let (Some(peptide), Some(values)) = (row.get(1), values) else {
                tracing::debug!("Skipping unparseable {} line: {}", self.name(), line);
                continue;
            };
            for ((allele, _), value) in columns.iter().zip(values) {
                insert_score(&mut scores, allele, peptide.trim(), value);
            }
        }
        Ok(scores)
    }
}
