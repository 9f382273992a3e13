//! Adapters for the supported external predictors
//!
//! Every adapter owns its allele table and its output parser. Parsers are
//! deliberately adapter-local: the tools disagree on column layout, header
//! depth and allele spelling, and a line that does not fit the expected
//! layout is skipped rather than interpreted.

pub mod netctlpan;
pub mod netmhc;
pub mod netmhcii;
pub mod netmhciipan;
pub mod netmhcpan;
pub mod pickpocket;

pub use netctlpan::NetCtlPan11;
pub use netmhc::{NetMhc30a, NetMhc34};
pub use netmhcii::NetMhcIi22;
pub use netmhciipan::NetMhcIiPan30;
pub use netmhcpan::{NetMhcPan24, NetMhcPan28};
pub use pickpocket::PickPocket11;

use crate::traits::RawScores;
use immunopred_core::{ImmunopredError, ImmunopredResult};
use std::io::{self, Write};
use std::path::Path;

pub(crate) const CLASS_I_LENGTHS: &[usize] = &[8, 9, 10, 11];

/// One sequence per line
pub(crate) fn write_plain(peptides: &[String], out: &mut dyn Write) -> io::Result<()> {
    for peptide in peptides {
        writeln!(out, "{}", peptide)?;
    }
    Ok(())
}

/// `>pepe_<i>` header followed by the sequence
pub(crate) fn write_pseudo_fasta(peptides: &[String], out: &mut dyn Write) -> io::Result<()> {
    for (i, peptide) in peptides.iter().enumerate() {
        writeln!(out, ">pepe_{}", i)?;
        writeln!(out, "{}", peptide)?;
    }
    Ok(())
}

pub(crate) fn read_output(path: &Path) -> ImmunopredResult<String> {
    Ok(std::fs::read_to_string(path)?)
}

pub(crate) fn parse_number(cell: &str) -> Option<f64> {
    cell.trim().parse::<f64>().ok()
}

pub(crate) fn missing_header(method: &str, what: &str) -> ImmunopredError {
    ImmunopredError::Parse(format!("{} output is missing its {}", method, what))
}

pub(crate) fn insert_score(scores: &mut RawScores, allele: &str, peptide: &str, value: f64) {
    scores
        .entry(allele.to_string())
        .or_default()
        .insert(peptide.to_string(), value);
}

/// Allele header of the two-line `-xls` layout shared by NetMHCpan 2.8 and
/// NetMHCIIpan: the first line names each allele at the column where its
/// block starts, the second names the columns inside each block.
pub(crate) struct BlockHeader {
    /// (allele cell, block start column)
    pub blocks: Vec<(String, usize)>,
    pub columns: Vec<String>,
}

impl BlockHeader {
    pub fn parse<'a, I>(method: &str, lines: &mut I) -> ImmunopredResult<Self>
    where
        I: Iterator<Item = &'a str>,
    {
        let allele_line = lines
            .next()
            .ok_or_else(|| missing_header(method, "allele header"))?;
        let column_line = lines
            .next()
            .ok_or_else(|| missing_header(method, "column header"))?;

        let blocks = allele_line
            .split('\t')
            .enumerate()
            .map(|(col, cell)| (cell.trim(), col))
            .filter(|(cell, _)| !cell.is_empty())
            .map(|(cell, col)| (cell.to_string(), col))
            .collect();
        let columns = column_line
            .split('\t')
            .map(|c| c.trim().to_string())
            .collect();

        Ok(Self { blocks, columns })
    }

    /// Column named `name` inside the block starting at `start`
    pub fn column_in_block(&self, start: usize, width: usize, name: &str) -> Option<usize> {
        (start..start + width).find(|&col| self.columns.get(col).map(String::as_str) == Some(name))
    }
}
