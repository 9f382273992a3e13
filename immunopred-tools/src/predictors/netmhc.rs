//! NetMHC 3.x
//!
//! Both versions write a tab-separated file via `-x`: two preamble lines, a
//! header whose cells from column 3 on start with the allele name, then one
//! row per peptide with the sequence in column 2 and one IC50 per allele.

use super::{
    insert_score, missing_header, parse_number, read_output, write_plain, CLASS_I_LENGTHS,
};
use crate::alleles::AlleleTable;
use crate::normalize::ScoreTransform;
use crate::traits::{PredictionMethod, RawScores};
use immunopred_bio::Allele;
use immunopred_core::ImmunopredResult;
use lazy_static::lazy_static;
use regex::Regex;
use std::io::{self, Write};
use std::path::Path;
use std::process::Command;

lazy_static! {
    static ref VERSION_TOKEN: Regex =
        Regex::new(r"\b(\d+\.\d+[a-z]?)\b").expect("version pattern is valid");
}

const AVERAGE_COLUMNS: &[&str] = &["Average", "Ave"];

fn parse_netmhc_xls(method: &str, path: &Path) -> ImmunopredResult<RawScores> {
    let text = read_output(path)?;
    let mut lines = text.lines().skip(2);

    let header = lines
        .next()
        .ok_or_else(|| missing_header(method, "allele header"))?;
    let alleles: Vec<&str> = header
        .split('\t')
        .skip(3)
        .map(|cell| cell.split_whitespace().next().unwrap_or(""))
        .collect();

    let mut scores = RawScores::new();
    for line in lines {
        if line.trim().is_empty() {
            continue;
        }
        let cells: Vec<&str> = line.split('\t').collect();
        let Some(peptide) = cells.get(2).map(|p| p.trim()) else {
            tracing::debug!("Skipping short {} line: {}", method, line);
            continue;
        };
        let values: Option<Vec<f64>> = cells[3..]
            .iter()
            .take(alleles.len())
            .map(|c| parse_number(c))
            .collect();
        let Some(values) = values else {
            tracing::debug!("Skipping unparseable {} line: {}", method, line);
            continue;
        };
        for (allele, value) in alleles.iter().zip(values) {
            if allele.is_empty() || AVERAGE_COLUMNS.contains(allele) {
                continue;
            }
            insert_score(&mut scores, allele, peptide, value);
        }
    }
    Ok(scores)
}

/// NetMHC 3.4, allele spelling `HLA-A02:01`
pub struct NetMhc34 {
    alleles: AlleleTable,
}

impl Default for NetMhc34 {
    fn default() -> Self {
        Self::new()
    }
}

impl NetMhc34 {
    pub fn new() -> Self {
        Self {
            alleles: AlleleTable::parse(include_str!("../../data/alleles/netmhc-3.4.txt")),
        }
    }
}

impl PredictionMethod for NetMhc34 {
    fn name(&self) -> &'static str {
        "netmhc"
    }

    fn version(&self) -> &'static str {
        "3.4"
    }

    fn supported_alleles(&self) -> &AlleleTable {
        &self.alleles
    }

    fn supported_lengths(&self) -> &[usize] {
        CLASS_I_LENGTHS
    }

    fn command(&self) -> &str {
        "netMHC -p {peptides} -a {alleles} -x {out} {options}"
    }

    fn score_transform(&self) -> ScoreTransform {
        ScoreTransform::Ic50
    }

    fn convert_allele(&self, allele: &Allele) -> String {
        format!("HLA-{}{}:{}", allele.locus, allele.supertype, allele.subtype)
    }

    fn write_input(&self, peptides: &[String], out: &mut dyn Write) -> io::Result<()> {
        write_plain(peptides, out)
    }

    fn parse_output(&self, path: &Path) -> ImmunopredResult<RawScores> {
        parse_netmhc_xls(self.name(), path)
    }

    fn external_version(&self, executable: &Path) -> Option<String> {
        let output = match Command::new(executable).arg("-version").output() {
            Ok(output) => output,
            Err(e) => {
                tracing::debug!("Version query of {} failed: {}", executable.display(), e);
                return None;
            }
        };
        let text = format!(
            "{}\n{}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        VERSION_TOKEN
            .captures(&text)
            .map(|caps| caps[1].to_string())
    }
}

/// NetMHC 3.0a, allele spelling `A0201`
pub struct NetMhc30a {
    alleles: AlleleTable,
}

impl Default for NetMhc30a {
    fn default() -> Self {
        Self::new()
    }
}

impl NetMhc30a {
    pub fn new() -> Self {
        Self {
            alleles: AlleleTable::parse(include_str!("../../data/alleles/netmhc-3.0a.txt")),
        }
    }
}

impl PredictionMethod for NetMhc30a {
    fn name(&self) -> &'static str {
        "netmhc"
    }

    fn version(&self) -> &'static str {
        "3.0a"
    }

    fn supported_alleles(&self) -> &AlleleTable {
        &self.alleles
    }

    fn supported_lengths(&self) -> &[usize] {
        CLASS_I_LENGTHS
    }

    fn command(&self) -> &str {
        "netMHC-3.0 -p {peptides} -a {alleles} -x {out} {options}"
    }

    fn score_transform(&self) -> ScoreTransform {
        ScoreTransform::Ic50
    }

    fn convert_allele(&self, allele: &Allele) -> String {
        format!("{}{}{}", allele.locus, allele.supertype, allele.subtype)
    }

    fn write_input(&self, peptides: &[String], out: &mut dyn Write) -> io::Result<()> {
        write_plain(peptides, out)
    }

    fn parse_output(&self, path: &Path) -> ImmunopredResult<RawScores> {
        parse_netmhc_xls(self.name(), path)
    }
}
