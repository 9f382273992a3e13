//! Assembled prediction results

use immunopred_bio::{Allele, Peptide};
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::io::{self, Write};

/// Allele -> peptide -> normalized score
pub type NestedScores = IndexMap<Allele, IndexMap<Peptide, f64>>;

/// Recoverable conditions raised while preparing a prediction
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PredictionWarning {
    UnsupportedAllele { method: String, allele: String },
    UnsupportedLength {
        method: String,
        length: usize,
        supported: Vec<usize>,
    },
}

impl fmt::Display for PredictionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PredictionWarning::UnsupportedAllele { method, allele } => {
                write!(f, "Allele {} is not supported by {}", allele, method)
            }
            PredictionWarning::UnsupportedLength {
                method,
                length,
                supported,
            } => {
                let lengths: Vec<String> = supported.iter().map(usize::to_string).collect();
                write!(
                    f,
                    "Peptide length {} is not supported by {} (supported: {})",
                    length,
                    method,
                    lengths.join(", ")
                )
            }
        }
    }
}

/// Two-level row label: peptide sequence and the method that scored it
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct RowLabel {
    pub seq: String,
    pub method: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultRow {
    #[serde(flatten)]
    pub label: RowLabel,
    pub peptide: Peptide,
    /// Generic allele name to score
    pub scores: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodInfo {
    pub name: String,
    pub version: String,
}

/// Peptide x allele score table, rows labeled by `(sequence, method)`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResultTable {
    methods: Vec<MethodInfo>,
    alleles: Vec<Allele>,
    rows: Vec<ResultRow>,
    warnings: Vec<PredictionWarning>,
}

impl ResultTable {
    /// Build a table from `Allele -> Peptide -> score`, one method's output
    pub fn from_nested(
        name: &str,
        version: &str,
        nested: &NestedScores,
    ) -> Self {
        let mut columns = BTreeSet::new();
        let mut rows: BTreeMap<RowLabel, ResultRow> = BTreeMap::new();

        for (allele, scores) in nested {
            columns.insert(allele.clone());
            for (peptide, score) in scores {
                let label = RowLabel {
                    seq: peptide.sequence.clone(),
                    method: name.to_string(),
                };
                rows.entry(label.clone())
                    .or_insert_with(|| ResultRow {
                        label,
                        peptide: peptide.clone(),
                        scores: BTreeMap::new(),
                    })
                    .scores
                    .insert(allele.name(), *score);
            }
        }

        Self {
            methods: vec![MethodInfo {
                name: name.to_string(),
                version: version.to_string(),
            }],
            alleles: columns.into_iter().collect(),
            rows: rows.into_values().collect(),
            warnings: Vec::new(),
        }
    }

    pub fn with_warnings(mut self, warnings: Vec<PredictionWarning>) -> Self {
        self.warnings = warnings;
        self
    }

    /// Stack tables from several methods into one.
    ///
    /// When one method name appears with more than one version, rows of that
    /// method are labeled `name-version` so each version keeps its own row.
    pub fn concat<I: IntoIterator<Item = ResultTable>>(tables: I) -> Self {
        let tables: Vec<ResultTable> = tables.into_iter().collect();

        let mut versions: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
        for method in tables.iter().flat_map(|t| &t.methods) {
            versions
                .entry(method.name.as_str())
                .or_default()
                .insert(method.version.as_str());
        }
        let ambiguous: BTreeSet<String> = versions
            .into_iter()
            .filter(|(_, v)| v.len() > 1)
            .map(|(name, _)| name.to_string())
            .collect();

        let mut methods = Vec::new();
        let mut columns = BTreeSet::new();
        let mut rows: BTreeMap<RowLabel, ResultRow> = BTreeMap::new();
        let mut warnings = Vec::new();

        for table in tables {
            let relabel: BTreeMap<String, String> = table
                .methods
                .iter()
                .filter(|m| ambiguous.contains(&m.name))
                .map(|m| (m.name.clone(), format!("{}-{}", m.name, m.version)))
                .collect();

            for method in table.methods {
                if !methods.contains(&method) {
                    methods.push(method);
                }
            }
            columns.extend(table.alleles);
            warnings.extend(table.warnings);
            for mut row in table.rows {
                if let Some(label) = relabel.get(&row.label.method) {
                    row.label.method = label.clone();
                }
                match rows.get_mut(&row.label) {
                    Some(existing) => existing.scores.extend(row.scores),
                    None => {
                        rows.insert(row.label.clone(), row);
                    }
                }
            }
        }

        Self {
            methods,
            alleles: columns.into_iter().collect(),
            rows: rows.into_values().collect(),
            warnings,
        }
    }

    /// Score of the first row for `seq` that has a value for `allele`
    pub fn get(&self, seq: &str, allele: &Allele) -> Option<f64> {
        let name = allele.name();
        self.rows
            .iter()
            .filter(|row| row.label.seq == seq)
            .find_map(|row| row.scores.get(&name).copied())
    }

    pub fn get_for_method(&self, seq: &str, method: &str, allele: &Allele) -> Option<f64> {
        self.rows
            .iter()
            .find(|row| row.label.seq == seq && row.label.method == method)
            .and_then(|row| row.scores.get(&allele.name()).copied())
    }

    /// First row for `seq`
    pub fn row(&self, seq: &str) -> Option<&ResultRow> {
        self.rows.iter().find(|row| row.label.seq == seq)
    }

    pub fn rows(&self) -> &[ResultRow] {
        &self.rows
    }

    pub fn row_labels(&self) -> impl Iterator<Item = &RowLabel> {
        self.rows.iter().map(|row| &row.label)
    }

    pub fn alleles(&self) -> &[Allele] {
        &self.alleles
    }

    pub fn methods(&self) -> &[MethodInfo] {
        &self.methods
    }

    pub fn warnings(&self) -> &[PredictionWarning] {
        &self.warnings
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Tab-separated table: `Seq`, `Method`, then one column per allele
    pub fn write_tsv<W: Write>(&self, mut writer: W) -> io::Result<()> {
        let names: Vec<String> = self.alleles.iter().map(Allele::name).collect();

        write!(writer, "Seq\tMethod")?;
        for name in &names {
            write!(writer, "\t{}", name)?;
        }
        writeln!(writer)?;

        for row in &self.rows {
            write!(writer, "{}\t{}", row.label.seq, row.label.method)?;
            for name in &names {
                match row.scores.get(name) {
                    Some(score) => write!(writer, "\t{}", score)?,
                    None => write!(writer, "\t")?,
                }
            }
            writeln!(writer)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn a0201() -> Allele {
        Allele::new("A", "02", "01")
    }

    fn b0702() -> Allele {
        Allele::new("B", "07", "02")
    }

    fn sample(method: &str) -> ResultTable {
        let mut nested: IndexMap<Allele, IndexMap<Peptide, f64>> = IndexMap::new();
        nested
            .entry(b0702())
            .or_default()
            .insert(Peptide::new("SYFPEITHI"), 0.1);
        let a = nested.entry(a0201()).or_default();
        a.insert(Peptide::new("SYFPEITHI"), 0.7);
        a.insert(Peptide::new("GILGFVFTL"), 0.9);
        ResultTable::from_nested(method, "1.0", &nested)
    }

    #[test]
    fn test_from_nested_orders_rows_and_columns() {
        let table = sample("netmhc");

        assert_eq!(table.len(), 2);
        assert_eq!(table.alleles(), &[a0201(), b0702()]);
        let labels: Vec<(&str, &str)> = table
            .row_labels()
            .map(|l| (l.seq.as_str(), l.method.as_str()))
            .collect();
        assert_eq!(labels, vec![("GILGFVFTL", "netmhc"), ("SYFPEITHI", "netmhc")]);
        assert_eq!(table.get("SYFPEITHI", &a0201()), Some(0.7));
        assert_eq!(table.get("GILGFVFTL", &b0702()), None);
        assert_eq!(table.methods()[0].version, "1.0");
    }

    #[test]
    fn test_write_tsv_leaves_missing_cells_empty() {
        let mut out = Vec::new();
        sample("netmhc").write_tsv(&mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "Seq\tMethod\tA*02:01\tB*07:02\n\
             GILGFVFTL\tnetmhc\t0.9\t\n\
             SYFPEITHI\tnetmhc\t0.7\t0.1\n"
        );
    }

    #[test]
    fn test_concat_keeps_rows_per_method() {
        let table = ResultTable::concat(vec![sample("netmhc"), sample("pickpocket")]);

        assert_eq!(table.len(), 4);
        assert_eq!(table.methods().len(), 2);
        assert_eq!(
            table.get_for_method("GILGFVFTL", "pickpocket", &a0201()),
            Some(0.9)
        );
        assert!(table.row("SYFPEITHI").is_some());
    }

    #[test]
    fn test_concat_separates_versions_of_one_method() {
        let mut newer = NestedScores::new();
        newer
            .entry(a0201())
            .or_default()
            .insert(Peptide::new("SIINFEKL"), 0.9);
        let mut older = NestedScores::new();
        older
            .entry(a0201())
            .or_default()
            .insert(Peptide::new("SIINFEKL"), 0.1);

        let table = ResultTable::concat(vec![
            ResultTable::from_nested("netmhc", "3.4", &newer),
            ResultTable::from_nested("netmhc", "3.0a", &older),
            sample("pickpocket"),
        ]);

        assert_eq!(table.len(), 4);
        assert_eq!(table.get_for_method("SIINFEKL", "netmhc-3.4", &a0201()), Some(0.9));
        assert_eq!(table.get_for_method("SIINFEKL", "netmhc-3.0a", &a0201()), Some(0.1));
        // an unambiguous method keeps its bare name
        assert_eq!(
            table.get_for_method("GILGFVFTL", "pickpocket", &a0201()),
            Some(0.9)
        );
    }

    #[test]
    fn test_concat_merges_same_method_version() {
        let table = ResultTable::concat(vec![sample("netmhc"), sample("netmhc")]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.methods().len(), 1);
        assert_eq!(table.row_labels().next().unwrap().method, "netmhc");
    }

    #[test]
    fn test_json_serialization() {
        let table = sample("netmhc").with_warnings(vec![PredictionWarning::UnsupportedLength {
            method: "netmhc".to_string(),
            length: 5,
            supported: vec![8, 9, 10, 11],
        }]);

        let json = serde_json::to_value(&table).unwrap();
        assert_eq!(json["rows"][0]["seq"], "GILGFVFTL");
        assert_eq!(json["rows"][0]["scores"]["A*02:01"], 0.9);
        assert_eq!(json["warnings"][0]["kind"], "unsupported_length");
    }

    #[test]
    fn test_warning_display() {
        let w = PredictionWarning::UnsupportedAllele {
            method: "netmhc".to_string(),
            allele: "A*99:99".to_string(),
        };
        assert_eq!(w.to_string(), "Allele A*99:99 is not supported by netmhc");
    }
}
