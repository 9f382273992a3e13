//! Supported-allele tables shipped with each prediction method

use immunopred_bio::Allele;
use std::collections::BTreeSet;

/// Immutable set of generic allele names (`A*02:01`) a method accepts
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlleleTable {
    names: BTreeSet<String>,
}

impl AlleleTable {
    /// Parse a one-name-per-line table; blank lines and `#` comments are ignored
    pub fn parse(data: &str) -> Self {
        let names = data
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_string)
            .collect();
        Self { names }
    }

    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn supports(&self, allele: &Allele) -> bool {
        self.contains(&allele.name())
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Names in sorted order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Every table entry as an `Allele`, in sorted order
    pub fn alleles(&self) -> Vec<Allele> {
        self.names
            .iter()
            .filter_map(|name| match name.parse::<Allele>() {
                Ok(allele) => Some(allele),
                Err(e) => {
                    tracing::debug!("Skipping malformed allele table entry: {}", e);
                    None
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ignores_blank_and_comments() {
        let table = AlleleTable::parse("# class I\nA*02:01\n\n  B*07:02  \n");
        assert_eq!(table.len(), 2);
        assert!(table.contains("A*02:01"));
        assert!(table.contains("B*07:02"));
        assert!(!table.contains("# class I"));
    }

    #[test]
    fn test_supports_uses_generic_name() {
        let table = AlleleTable::from_names(["A*02:01"]);
        assert!(table.supports(&Allele::new("A", "02", "01")));
        assert!(!table.supports(&Allele::new("A", "02", "99")));
    }

    #[test]
    fn test_alleles_are_sorted() {
        let table = AlleleTable::from_names(["B*07:02", "A*02:01", "A*01:01"]);
        let names: Vec<String> = table.alleles().iter().map(Allele::name).collect();
        assert_eq!(names, vec!["A*01:01", "A*02:01", "B*07:02"]);
    }
}
