use immunopred_core::{ImmunopredError, ImmunopredResult};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

lazy_static! {
    static ref ALLELE_PATTERN: Regex =
        Regex::new(r"^(?:HLA-)?([A-Z][A-Z0-9]*)\*(\d{2,3}):(\d{2,3}[A-Z]?)$")
            .expect("allele pattern is valid");
}

/// An MHC allele in generic `LOCUS*SUPERTYPE:SUBTYPE` form.
///
/// Tool-specific spellings (`HLA-A02:01`, `A0201`, `DRB1_0101`, ...) are
/// produced by each prediction method's converter, never by this type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Allele {
    pub locus: String,
    pub supertype: String,
    pub subtype: String,
}

impl Allele {
    pub fn new(
        locus: impl Into<String>,
        supertype: impl Into<String>,
        subtype: impl Into<String>,
    ) -> Self {
        Self {
            locus: locus.into(),
            supertype: supertype.into(),
            subtype: subtype.into(),
        }
    }

    /// Generic name, e.g. `A*02:01`
    pub fn name(&self) -> String {
        format!("{}*{}:{}", self.locus, self.supertype, self.subtype)
    }

    pub fn validate(&self) -> ImmunopredResult<()> {
        if self.locus.is_empty() || self.supertype.is_empty() || self.subtype.is_empty() {
            return Err(ImmunopredError::InvalidInput(format!(
                "allele '{}' has an empty field",
                self.name()
            )));
        }
        Ok(())
    }
}

impl FromStr for Allele {
    type Err = ImmunopredError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let caps = ALLELE_PATTERN.captures(s.trim()).ok_or_else(|| {
            ImmunopredError::InvalidInput(format!(
                "'{}' is not an allele name (expected e.g. A*02:01)",
                s
            ))
        })?;
        Ok(Allele::new(&caps[1], &caps[2], &caps[3]))
    }
}

impl fmt::Display for Allele {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}*{}:{}", self.locus, self.supertype, self.subtype)
    }
}
