/// Trait for external prediction methods
use crate::alleles::AlleleTable;
use crate::normalize::ScoreTransform;
use crate::predict::{PredictionRequest, Predictor};
use crate::result::ResultTable;
use immunopred_bio::Allele;
use immunopred_core::ImmunopredResult;
use indexmap::IndexMap;
use std::io::{self, Write};
use std::path::Path;

/// Tool allele string -> peptide sequence -> raw score, as read from one output file
pub type RawScores = IndexMap<String, IndexMap<String, f64>>;

/// One external tool at one version.
///
/// Implementations are stateless after construction; the same instance can
/// serve any number of `predict` calls.
pub trait PredictionMethod: Send + Sync {
    /// Method name used as the row label (e.g. `netmhc`)
    fn name(&self) -> &'static str;

    fn version(&self) -> &'static str;

    /// Stable identifier, e.g. `netmhcpan-2.8`
    fn id(&self) -> String {
        format!("{}-{}", self.name().to_lowercase(), self.version())
    }

    fn supported_alleles(&self) -> &AlleleTable;

    fn supported_lengths(&self) -> &[usize];

    /// Command template with `{peptides}`, `{alleles}`, `{out}` and `{options}`
    fn command(&self) -> &str;

    fn score_transform(&self) -> ScoreTransform;

    /// Tool-specific spelling of one allele
    fn convert_allele(&self, allele: &Allele) -> String;

    fn convert_alleles(&self, alleles: &[Allele]) -> Vec<String> {
        alleles.iter().map(|a| self.convert_allele(a)).collect()
    }

    /// Serialize peptide sequences in the tool's input format
    fn write_input(&self, peptides: &[String], out: &mut dyn Write) -> io::Result<()>;

    /// Read the tool's result file into raw, untransformed scores
    fn parse_output(&self, path: &Path) -> ImmunopredResult<RawScores>;

    /// Version the installed binary reports, if it can tell
    fn external_version(&self, _executable: &Path) -> Option<String> {
        None
    }

    /// Executable token of the command template
    fn executable(&self) -> &str {
        self.command().split_whitespace().next().unwrap_or_default()
    }

    fn supports_length(&self, length: usize) -> bool {
        self.supported_lengths().contains(&length)
    }

    /// Run a prediction with default configuration
    fn predict(&self, request: PredictionRequest) -> ImmunopredResult<ResultTable> {
        Predictor::default().run(self, request)
    }
}
