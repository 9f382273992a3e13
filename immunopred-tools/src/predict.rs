//! Prediction driver
//!
//! Validates a request, partitions it into (length group, allele batch)
//! cycles, and runs each cycle through input writing, process execution,
//! output parsing and score normalization before assembling the table.

use crate::batching::{allele_batches, length_groups};
use crate::locator::ToolLocator;
use crate::result::{NestedScores, ResultTable};
use crate::runner::{run_shell, CommandTemplate};
use crate::traits::PredictionMethod;
use immunopred_bio::{Allele, IntoAlleles, IntoPeptides, Peptide};
use immunopred_core::{Config, ImmunopredError, ImmunopredResult};
use indexmap::IndexMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// One call's inputs
#[derive(Debug, Clone, Default)]
pub struct PredictionRequest {
    pub peptides: Vec<Peptide>,
    /// `None` predicts for every allele the method supports
    pub alleles: Option<Vec<Allele>>,
    /// Replacement for the executable token of the method's command
    pub command: Option<String>,
    /// Appended verbatim at the `{options}` placeholder
    pub options: Option<String>,
}

impl PredictionRequest {
    pub fn new(peptides: impl IntoPeptides) -> Self {
        Self {
            peptides: peptides.into_peptides(),
            ..Default::default()
        }
    }

    pub fn alleles(mut self, alleles: impl IntoAlleles) -> Self {
        self.alleles = Some(alleles.into_alleles());
        self
    }

    pub fn command(mut self, command: impl Into<String>) -> Self {
        self.command = Some(command.into());
        self
    }

    pub fn options(mut self, options: impl Into<String>) -> Self {
        self.options = Some(options.into());
        self
    }
}

/// Runs prediction methods under one configuration
#[derive(Debug, Clone)]
pub struct Predictor {
    config: Config,
    locator: ToolLocator,
}

impl Default for Predictor {
    fn default() -> Self {
        let config = Config::default();
        let locator = ToolLocator::new(config.tools_dir());
        Self { config, locator }
    }
}

impl Predictor {
    pub fn new(config: Config) -> ImmunopredResult<Self> {
        config.validate()?;
        let locator = ToolLocator::new(config.tools_dir());
        Ok(Self { config, locator })
    }

    pub fn with_locator(mut self, locator: ToolLocator) -> Self {
        self.locator = locator;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn run<M>(&self, method: &M, request: PredictionRequest) -> ImmunopredResult<ResultTable>
    where
        M: PredictionMethod + ?Sized,
    {
        let peptides = peptide_lookup(&request.peptides)?;
        let alleles = allele_lookup(method, request.alleles.as_deref())?;

        let template = CommandTemplate::new(method.command());
        let (template, executable) = self.resolve_executable(method, &template, request.command.as_deref())?;
        self.check_version(method, &executable)?;

        let (batches, mut warnings) = allele_batches(
            method.name(),
            alleles.iter().map(|(tool_name, allele)| {
                (
                    tool_name.as_str(),
                    allele.name(),
                    method.supported_alleles().supports(allele),
                )
            }),
            self.config.prediction.max_alleles_per_batch,
        );
        let (groups, length_warnings) = length_groups(
            method.name(),
            peptides.keys().map(String::as_str),
            method.supported_lengths(),
        );
        warnings.extend(length_warnings);

        let temp_dir = self.config.temp_dir();
        std::fs::create_dir_all(&temp_dir)?;

        let transform = method.score_transform();
        let mut nested = NestedScores::new();
        let mut invocations = 0usize;

        for (length, sequences) in &groups {
            for batch in &batches {
                tracing::debug!(
                    "{} {}: {} peptides of length {} against {} alleles",
                    method.name(),
                    method.version(),
                    sequences.len(),
                    length,
                    batch.len()
                );

                let mut input = scratch_file(&temp_dir, ".pep")?;
                method.write_input(sequences, input.as_file_mut())?;
                input.as_file_mut().flush()?;
                let output = scratch_file(&temp_dir, ".out")?;

                let command = template.render(
                    input.path(),
                    &batch.joined(),
                    output.path(),
                    request.options.as_deref(),
                );
                run_shell(&command)?;
                invocations += 1;

                let raw = method.parse_output(output.path())?;
                for (tool_allele, scores) in raw {
                    let Some(allele) = alleles.get(&tool_allele) else {
                        tracing::debug!("Ignoring unrequested allele {} in output", tool_allele);
                        continue;
                    };
                    for (seq, value) in scores {
                        let Some(peptide) = peptides.get(&seq) else {
                            continue;
                        };
                        if seq.len() != *length {
                            continue;
                        }
                        match transform.apply(value) {
                            Some(score) => {
                                nested
                                    .entry(allele.clone())
                                    .or_default()
                                    .insert(peptide.clone(), score);
                            }
                            None => tracing::debug!(
                                "Skipping out-of-range value {} for {} / {}",
                                value,
                                tool_allele,
                                seq
                            ),
                        }
                    }
                }
                // input and output are removed here, before the next cycle
            }
        }

        if nested.is_empty() {
            return Err(ImmunopredError::EmptyResult {
                method: method.name().to_string(),
            });
        }

        tracing::info!(
            "{} {}: {} alleles x {} peptides scored in {} invocations",
            method.name(),
            method.version(),
            nested.len(),
            nested.values().map(IndexMap::len).max().unwrap_or(0),
            invocations
        );

        Ok(ResultTable::from_nested(method.name(), method.version(), &nested).with_warnings(warnings))
    }

    /// Apply a command override (request first, then config) or find the binary
    fn resolve_executable<M>(
        &self,
        method: &M,
        template: &CommandTemplate,
        command: Option<&str>,
    ) -> ImmunopredResult<(CommandTemplate, PathBuf)>
    where
        M: PredictionMethod + ?Sized,
    {
        let id = method.id();
        if let Some(exe) = command.or_else(|| self.config.executable_for(&id)) {
            return Ok((template.with_executable(exe), PathBuf::from(exe)));
        }

        let name = template.executable();
        match self.locator.locate(name) {
            Some(path) => {
                let exe = path.to_string_lossy().to_string();
                Ok((template.with_executable(&exe), path))
            }
            None => Err(ImmunopredError::ExecutableNotFound {
                method: method.name().to_string(),
                version: method.version().to_string(),
                executable: name.to_string(),
            }),
        }
    }

    fn check_version<M>(&self, method: &M, executable: &Path) -> ImmunopredResult<()>
    where
        M: PredictionMethod + ?Sized,
    {
        match method.external_version(executable) {
            Some(external) if external != method.version() => Err(ImmunopredError::VersionMismatch {
                internal: method.version().to_string(),
                external,
            }),
            _ => Ok(()),
        }
    }
}

fn scratch_file(dir: &Path, suffix: &str) -> ImmunopredResult<NamedTempFile> {
    Ok(tempfile::Builder::new()
        .prefix("immunopred-")
        .suffix(suffix)
        .tempfile_in(dir)?)
}

/// Sequence -> peptide; a later duplicate sequence replaces an earlier one
fn peptide_lookup(peptides: &[Peptide]) -> ImmunopredResult<IndexMap<String, Peptide>> {
    let mut lookup = IndexMap::with_capacity(peptides.len());
    for peptide in peptides {
        peptide.validate()?;
        lookup.insert(peptide.sequence.clone(), peptide.clone());
    }
    Ok(lookup)
}

/// Tool allele string -> requested allele, in request order
fn allele_lookup<M>(method: &M, alleles: Option<&[Allele]>) -> ImmunopredResult<IndexMap<String, Allele>>
where
    M: PredictionMethod + ?Sized,
{
    let alleles = match alleles {
        Some(alleles) => {
            for allele in alleles {
                allele.validate()?;
            }
            alleles.to_vec()
        }
        None => method.supported_alleles().alleles(),
    };

    let converted = method.convert_alleles(&alleles);
    Ok(converted.into_iter().zip(alleles).collect())
}
