use crate::cli::output::*;
use anyhow::Context;
use clap::{Args, ValueEnum};
use immunopred_bio::{Allele, Peptide};
use immunopred_core::{load_config, load_default_config, ImmunopredError};
use immunopred_tools::{Method, PredictionRequest, Predictor, ResultTable};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Tsv,
    Json,
    Table,
}

#[derive(Args)]
pub struct PredictArgs {
    /// Prediction method, e.g. netmhcpan-2.8 (repeat to combine methods)
    #[arg(short, long = "method", value_name = "ID", required = true)]
    pub methods: Vec<String>,

    /// Peptide file (one sequence per line, or FASTA) or comma-separated sequences
    #[arg(short, long, value_name = "FILE|SEQ,...")]
    pub peptides: String,

    /// Comma-separated alleles such as A*02:01 (default: all supported)
    #[arg(short, long, value_delimiter = ',')]
    pub alleles: Vec<String>,

    /// Executable to run in place of the method's default binary
    #[arg(long, value_name = "EXE")]
    pub command: Option<String>,

    /// Extra options passed verbatim to the predictor
    #[arg(long, allow_hyphen_values = true)]
    pub options: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "tsv")]
    pub format: OutputFormat,

    /// Configuration file (default: $IMMUNOPRED_HOME/config.toml)
    #[arg(short, long, env = "IMMUNOPRED_CONFIG")]
    pub config: Option<PathBuf>,

    /// Write results here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn run(args: PredictArgs) -> anyhow::Result<()> {
    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => load_default_config()?,
    };
    let predictor = Predictor::new(config)?;

    let methods = args
        .methods
        .iter()
        .map(|m| m.parse::<Method>())
        .collect::<Result<Vec<_>, _>>()?;
    let peptides = read_peptides(&args.peptides)?;
    let alleles = args
        .alleles
        .iter()
        .map(|a| a.trim().parse::<Allele>())
        .collect::<Result<Vec<_>, _>>()?;

    let mut tables = Vec::with_capacity(methods.len());
    for method in methods {
        tracing::info!("Running {}", method.display_name());
        let adapter = method.create();

        let mut request = PredictionRequest::new(peptides.clone());
        if !alleles.is_empty() {
            request = request.alleles(alleles.clone());
        }
        if let Some(command) = &args.command {
            request = request.command(command.clone());
        }
        if let Some(options) = &args.options {
            request = request.options(options.clone());
        }

        tables.push(predictor.run(adapter.as_ref(), request)?);
    }
    let table = ResultTable::concat(tables);

    for w in table.warnings() {
        warning(&w.to_string());
    }

    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            write_table(&table, args.format, &mut writer)?;
            writer.flush()?;
            info(&format!("Wrote {} rows to {}", table.len(), path.display()));
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            write_table(&table, args.format, &mut writer)?;
        }
    }

    Ok(())
}

fn write_table<W: Write>(table: &ResultTable, format: OutputFormat, writer: &mut W) -> anyhow::Result<()> {
    match format {
        OutputFormat::Tsv => table.write_tsv(writer)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *writer, table)?;
            writeln!(writer)?;
        }
        OutputFormat::Table => {
            let mut display = create_standard_table();
            let mut header = vec![header_cell("Seq"), header_cell("Method")];
            header.extend(table.alleles().iter().map(|a| header_cell(&a.name())));
            display.set_header(header);

            for row in table.rows() {
                let mut cells = vec![
                    comfy_table::Cell::new(&row.label.seq),
                    comfy_table::Cell::new(&row.label.method),
                ];
                cells.extend(
                    table
                        .alleles()
                        .iter()
                        .map(|a| score_cell(row.scores.get(&a.name()).copied())),
                );
                display.add_row(cells);
            }
            writeln!(writer, "{}", display)?;
        }
    }
    Ok(())
}

/// Peptides from a file, or from a comma-separated list
fn read_peptides(source: &str) -> anyhow::Result<Vec<Peptide>> {
    let path = Path::new(source);
    let peptides = if path.is_file() {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read peptides from {}", path.display()))?;
        parse_peptide_text(&text)
    } else {
        source
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(Peptide::new)
            .collect()
    };

    if peptides.is_empty() {
        return Err(ImmunopredError::InvalidInput(format!("No peptides in '{}'", source)).into());
    }
    Ok(peptides)
}

/// One sequence per line, or FASTA records whose id is the first header word.
/// Blank lines and `#` comments are ignored.
fn parse_peptide_text(text: &str) -> Vec<Peptide> {
    let mut peptides = Vec::new();
    let mut record: Option<(String, String)> = None;

    for line in text.lines().map(str::trim) {
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some(header) = line.strip_prefix('>') {
            if let Some((id, seq)) = record.take() {
                peptides.push(Peptide::new(seq).with_id(id));
            }
            let id = header.split_whitespace().next().unwrap_or_default();
            record = Some((id.to_string(), String::new()));
        } else if let Some((_, seq)) = record.as_mut() {
            seq.push_str(line);
        } else {
            peptides.push(Peptide::new(line));
        }
    }
    if let Some((id, seq)) = record {
        peptides.push(Peptide::new(seq).with_id(id));
    }
    peptides
}
