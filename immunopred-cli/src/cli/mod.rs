pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "immunopred",
    version,
    about = "Peptide-MHC binding prediction through the NetMHC family of tools",
    long_about = "immunopred runs external MHC binding predictors (NetMHC, NetMHCpan, NetMHCII, \
                  NetMHCIIpan, PickPocket, NetCTLpan) over a set of peptides and alleles, and \
                  reports one normalized score per peptide and allele."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Predict binding scores for peptides against alleles
    Predict(commands::predict::PredictArgs),

    /// List the available prediction methods
    Methods(commands::methods::MethodsArgs),
}
