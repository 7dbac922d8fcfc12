//! Command-line interface for the Rulang AST tools.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "rulang")]
#[command(about = "Inspect serialized Rulang syntax trees", long_about = None)]
pub struct Cli {
    /// Log decoding and loading steps to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the canonical rendering of a syntax tree file
    Render { file: PathBuf },
    /// Count the nodes of a syntax tree file by kind
    #[command(alias = "count")]
    Census { file: PathBuf },
}
