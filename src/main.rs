//! Rulang AST CLI entry point.

mod cli;

use std::path::Path;

use clap::Parser;
use cli::{Cli, Command};
use rulang::diagnostics::format_diagnostic;
use rulang::pipeline::{kind_census, process_with_diagnostics, render_tree};
use rulang::{RulangDatabaseImpl, SourceTree};
use tracing::Level;

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .with_writer(std::io::stderr)
        .init();

    let db = RulangDatabaseImpl::default();
    match cli.command {
        Command::Render { file } => {
            let source = load(&db, &file);
            match render_tree(&db, source) {
                Some(text) => println!("{text}"),
                None => std::process::exit(1),
            }
        }
        Command::Census { file } => {
            let source = load(&db, &file);
            match kind_census(&db, source) {
                Some(census) => {
                    println!("{census}");
                    println!("Total: {}", census.total());
                }
                None => std::process::exit(1),
            }
        }
    }
}

/// Load a tree file and report its diagnostics, exiting if it cannot be read.
fn load(db: &RulangDatabaseImpl, path: &Path) -> SourceTree {
    let source = match db.input(path.to_path_buf()) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error reading file: {e}");
            std::process::exit(1);
        }
    };

    let result = process_with_diagnostics(db, source);
    tracing::info!(
        path = %path.display(),
        diagnostics = result.diagnostics.len(),
        "Processed syntax tree"
    );
    for diag in &result.diagnostics {
        eprintln!("{}", format_diagnostic(diag, path));
    }
    source
}
