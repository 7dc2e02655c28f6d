//! CLI argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Extract structure, dependencies and diagrams from codebases
#[derive(Parser, Debug)]
#[command(name = "codemap")]
#[command(about = "Extract structure, dependencies and diagrams from codebases")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

impl Args {
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Analyze a codebase and print the analysis or its diagrams
    Analyze {
        /// Path to the codebase to analyze
        path: PathBuf,

        /// Restrict analysis to these paths (relative, can be repeated)
        #[arg(long)]
        only: Vec<String>,

        /// Path substrings to exclude (can be repeated)
        #[arg(long)]
        exclude: Vec<String>,

        /// Config file path
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output format (diagrams, json)
        #[arg(long, default_value = "diagrams")]
        format: String,

        /// Diagram grammar (mermaid, graphviz)
        #[arg(long)]
        grammar: Option<String>,

        /// Maximum elements per diagram
        #[arg(long)]
        max_elements: Option<usize>,

        /// Write output to this directory instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}
