// CLI command dispatch

pub mod args;

pub use args::{Args, Command};

use crate::analysis;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::output::DiagramRenderer;
use crate::snapshot;
use std::path::{Path, PathBuf};

/// Run the parsed command
pub fn run(args: Args) -> Result<()> {
    match args.command {
        Command::Analyze {
            path,
            only,
            exclude,
            config,
            format,
            grammar,
            max_elements,
            output,
            verbose,
        } => analyze_command(
            &path,
            &only,
            exclude,
            config.as_deref(),
            &format,
            grammar.as_deref(),
            max_elements,
            output.as_deref(),
            verbose,
        ),
    }
}

#[allow(clippy::too_many_arguments)]
fn analyze_command(
    path: &Path,
    only: &[String],
    exclude: Vec<String>,
    config_path: Option<&Path>,
    format: &str,
    grammar: Option<&str>,
    max_elements: Option<usize>,
    output: Option<&Path>,
    verbose: bool,
) -> Result<()> {
    let mut config = match config_path {
        Some(p) => Config::load(p)?,
        None => Config::load_or_default(&path.join("codemap.toml")),
    };
    // Configuration errors fail fast, before any loading or rendering
    config.merge_cli(grammar, max_elements, exclude)?;

    let renderer = DiagramRenderer::new(config.diagrams.grammar, config.diagrams.max_elements)?;

    let snapshot = snapshot::load(path, &config.analysis.exclude)?;
    if verbose {
        println!("Loaded {} files from {}", snapshot.len(), path.display());
    }

    let selected = if only.is_empty() { None } else { Some(only) };
    let analysis = analysis::analyze_selected(&snapshot, selected);

    match format {
        "json" => {
            let json = serde_json::to_string_pretty(&analysis)?;
            write_output(output, "analysis.json", &json)?;
        }
        "diagrams" => {
            let diagrams = renderer.render_all(&analysis);
            match output {
                Some(dir) => {
                    for (kind, text) in &diagrams {
                        write_output(Some(dir), &format!("{kind}.txt"), text)?;
                    }
                }
                None => {
                    for (kind, text) in &diagrams {
                        println!("## {kind}\n\n{text}\n");
                    }
                }
            }
        }
        other => {
            return Err(Error::config_validation(format!(
                "unknown output format: {other}"
            )))
        }
    }

    if verbose {
        let stats = &analysis.statistics;
        println!(
            "Analyzed {} files, {} lines, {} edges",
            stats.total_files,
            stats.total_loc,
            analysis.edges.len()
        );
    }

    Ok(())
}

/// Write to `dir/name`, or stdout when no directory was given
fn write_output(dir: Option<&Path>, name: &str, contents: &str) -> Result<()> {
    match dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let target: PathBuf = dir.join(name);
            std::fs::write(&target, contents)?;
            println!("Wrote {}", target.display());
        }
        None => println!("{contents}"),
    }
    Ok(())
}
