use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use content_score::{Document, Rules, Scorer};

#[derive(Parser)]
#[command(
    name = "content-score",
    about = "Score content documents against an on-page optimization checklist",
    version
)]
struct Cli {
    /// JSON document files to score (reads stdin if none provided)
    files: Vec<PathBuf>,

    /// Number of top keywords to report (defaults to the rules setting)
    #[arg(long)]
    top: Option<usize>,

    /// JSON file overriding the built-in rules
    #[arg(long)]
    rules: Option<PathBuf>,

    /// Print the coarse four-check score instead of the full result
    #[arg(long)]
    quick: bool,

    /// Single-line JSON output
    #[arg(long)]
    compact: bool,
}

impl Cli {
    fn print<T: Serialize>(&self, value: &T) -> Result<()> {
        let json = if self.compact {
            serde_json::to_string(value)?
        } else {
            serde_json::to_string_pretty(value)?
        };
        println!("{json}");
        Ok(())
    }

    fn run(&self, scorer: &Scorer, source: &str, input: &str) -> Result<()> {
        let document: Document = serde_json::from_str(input)
            .with_context(|| format!("{source} is not a valid document"))?;
        if self.quick {
            self.print(&scorer.quick_score(
                &document.title,
                &document.content,
                &document.meta_description,
                document.word_count,
            ))
        } else {
            let top = self.top.unwrap_or(scorer.rules().top_keywords);
            self.print(&scorer.score(&document, top))
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let rules = match &cli.rules {
        Some(path) => Rules::from_path(path)?,
        None => Rules::default(),
    };
    let scorer = Scorer::new(rules)?;

    if cli.files.is_empty() {
        let mut input = String::new();
        std::io::stdin()
            .read_to_string(&mut input)
            .context("failed to read stdin")?;
        cli.run(&scorer, "stdin", &input)?;
    } else {
        for path in &cli.files {
            let input = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            cli.run(&scorer, &path.display().to_string(), &input)?;
        }
    }
    Ok(())
}
