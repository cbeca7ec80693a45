use std::fs;
use std::path::PathBuf;

use cfgnorm_dialect_ios::apply_ios;
use cfgnorm_ir::Document;
use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "config-model")]
#[command(about = "Normalize configuration files into one structured JSON document")]
struct Cli {
    /// Configuration files, applied in order onto one document.
    #[arg(required = true)]
    files: Vec<PathBuf>,

    #[arg(long)]
    compact: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut doc = Document::new();
    for file in &cli.files {
        let text = fs::read_to_string(file)?;
        apply_ios(&mut doc, &text).map_err(|err| format!("{}: {err}", file.display()))?;
    }

    if cli.compact {
        println!("{}", serde_json::to_string(&doc)?);
    } else {
        println!("{}", serde_json::to_string_pretty(&doc)?);
    }

    Ok(())
}
