//! build-template-bundle
//!
//! Bundles every visible file of a template directory into one JSON document
//! mapping `<source dir>/<file name>` to the file's text.
//!
//! Usage: `build-template-bundle [SOURCE_DIR] [DEST_FILE]`

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use template_bundler::build::{
    DEFAULT_SOURCE_DIR, collect_templates, default_destination, visible_filenames, write_bundle,
};
use tracing_subscriber::EnvFilter;

/// Bundle a template directory into a single JSON file.
#[derive(Debug, Parser)]
#[command(name = "build-template-bundle", version, about)]
struct Cli {
    /// Directory holding the templates.
    #[arg(default_value = DEFAULT_SOURCE_DIR)]
    source_dir: String,

    /// Bundle file to write. Defaults to `<SOURCE_DIR>.json`.
    dest_file: Option<String>,
}

fn run(cli: Cli) -> Result<()> {
    let dest_file = cli
        .dest_file
        .unwrap_or_else(|| default_destination(&cli.source_dir));

    println!("source directory:  {}", cli.source_dir);
    println!("destination file:  {}", dest_file);
    println!();

    let filenames = visible_filenames(&cli.source_dir)?;

    println!("filenames:");
    for filename in &filenames {
        println!("  {}", filename);
    }
    println!();

    let bundle = collect_templates(&cli.source_dir, &filenames)?;
    write_bundle(&PathBuf::from(&dest_file), &bundle)?;

    println!("templates bundle written to {}", dest_file);
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("{:#}", e);
        std::process::exit(1);
    }
}
