//! get-ram-size - print the installed RAM size from an HDT memory dump

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use hdt_facts::commands;

/// Print total RAM rounded to a common size (e.g. 2015 MiB -> 2GB)
#[derive(Parser)]
#[command(name = "get-ram-size")]
#[command(version)]
struct Cli {
    /// Path to the memory dump file
    memory_file: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = commands::bootstrap()?;

    if let Some(size) = commands::ram_size(&cli.memory_file, &config)? {
        println!("{}", size);
    }
    Ok(())
}
