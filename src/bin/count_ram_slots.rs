//! count-ram-slots - print how many memory slots an HDT DMI dump shows populated

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use hdt_facts::commands;

/// Count populated RAM slots (DIMM, SODIMM, RIMM) in an HDT DMI dump
#[derive(Parser)]
#[command(name = "count-ram-slots")]
#[command(version)]
struct Cli {
    /// Path to the DMI dump file
    dmi_file: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = commands::bootstrap()?;

    println!("{}", commands::ram_slots(&cli.dmi_file, &config)?);
    Ok(())
}
