//! find-nics - print wired or wireless network controllers from an HDT PCI dump

use anyhow::Result;
use clap::{ArgGroup, Parser};
use std::path::PathBuf;

use hdt_facts::commands;
use hdt_facts::hardware::nic::NicKind;

/// List network controllers as "<vendor> - <product>", numbered when there are several
#[derive(Parser)]
#[command(name = "find-nics")]
#[command(version)]
#[command(group(ArgGroup::new("mode").required(true).args(["wired", "wireless"])))]
struct Cli {
    /// List Ethernet (wired) controllers
    #[arg(short = 'e', long)]
    wired: bool,

    /// List wireless controllers
    #[arg(short = 'w', long)]
    wireless: bool,

    /// Path to the PCI dump file
    pci_file: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    commands::bootstrap()?;

    let kind = if cli.wired {
        NicKind::Wired
    } else {
        NicKind::Wireless
    };

    println!("{}", commands::nics(&cli.pci_file, kind)?);
    Ok(())
}
