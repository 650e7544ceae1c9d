//! hdt-facts - summarize HDT hardware dumps
//!
//! Combines the single-purpose tools (`count-ram-slots`, `get-ram-size`,
//! `find-nics`) behind one command and adds a combined report.

use anyhow::Result;
use clap::{ArgGroup, Parser, Subcommand};
use colored::*;
use std::path::PathBuf;

use hdt_facts::commands;
use hdt_facts::config::{self, Config};
use hdt_facts::hardware::nic::NicKind;
use hdt_facts::hardware::{DumpPaths, HardwareFacts};

/// hdt-facts - Extract hardware facts from HDT dumps
#[derive(Parser)]
#[command(name = "hdt-facts")]
#[command(author = "ForgeMyPC")]
#[command(version)]
#[command(about = "Extract RAM and network facts from HDT hardware dumps")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Count populated memory slots in a DMI dump
    RamSlots {
        /// Path to the DMI dump file
        file: PathBuf,
    },

    /// Print total RAM rounded to a common size
    RamSize {
        /// Path to the memory dump file
        file: PathBuf,
    },

    /// List network controllers in a PCI dump
    #[command(group(ArgGroup::new("mode").required(true).args(["wired", "wireless"])))]
    Nics {
        /// List Ethernet (wired) controllers
        #[arg(short = 'e', long)]
        wired: bool,

        /// List wireless controllers
        #[arg(short = 'w', long)]
        wireless: bool,

        /// Path to the PCI dump file
        file: PathBuf,
    },

    /// Summarize every fact available from the given dumps
    Report {
        /// DMI dump file
        #[arg(long)]
        dmi: Option<PathBuf>,

        /// Memory dump file
        #[arg(long)]
        memory: Option<PathBuf>,

        /// PCI dump file
        #[arg(long)]
        pci: Option<PathBuf>,

        /// Print JSON instead of a table
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Print the parsed blocks of any dump as JSON
    Blocks {
        /// Path to the dump file
        file: PathBuf,
    },

    /// Show configuration path and effective settings
    Config {
        /// Write a default config file if none exists
        #[arg(long, default_value_t = false)]
        init: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = commands::bootstrap()?;

    match cli.command {
        Commands::RamSlots { file } => {
            println!("{}", commands::ram_slots(&file, &config)?);
        }
        Commands::RamSize { file } => {
            if let Some(size) = commands::ram_size(&file, &config)? {
                println!("{}", size);
            }
        }
        Commands::Nics { wired, file, .. } => {
            let kind = if wired {
                NicKind::Wired
            } else {
                NicKind::Wireless
            };
            println!("{}", commands::nics(&file, kind)?);
        }
        Commands::Report {
            dmi,
            memory,
            pci,
            json,
        } => {
            if dmi.is_none() && memory.is_none() && pci.is_none() {
                anyhow::bail!("Give at least one of --dmi, --memory or --pci");
            }

            let paths = DumpPaths { dmi, memory, pci };
            let facts = HardwareFacts::collect(&paths, &config)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&facts)?);
            } else {
                println!("{}", facts.display());
            }
        }
        Commands::Blocks { file } => {
            println!("{}", commands::blocks_json(&file)?);
        }
        Commands::Config { init } => {
            show_config_info(&config, init)?;
        }
    }

    Ok(())
}

fn show_config_info(cfg: &Config, init: bool) -> Result<()> {
    println!("{}", "hdt-facts Configuration\n".bright_cyan().bold());

    match config::get_config_path() {
        Ok(path) => {
            println!("{} {}", "Config file:".bright_yellow(), path.bright_white());
            if std::path::Path::new(&path).exists() {
                println!("  {} {}", "Status:".bright_cyan(), "Exists".bright_green());
            } else if init {
                Config::init()?;
                println!("  {} {}", "Status:".bright_cyan(), "Created".bright_green());
            } else {
                println!(
                    "  {} {}",
                    "Status:".bright_cyan(),
                    "Not created yet (using defaults)".bright_yellow()
                );
            }
        }
        Err(e) => {
            println!(
                "{} Could not determine config path: {}",
                "Error:".bright_red(),
                e
            );
        }
    }

    println!("\n{}", "RAM settings:".bright_white().bold());
    println!(
        "  {} {}",
        "Form factors:".bright_cyan(),
        cfg.ram.form_factors.join(", ").bright_white()
    );
    println!(
        "  {} {:?}",
        "Missing e820 block:".bright_cyan(),
        cfg.ram.on_missing_e820
    );

    println!("\n{}", "Logging:".bright_white().bold());
    println!(
        "  {} {}",
        "Filter:".bright_cyan(),
        cfg.logging.filter.bright_white()
    );
    println!(
        "  {}",
        "RUST_LOG overrides the configured filter.".bright_black()
    );

    Ok(())
}
