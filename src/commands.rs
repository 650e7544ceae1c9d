//! Entry points behind the command-line programs
//!
//! Each function reads one dump, runs one extractor and returns the line to
//! print. Binaries stay thin wrappers around these.

use anyhow::{Context, Result};
use std::path::Path;

use crate::config::Config;
use crate::dump::parse_file;
use crate::hardware::nic::{describe_nics, NicKind};
use crate::hardware::ram::{classify_ram_size, count_memory_banks_with};
use crate::logging;

/// Load configuration and install logging.
pub fn bootstrap() -> Result<Config> {
    let config = Config::load()?;
    logging::init(&config.logging);
    Ok(config)
}

/// Number of populated memory slots in a DMI dump
pub fn ram_slots(path: &Path, config: &Config) -> Result<String> {
    let blocks = parse_file(path)?;
    let banks = count_memory_banks_with(&blocks, config.ram.form_factors.as_slice())
        .with_context(|| format!("Failed to count memory banks in {}", path.display()))?;

    tracing::info!(banks, "counted memory banks");
    Ok(banks.to_string())
}

/// Rounded RAM size from a memory dump.
///
/// `None` means the dump has no e820 block and the configured policy is to
/// stay silent.
pub fn ram_size(path: &Path, config: &Config) -> Result<Option<String>> {
    let blocks = parse_file(path)?;
    let size = classify_ram_size(&blocks)
        .and_then(|size| config.ram.on_missing_e820.apply(size))
        .with_context(|| format!("Failed to read RAM size from {}", path.display()))?;

    if let Some(ref size) = size {
        tracing::info!(total_mib = size.total_mib, label = %size, "classified RAM size");
    }
    Ok(size.map(|s| s.to_string()))
}

/// Wired or wireless controllers in a PCI dump, formatted as one line
pub fn nics(path: &Path, kind: NicKind) -> Result<String> {
    let blocks = parse_file(path)?;
    describe_nics(&blocks, kind)
        .with_context(|| format!("Failed to list {} controllers in {}", kind, path.display()))
}

/// Parsed blocks of any dump as pretty JSON
pub fn blocks_json(path: &Path) -> Result<String> {
    let blocks = parse_file(path)?;
    serde_json::to_string_pretty(&blocks).context("Failed to serialize blocks to JSON")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MissingBlockPolicy;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn dump_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_ram_slots_output() {
        let dmi = dump_file(
            r#"{
  "dmi.item": "bios",
}{
  "Memory Bank": "0",
  "dmi.memory.form_factor": "SODIMM",
}{
  "Memory Bank": "1",
  "dmi.memory.form_factor": "SODIMM",
}{
  "Memory Bank": "2",
  "dmi.memory.form_factor": "ROM",
}
"#,
        );
        assert_eq!(ram_slots(dmi.path(), &Config::default()).unwrap(), "2");
    }

    #[test]
    fn test_ram_size_output() {
        let memory = dump_file(
            "{\n\"dmi.item\": \"memory via e820\",\n\"memory.total.size (MiB)\": \"4096\",\n}\n",
        );
        assert_eq!(
            ram_size(memory.path(), &Config::default()).unwrap(),
            Some("4GB".to_string())
        );
    }

    #[test]
    fn test_ram_size_missing_block() {
        let memory = dump_file("{\n\"dmi.item\": \"bios\",\n}\n");
        let mut config = Config::default();
        assert_eq!(ram_size(memory.path(), &config).unwrap(), None);

        config.ram.on_missing_e820 = MissingBlockPolicy::Error;
        let err = ram_size(memory.path(), &config).unwrap_err();
        assert!(format!("{:#}", err).contains("memory via e820"));
    }

    #[test]
    fn test_nics_output() {
        let pci = dump_file(
            "{\n\"pci_device.class_id\": \"02.00.00\",\n\"pci_device.vendor_name\": \"Intel\",\n\"pci_device.product_name\": \"X\",\n}\n",
        );
        assert_eq!(nics(pci.path(), NicKind::Wired).unwrap(), "Intel - X ");
        assert_eq!(nics(pci.path(), NicKind::Wireless).unwrap(), "");
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = ram_slots(Path::new("/nonexistent/dmi.txt"), &Config::default()).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/dmi.txt"));
    }

    #[test]
    fn test_blocks_json() {
        let dump = dump_file("{\n\"a\": \"1\",\n}{\n\"b\": \"2\",\n}\n");
        let json = blocks_json(dump.path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value.as_array().map(Vec::len), Some(2));
        assert_eq!(value[1]["fields"]["b"], "2");
    }
}
