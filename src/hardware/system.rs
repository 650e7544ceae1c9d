//! Hardware facts aggregator

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::nic::{find_nics, format_nics, NicEntry, NicKind};
use super::ram::{classify_ram_size, count_memory_banks_with, RamSize};
use crate::config::Config;
use crate::dump::parse_file;

/// Paths of the per-view dump files HDT writes
#[derive(Debug, Clone, Default)]
pub struct DumpPaths {
    pub dmi: Option<PathBuf>,
    pub memory: Option<PathBuf>,
    pub pci: Option<PathBuf>,
}

/// Everything that could be extracted from the given dumps
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HardwareFacts {
    /// Populated memory slots (DMI dump)
    pub memory_slots: Option<usize>,
    /// Total RAM (memory dump)
    pub ram_size: Option<RamSize>,
    /// Ethernet controllers (PCI dump)
    pub wired_nics: Option<Vec<NicEntry>>,
    /// Wireless controllers (PCI dump)
    pub wireless_nics: Option<Vec<NicEntry>>,
}

impl HardwareFacts {
    /// Parse each dump that was provided and extract its facts
    pub fn collect(paths: &DumpPaths, config: &Config) -> Result<Self> {
        let mut facts = HardwareFacts::default();

        if let Some(ref path) = paths.dmi {
            let blocks = parse_file(path)?;
            let banks = count_memory_banks_with(&blocks, config.ram.form_factors.as_slice())
                .with_context(|| {
                    format!("Failed to count memory banks in {}", path.display())
                })?;
            facts.memory_slots = Some(banks);
        }

        if let Some(ref path) = paths.memory {
            let blocks = parse_file(path)?;
            let size = classify_ram_size(&blocks)
                .and_then(|size| config.ram.on_missing_e820.apply(size))
                .with_context(|| format!("Failed to read RAM size from {}", path.display()))?;
            facts.ram_size = size;
        }

        if let Some(ref path) = paths.pci {
            let blocks = parse_file(path)?;
            let context = || format!("Failed to list network controllers in {}", path.display());
            facts.wired_nics = Some(find_nics(&blocks, NicKind::Wired).with_context(context)?);
            facts.wireless_nics =
                Some(find_nics(&blocks, NicKind::Wireless).with_context(context)?);
        }

        Ok(facts)
    }

    /// Display facts as a formatted box
    pub fn display(&self) -> String {
        const WIDTH: usize = 62;
        let mut output = String::new();

        output.push_str(&format!("╔{}╗\n", "═".repeat(WIDTH)));
        output.push_str(&format!("║{:^WIDTH$}║\n", "HARDWARE DUMP SUMMARY"));
        output.push_str(&format!("╠{}╣\n", "═".repeat(WIDTH)));

        let format_line = |label: &str, content: &str| -> String {
            let content_width = WIDTH.saturating_sub(1);
            let text = format!("{}{}", label, content);
            let text: String = text.chars().take(content_width).collect();
            format!("║ {:<content_width$}║\n", text)
        };

        let not_dumped = "(no dump given)";

        match self.memory_slots {
            Some(slots) => output.push_str(&format_line("RAM slots: ", &slots.to_string())),
            None => output.push_str(&format_line("RAM slots: ", not_dumped)),
        }

        match &self.ram_size {
            Some(size) => output.push_str(&format_line(
                "RAM size:  ",
                &format!("{} ({} MiB reported)", size, size.total_mib),
            )),
            None => output.push_str(&format_line("RAM size:  ", "unknown")),
        }

        output.push_str(&format!("╠{}╣\n", "═".repeat(WIDTH)));

        for (label, kind, nics) in [
            ("Wired:     ", NicKind::Wired, &self.wired_nics),
            ("Wireless:  ", NicKind::Wireless, &self.wireless_nics),
        ] {
            match nics {
                Some(list) if list.is_empty() => output.push_str(&format_line(label, "none")),
                Some(list) => {
                    output.push_str(&format_line(label, format_nics(list, kind).trim_end()))
                }
                None => output.push_str(&format_line(label, not_dumped)),
            }
        }

        output.push_str(&format!("╚{}╝", "═".repeat(WIDTH)));

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn dump_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_collect_only_given_dumps() {
        let dmi = dump_file(
            "{\n\"Memory Bank\": \"0\",\n\"dmi.memory.form_factor\": \"DIMM\",\n}{\n\"Memory Bank\": \"1\",\n\"dmi.memory.form_factor\": \"DIMM\",\n}\n",
        );
        let paths = DumpPaths {
            dmi: Some(dmi.path().to_path_buf()),
            ..Default::default()
        };

        let facts = HardwareFacts::collect(&paths, &Config::default()).unwrap();
        assert_eq!(facts.memory_slots, Some(2));
        assert!(facts.ram_size.is_none());
        assert!(facts.wired_nics.is_none());

        let display = facts.display();
        assert!(display.contains("RAM slots: 2"));
        assert!(display.contains("(no dump given)"));
    }

    #[test]
    fn test_collect_all_dumps() {
        let memory = dump_file(
            "{\n\"dmi.item\": \"memory via e820\",\n\"memory.total.size (MiB)\": \"1015\",\n}\n",
        );
        let pci = dump_file(
            "{\n\"pci_device.class_id\": \"02.00.00\",\n\"pci_device.vendor_name\": \"Realtek\",\n\"pci_device.product_name\": \"RTL8139\",\n}\n",
        );
        let paths = DumpPaths {
            dmi: None,
            memory: Some(memory.path().to_path_buf()),
            pci: Some(pci.path().to_path_buf()),
        };

        let facts = HardwareFacts::collect(&paths, &Config::default()).unwrap();
        assert_eq!(facts.ram_size.as_ref().map(|s| s.to_string()), Some("1GB".to_string()));
        assert_eq!(facts.wired_nics.as_ref().map(Vec::len), Some(1));
        assert_eq!(facts.wireless_nics.as_ref().map(Vec::len), Some(0));

        let json = serde_json::to_string(&facts).unwrap();
        assert!(json.contains("\"total_mib\":1015"));
        assert!(json.contains("\"vendor\":\"Realtek\""));
    }

    #[test]
    fn test_collect_honors_missing_e820_policy() {
        let memory = dump_file("{\n\"dmi.item\": \"bios\",\n}\n");
        let paths = DumpPaths {
            memory: Some(memory.path().to_path_buf()),
            ..Default::default()
        };

        let mut config = Config::default();
        assert!(HardwareFacts::collect(&paths, &config).is_ok());

        config.ram.on_missing_e820 = crate::config::MissingBlockPolicy::Error;
        assert!(HardwareFacts::collect(&paths, &config).is_err());
    }
}
