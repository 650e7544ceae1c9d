//! Network interface facts from HDT PCI dumps

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::dump::{BlockSequence, DumpError};

pub const CLASS_ID_KEY: &str = "pci_device.class_id";
pub const VENDOR_KEY: &str = "pci_device.vendor_name";
pub const PRODUCT_KEY: &str = "pci_device.product_name";

/// PCI class 02.00.00: Ethernet controller
pub const WIRED_CLASS_ID: &str = "02.00.00";
/// PCI class 02.80.00: other network controller (wireless on HDT targets)
pub const WIRELESS_CLASS_ID: &str = "02.80.00";

/// Which kind of network controller to list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NicKind {
    Wired,
    Wireless,
}

impl NicKind {
    pub fn class_id(self) -> &'static str {
        match self {
            Self::Wired => WIRED_CLASS_ID,
            Self::Wireless => WIRELESS_CLASS_ID,
        }
    }

    /// Text placed before the ordinal when more than one device is listed
    fn ordinal_prefix(self) -> &'static str {
        match self {
            Self::Wired => "NIC",
            Self::Wireless => "",
        }
    }
}

impl fmt::Display for NicKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wired => f.write_str("wired"),
            Self::Wireless => f.write_str("wireless"),
        }
    }
}

/// A matching network controller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NicEntry {
    pub vendor: String,
    pub product: String,
}

/// Collect every controller of `kind`, in dump order.
pub fn find_nics(blocks: &BlockSequence, kind: NicKind) -> Result<Vec<NicEntry>, DumpError> {
    let mut nics = Vec::new();

    for block in blocks.with_value(CLASS_ID_KEY, kind.class_id()) {
        let entry = NicEntry {
            vendor: block.require(VENDOR_KEY)?.to_string(),
            product: block.require(PRODUCT_KEY)?.to_string(),
        };
        tracing::debug!(
            block = block.index,
            %kind,
            vendor = %entry.vendor,
            product = %entry.product,
            "matched network controller"
        );
        nics.push(entry);
    }

    Ok(nics)
}

/// Render controllers as one line.
///
/// A single device is printed bare (`Intel - X `). With two or more, each
/// entry gets its 1-based ordinal (`1-`, `2-`, ... or `NIC1-`, `NIC2-`, ...)
/// and entries after the first are separated by an extra space. Slashes are
/// replaced with dashes so the result can be used in file names.
pub fn format_nics(entries: &[NicEntry], kind: NicKind) -> String {
    let mut out = String::new();

    for (idx, entry) in entries.iter().enumerate() {
        if entries.len() > 1 {
            if idx > 0 {
                out.push(' ');
            }
            out.push_str(kind.ordinal_prefix());
            out.push_str(&format!("{}-", idx + 1));
        }
        out.push_str(&format!("{} - {} ", entry.vendor, entry.product));
    }

    out.replace('/', "-")
}

/// Find and format controllers of `kind` in one pass.
pub fn describe_nics(blocks: &BlockSequence, kind: NicKind) -> Result<String, DumpError> {
    let nics = find_nics(blocks, kind)?;
    Ok(format_nics(&nics, kind))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dump::parse_str;

    fn nic(vendor: &str, product: &str) -> NicEntry {
        NicEntry {
            vendor: vendor.to_string(),
            product: product.to_string(),
        }
    }

    const PCI_DUMP: &str = r#"{
  "pci_device.class_id": "06.00.00",
  "pci_device.vendor_name": "Intel Corporation",
  "pci_device.product_name": "Host bridge",
}{
  "pci_device.class_id": "02.00.00",
  "pci_device.vendor_name": "Realtek",
  "pci_device.product_name": "RTL8111/8168B PCI Express Gigabit Ethernet",
}{
  "pci_device.class_id": "02.80.00",
  "pci_device.vendor_name": "Intel Corporation",
  "pci_device.product_name": "PRO/Wireless 3945ABG Network Connection",
}{
  "pci_device.class_id": "02.80.00",
  "pci_device.vendor_name": "Atheros",
  "pci_device.product_name": "AR5212/AR5213",
}
"#;

    #[test]
    fn test_no_match_is_empty() {
        let blocks = parse_str("{\n\"pci_device.class_id\": \"06.00.00\",\n}").unwrap();
        assert_eq!(describe_nics(&blocks, NicKind::Wired).unwrap(), "");
    }

    #[test]
    fn test_single_match_has_no_ordinal() {
        assert_eq!(format_nics(&[nic("Intel", "X")], NicKind::Wired), "Intel - X ");
        assert_eq!(
            format_nics(&[nic("Intel", "X")], NicKind::Wireless),
            "Intel - X "
        );
    }

    #[test]
    fn test_two_wireless_matches_from_dump() {
        let blocks = parse_str(PCI_DUMP).unwrap();
        assert_eq!(
            describe_nics(&blocks, NicKind::Wireless).unwrap(),
            "1-Intel Corporation - PRO-Wireless 3945ABG Network Connection  2-Atheros - AR5212-AR5213 "
        );
    }

    #[test]
    fn test_single_wired_match_from_dump() {
        let blocks = parse_str(PCI_DUMP).unwrap();
        assert_eq!(
            describe_nics(&blocks, NicKind::Wired).unwrap(),
            "Realtek - RTL8111-8168B PCI Express Gigabit Ethernet "
        );
    }

    #[test]
    fn test_three_wired_matches_are_all_numbered() {
        let entries = [nic("A", "X"), nic("B", "Y"), nic("C", "Z")];
        assert_eq!(
            format_nics(&entries, NicKind::Wired),
            "NIC1-A - X  NIC2-B - Y  NIC3-C - Z "
        );
        assert_eq!(
            format_nics(&entries, NicKind::Wireless),
            "1-A - X  2-B - Y  3-C - Z "
        );
    }

    #[test]
    fn test_missing_vendor_is_an_error() {
        let blocks = parse_str(
            "{\n\"pci_device.class_id\": \"02.00.00\",\n\"pci_device.product_name\": \"X\",\n}",
        )
        .unwrap();
        match describe_nics(&blocks, NicKind::Wired) {
            Err(DumpError::MissingKey { key, .. }) => assert_eq!(key, VENDOR_KEY),
            other => panic!("Expected MissingKey, got {:?}", other),
        }
    }

    #[test]
    fn test_describe_is_repeatable() {
        let blocks = parse_str(PCI_DUMP).unwrap();
        let first = describe_nics(&blocks, NicKind::Wireless).unwrap();
        let second = describe_nics(&blocks, NicKind::Wireless).unwrap();
        assert_eq!(first, second);
    }
}
