//! Memory facts from HDT dumps
//!
//! Two independent questions are answered here:
//! - how many memory slots are populated (DMI dump, `Memory Bank` blocks)
//! - how much RAM the machine has, rounded to a commonly sold size
//!   (memory dump, `memory via e820` block)

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::dump::{BlockSequence, DumpError};

/// Key present on every DMI memory-device block
pub const MEMORY_BANK_KEY: &str = "Memory Bank";
/// Physical packaging of a memory device (DIMM, SODIMM, ROM, ...)
pub const FORM_FACTOR_KEY: &str = "dmi.memory.form_factor";
/// Item name key of a memory dump block
pub const DMI_ITEM_KEY: &str = "dmi.item";
/// Item name of the BIOS memory-map summary block
pub const E820_ITEM: &str = "memory via e820";
/// Total memory reported by the e820 block
pub const TOTAL_SIZE_KEY: &str = "memory.total.size (MiB)";

/// Form factors that count as a populated slot.
///
/// Some boards also tag their firmware ROM as a "Memory Bank", so the bank
/// key alone over-counts.
pub const DEFAULT_FORM_FACTORS: [&str; 3] = ["DIMM", "SODIMM", "RIMM"];

/// Count populated memory slots using the default form factors.
pub fn count_memory_banks(blocks: &BlockSequence) -> Result<usize, DumpError> {
    count_memory_banks_with(blocks, &DEFAULT_FORM_FACTORS)
}

/// Count `Memory Bank` blocks whose form factor starts with one of `form_factors`.
///
/// A bank without a form factor is an error, not a skip.
pub fn count_memory_banks_with<S: AsRef<str>>(
    blocks: &BlockSequence,
    form_factors: &[S],
) -> Result<usize, DumpError> {
    let mut banks = 0;

    for block in blocks.iter().filter(|b| b.contains(MEMORY_BANK_KEY)) {
        let form_factor = block.require(FORM_FACTOR_KEY)?;
        if form_factors
            .iter()
            .any(|prefix| form_factor.starts_with(prefix.as_ref()))
        {
            banks += 1;
        } else {
            tracing::debug!(
                block = block.index,
                form_factor,
                "skipping memory bank with non-module form factor"
            );
        }
    }

    Ok(banks)
}

/// One rounding bucket: totals strictly between `low` and `high` get `label`
struct SizeBucket {
    low: i64,
    high: i64,
    label: &'static str,
}

const fn bucket(low: i64, high: i64, label: &'static str) -> SizeBucket {
    SizeBucket { low, high, label }
}

/// Checked top to bottom, first match wins; 1099 lands in the 1GB bucket.
const SIZE_BUCKETS: [SizeBucket; 13] = [
    bucket(220, 280, "256MB"),
    bucket(340, 398, "384MB"),
    bucket(440, 530, "512MB"),
    bucket(550, 650, "640MB"),
    bucket(690, 790, "768MB"),
    bucket(900, 1100, "1GB"),
    bucket(1099, 1300, "1.2GB"),
    bucket(1400, 1600, "1.5GB"),
    bucket(1900, 2100, "2GB"),
    bucket(2300, 2700, "2.5GB"),
    bucket(2900, 3100, "3GB"),
    bucket(3300, 3700, "3.5GB"),
    bucket(3800, 4200, "4GB"),
];

/// Total RAM as reported by e820, plus the common size it rounds to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RamSize {
    /// Raw total in MiB
    pub total_mib: i64,
    /// Common capacity label, if the total falls in a known bucket
    pub rounded: Option<String>,
}

impl RamSize {
    /// Round a raw MiB total to the nearest commonly sold capacity.
    pub fn from_total_mib(total_mib: i64) -> Self {
        let rounded = SIZE_BUCKETS
            .iter()
            .find(|b| b.low < total_mib && total_mib < b.high)
            .map(|b| b.label.to_string());

        Self { total_mib, rounded }
    }
}

impl fmt::Display for RamSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.rounded {
            Some(label) => f.write_str(label),
            None => write!(f, "{} MB", self.total_mib),
        }
    }
}

/// Find the e820 block and classify its total size.
///
/// Returns `Ok(None)` when the dump has no e820 block; callers decide whether
/// that is an error.
pub fn classify_ram_size(blocks: &BlockSequence) -> Result<Option<RamSize>, DumpError> {
    let mut e820 = blocks.with_value(DMI_ITEM_KEY, E820_ITEM);

    let Some(block) = e820.next() else {
        tracing::debug!("no e820 block in memory dump");
        return Ok(None);
    };

    let extra = e820.count();
    if extra > 0 {
        tracing::warn!(
            block = block.index,
            extra,
            "memory dump has more than one e820 block, using the first"
        );
    }

    let total_mib = block.require_int(TOTAL_SIZE_KEY)?;
    Ok(Some(RamSize::from_total_mib(total_mib)))
}
