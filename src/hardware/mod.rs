//! Hardware facts extracted from HDT dumps
//!
//! - `ram`: populated memory slots (DMI dump) and rounded RAM size (memory dump)
//! - `nic`: wired and wireless network controllers (PCI dump)

pub mod nic;
pub mod ram;
mod system;

pub use system::{DumpPaths, HardwareFacts};
