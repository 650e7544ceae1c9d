//! hdt-facts - summarize HDT hardware dumps
//!
//! HDT (Hardware Detection Tool) can export what it finds as text dumps, one
//! file per view (DMI, memory, PCI, ...). This crate parses those dumps and
//! answers three questions, each with a single line of output:
//! - how many memory slots are populated
//! - how much RAM is installed, rounded to a common size
//! - which wired or wireless network controllers are present

pub mod commands;
pub mod config;
pub mod dump;
pub mod hardware;
pub mod logging;
