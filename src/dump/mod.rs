//! HDT dump parsing
//!
//! HDT exports its DMI, memory and PCI views as a loose sequence of
//! brace-delimited records:
//!
//! ```text
//! {
//!   "dmi.item": "memory via e820",
//!   "memory.total.size (MiB)": "2015",
//! }{
//!   "dmi.item": "bios",
//! }
//! ```
//!
//! Only the syntax observed in real dumps is supported: block openers,
//! fused `}{` openers, bare `}` closers and `key: value` body lines.

mod block;
mod error;
mod parser;

pub use block::{Block, BlockSequence};
pub use error::DumpError;
pub use parser::{classify_line, parse_file, parse_lines, parse_str, strip_line, LineKind};
