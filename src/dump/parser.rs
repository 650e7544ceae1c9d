//! Line-oriented block parser

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use super::block::BlockSequence;
use super::error::DumpError;

/// What a single stripped dump line means to the parser
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// `{` opens a new block
    BlockStart,
    /// `}{` closes one block and opens the next on the same line
    FusedBlockStart,
    /// A lone `}`
    BlockEnd,
    /// `key: value`, split on the first colon
    Field { key: &'a str, value: &'a str },
    /// A body line without any colon, including one left empty by stripping
    Malformed,
}

/// Remove every quote character, then trim whitespace and commas from both ends.
///
/// Applying it twice gives the same result as applying it once.
pub fn strip_line(raw: &str) -> String {
    raw.replace('"', "")
        .trim_matches(|c: char| c == ',' || c.is_whitespace())
        .to_string()
}

/// Classify a line that already went through [`strip_line`].
pub fn classify_line(line: &str) -> LineKind<'_> {
    if line.starts_with('{') {
        LineKind::BlockStart
    } else if line.starts_with("}{") {
        LineKind::FusedBlockStart
    } else if line == "}" {
        LineKind::BlockEnd
    } else {
        match line.split_once(':') {
            Some((key, value)) => LineKind::Field {
                key: key.trim(),
                value: value.trim(),
            },
            None => LineKind::Malformed,
        }
    }
}

/// Parse raw dump lines into blocks.
pub fn parse_lines<I, S>(lines: I) -> Result<BlockSequence, DumpError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut blocks = BlockSequence::new();

    for (idx, raw) in lines.into_iter().enumerate() {
        let line_no = idx + 1;
        let line = strip_line(raw.as_ref());

        match classify_line(&line) {
            LineKind::BlockStart | LineKind::FusedBlockStart => {
                let block = blocks.open_block();
                tracing::trace!(line_no, block = block.index, "block opened");
            }
            LineKind::BlockEnd => {}
            LineKind::Field { key, value } => {
                let Some(block) = blocks.current_mut() else {
                    return Err(DumpError::OrphanField {
                        line_no,
                        line: line.clone(),
                    });
                };
                if let Some(previous) = block.insert(key, value) {
                    tracing::warn!(
                        line_no,
                        block = block.index,
                        key,
                        previous = %previous,
                        "repeated key overwrites earlier value"
                    );
                }
            }
            LineKind::Malformed => {
                return Err(DumpError::MalformedLine { line_no, line });
            }
        }
    }

    tracing::debug!(blocks = blocks.len(), "dump parsed");
    Ok(blocks)
}

/// Parse a whole dump held in memory.
pub fn parse_str(text: &str) -> Result<BlockSequence, DumpError> {
    parse_lines(text.lines())
}

/// Read and parse a dump file.
///
/// Bytes that are not valid UTF-8 are replaced, not rejected.
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<BlockSequence, DumpError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| DumpError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let mut bytes = Vec::new();
    BufReader::new(file)
        .read_to_end(&mut bytes)
        .map_err(|source| DumpError::Read {
            path: path.to_path_buf(),
            source,
        })?;

    tracing::debug!(path = %path.display(), bytes = bytes.len(), "read dump file");
    parse_str(&String::from_utf8_lossy(&bytes))
}
