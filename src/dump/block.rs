//! Parsed dump records

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::error::DumpError;

/// One hardware item: every `key: value` line between two block openers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Position of the block in its dump (0-based)
    pub index: usize,
    /// Field values keyed by the text before the first colon
    pub fields: BTreeMap<String, String>,
}

impl Block {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            fields: BTreeMap::new(),
        }
    }

    /// Store a field, returning the value it replaced (if the key repeated)
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.fields.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// True when `key` is present and equal to `expected`
    pub fn has_value(&self, key: &str, expected: &str) -> bool {
        self.get(key) == Some(expected)
    }

    /// Look up a key the caller expects every matching block to carry.
    pub fn require(&self, key: &str) -> Result<&str, DumpError> {
        self.get(key).ok_or_else(|| DumpError::MissingKey {
            block: self.index,
            key: key.to_string(),
        })
    }

    /// Look up a key and parse it as a signed integer.
    pub fn require_int(&self, key: &str) -> Result<i64, DumpError> {
        let value = self.require(key)?;
        value
            .parse::<i64>()
            .map_err(|source| DumpError::InvalidNumber {
                key: key.to_string(),
                value: value.to_string(),
                source,
            })
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// All blocks of one dump, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockSequence {
    blocks: Vec<Block>,
}

impl BlockSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a new empty block at the end of the sequence and return it.
    pub fn open_block(&mut self) -> &mut Block {
        let index = self.blocks.len();
        self.blocks.push(Block::new(index));
        &mut self.blocks[index]
    }

    /// The block currently receiving fields, if any has been opened
    pub fn current_mut(&mut self) -> Option<&mut Block> {
        self.blocks.last_mut()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Block> {
        self.blocks.iter()
    }

    pub fn as_slice(&self) -> &[Block] {
        &self.blocks
    }

    /// Blocks where `key` is present and equals `value`, in file order
    pub fn with_value<'a>(
        &'a self,
        key: &'a str,
        value: &'a str,
    ) -> impl Iterator<Item = &'a Block> + 'a {
        self.blocks.iter().filter(move |b| b.has_value(key, value))
    }
}

impl<'a> IntoIterator for &'a BlockSequence {
    type Item = &'a Block;
    type IntoIter = std::slice::Iter<'a, Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.iter()
    }
}

impl From<Vec<Block>> for BlockSequence {
    fn from(mut blocks: Vec<Block>) -> Self {
        for (index, block) in blocks.iter_mut().enumerate() {
            block.index = index;
        }
        Self { blocks }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_reports_missing_key_with_block_index() {
        let mut seq = BlockSequence::new();
        seq.open_block();
        seq.open_block().insert("Memory Bank", "0");

        let block = &seq.as_slice()[1];
        match block.require("dmi.memory.form_factor") {
            Err(DumpError::MissingKey { block, key }) => {
                assert_eq!(block, 1);
                assert_eq!(key, "dmi.memory.form_factor");
            }
            other => panic!("Expected MissingKey, got {:?}", other),
        }
    }

    #[test]
    fn require_int_rejects_non_numeric_values() {
        let mut block = Block::new(0);
        block.insert("memory.total.size (MiB)", "2015");
        assert_eq!(block.require_int("memory.total.size (MiB)").unwrap(), 2015);

        block.insert("memory.total.size (MiB)", "2 GB");
        assert!(matches!(
            block.require_int("memory.total.size (MiB)"),
            Err(DumpError::InvalidNumber { .. })
        ));
    }

    #[test]
    fn repeated_key_keeps_last_value() {
        let mut block = Block::new(0);
        assert_eq!(block.insert("k", "first"), None);
        assert_eq!(block.insert("k", "second"), Some("first".to_string()));
        assert_eq!(block.get("k"), Some("second"));
        assert_eq!(block.len(), 1);
    }

    #[test]
    fn from_vec_renumbers_blocks() {
        let seq = BlockSequence::from(vec![Block::new(7), Block::new(7)]);
        let indices: Vec<usize> = seq.iter().map(|b| b.index).collect();
        assert_eq!(indices, vec![0, 1]);
    }
}
