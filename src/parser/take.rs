//! Zero-copy byte cursor for blob parsing

use crate::error::{Error, Result};

/// Position within a blob
#[derive(Debug, Clone, Copy)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// Bytes not yet consumed
    pub fn remaining(&self) -> usize {
        self.data.len() - self.position
    }

    /// Take exactly `count` bytes as a slice of the underlying data
    ///
    /// `section` names the blob section being read, for error reporting.
    pub fn take(&mut self, count: usize, section: &str) -> Result<&'a [u8]> {
        let available = self.remaining();
        if count > available {
            return Err(Error::TruncatedInput {
                kind: section.to_string(),
                needed: count as u64,
                available: available as u64,
            });
        }

        let slice = &self.data[self.position..self.position + count];
        self.position += count;
        Ok(slice)
    }
}
