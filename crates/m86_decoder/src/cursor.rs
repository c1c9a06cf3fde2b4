use crate::{DecodeError, Result};

/// A bounds checked, read-only view over a byte buffer with a movable position.
///
/// `position <= len` holds at all times. Every read is checked against the remaining length
/// first, so nothing else in the decoder needs its own range checks.
#[derive(Clone, Copy, Debug)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    /// Create a cursor positioned at `offset`. An offset past the end of `data` is out of bounds,
    /// an offset equal to its length is a cursor with nothing remaining.
    pub fn at(data: &'a [u8], offset: usize) -> Result<Self> {
        let mut cursor = Self::new(data);
        cursor.advance(offset)?;
        Ok(cursor)
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.position
    }

    /// The next `n` bytes, without moving the position.
    pub fn peek(&self, n: usize) -> Result<&'a [u8]> {
        self.check(n)?;
        Ok(&self.data[self.position..self.position + n])
    }

    /// Move the position forward by `n`. Fails without moving at all if fewer than `n` bytes are
    /// left.
    pub fn advance(&mut self, n: usize) -> Result<()> {
        self.check(n)?;
        self.position += n;
        Ok(())
    }

    /// The `n` bytes starting at the current position; the position is moved past them.
    pub fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        let bytes = self.peek(n)?;
        self.position += n;
        Ok(bytes)
    }

    fn check(&self, n: usize) -> Result<()> {
        if n > self.remaining() {
            Err(DecodeError::OutOfBounds {
                offset: self.position,
                needed: n,
                remaining: self.remaining(),
            })
        } else {
            Ok(())
        }
    }
}
