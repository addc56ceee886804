//! Cursor over a persisted record's raw bytes.

use crate::{CodecError, CodecResult};
use byteorder::{BigEndian, ByteOrder};

/// Borrowed byte cursor with a mutable read position.
///
/// The record bytes belong to the store; a recovery attempt only borrows
/// them. Reads advance the position; [`RecordBuffer::peek_u32`] does not,
/// which lets a recoverer inspect the leading format tag and decline
/// without consuming anything.
#[derive(Debug)]
pub struct RecordBuffer<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> RecordBuffer<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Bytes left between the read position and the end of the record.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    fn check(&self, need: usize) -> CodecResult<()> {
        if self.remaining() < need {
            return Err(CodecError::Underflow {
                need,
                got: self.remaining(),
            });
        }
        Ok(())
    }

    /// Read the next big-endian u32 without advancing.
    pub fn peek_u32(&self) -> CodecResult<u32> {
        self.check(4)?;
        Ok(BigEndian::read_u32(&self.data[self.pos..self.pos + 4]))
    }

    pub fn get_u32(&mut self) -> CodecResult<u32> {
        let v = self.peek_u32()?;
        self.pos += 4;
        Ok(v)
    }

    pub fn get_u16(&mut self) -> CodecResult<u16> {
        self.check(2)?;
        let v = BigEndian::read_u16(&self.data[self.pos..self.pos + 2]);
        self.pos += 2;
        Ok(v)
    }

    pub fn get_u8(&mut self) -> CodecResult<u8> {
        self.check(1)?;
        let v = self.data[self.pos];
        self.pos += 1;
        Ok(v)
    }

    pub fn get_bytes(&mut self, n: usize) -> CodecResult<&'a [u8]> {
        self.check(n)?;
        let s = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(s)
    }

    /// Consume and return everything after the read position.
    pub fn take_remaining(&mut self) -> &'a [u8] {
        let s = &self.data[self.pos..];
        self.pos = self.data.len();
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peek_does_not_advance() {
        let data = [0x00, 0x00, 0x00, 0x2a, 0xff];
        let mut buf = RecordBuffer::new(&data);
        assert_eq!(buf.peek_u32().unwrap(), 42);
        assert_eq!(buf.position(), 0);
        assert_eq!(buf.get_u32().unwrap(), 42);
        assert_eq!(buf.position(), 4);
        assert_eq!(buf.remaining(), 1);
    }

    #[test]
    fn test_underflow_is_typed() {
        let data = [0x01, 0x02];
        let mut buf = RecordBuffer::new(&data);
        assert_eq!(
            buf.get_u32(),
            Err(CodecError::Underflow { need: 4, got: 2 })
        );
        // A failed read leaves the cursor untouched
        assert_eq!(buf.position(), 0);
        assert_eq!(buf.get_u16().unwrap(), 0x0102);
        assert_eq!(buf.get_u8(), Err(CodecError::Underflow { need: 1, got: 0 }));
    }

    #[test]
    fn test_take_remaining() {
        let data = [1, 2, 3, 4, 5];
        let mut buf = RecordBuffer::new(&data);
        buf.get_u8().unwrap();
        assert_eq!(buf.take_remaining(), &[2, 3, 4, 5]);
        assert_eq!(buf.remaining(), 0);
        assert_eq!(buf.take_remaining(), &[] as &[u8]);
    }
}
