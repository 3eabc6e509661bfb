use std::io::{Cursor, Read};

/// Sequential byte supplier. `None` means the stream is exhausted.
pub trait ByteSource {
    fn read_byte(&mut self) -> Option<u8>;
}

impl<'a, R: ByteSource + ?Sized> ByteSource for &'a mut R {
    fn read_byte(&mut self) -> Option<u8> {
        (**self).read_byte()
    }
}

impl<'a> ByteSource for Cursor<&'a [u8]> {
    fn read_byte(&mut self) -> Option<u8> {
        let mut buf = [0u8; 1];
        match self.read(&mut buf) {
            Ok(1) => Some(buf[0]),
            _ => None,
        }
    }
}

/// `ByteSource` over an in-memory buffer.
#[derive(Clone, Debug)]
pub struct SliceReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> SliceReader<'a> {
    pub fn new(data: &'a [u8]) -> SliceReader<'a> {
        SliceReader { data, pos: 0 }
    }

    /// Offset of the next byte to be read.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Moves the cursor. Positions past the end are clamped to the end.
    pub fn set_position(&mut self, pos: usize) {
        self.pos = pos.min(self.data.len());
    }

    /// Number of bytes left.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub fn can_read(&self) -> bool {
        self.pos < self.data.len()
    }

    pub fn data(&self) -> &'a [u8] {
        self.data
    }
}

impl<'a> ByteSource for SliceReader<'a> {
    fn read_byte(&mut self) -> Option<u8> {
        let b = self.data.get(self.pos).cloned();
        if b.is_some() {
            self.pos += 1;
        }
        b
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slice_reader_stops_at_end() {
        let mut r = SliceReader::new(&[1, 2]);
        assert_eq!(r.read_byte(), Some(1));
        assert_eq!(r.remaining(), 1);
        assert_eq!(r.read_byte(), Some(2));
        assert_eq!(r.read_byte(), None);
        assert_eq!(r.position(), 2);
        assert!(!r.can_read());
    }

    #[test]
    fn set_position_clamps() {
        let mut r = SliceReader::new(&[1, 2, 3]);
        r.set_position(10);
        assert_eq!(r.position(), 3);
        r.set_position(1);
        assert_eq!(r.read_byte(), Some(2));
    }

    #[test]
    fn cursor_is_a_byte_source() {
        let data = [0x90u8, 0xc3];
        let mut c = Cursor::new(&data[..]);
        assert_eq!(c.read_byte(), Some(0x90));
        assert_eq!(c.read_byte(), Some(0xc3));
        assert_eq!(c.read_byte(), None);
    }
}
