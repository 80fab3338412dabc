// Low level field emission shared by the segment builders
use byteorder::{BigEndian, ByteOrder, LittleEndian};

/// Positional writer over a caller-provided byte slice.
///
/// Builders size their output exactly before emitting, so every put is in
/// bounds; slice indexing enforces that invariant.
pub(crate) struct SliceWriter<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> SliceWriter<'a> {
    pub fn new(buf: &'a mut [u8]) -> Self {
        SliceWriter { buf, pos: 0 }
    }

    /// Number of bytes written so far.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Advance past the next `len` bytes and hand them out for bulk writes.
    pub fn take(&mut self, len: usize) -> &mut [u8] {
        let start = self.pos;
        self.pos += len;
        &mut self.buf[start..self.pos]
    }

    pub fn put_u32_le(&mut self, value: u32) {
        LittleEndian::write_u32(self.take(4), value);
    }

    pub fn put_u64_le(&mut self, value: u64) {
        LittleEndian::write_u64(self.take(8), value);
    }

    pub fn put_i64_le(&mut self, value: i64) {
        LittleEndian::write_i64(self.take(8), value);
    }

    pub fn put_u32_be(&mut self, value: u32) {
        BigEndian::write_u32(self.take(4), value);
    }

    pub fn put_bytes(&mut self, src: &[u8]) {
        self.take(src.len()).copy_from_slice(src);
    }

    /// Length-prefixed string: 4-byte little-endian byte count, then the
    /// raw bytes, no terminator.
    pub fn put_str(&mut self, s: &str) {
        self.put_u32_le(s.len() as u32);
        self.put_bytes(s.as_bytes());
    }
}
