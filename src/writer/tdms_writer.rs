// Sink handling for TdmsWriter
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};

use memmap2::MmapMut;

use crate::error::TdmsError;
use crate::segment::Segment;

/// Pre-sized memory-mapped sink.
///
/// Segment builders report their exact byte length before emission, so the
/// map is created at final size and filled front to back.  TDMS segments
/// are never patched after emission (their lead-in offsets are computed
/// before the bytes exist, and there are no links between segments), so
/// the sink is append-only and carries no seek support.
pub struct MmapWriter {
    mmap:   MmapMut,
    filled: usize,
}

impl MmapWriter {
    pub fn new(path: &str, size: usize) -> Result<Self, TdmsError> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .open(path)?;
        file.set_len(size as u64)?;
        let mmap = unsafe { MmapMut::map_mut(&file)? };
        Ok(MmapWriter { mmap, filled: 0 })
    }
}

impl Write for MmapWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let free = &mut self.mmap[self.filled..];
        if buf.len() > free.len() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::WriteZero,
                "segment does not fit in the mapped file",
            ));
        }
        free[..buf.len()].copy_from_slice(buf);
        self.filled += buf.len();
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.mmap.flush()
    }
}

/// Writer appending TDMS segments to a sink while tracking the file offset.
pub struct TdmsWriter<W: Write> {
    sink: W,
    offset: u64,
}

impl TdmsWriter<BufWriter<File>> {
    /// Creates a new TdmsWriter for the given file path using a 1 MB
    /// internal buffer. Use [`create_with_capacity`] to customize the
    /// buffer size.
    ///
    /// [`create_with_capacity`]: Self::create_with_capacity
    pub fn create(path: &str) -> Result<Self, TdmsError> {
        Self::create_with_capacity(path, 1_048_576)
    }

    /// Creates a new TdmsWriter with the specified `BufWriter` capacity.
    pub fn create_with_capacity(path: &str, capacity: usize) -> Result<Self, TdmsError> {
        let file = File::create(path)?;
        Ok(TdmsWriter::new(BufWriter::with_capacity(capacity, file)))
    }
}

impl TdmsWriter<MmapWriter> {
    /// Creates a new TdmsWriter backed by a memory-mapped file of the given
    /// size.
    pub fn create_mmap(path: &str, size: usize) -> Result<Self, TdmsError> {
        Ok(TdmsWriter::new(MmapWriter::new(path, size)?))
    }
}

impl<W: Write> TdmsWriter<W> {
    pub fn new(sink: W) -> Self {
        TdmsWriter { sink, offset: 0 }
    }

    /// Serializes a segment and appends it to the sink.
    /// Returns the starting offset of the segment in the file.
    pub fn write_segment(&mut self, segment: &impl Segment) -> Result<u64, TdmsError> {
        let bytes = segment.to_bytes()?;
        self.sink.write_all(&bytes)?;
        let segment_start = self.offset;
        self.offset += bytes.len() as u64;
        Ok(segment_start)
    }

    /// Returns the current file offset (where the next segment will land).
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Finalizes the file (flushes all data to the sink).
    pub fn finalize(mut self) -> Result<(), TdmsError> {
        self.sink.flush()?;
        Ok(())
    }
}
