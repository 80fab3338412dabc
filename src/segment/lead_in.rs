//! The 28-byte lead-in that opens every segment.

use crate::segment::encode::SliceWriter;

/// Byte length of the lead-in.
pub const LEAD_IN_LEN: usize = 28;

/// `TDSm`, stored big-endian at the start of every segment.
pub const SEGMENT_TAG: u32 = 0x5444_536D;

/// Version-4713 literal, stored big-endian (wire bytes `69 12 00 00`).
pub const VERSION_4713: u32 = 0x6912_0000;

/// ToC flag: the segment carries a metadata block.
pub const TOC_META_DATA: u32 = 0x0000_0002;
/// ToC flag: the object list differs from the previous segment.
pub const TOC_NEW_OBJ_LIST: u32 = 0x0000_0004;
/// ToC flag: the segment carries raw data.
pub const TOC_RAW_DATA: u32 = 0x0000_0008;
/// ToC flag: raw data is interleaved.  Never set by this crate.
pub const TOC_INTERLEAVED_DATA: u32 = 0x0000_0020;
/// ToC flag: numeric values are big-endian.  Never set by this crate.
pub const TOC_BIG_ENDIAN: u32 = 0x0000_0040;
/// ToC flag: raw data uses the DAQmx layout.  Never set by this crate.
pub const TOC_DAQMX_RAW_DATA: u32 = 0x0000_0080;

// Bit positions 0x01 and 0x10 are undefined by the format and are stripped
// on emission.
const TOC_WRITE_MASK: u32 = 0x0000_00EE;

/// The fixed-size segment header.
///
/// `next_segment_offset` is the segment length after the lead-in;
/// `raw_data_offset` is the length of the metadata block alone.  For
/// metadata-only segments the two are equal.
#[derive(Debug, Clone, Copy)]
pub struct LeadIn {
    pub toc: u32,
    pub next_segment_offset: u64,
    pub raw_data_offset: u64,
}

impl LeadIn {
    pub fn new(toc: u32, next_segment_offset: u64, raw_data_offset: u64) -> Self {
        LeadIn {
            toc,
            next_segment_offset,
            raw_data_offset,
        }
    }

    pub(crate) fn write_into(&self, w: &mut SliceWriter<'_>) {
        w.put_u32_be(SEGMENT_TAG);
        w.put_u32_le(self.toc & TOC_WRITE_MASK);
        w.put_u32_be(VERSION_4713);
        w.put_u64_le(self.next_segment_offset);
        w.put_u64_le(self.raw_data_offset);
    }
}
