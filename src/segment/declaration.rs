//! The declaration segment announcing every object of the file.

use crate::api::file::TdmsFile;
use crate::error::TdmsError;
use crate::path;
use crate::segment::encode::SliceWriter;
use crate::segment::lead_in::{LEAD_IN_LEN, LeadIn, TOC_META_DATA, TOC_NEW_OBJ_LIST};
use crate::segment::{NO_RAW_DATA_INDEX, Segment};

/// Metadata-only segment declaring the file root, every group, and every
/// channel, in insertion order and without raw data.
///
/// This is the first segment of a TDMS stream; property and data segments
/// may follow in any order.
pub struct DeclarationSegment<'a> {
    file: &'a TdmsFile,
}

impl<'a> DeclarationSegment<'a> {
    pub fn new(file: &'a TdmsFile) -> Self {
        DeclarationSegment { file }
    }

    fn object_count(&self) -> usize {
        1 + self
            .file
            .groups()
            .iter()
            .map(|group| 1 + group.channels().len())
            .sum::<usize>()
    }

    fn metadata_len(&self) -> usize {
        let mut len = 4 + object_header_len(path::ROOT);
        for group in self.file.groups() {
            len += object_header_len(group.path());
            for channel in group.channels() {
                len += object_header_len(channel.path());
            }
        }
        len
    }
}

// path length, path bytes, raw data index, property count
fn object_header_len(path: &str) -> usize {
    4 + path.len() + 4 + 4
}

fn write_object_header(w: &mut SliceWriter<'_>, path: &str) {
    w.put_str(path);
    w.put_u32_le(NO_RAW_DATA_INDEX);
    w.put_u32_le(0); // no properties
}

impl Segment for DeclarationSegment<'_> {
    fn byte_len(&self) -> usize {
        LEAD_IN_LEN + self.metadata_len()
    }

    fn write_into(&self, buf: &mut [u8]) -> Result<usize, TdmsError> {
        let total = self.byte_len();
        if buf.len() < total {
            return Err(TdmsError::TooShortBuffer {
                actual:   buf.len(),
                expected: total,
            });
        }

        let metadata_len = self.metadata_len() as u64;
        let mut w = SliceWriter::new(buf);
        LeadIn::new(TOC_META_DATA | TOC_NEW_OBJ_LIST, metadata_len, metadata_len).write_into(&mut w);

        w.put_u32_le(self.object_count() as u32);
        write_object_header(&mut w, path::ROOT);
        for group in self.file.groups() {
            write_object_header(&mut w, group.path());
            for channel in group.channels() {
                write_object_header(&mut w, channel.path());
            }
        }

        debug_assert_eq!(w.position(), total);
        Ok(total)
    }
}
