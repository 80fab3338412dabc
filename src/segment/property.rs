//! Metadata-only segments attaching one property to an object.

use crate::error::TdmsError;
use crate::segment::encode::SliceWriter;
use crate::segment::lead_in::{LEAD_IN_LEN, LeadIn, TOC_META_DATA, TOC_NEW_OBJ_LIST};
use crate::segment::{MAX_SEGMENT_LEN, NO_RAW_DATA_INDEX, Segment};
use crate::timestamp::Timestamp;
use crate::types::DataType;

/// A property value together with its TDMS data type.
///
/// Only the writable types are constructible, so a property can never carry
/// a type the emitter would have to reject.
#[derive(Debug, Clone, Copy)]
pub enum PropertyValue<'a> {
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    SingleFloat(f32),
    DoubleFloat(f64),
    String(&'a str),
    Boolean(bool),
    TimeStamp(Timestamp),
}

impl PropertyValue<'_> {
    pub fn data_type(&self) -> DataType {
        match self {
            PropertyValue::I8(_) => DataType::I8,
            PropertyValue::I16(_) => DataType::I16,
            PropertyValue::I32(_) => DataType::I32,
            PropertyValue::I64(_) => DataType::I64,
            PropertyValue::U8(_) => DataType::U8,
            PropertyValue::U16(_) => DataType::U16,
            PropertyValue::U32(_) => DataType::U32,
            PropertyValue::U64(_) => DataType::U64,
            PropertyValue::SingleFloat(_) => DataType::SingleFloat,
            PropertyValue::DoubleFloat(_) => DataType::DoubleFloat,
            PropertyValue::String(_) => DataType::String,
            PropertyValue::Boolean(_) => DataType::Boolean,
            PropertyValue::TimeStamp(_) => DataType::TimeStamp,
        }
    }

    /// Encoded size of the value alone: the fixed width of the type, or the
    /// length-prefixed byte count for strings.
    fn value_len(&self) -> usize {
        match self {
            PropertyValue::String(s) => 4 + s.len(),
            other => other.data_type().fixed_size(),
        }
    }

    fn write_value(&self, w: &mut SliceWriter<'_>) {
        match *self {
            PropertyValue::I8(v) => w.put_bytes(&v.to_le_bytes()),
            PropertyValue::I16(v) => w.put_bytes(&v.to_le_bytes()),
            PropertyValue::I32(v) => w.put_bytes(&v.to_le_bytes()),
            PropertyValue::I64(v) => w.put_bytes(&v.to_le_bytes()),
            PropertyValue::U8(v) => w.put_bytes(&v.to_le_bytes()),
            PropertyValue::U16(v) => w.put_bytes(&v.to_le_bytes()),
            PropertyValue::U32(v) => w.put_bytes(&v.to_le_bytes()),
            PropertyValue::U64(v) => w.put_bytes(&v.to_le_bytes()),
            PropertyValue::SingleFloat(v) => w.put_bytes(&v.to_le_bytes()),
            PropertyValue::DoubleFloat(v) => w.put_bytes(&v.to_le_bytes()),
            PropertyValue::String(s) => w.put_str(s),
            PropertyValue::Boolean(v) => w.put_bytes(&[v as u8]),
            PropertyValue::TimeStamp(t) => {
                w.put_u64_le(t.fraction);
                w.put_i64_le(t.second);
            }
        }
    }
}

/// Metadata-only segment attaching a single named property to the object at
/// `path`.
///
/// Built through [`TdmsFile::property_segment`], [`Group::property_segment`]
/// or [`Channel::property_segment`] rather than directly.
///
/// [`TdmsFile::property_segment`]: crate::api::file::TdmsFile::property_segment
/// [`Group::property_segment`]: crate::api::group::Group::property_segment
/// [`Channel::property_segment`]: crate::api::channel::Channel::property_segment
pub struct PropertySegment<'a> {
    path:  &'a str,
    name:  &'a str,
    value: PropertyValue<'a>,
}

impl<'a> PropertySegment<'a> {
    pub fn new(
        path: &'a str,
        name: &'a str,
        value: PropertyValue<'a>,
    ) -> Result<Self, TdmsError> {
        let segment = PropertySegment { path, name, value };
        if LEAD_IN_LEN as u64 + segment.metadata_len() as u64 > MAX_SEGMENT_LEN {
            return Err(TdmsError::SegmentTooLarge);
        }
        Ok(segment)
    }

    fn metadata_len(&self) -> usize {
        // object count, path length, raw data index, property count,
        // property name length, property data type
        24 + self.path.len() + self.name.len() + self.value.value_len()
    }
}

impl Segment for PropertySegment<'_> {
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

        w.put_u32_le(1); // one object
        w.put_str(self.path);
        w.put_u32_le(NO_RAW_DATA_INDEX);
        w.put_u32_le(1); // one property

        w.put_str(self.name);
        w.put_u32_le(self.value.data_type().wire_code());
        self.value.write_value(&mut w);

        debug_assert_eq!(w.position(), total);
        Ok(total)
    }
}
