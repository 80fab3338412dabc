//! Segments carrying channel raw data.

use byteorder::{ByteOrder, LittleEndian};

use crate::api::channel::Channel;
use crate::api::group::Group;
use crate::error::TdmsError;
use crate::segment::encode::SliceWriter;
use crate::segment::lead_in::{
    LEAD_IN_LEN, LeadIn, TOC_META_DATA, TOC_NEW_OBJ_LIST, TOC_RAW_DATA,
};
use crate::segment::{INDEX_INFO_LEN, MAX_SEGMENT_LEN, Segment};
use crate::timestamp::Timestamp;
use crate::types::DataType;

/// A borrowed slice of raw values for one channel.
///
/// The variant must match the channel's declared data type; values are
/// emitted little-endian in a contiguous, non-interleaved block.
#[derive(Debug, Clone, Copy)]
pub enum ChannelData<'a> {
    I8(&'a [i8]),
    I16(&'a [i16]),
    I32(&'a [i32]),
    I64(&'a [i64]),
    U8(&'a [u8]),
    U16(&'a [u16]),
    U32(&'a [u32]),
    U64(&'a [u64]),
    SingleFloat(&'a [f32]),
    DoubleFloat(&'a [f64]),
    /// Any nonzero byte is emitted as 1; the slice itself is not modified.
    Boolean(&'a [u8]),
    TimeStamp(&'a [Timestamp]),
}

impl ChannelData<'_> {
    pub fn data_type(&self) -> DataType {
        match self {
            ChannelData::I8(_) => DataType::I8,
            ChannelData::I16(_) => DataType::I16,
            ChannelData::I32(_) => DataType::I32,
            ChannelData::I64(_) => DataType::I64,
            ChannelData::U8(_) => DataType::U8,
            ChannelData::U16(_) => DataType::U16,
            ChannelData::U32(_) => DataType::U32,
            ChannelData::U64(_) => DataType::U64,
            ChannelData::SingleFloat(_) => DataType::SingleFloat,
            ChannelData::DoubleFloat(_) => DataType::DoubleFloat,
            ChannelData::Boolean(_) => DataType::Boolean,
            ChannelData::TimeStamp(_) => DataType::TimeStamp,
        }
    }

    /// Number of values in the slice.
    pub fn len(&self) -> usize {
        match self {
            ChannelData::I8(v) => v.len(),
            ChannelData::I16(v) => v.len(),
            ChannelData::I32(v) => v.len(),
            ChannelData::I64(v) => v.len(),
            ChannelData::U8(v) => v.len(),
            ChannelData::U16(v) => v.len(),
            ChannelData::U32(v) => v.len(),
            ChannelData::U64(v) => v.len(),
            ChannelData::SingleFloat(v) => v.len(),
            ChannelData::DoubleFloat(v) => v.len(),
            ChannelData::Boolean(v) => v.len(),
            ChannelData::TimeStamp(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn raw_len(&self) -> u64 {
        self.len() as u64 * self.data_type().fixed_size() as u64
    }

    fn write_raw(&self, w: &mut SliceWriter<'_>) {
        match *self {
            ChannelData::I8(values) => {
                let dst = w.take(values.len());
                for (dst, &value) in dst.iter_mut().zip(values) {
                    *dst = value as u8;
                }
            }
            ChannelData::I16(values) => LittleEndian::write_i16_into(values, w.take(values.len() * 2)),
            ChannelData::I32(values) => LittleEndian::write_i32_into(values, w.take(values.len() * 4)),
            ChannelData::I64(values) => LittleEndian::write_i64_into(values, w.take(values.len() * 8)),
            ChannelData::U8(values) => w.put_bytes(values),
            ChannelData::U16(values) => LittleEndian::write_u16_into(values, w.take(values.len() * 2)),
            ChannelData::U32(values) => LittleEndian::write_u32_into(values, w.take(values.len() * 4)),
            ChannelData::U64(values) => LittleEndian::write_u64_into(values, w.take(values.len() * 8)),
            ChannelData::SingleFloat(values) => {
                LittleEndian::write_f32_into(values, w.take(values.len() * 4))
            }
            ChannelData::DoubleFloat(values) => {
                LittleEndian::write_f64_into(values, w.take(values.len() * 8))
            }
            ChannelData::Boolean(values) => {
                let dst = w.take(values.len());
                for (dst, &value) in dst.iter_mut().zip(values) {
                    *dst = (value != 0) as u8;
                }
            }
            ChannelData::TimeStamp(values) => {
                for t in values {
                    w.put_u64_le(t.fraction);
                    w.put_i64_le(t.second);
                }
            }
        }
    }
}

fn check_channel_data(channel: &Channel, data: &ChannelData<'_>) -> Result<(), TdmsError> {
    if channel.data_type().fixed_size() == 0 {
        return Err(TdmsError::UnsupportedType(channel.data_type()));
    }
    if data.data_type() != channel.data_type() {
        return Err(TdmsError::TypeMismatch {
            expected: channel.data_type(),
            actual:   data.data_type(),
        });
    }
    Ok(())
}

// index info length, data type, dimension, value count
fn write_raw_data_index(w: &mut SliceWriter<'_>, data: &ChannelData<'_>) {
    w.put_u32_le(INDEX_INFO_LEN);
    w.put_u32_le(data.data_type().wire_code());
    w.put_u32_le(1); // dimension
    w.put_u64_le(data.len() as u64);
}

/// Segment carrying the raw values of a single channel.
///
/// Built through [`Channel::data_segment`].
///
/// [`Channel::data_segment`]: crate::api::channel::Channel::data_segment
#[derive(Debug)]
pub struct ChannelDataSegment<'a> {
    channel: &'a Channel,
    data:    ChannelData<'a>,
}

impl<'a> ChannelDataSegment<'a> {
    pub fn new(channel: &'a Channel, data: ChannelData<'a>) -> Result<Self, TdmsError> {
        check_channel_data(channel, &data)?;
        if data.is_empty() {
            return Err(TdmsError::EmptyData);
        }

        let segment = ChannelDataSegment { channel, data };
        if LEAD_IN_LEN as u64 + segment.metadata_len() as u64 + data.raw_len() > MAX_SEGMENT_LEN {
            return Err(TdmsError::SegmentTooLarge);
        }
        Ok(segment)
    }

    fn metadata_len(&self) -> usize {
        // object count, path length, index info, property count
        32 + self.channel.path().len()
    }
}

impl Segment for ChannelDataSegment<'_> {
    fn byte_len(&self) -> usize {
        LEAD_IN_LEN + self.metadata_len() + self.data.raw_len() as usize
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
        LeadIn::new(
            TOC_META_DATA | TOC_RAW_DATA | TOC_NEW_OBJ_LIST,
            metadata_len + self.data.raw_len(),
            metadata_len,
        )
        .write_into(&mut w);

        w.put_u32_le(1); // one object
        w.put_str(self.channel.path());
        write_raw_data_index(&mut w, &self.data);
        w.put_u32_le(0); // no properties

        self.data.write_raw(&mut w);

        debug_assert_eq!(w.position(), total);
        Ok(total)
    }
}

/// Segment carrying raw values for several channels of one group.
///
/// Channels with an empty slice are left out entirely; raw blocks of the
/// included channels are concatenated in group insertion order.  When every
/// slice is empty the segment is zero bytes long and emission is a no-op.
///
/// Built through [`Group::data_segment`].
///
/// [`Group::data_segment`]: crate::api::group::Group::data_segment
#[derive(Debug)]
pub struct GroupDataSegment<'a> {
    group: &'a Group,
    data:  &'a [ChannelData<'a>],
}

impl<'a> GroupDataSegment<'a> {
    pub fn new(group: &'a Group, data: &'a [ChannelData<'a>]) -> Result<Self, TdmsError> {
        if data.len() != group.channels().len() {
            return Err(TdmsError::ChannelCountMismatch {
                expected: group.channels().len(),
                actual:   data.len(),
            });
        }
        for (channel, values) in group.channels().iter().zip(data) {
            if values.is_empty() {
                continue;
            }
            check_channel_data(channel, values)?;
        }

        let segment = GroupDataSegment { group, data };
        if LEAD_IN_LEN as u64 + segment.metadata_len() as u64 + segment.raw_len() > MAX_SEGMENT_LEN {
            return Err(TdmsError::SegmentTooLarge);
        }
        Ok(segment)
    }

    fn included(&self) -> impl Iterator<Item = (&Channel, &ChannelData<'a>)> {
        self.group
            .channels()
            .iter()
            .zip(self.data)
            .filter(|(_, values)| !values.is_empty())
    }

    fn metadata_len(&self) -> usize {
        let mut len = 4; // object count
        for (channel, _) in self.included() {
            // path length, index info, property count
            len += 28 + channel.path().len();
        }
        len
    }

    fn raw_len(&self) -> u64 {
        self.included().map(|(_, values)| values.raw_len()).sum()
    }
}

impl Segment for GroupDataSegment<'_> {
    fn byte_len(&self) -> usize {
        if self.included().next().is_none() {
            return 0;
        }
        LEAD_IN_LEN + self.metadata_len() + self.raw_len() as usize
    }

    fn write_into(&self, buf: &mut [u8]) -> Result<usize, TdmsError> {
        let total = self.byte_len();
        if total == 0 {
            return Ok(0);
        }
        if buf.len() < total {
            return Err(TdmsError::TooShortBuffer {
                actual:   buf.len(),
                expected: total,
            });
        }

        let metadata_len = self.metadata_len() as u64;
        let mut w = SliceWriter::new(buf);
        LeadIn::new(
            TOC_META_DATA | TOC_RAW_DATA | TOC_NEW_OBJ_LIST,
            metadata_len + self.raw_len(),
            metadata_len,
        )
        .write_into(&mut w);

        w.put_u32_le(self.included().count() as u32);
        for (channel, values) in self.included() {
            w.put_str(channel.path());
            write_raw_data_index(&mut w, values);
            w.put_u32_le(0); // no properties
        }
        for (_, values) in self.included() {
            values.write_raw(&mut w);
        }

        debug_assert_eq!(w.position(), total);
        Ok(total)
    }
}
