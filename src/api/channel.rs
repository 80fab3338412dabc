use crate::config;
use crate::error::TdmsError;
use crate::path;
use crate::segment::property::{PropertySegment, PropertyValue};
use crate::segment::raw_data::{ChannelData, ChannelDataSegment};
use crate::types::DataType;

/// A single named data channel with a fixed raw data type.
///
/// The canonical object path `/'Group'/'Name'` is computed once when the
/// channel is added and cached for the lifetime of the object.
#[derive(Debug)]
pub struct Channel {
    name:      String,
    path:      String,
    data_type: DataType,
}

impl Channel {
    pub(crate) fn new(group_path: &str, name: &str, data_type: DataType) -> Result<Self, TdmsError> {
        config::check_name(name)?;
        Ok(Channel {
            name: name.to_string(),
            path: path::channel_path(group_path, name),
            data_type,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    /// Segment attaching one property to this channel.
    pub fn property_segment<'a>(
        &'a self,
        name: &'a str,
        value: PropertyValue<'a>,
    ) -> Result<PropertySegment<'a>, TdmsError> {
        PropertySegment::new(&self.path, name, value)
    }

    /// Segment carrying raw values for this channel alone.
    ///
    /// The data variant must match the channel type and hold at least one
    /// value.
    pub fn data_segment<'a>(
        &'a self,
        data: ChannelData<'a>,
    ) -> Result<ChannelDataSegment<'a>, TdmsError> {
        ChannelDataSegment::new(self, data)
    }
}
