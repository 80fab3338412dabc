use crate::api::channel::Channel;
use crate::config::{self, MAX_CHANNELS_PER_GROUP};
use crate::error::TdmsError;
use crate::path;
use crate::segment::property::{PropertySegment, PropertyValue};
use crate::segment::raw_data::{ChannelData, GroupDataSegment};
use crate::types::DataType;

/// Index-based handle to a channel added to a [`Group`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelId(pub(crate) usize);

/// A named collection of channels inside a file.
///
/// The canonical object path `/'Name'` is computed once when the group is
/// added and cached for the lifetime of the object.
#[derive(Debug)]
pub struct Group {
    name:     String,
    path:     String,
    channels: Vec<Channel>,
}

impl Group {
    pub(crate) fn new(name: &str) -> Result<Self, TdmsError> {
        config::check_name(name)?;
        Ok(Group {
            name:     name.to_string(),
            path:     path::group_path(name),
            channels: Vec::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Append a channel, preserving insertion order.
    ///
    /// # Errors
    /// [`TdmsError::UnsupportedType`] for types without a raw
    /// representation, [`TdmsError::TooManyChannels`] when the group is at
    /// capacity, [`TdmsError::NameTooLong`] when the name exceeds its
    /// bound; the group is unchanged in all three cases.
    pub fn add_channel(&mut self, name: &str, data_type: DataType) -> Result<ChannelId, TdmsError> {
        if !data_type.is_writable() {
            return Err(TdmsError::UnsupportedType(data_type));
        }
        if self.channels.len() >= MAX_CHANNELS_PER_GROUP {
            return Err(TdmsError::TooManyChannels {
                max: MAX_CHANNELS_PER_GROUP,
            });
        }
        let channel = Channel::new(&self.path, name, data_type)?;
        self.channels.push(channel);
        Ok(ChannelId(self.channels.len() - 1))
    }

    pub fn channel(&self, id: ChannelId) -> &Channel {
        &self.channels[id.0]
    }

    /// Channels in insertion order.
    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    /// Segment attaching one property to this group.
    pub fn property_segment<'a>(
        &'a self,
        name: &'a str,
        value: PropertyValue<'a>,
    ) -> Result<PropertySegment<'a>, TdmsError> {
        PropertySegment::new(&self.path, name, value)
    }

    /// Segment carrying raw values for this group's channels.
    ///
    /// `data` holds one entry per channel in insertion order; channels with
    /// an empty slice are skipped.
    pub fn data_segment<'a>(
        &'a self,
        data: &'a [ChannelData<'a>],
    ) -> Result<GroupDataSegment<'a>, TdmsError> {
        GroupDataSegment::new(self, data)
    }
}
