use crate::api::group::Group;
use crate::config::MAX_GROUPS_PER_FILE;
use crate::error::TdmsError;
use crate::path;
use crate::segment::declaration::DeclarationSegment;
use crate::segment::property::{PropertySegment, PropertyValue};

/// Index-based handle to a group added to a [`TdmsFile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupId(pub(crate) usize);

/// In-memory description of a TDMS file: the root object plus its groups.
///
/// The struct is purely descriptive; the segment builders obtained from it
/// turn the hierarchy and caller data into bytes, and the caller appends
/// those bytes to its output in call order.
#[derive(Debug, Default)]
pub struct TdmsFile {
    groups: Vec<Group>,
}

impl TdmsFile {
    pub fn new() -> Self {
        TdmsFile { groups: Vec::new() }
    }

    /// Append a group, preserving insertion order.
    ///
    /// # Errors
    /// [`TdmsError::TooManyGroups`] when the file is at capacity,
    /// [`TdmsError::NameTooLong`] when the name exceeds its bound; the file
    /// is unchanged in both cases.
    pub fn add_group(&mut self, name: &str) -> Result<GroupId, TdmsError> {
        if self.groups.len() >= MAX_GROUPS_PER_FILE {
            return Err(TdmsError::TooManyGroups {
                max: MAX_GROUPS_PER_FILE,
            });
        }
        let group = Group::new(name)?;
        self.groups.push(group);
        Ok(GroupId(self.groups.len() - 1))
    }

    pub fn group(&self, id: GroupId) -> &Group {
        &self.groups[id.0]
    }

    pub fn group_mut(&mut self, id: GroupId) -> &mut Group {
        &mut self.groups[id.0]
    }

    /// Groups in insertion order.
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Segment declaring the file and all of its groups and channels.
    pub fn declaration_segment(&self) -> DeclarationSegment<'_> {
        DeclarationSegment::new(self)
    }

    /// Segment attaching one property to the file root object.
    pub fn property_segment<'a>(
        &self,
        name: &'a str,
        value: PropertyValue<'a>,
    ) -> Result<PropertySegment<'a>, TdmsError> {
        PropertySegment::new(path::ROOT, name, value)
    }
}
