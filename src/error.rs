use thiserror::Error;

use crate::types::DataType;

#[derive(Debug, Error)]
pub enum TdmsError {
    #[error("Buffer too small: need at least {expected} bytes, got {actual}")]
    TooShortBuffer {
        actual:   usize,
        expected: usize,
    },

    #[error("File already holds the maximum of {max} groups")]
    TooManyGroups { max: usize },

    #[error("Group already holds the maximum of {max} channels")]
    TooManyChannels { max: usize },

    #[error("Name is {len} bytes, limit is {max}")]
    NameTooLong { len: usize, max: usize },

    #[error("Data type {0:?} has no fixed-size raw representation")]
    UnsupportedType(DataType),

    #[error("Value type {actual:?} does not match channel type {expected:?}")]
    TypeMismatch {
        expected: DataType,
        actual:   DataType,
    },

    #[error("Expected data for {expected} channels, got {actual}")]
    ChannelCountMismatch {
        expected: usize,
        actual:   usize,
    },

    #[error("No values supplied for channel data segment")]
    EmptyData,

    #[error("Segment exceeds the 4 GiB limit")]
    SegmentTooLarge,

    #[error("Invalid file handling")]
    IOError(#[from] std::io::Error),
}
