//! Utilities for generating NI TDMS (version 4713) files.
//!
//! The crate exposes an object model under [`api`] to describe the
//! file/group/channel hierarchy and segment builders under [`segment`] to
//! turn it into the binary stream, one segment at a time.  A [`writer::TdmsWriter`]
//! appends finished segments to a sink.  Only the writable subset of the TDMS
//! data types is implemented.

pub mod config;
pub mod error;
pub mod path;
pub mod segment;
pub mod timestamp;
pub mod types;
pub mod writer;

pub mod api {
    pub mod channel;
    pub mod file;
    pub mod group;
}
