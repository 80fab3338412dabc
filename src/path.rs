//! Canonical TDMS object paths.
//!
//! Names are spliced into the path verbatim; the format does not define an
//! escape for quote characters inside names, so avoiding them is the
//! caller's responsibility.

/// Path of the file root object.
pub const ROOT: &str = "/";

/// Path of a group object: `/'Name'`.
pub fn group_path(name: &str) -> String {
    format!("/'{name}'")
}

/// Path of a channel object: `/'Group'/'Name'`.
pub fn channel_path(group_path: &str, name: &str) -> String {
    format!("{group_path}/'{name}'")
}
