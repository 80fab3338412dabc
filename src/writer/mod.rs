//! TDMS segment writer module for tdms-rs
//!
//! This module provides a safe API for appending finished segments to a
//! sink, guaranteeing that segments land back to back in call order with a
//! correct running offset.

pub mod tdms_writer;
pub use tdms_writer::{MmapWriter, TdmsWriter};
