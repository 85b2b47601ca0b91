//! caretrack-core
//!
//! Pure domain types for CareTrack: clinical assessment events, the ordinal
//! label sets staff choose from, and recovery score weights. No I/O here.

pub mod error;
pub mod models;
