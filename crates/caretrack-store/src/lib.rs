//! caretrack-store
//!
//! The boundary between the document store and the scoring engine: the
//! `EventSource` trait, translation of stored assessment documents into
//! typed events, and two sources (in-memory and a JSON export on disk).

pub mod document;
pub mod error;
pub mod file;
pub mod memory;
pub mod report;
pub mod source;
