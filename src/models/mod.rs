//! Core data models: upstream payloads and normalized records.

mod match_record;
mod player;
mod raw;
mod team;

pub use match_record::*;
pub use player::*;
pub use raw::*;
pub use team::*;
