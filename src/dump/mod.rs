//! Field dump parsing.
//!
//! Turns the text report of the extraction collaborator into ordered
//! [`FieldRecord`]s. Parsing is pure; running the collaborator lives in
//! [`crate::filler`].

mod field_flags;
mod parser;
mod record;

pub use field_flags::FieldFlags;
pub use parser::{parse_dump, DumpParser, ValueExtraction, SEGMENT_DELIMITER};
pub use record::{FieldKind, FieldRecord};
