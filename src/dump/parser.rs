//! Parser for `dump_data_fields_utf8` output.
//!
//! A dump is a header followed by one block per field, each block introduced
//! by a `---` line:
//!
//! ```text
//! ---
//! FieldType: Text
//! FieldName: applicant.name
//! FieldFlags: 2
//! FieldValue: Jane
//! FieldJustification: Left
//! ---
//! FieldType: Button
//! FieldName: agree
//! ...
//! ```
//!
//! Attributes are matched independently inside each block, so unknown lines
//! and reordered attributes are tolerated.

use lazy_static::lazy_static;
use regex::Regex;

use super::record::FieldRecord;
use crate::error::Result;

/// Token separating field blocks in a dump.
pub const SEGMENT_DELIMITER: &str = "---";

lazy_static! {
    static ref RE_FIELD_NAME: Regex = Regex::new(r"FieldName: ([^\n]*)").unwrap();
    static ref RE_FIELD_TYPE: Regex = Regex::new(r"FieldType: ([A-Za-z\t .]+)").unwrap();
    static ref RE_FIELD_FLAGS: Regex = Regex::new(r"FieldFlags: ([0-9\t .]+)").unwrap();
    static ref RE_FIELD_VALUE: Regex = Regex::new(r"FieldValue: ([^\n]*)").unwrap();
    // Runs until the next `FieldXxx:` attribute, a delimiter line or end of input.
    static ref RE_FIELD_VALUE_MULTILINE: Regex =
        Regex::new(r"(?s)FieldValue: (.*?)(?:$|---(?:\n|$)|Field[A-Z]\w+:[^\n]*)").unwrap();
}

/// Whether and how `FieldValue:` is read from each block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValueExtraction {
    /// Values are not read; every record gets an empty value
    #[default]
    None,
    /// Value runs to the end of its line
    SingleLine,
    /// Value runs to the next attribute label, keeping embedded line breaks
    MultiLine,
}

impl ValueExtraction {
    /// Select a mode from the two independent caller switches.
    ///
    /// Multi-line wins when both are set.
    pub fn from_flags(read_values: bool, read_values_multiline: bool) -> Self {
        if read_values_multiline {
            ValueExtraction::MultiLine
        } else if read_values {
            ValueExtraction::SingleLine
        } else {
            ValueExtraction::None
        }
    }

    fn pattern(self) -> Option<&'static Regex> {
        match self {
            ValueExtraction::None => None,
            ValueExtraction::SingleLine => Some(&*RE_FIELD_VALUE),
            ValueExtraction::MultiLine => Some(&*RE_FIELD_VALUE_MULTILINE),
        }
    }
}

/// Field dump parser.
///
/// Stateless apart from its configuration; one parser can be shared by any
/// number of concurrent extractions.
///
/// # Example
///
/// ```ignore
/// use pdf_filler::dump::{DumpParser, ValueExtraction};
///
/// let parser = DumpParser::new().with_values(ValueExtraction::SingleLine);
/// let records = parser.parse(&dump_text);
/// ```
#[derive(Debug, Clone, Default)]
pub struct DumpParser {
    values: ValueExtraction,
    name_pattern: Option<Regex>,
}

impl DumpParser {
    /// Create a parser that reads names, types and flags only.
    pub fn new() -> Self {
        Self::default()
    }

    /// Choose how field values are read.
    pub fn with_values(mut self, values: ValueExtraction) -> Self {
        self.values = values;
        self
    }

    /// Replace the field name pattern. Capture group 1 is the title.
    pub fn with_name_regex(mut self, pattern: Regex) -> Self {
        self.name_pattern = Some(pattern);
        self
    }

    /// Compile and install a field name pattern. Capture group 1 is the title.
    pub fn with_name_pattern(self, pattern: &str) -> Result<Self> {
        Ok(self.with_name_regex(Regex::new(pattern)?))
    }

    /// The configured value mode.
    pub fn values(&self) -> ValueExtraction {
        self.values
    }

    /// Parse a complete dump into records, one per block, in dump order.
    ///
    /// Text before the first delimiter is discarded.
    pub fn parse(&self, dump: &str) -> Vec<FieldRecord> {
        let records: Vec<FieldRecord> = dump
            .split(SEGMENT_DELIMITER)
            .skip(1)
            .enumerate()
            .map(|(index, segment)| self.parse_segment(index, segment))
            .collect();

        log::debug!("Parsed {} field records from dump", records.len());
        records
    }

    fn parse_segment(&self, index: usize, segment: &str) -> FieldRecord {
        let name_pattern = self.name_pattern.as_ref().unwrap_or(&*RE_FIELD_NAME);

        let title = capture(name_pattern, segment).unwrap_or_else(|| {
            log::warn!("Field block {} has no field name, using empty title", index);
            String::new()
        });

        let field_value = self
            .values
            .pattern()
            .and_then(|re| capture(re, segment))
            .unwrap_or_default();

        FieldRecord {
            title,
            field_type: capture(&RE_FIELD_TYPE, segment).unwrap_or_default(),
            field_flags: capture(&RE_FIELD_FLAGS, segment).unwrap_or_default(),
            field_value,
        }
    }
}

/// Parse a dump with the default parser (no values, standard name pattern).
pub fn parse_dump(dump: &str) -> Vec<FieldRecord> {
    DumpParser::new().parse(dump)
}

fn capture(re: &Regex, text: &str) -> Option<String> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
}
