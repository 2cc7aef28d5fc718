//! Per-call options for extraction and filling.

use std::path::PathBuf;

use regex::Regex;

use crate::dump::{DumpParser, ValueExtraction};
use crate::error::Result;
use crate::fdf::PayloadFormat;

/// Options for reading the fields of one document.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Document to inspect.
    pub source_file: PathBuf,

    /// How the dump is parsed.
    pub parser: DumpParser,

    /// Owner password forwarded to the form engine.
    pub owner_pw: Option<String>,

    /// User password forwarded to the form engine.
    pub user_pw: Option<String>,
}

impl ExtractOptions {
    /// Read names, types and flags of `source_file`, without values.
    pub fn new(source_file: impl Into<PathBuf>) -> Self {
        Self {
            source_file: source_file.into(),
            parser: DumpParser::new(),
            owner_pw: None,
            user_pw: None,
        }
    }

    /// Choose how field values are read.
    pub fn with_values(mut self, values: ValueExtraction) -> Self {
        self.parser = self.parser.with_values(values);
        self
    }

    /// Read single-line values.
    ///
    /// Has no effect once multi-line values were requested.
    pub fn read_values(self) -> Self {
        match self.parser.values() {
            ValueExtraction::MultiLine => self,
            _ => self.with_values(ValueExtraction::SingleLine),
        }
    }

    /// Read values that may span several lines.
    pub fn read_values_multiline(self) -> Self {
        self.with_values(ValueExtraction::MultiLine)
    }

    /// Replace the field name pattern. Capture group 1 is the title.
    pub fn with_name_regex(mut self, pattern: Regex) -> Self {
        self.parser = self.parser.with_name_regex(pattern);
        self
    }

    /// Compile and install a field name pattern.
    pub fn with_name_pattern(mut self, pattern: &str) -> Result<Self> {
        self.parser = self.parser.with_name_pattern(pattern)?;
        Ok(self)
    }

    /// Set the owner password.
    pub fn with_owner_pw(mut self, password: impl Into<String>) -> Self {
        self.owner_pw = Some(password.into());
        self
    }

    /// Set the user password.
    pub fn with_user_pw(mut self, password: impl Into<String>) -> Self {
        self.user_pw = Some(password.into());
        self
    }
}

/// Options for one fill operation.
#[derive(Debug, Clone, Default)]
pub struct FillOptions {
    /// Merge field values into the page content so they can no longer be edited.
    pub flatten: bool,

    /// Directory for the intermediate payload file.
    ///
    /// The process working directory when `None`.
    pub temp_path: Option<PathBuf>,

    /// Owner password forwarded to the form engine.
    pub owner_pw: Option<String>,

    /// User password forwarded to the form engine.
    pub user_pw: Option<String>,

    /// Format of the intermediate payload file.
    pub format: PayloadFormat,
}

impl FillOptions {
    /// Create fill options: no flattening, payload in the working directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable flattening.
    pub fn with_flatten(mut self, flatten: bool) -> Self {
        self.flatten = flatten;
        self
    }

    /// Put the intermediate payload file in `dir`.
    pub fn with_temp_path(mut self, dir: impl Into<PathBuf>) -> Self {
        self.temp_path = Some(dir.into());
        self
    }

    /// Set the owner password.
    pub fn with_owner_pw(mut self, password: impl Into<String>) -> Self {
        self.owner_pw = Some(password.into());
        self
    }

    /// Set the user password.
    pub fn with_user_pw(mut self, password: impl Into<String>) -> Self {
        self.user_pw = Some(password.into());
        self
    }

    /// Choose the payload format.
    pub fn with_format(mut self, format: PayloadFormat) -> Self {
        self.format = format;
        self
    }
}
