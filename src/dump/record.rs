//! Field records produced by the dump parser.

use serde::{Deserialize, Serialize};

use super::field_flags::FieldFlags;

/// One form field as described by a field dump.
///
/// Every attribute is kept as the text the dump reported. Attributes the
/// dump did not contain are empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldRecord {
    /// Fully qualified field name from `FieldName:`
    pub title: String,
    /// Field category from `FieldType:` (`Text`, `Button`, `Choice`, `Signature`)
    pub field_type: String,
    /// Raw flag integer from `FieldFlags:`
    pub field_flags: String,
    /// Current value from `FieldValue:`, only read when requested
    pub field_value: String,
}

/// Field category derived from the `FieldType:` text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    /// Single or multi-line text field
    Text,
    /// Checkbox, radio button or push button
    Button,
    /// List box or combo box
    Choice,
    /// Signature field
    Signature,
    /// Anything else the dump reported, including an empty type
    Unknown(String),
}

impl FieldKind {
    /// Parse a dump `FieldType:` value.
    pub fn from_dump(raw: &str) -> Self {
        match raw {
            "Text" => FieldKind::Text,
            "Button" => FieldKind::Button,
            "Choice" => FieldKind::Choice,
            "Signature" => FieldKind::Signature,
            other => FieldKind::Unknown(other.to_string()),
        }
    }
}

impl FieldRecord {
    /// Create a record with only a title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Set the field type text.
    pub fn with_type(mut self, field_type: impl Into<String>) -> Self {
        self.field_type = field_type.into();
        self
    }

    /// Set the raw flag text.
    pub fn with_flags(mut self, field_flags: impl Into<String>) -> Self {
        self.field_flags = field_flags.into();
        self
    }

    /// Set the value text.
    pub fn with_value(mut self, field_value: impl Into<String>) -> Self {
        self.field_value = field_value.into();
        self
    }

    /// The field category.
    pub fn kind(&self) -> FieldKind {
        FieldKind::from_dump(&self.field_type)
    }

    /// The decoded flag bits.
    pub fn flags(&self) -> FieldFlags {
        FieldFlags::from_dump(&self.field_flags)
    }

    /// Whether this is a checkbox, i.e. a button that is neither radio nor push button.
    ///
    /// Checkboxes take the `Yes`/`Off` states produced by
    /// [`normalize_for_fill`](crate::codec::normalize_for_fill).
    pub fn is_checkbox(&self) -> bool {
        self.kind() == FieldKind::Button
            && !self
                .flags()
                .intersects(FieldFlags::RADIO | FieldFlags::PUSHBUTTON)
    }
}
