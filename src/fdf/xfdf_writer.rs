//! XFDF (XML Forms Data Format) writer implementation.
//!
//! Generates XFDF files according to the Adobe XFDF Specification.

use crate::codec::{FieldMap, FieldValue};
use crate::error::Result;
use std::path::Path;

/// XFDF file writer.
///
/// XFDF is an XML representation of FDF. Every value is written as UTF-8
/// text, so no string encoding switch is needed.
///
/// # Example
///
/// ```ignore
/// use pdf_filler::fdf::XfdfWriter;
///
/// let mut writer = XfdfWriter::new();
/// writer.add_field("name", "John Doe");
/// writer.add_field("email", "john@example.com");
/// writer.write_to_file("form_data.xfdf")?;
/// ```
#[derive(Debug, Default)]
pub struct XfdfWriter {
    fields: Vec<(String, FieldValue)>,
    file_spec: Option<String>,
}

impl XfdfWriter {
    /// Create a new XFDF writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an XFDF writer holding every entry of a field mapping.
    pub fn from_values(values: &FieldMap) -> Self {
        Self {
            fields: values
                .iter()
                .map(|(name, value)| (name.clone(), value.clone()))
                .collect(),
            file_spec: None,
        }
    }

    /// Set the file specification (original PDF path).
    pub fn with_file_spec(mut self, path: impl Into<String>) -> Self {
        self.file_spec = Some(path.into());
        self
    }

    /// Add a field to export.
    pub fn add_field(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.push((name.into(), value.into()));
    }

    /// Write XFDF data to a file.
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path.as_ref(), self.to_xml())?;
        Ok(())
    }

    /// Generate XFDF XML string.
    pub fn to_xml(&self) -> String {
        let mut xml = String::new();

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        xml.push('\n');
        xml.push_str(r#"<xfdf xmlns="http://ns.adobe.com/xfdf/" xml:space="preserve">"#);
        xml.push('\n');

        if let Some(ref file_spec) = self.file_spec {
            xml.push_str(&format!("  <f href=\"{}\"/>\n", xml_escape(file_spec)));
        }

        xml.push_str("  <fields>\n");
        for (name, value) in &self.fields {
            xml.push_str(&field_to_xml(name, value));
        }
        xml.push_str("  </fields>\n");
        xml.push_str("</xfdf>\n");

        xml
    }

    /// Generate XFDF as bytes (UTF-8).
    pub fn to_bytes(&self) -> Vec<u8> {
        self.to_xml().into_bytes()
    }
}

fn field_to_xml(name: &str, value: &FieldValue) -> String {
    let mut xml = format!("    <field name=\"{}\">\n", xml_escape(name));

    let values: Vec<String> = match value {
        FieldValue::Text(s) => vec![xml_escape(s)],
        FieldValue::Null => vec![String::new()],
        FieldValue::Number(n) => vec![n.to_string()],
        FieldValue::Boolean(true) => vec!["Yes".to_string()],
        FieldValue::Boolean(false) => vec!["Off".to_string()],
        FieldValue::Array(items) => items.iter().map(|s| xml_escape(s)).collect(),
    };
    for v in values {
        xml.push_str(&format!("      <value>{}</value>\n", v));
    }

    xml.push_str("    </field>\n");
    xml
}

/// Escape special XML characters.
fn xml_escape(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
