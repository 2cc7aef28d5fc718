//! FDF (Forms Data Format) writer implementation.
//!
//! Generates FDF files according to ISO 32000-1:2008 Section 12.7.7, in the
//! flat `/Fields` layout that `pdftk fill_form` consumes.

use crate::codec::{FieldMap, FieldValue};
use crate::error::Result;
use std::io::Write;
use std::path::Path;

/// UTF-16BE byte order mark that marks a PDF text string as Unicode.
const UTF16_BOM: [u8; 2] = [0xfe, 0xff];

/// FDF file writer.
///
/// Field names and text values are written as PDF literal strings. Text that
/// is not plain ASCII is stored as UTF-16BE with a byte order mark so that
/// form engines read it back as Unicode.
///
/// # Example
///
/// ```ignore
/// use pdf_filler::fdf::FdfWriter;
///
/// let mut writer = FdfWriter::new();
/// writer.add_field("name", "John Doe");
/// writer.add_field("agree", true);
/// writer.write_to_file("form_data.fdf")?;
/// ```
#[derive(Debug, Default)]
pub struct FdfWriter {
    /// Form fields to export, in output order
    fields: Vec<(String, FieldValue)>,
    /// Original PDF file path (optional, for /F entry)
    file_spec: Option<String>,
}

impl FdfWriter {
    /// Create a new FDF writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an FDF writer holding every entry of a field mapping.
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

    /// Write FDF data to a file.
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let bytes = self.to_bytes()?;
        std::fs::write(path.as_ref(), bytes)?;
        Ok(())
    }

    /// Generate FDF data as bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut output = Vec::new();

        // FDF header
        writeln!(output, "%FDF-1.2")?;
        // Binary marker (high-bit bytes to indicate binary file)
        output.write_all(b"%")?;
        output.write_all(&[0xe2, 0xe3, 0xcf, 0xd3])?;
        writeln!(output)?;

        writeln!(output, "1 0 obj")?;
        writeln!(output, "<<")?;
        writeln!(output, "/FDF <<")?;

        if let Some(ref file_spec) = self.file_spec {
            output.write_all(b"/F ")?;
            output.write_all(&encode_pdf_string(file_spec))?;
            writeln!(output)?;
        }

        writeln!(output, "/Fields [")?;
        for (name, value) in &self.fields {
            write_field(&mut output, name, value)?;
        }
        writeln!(output, "]")?;

        writeln!(output, ">>")?;
        writeln!(output, ">>")?;
        writeln!(output, "endobj")?;

        // Trailer
        writeln!(output, "trailer")?;
        writeln!(output, "<< /Root 1 0 R >>")?;
        writeln!(output, "%%EOF")?;

        Ok(output)
    }
}

fn write_field(output: &mut Vec<u8>, name: &str, value: &FieldValue) -> std::io::Result<()> {
    output.write_all(b"<< /T ")?;
    output.write_all(&encode_pdf_string(name))?;
    output.write_all(b" /V ")?;
    match value {
        FieldValue::Text(s) => output.write_all(&encode_pdf_string(s))?,
        FieldValue::Null => output.write_all(b"()")?,
        FieldValue::Number(n) => output.write_all(&encode_pdf_string(&n.to_string()))?,
        FieldValue::Boolean(true) => output.write_all(b"/Yes")?,
        FieldValue::Boolean(false) => output.write_all(b"/Off")?,
        FieldValue::Array(items) => {
            output.write_all(b"[ ")?;
            for item in items {
                output.write_all(&encode_pdf_string(item))?;
                output.write_all(b" ")?;
            }
            output.write_all(b"]")?;
        },
    }
    output.write_all(b" >>\n")
}

/// Encode a string as a PDF literal string.
///
/// ASCII is written as is; anything else becomes UTF-16BE behind a byte
/// order mark. Delimiters and line breaks are escaped in both cases.
fn encode_pdf_string(s: &str) -> Vec<u8> {
    let raw: Vec<u8> = if s.is_ascii() {
        s.as_bytes().to_vec()
    } else {
        UTF16_BOM
            .into_iter()
            .chain(s.encode_utf16().flat_map(u16::to_be_bytes))
            .collect()
    };

    let mut encoded = Vec::with_capacity(raw.len() + 2);
    encoded.push(b'(');
    for byte in raw {
        match byte {
            b'(' => encoded.extend_from_slice(b"\\("),
            b')' => encoded.extend_from_slice(b"\\)"),
            b'\\' => encoded.extend_from_slice(b"\\\\"),
            b'\r' => encoded.extend_from_slice(b"\\r"),
            b'\n' => encoded.extend_from_slice(b"\\n"),
            b'\t' => encoded.extend_from_slice(b"\\t"),
            _ => encoded.push(byte),
        }
    }
    encoded.push(b')');
    encoded
}
