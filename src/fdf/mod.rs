//! Intermediate payload encoding.
//!
//! A fill operation hands its field values to the form engine through a
//! transient file in one of two formats:
//! - **FDF** (Forms Data Format): ISO 32000-1:2008 Section 12.7.7
//! - **XFDF** (XML Forms Data Format): XML representation of FDF
//!
//! ## Example
//!
//! ```ignore
//! use pdf_filler::fdf::{write_payload, PayloadFormat};
//!
//! write_payload(PayloadFormat::Fdf, &values, Path::new("data.fdf")).await?;
//! ```

mod fdf_writer;
mod xfdf_writer;

pub use fdf_writer::FdfWriter;
pub use xfdf_writer::XfdfWriter;

use crate::codec::FieldMap;
use crate::error::{Error, Result};
use std::path::Path;

/// File format of the intermediate payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PayloadFormat {
    /// Forms Data Format
    #[default]
    Fdf,
    /// XML Forms Data Format
    Xfdf,
}

impl PayloadFormat {
    /// File extension used for intermediate files of this format.
    pub fn extension(&self) -> &'static str {
        match self {
            PayloadFormat::Fdf => "fdf",
            PayloadFormat::Xfdf => "xfdf",
        }
    }

    /// Encode a field mapping in this format.
    pub fn encode(&self, values: &FieldMap) -> Result<Vec<u8>> {
        match self {
            PayloadFormat::Fdf => FdfWriter::from_values(values).to_bytes(),
            PayloadFormat::Xfdf => Ok(XfdfWriter::from_values(values).to_bytes()),
        }
    }
}

/// Materialize `values` as a payload file at `path`.
///
/// Values are written as given; checkbox normalization happens before this.
/// Encoding is done in memory, only the file write is asynchronous.
pub async fn write_payload(format: PayloadFormat, values: &FieldMap, path: &Path) -> Result<()> {
    let bytes = format.encode(values)?;
    tokio::fs::write(path, bytes)
        .await
        .map_err(|source| Error::Payload {
            path: path.to_path_buf(),
            source,
        })?;
    log::debug!(
        "Wrote {} payload with {} fields to {}",
        format.extension(),
        values.len(),
        path.display()
    );
    Ok(())
}
