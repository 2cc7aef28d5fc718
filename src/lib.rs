//! # PDF Filler
//!
//! Read AcroForm field metadata and fill PDF forms through the `pdftk`
//! form engine.
//!
//! ## Core Features
//!
//! ### Reading
//! - **Field Dump Parsing**: `dump_data_fields_utf8` output into ordered [`FieldRecord`]s
//! - **Values**: optional single-line or multi-line value extraction
//! - **Custom Names**: caller-supplied field name pattern
//! - **Key Remapping**: rename field titles to caller keys
//!
//! ### Filling
//! - **FDF / XFDF Payloads**: escaped keys, UTF-16 text for non-ASCII values
//! - **Checkboxes**: `true` / `false` written as `Yes` / `Off`
//! - **Flattening**: optional merge of values into page content
//! - **Passwords**: owner/user passwords forwarded as given
//!
//! ## Quick Start
//!
//! ```ignore
//! use pdf_filler::{ExtractOptions, FieldMap, FillOptions, PdfFiller};
//!
//! # async fn run() -> pdf_filler::Result<()> {
//! let filler = PdfFiller::new();
//!
//! // Read the form's fields and current values
//! let fields = filler
//!     .generate_field_json(&ExtractOptions::new("form.pdf").read_values())
//!     .await?;
//! for field in &fields {
//!     println!("{} ({}) = {}", field.title, field.field_type, field.field_value);
//! }
//!
//! // Fill it
//! let mut values = FieldMap::new();
//! values.insert("last_name".into(), "Doe".into());
//! values.insert("agree".into(), true.into());
//! let options = FillOptions::new().with_flatten(true).with_temp_path("/tmp");
//! filler
//!     .fill_form_with_options("form.pdf", "filled.pdf", values, &options)
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## License
//!
//! Licensed under either of:
//!
//! * Apache License, Version 2.0 ([LICENSE-APACHE](LICENSE-APACHE) or <http://www.apache.org/licenses/LICENSE-2.0>)
//! * MIT license ([LICENSE-MIT](LICENSE-MIT) or <http://opensource.org/licenses/MIT>)
//!
//! at your option.

#![warn(missing_docs)]

// Error handling
pub mod error;

// Dump parsing
pub mod dump;

// Record/value conversion
pub mod codec;

// FDF/XFDF payload encoding
pub mod fdf;

// External form engine
pub mod engine;

// Extraction and fill orchestration
pub mod filler;

// Configuration
pub mod config;

// Re-exports
pub use codec::{
    field_map_from_json, map_form_to_pdf, normalize_for_fill, to_key_value,
    to_key_value_remapped, FieldMap, FieldValue, RemapTable,
};
pub use config::{ExtractOptions, FillOptions};
pub use dump::{parse_dump, DumpParser, FieldFlags, FieldKind, FieldRecord, ValueExtraction};
pub use engine::{EngineOutput, FormEngine, Pdftk};
pub use error::{EngineFailure, Error, Result};
pub use fdf::PayloadFormat;
pub use filler::{PdfFiller, OWNER_PW_KEY, USER_PW_KEY};

// Version info
/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
