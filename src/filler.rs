//! Form extraction and filling through the form engine.
//!
//! [`PdfFiller`] holds nothing but its engine, so a single value can serve
//! any number of concurrent operations. Each fill owns a uniquely named
//! intermediate payload file; that name is the only thing separating
//! concurrent fills.

use std::path::{Path, PathBuf};

use chrono::Utc;
use uuid::Uuid;

use crate::codec::{normalize_for_fill, to_key_value, FieldMap};
use crate::config::{ExtractOptions, FillOptions};
use crate::dump::FieldRecord;
use crate::engine::{dump_args, fill_args, FormEngine, Pdftk};
use crate::error::{Error, Result};
use crate::fdf::{write_payload, PayloadFormat};

/// Reserved value key carrying an owner password override.
pub const OWNER_PW_KEY: &str = "##OWNER_PW##";
/// Reserved value key carrying a user password override.
pub const USER_PW_KEY: &str = "##USER_PW##";

/// Prefix of intermediate payload file names.
pub const INTERMEDIATE_PREFIX: &str = "temp_data";

/// Reads and fills PDF forms with a [`FormEngine`].
///
/// # Example
///
/// ```ignore
/// use pdf_filler::{FieldMap, PdfFiller};
///
/// let filler = PdfFiller::new();
/// let mut values = FieldMap::new();
/// values.insert("last_name".into(), "Doe".into());
/// values.insert("agree".into(), true.into());
/// filler.fill_form("form.pdf", "filled.pdf", values).await?;
/// ```
#[derive(Debug, Clone)]
pub struct PdfFiller<E = Pdftk> {
    engine: E,
}

impl Default for PdfFiller<Pdftk> {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfFiller<Pdftk> {
    /// Use `pdftk`, honouring `PDFTK_PATH`.
    pub fn new() -> Self {
        Self::with_engine(Pdftk::from_env())
    }
}

impl<E: FormEngine> PdfFiller<E> {
    /// Use a specific engine.
    pub fn with_engine(engine: E) -> Self {
        Self { engine }
    }

    /// The engine in use.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Read the field records of a document.
    ///
    /// Fails with [`Error::Extraction`] when the engine cannot be run or
    /// reports failure; no records are returned in that case.
    pub async fn generate_field_json(&self, options: &ExtractOptions) -> Result<Vec<FieldRecord>> {
        let args = dump_args(
            &options.source_file,
            options.owner_pw.as_deref(),
            options.user_pw.as_deref(),
        );
        let output = self.engine.run(args).await.map_err(Error::Extraction)?;
        let dump = String::from_utf8_lossy(&output.stdout);

        let records = options.parser.parse(&dump);
        log::info!(
            "Read {} fields from {}",
            records.len(),
            options.source_file.display()
        );
        Ok(records)
    }

    /// Read a document's fields as a title → value mapping.
    ///
    /// Values are empty unless `options` asks for them.
    pub async fn generate_fdf_template(&self, options: &ExtractOptions) -> Result<FieldMap> {
        let records = self.generate_field_json(options).await?;
        Ok(to_key_value(&records))
    }

    /// Fill `source` with `values` and write the result to `destination`.
    ///
    /// `##OWNER_PW##` and `##USER_PW##` entries in `values` are removed and
    /// take precedence over the passwords in `options`. Booleans are written
    /// as the checkbox states `Yes` / `Off`.
    ///
    /// The intermediate payload file is removed after the engine succeeds.
    /// If the engine fails it is kept and [`Error::FillInvocation`] is
    /// returned. If removal fails, [`Error::Cleanup`] is returned even
    /// though `destination` was written.
    pub async fn fill_form_with_options(
        &self,
        source: impl AsRef<Path>,
        destination: impl AsRef<Path>,
        mut values: FieldMap,
        options: &FillOptions,
    ) -> Result<()> {
        let source = source.as_ref();
        let destination = destination.as_ref();

        let owner_pw = take_password(&mut values, OWNER_PW_KEY).or_else(|| options.owner_pw.clone());
        let user_pw = take_password(&mut values, USER_PW_KEY).or_else(|| options.user_pw.clone());

        let payload = intermediate_path(options.temp_path.as_deref(), options.format);
        write_payload(options.format, &normalize_for_fill(values), &payload).await?;

        let args = fill_args(
            source,
            &payload,
            destination,
            owner_pw.as_deref(),
            user_pw.as_deref(),
            options.flatten,
        );
        if let Err(failure) = self.engine.run(args).await {
            log::warn!(
                "Filling {} failed, keeping {} for inspection",
                source.display(),
                payload.display()
            );
            return Err(Error::FillInvocation(failure));
        }

        tokio::fs::remove_file(&payload)
            .await
            .map_err(|source| Error::Cleanup {
                path: payload.clone(),
                source,
            })?;

        log::info!("Filled {} into {}", source.display(), destination.display());
        Ok(())
    }

    /// Fill a form, choosing whether to flatten it.
    pub async fn fill_form_with_flatten(
        &self,
        source: impl AsRef<Path>,
        destination: impl AsRef<Path>,
        values: FieldMap,
        flatten: bool,
    ) -> Result<()> {
        let options = FillOptions::new().with_flatten(flatten);
        self.fill_form_with_options(source, destination, values, &options)
            .await
    }

    /// Fill and flatten a form.
    pub async fn fill_form(
        &self,
        source: impl AsRef<Path>,
        destination: impl AsRef<Path>,
        values: FieldMap,
    ) -> Result<()> {
        self.fill_form_with_flatten(source, destination, values, true)
            .await
    }
}

// A present entry wins even when empty; empty passwords are dropped when
// the engine arguments are built.
fn take_password(values: &mut FieldMap, key: &str) -> Option<String> {
    values.shift_remove(key).map(|value| value.to_string())
}

/// A fresh intermediate file name: prefix, millisecond timestamp, random suffix.
pub fn intermediate_file_name(format: PayloadFormat) -> String {
    format!(
        "{}{}{}.{}",
        INTERMEDIATE_PREFIX,
        Utc::now().timestamp_millis(),
        Uuid::new_v4().simple(),
        format.extension()
    )
}

fn intermediate_path(temp_path: Option<&Path>, format: PayloadFormat) -> PathBuf {
    let name = intermediate_file_name(format);
    match temp_path {
        Some(dir) => dir.join(name),
        None => PathBuf::from(name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_intermediate_file_name_shape() {
        let name = intermediate_file_name(PayloadFormat::Fdf);
        assert!(name.starts_with(INTERMEDIATE_PREFIX));
        assert!(name.ends_with(".fdf"));
        assert!(intermediate_file_name(PayloadFormat::Xfdf).ends_with(".xfdf"));
    }

    #[test]
    fn test_intermediate_file_names_unique() {
        let names: HashSet<String> = (0..1000)
            .map(|_| intermediate_file_name(PayloadFormat::Fdf))
            .collect();
        assert_eq!(names.len(), 1000);
    }

    #[test]
    fn test_intermediate_path_directory() {
        let path = intermediate_path(Some(Path::new("/tmp/forms")), PayloadFormat::Fdf);
        assert_eq!(path.parent(), Some(Path::new("/tmp/forms")));

        let path = intermediate_path(None, PayloadFormat::Fdf);
        assert_eq!(path.parent(), Some(Path::new("")));
    }

    #[test]
    fn test_take_password() {
        let mut values = FieldMap::new();
        values.insert("name".into(), "Jane".into());
        values.insert(OWNER_PW_KEY.into(), "secret".into());
        values.insert(USER_PW_KEY.into(), "".into());
        values.insert("city".into(), "Oslo".into());

        assert_eq!(take_password(&mut values, OWNER_PW_KEY).as_deref(), Some("secret"));
        assert_eq!(take_password(&mut values, USER_PW_KEY).as_deref(), Some(""));
        assert_eq!(take_password(&mut values, USER_PW_KEY), None);
        let keys: Vec<&str> = values.keys().map(String::as_str).collect();
        assert_eq!(keys, ["name", "city"]);
    }
}
