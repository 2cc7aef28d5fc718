//! External form engine invocation.
//!
//! The form engine is the `pdftk` command line tool. It is reached through
//! the [`FormEngine`] trait so that orchestration can run against any
//! implementation; [`Pdftk`] spawns the real binary with `tokio::process`.
//!
//! Every call is a single invocation: no retry, no timeout.

use std::ffi::OsString;
use std::future::Future;
use std::path::{Path, PathBuf};

use tokio::process::Command;

use crate::error::EngineFailure;

/// Directive that prints field metadata as UTF-8.
pub const DUMP_DATA_FIELDS: &str = "dump_data_fields_utf8";
/// Directive that fills a form from a payload file.
pub const FILL_FORM: &str = "fill_form";
/// Directive introducing the destination file.
pub const OUTPUT: &str = "output";
/// Argument introducing the owner password.
pub const OWNER_PW: &str = "owner_pw";
/// Argument introducing the user password.
pub const USER_PW: &str = "user_pw";
/// Argument requesting a flattened result.
pub const FLATTEN: &str = "flatten";

/// Environment variable overriding the `pdftk` program location.
pub const PDFTK_PATH_ENV: &str = "PDFTK_PATH";

/// Captured output of a successful invocation.
#[derive(Debug, Clone, Default)]
pub struct EngineOutput {
    /// Standard output
    pub stdout: Vec<u8>,
    /// Standard error
    pub stderr: Vec<u8>,
}

/// Something that can run form engine commands.
pub trait FormEngine {
    /// Run the engine once with `args`.
    ///
    /// Returns the captured output on a zero exit status.
    fn run(
        &self,
        args: Vec<OsString>,
    ) -> impl Future<Output = std::result::Result<EngineOutput, EngineFailure>> + Send;
}

/// The `pdftk` command line tool.
#[derive(Debug, Clone)]
pub struct Pdftk {
    program: PathBuf,
}

impl Default for Pdftk {
    fn default() -> Self {
        Self::new()
    }
}

impl Pdftk {
    /// Use `pdftk` from `PATH`.
    pub fn new() -> Self {
        Self::with_program("pdftk")
    }

    /// Use a specific program.
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Use the program named by `PDFTK_PATH`, falling back to `pdftk` from `PATH`.
    pub fn from_env() -> Self {
        Self::from_override(std::env::var_os(PDFTK_PATH_ENV))
    }

    fn from_override(program: Option<OsString>) -> Self {
        match program {
            Some(program) if !program.is_empty() => Self::with_program(program),
            _ => Self::new(),
        }
    }

    /// The program that will be spawned.
    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl FormEngine for Pdftk {
    async fn run(&self, args: Vec<OsString>) -> std::result::Result<EngineOutput, EngineFailure> {
        log::debug!("Running {} {}", self.program.display(), redacted(&args));

        let output = Command::new(&self.program)
            .args(&args)
            .output()
            .await
            .map_err(|e| {
                log::warn!("Failed to launch {}: {}", self.program.display(), e);
                EngineFailure::Spawn(e)
            })?;

        if output.status.success() {
            if !output.stderr.is_empty() {
                log::debug!("pdftk: {}", String::from_utf8_lossy(&output.stderr).trim());
            }
            Ok(EngineOutput {
                stdout: output.stdout,
                stderr: output.stderr,
            })
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            log::warn!("pdftk exited with {}: {}", output.status, stderr);
            Err(EngineFailure::Status {
                code: output.status.code(),
                stderr,
            })
        }
    }
}

/// Arguments for dumping the fields of `source`.
pub fn dump_args(source: &Path, owner_pw: Option<&str>, user_pw: Option<&str>) -> Vec<OsString> {
    let mut args = vec![source.as_os_str().to_os_string(), DUMP_DATA_FIELDS.into()];
    push_passwords(&mut args, owner_pw, user_pw);
    args
}

/// Arguments for filling `source` from `payload` into `destination`.
pub fn fill_args(
    source: &Path,
    payload: &Path,
    destination: &Path,
    owner_pw: Option<&str>,
    user_pw: Option<&str>,
    flatten: bool,
) -> Vec<OsString> {
    let mut args = vec![
        source.as_os_str().to_os_string(),
        FILL_FORM.into(),
        payload.as_os_str().to_os_string(),
        OUTPUT.into(),
        destination.as_os_str().to_os_string(),
    ];
    push_passwords(&mut args, owner_pw, user_pw);
    if flatten {
        args.push(FLATTEN.into());
    }
    args
}

// Empty passwords are not forwarded.
fn push_passwords(args: &mut Vec<OsString>, owner_pw: Option<&str>, user_pw: Option<&str>) {
    for (label, password) in [(OWNER_PW, owner_pw), (USER_PW, user_pw)] {
        if let Some(password) = password.filter(|p| !p.is_empty()) {
            args.push(label.into());
            args.push(password.into());
        }
    }
}

fn redacted(args: &[OsString]) -> String {
    let mut shown = Vec::with_capacity(args.len());
    let mut hide_next = false;
    for arg in args {
        if hide_next {
            shown.push("****".to_string());
            hide_next = false;
        } else {
            hide_next = arg == OWNER_PW || arg == USER_PW;
            shown.push(arg.to_string_lossy().into_owned());
        }
    }
    shown.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(args: &[OsString]) -> Vec<String> {
        args.iter().map(|a| a.to_string_lossy().into_owned()).collect()
    }

    #[test]
    fn test_program_override() {
        let pdftk = Pdftk::from_override(Some("/opt/pdftk/bin/pdftk".into()));
        assert_eq!(pdftk.program(), Path::new("/opt/pdftk/bin/pdftk"));
        assert_eq!(Pdftk::from_override(Some(OsString::new())).program(), Path::new("pdftk"));
        assert_eq!(Pdftk::from_override(None).program(), Path::new("pdftk"));
    }

    #[test]
    fn test_from_env_reads_pdftk_path() {
        // Only test in this binary that touches PDFTK_PATH.
        std::env::set_var(PDFTK_PATH_ENV, "/usr/local/bin/pdftk-java");
        let pdftk = Pdftk::from_env();
        std::env::remove_var(PDFTK_PATH_ENV);
        assert_eq!(pdftk.program(), Path::new("/usr/local/bin/pdftk-java"));
    }

    #[test]
    fn test_dump_args() {
        let args = dump_args(Path::new("form.pdf"), None, None);
        assert_eq!(strings(&args), ["form.pdf", "dump_data_fields_utf8"]);
    }

    #[test]
    fn test_dump_args_with_passwords() {
        let args = dump_args(Path::new("form.pdf"), Some("own"), Some("usr"));
        assert_eq!(
            strings(&args),
            ["form.pdf", "dump_data_fields_utf8", "owner_pw", "own", "user_pw", "usr"]
        );
    }

    #[test]
    fn test_fill_args_order() {
        let args = fill_args(
            Path::new("in.pdf"),
            Path::new("data.fdf"),
            Path::new("out.pdf"),
            Some("secret"),
            None,
            true,
        );
        assert_eq!(
            strings(&args),
            ["in.pdf", "fill_form", "data.fdf", "output", "out.pdf", "owner_pw", "secret", "flatten"]
        );
    }

    #[test]
    fn test_empty_password_not_forwarded() {
        let args = fill_args(
            Path::new("in.pdf"),
            Path::new("data.fdf"),
            Path::new("out.pdf"),
            Some(""),
            Some(""),
            false,
        );
        assert_eq!(args.len(), 5);
    }

    #[test]
    fn test_redacted_hides_passwords() {
        let args = dump_args(Path::new("form.pdf"), Some("own"), None);
        let shown = redacted(&args);
        assert!(shown.contains("owner_pw ****"));
        assert!(!shown.contains("own "));
    }

    #[test]
    fn test_with_program() {
        assert_eq!(Pdftk::with_program("/opt/pdftk").program(), Path::new("/opt/pdftk"));
        assert_eq!(Pdftk::new().program(), Path::new("pdftk"));
    }

    #[tokio::test]
    async fn test_missing_program_is_spawn_failure() {
        let engine = Pdftk::with_program("/nonexistent/pdftk-for-tests");
        let result = engine.run(vec!["--version".into()]).await;
        assert!(matches!(result, Err(EngineFailure::Spawn(_))));
    }
}
