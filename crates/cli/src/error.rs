//! Structured CLI errors with meaningful exit codes.
//!
//! Exit code scheme:
//! - 0:  success
//! - 2:  clap arg parse error (automatic, before our code runs)
//! - 10: scene error (unknown scene, bad parameter)
//! - 12: input error (params string is not valid JSON)
//! - 13: serialization error (JSON output failure)

use std::fmt;

use tricube_core::DemoError;

/// Errors produced by CLI operations, each mapped to a distinct exit code.
#[derive(Debug)]
pub enum CliError {
    /// A scene-level error (unknown scene, malformed parameter).
    Scene(DemoError),
    /// A user input error (the --params string is not a JSON object).
    Input(String),
    /// A serialization error (JSON output failure).
    Serialization(String),
}

impl CliError {
    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Scene(_) => 10,
            CliError::Input(_) => 12,
            CliError::Serialization(_) => 13,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Scene(err) => write!(f, "scene error: {err}"),
            CliError::Input(msg) => write!(f, "input error: {msg}"),
            CliError::Serialization(msg) => write!(f, "serialization error: {msg}"),
        }
    }
}

impl From<DemoError> for CliError {
    fn from(err: DemoError) -> Self {
        CliError::Scene(err)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct() {
        let codes = [
            CliError::Scene(DemoError::UnknownScene("x".into())).exit_code(),
            CliError::Input("bad".into()).exit_code(),
            CliError::Serialization("bad".into()).exit_code(),
        ];
        for (i, a) in codes.iter().enumerate() {
            for b in &codes[i + 1..] {
                assert_ne!(a, b, "exit codes must not collide");
            }
        }
    }

    #[test]
    fn display_includes_the_inner_message() {
        let err = CliError::Scene(DemoError::UnknownScene("teapot".into()));
        assert!(format!("{err}").contains("teapot"));

        let err = CliError::Input("not json".into());
        assert!(format!("{err}").contains("not json"));
    }

    #[test]
    fn demo_error_converts_to_scene_variant() {
        let err: CliError = DemoError::UnknownScene("x".into()).into();
        assert_eq!(err.exit_code(), 10);
    }
}
