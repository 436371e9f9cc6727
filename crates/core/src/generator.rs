//! Invocation of openapi-generator.

use std::path::Path;
use std::process::{Command, Stdio};

use tracing::debug;

use crate::config::GenerationRequest;
use crate::error::{GenerateError, Result};
use crate::tooling::Toolchain;

/// A fully marshalled `openapi-generator generate` call, ready to run.
#[derive(Debug)]
pub struct GeneratorInvocation {
    cmd: Command,
    command_line: String,
}

/// Output captured from a successful generator run.
#[derive(Debug, Default)]
pub struct GeneratorOutput {
    /// Captured stdout.
    pub stdout: String,
    /// Captured stderr.
    pub stderr: String,
}

impl GeneratorOutput {
    /// Stdout followed by stderr, skipping whichever is empty.
    pub fn combined(&self) -> String {
        [self.stdout.trim_end(), self.stderr.trim_end()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl GeneratorInvocation {
    /// Build the invocation reading `input` and writing into `output`.
    pub fn new(
        toolchain: &Toolchain,
        request: &GenerationRequest,
        input: &Path,
        output: &Path,
    ) -> Result<Self> {
        let mut cmd = toolchain.generator_command().ok_or_else(|| {
            GenerateError::PrerequisiteMissing(format!(
                "'{}' is not installed or not available in PATH",
                toolchain.runner.display()
            ))
        })?;

        let args = request.to_args(input, output);
        cmd.arg("generate").args(&args);

        let command_line = std::iter::once(format!("{} generate", toolchain.display_generator()))
            .chain(args.iter().map(|arg| quote_arg(arg)))
            .collect::<Vec<_>>()
            .join(" ");

        Ok(Self { cmd, command_line })
    }

    /// Human-readable command line, for progress output.
    pub fn command_line(&self) -> &str {
        &self.command_line
    }

    /// Run to completion. A non-zero exit becomes [`GenerateError::GenerationFailed`]
    /// carrying everything the generator printed.
    pub fn run(mut self) -> Result<GeneratorOutput> {
        debug!(command = %self.command_line, "Running openapi-generator.");

        let result = self
            .cmd
            .stdin(Stdio::null())
            .output()
            .map_err(|err| GenerateError::GenerationFailed {
                code: None,
                output: format!("failed to spawn generator: {err}"),
            })?;

        let output = GeneratorOutput {
            stdout: String::from_utf8_lossy(&result.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&result.stderr).into_owned(),
        };

        if !result.status.success() {
            return Err(GenerateError::GenerationFailed {
                code: result.status.code(),
                output: output.combined(),
            });
        }

        debug!(
            stdout_len = output.stdout.len(),
            stderr_len = output.stderr.len(),
            "openapi-generator finished."
        );
        Ok(output)
    }
}

/// Single-quote `arg` for display unless every character is shell-inert.
fn quote_arg(arg: &str) -> String {
    let inert = |ch: char| ch.is_ascii_alphanumeric() || "_./=@:-".contains(ch);
    if arg.is_empty() || !arg.chars().all(inert) {
        format!("'{}'", arg.replace('\'', r"'\''"))
    } else {
        arg.to_string()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_combined_output() {
        let output = GeneratorOutput {
            stdout: "[main] INFO writing file\n".to_string(),
            stderr: "[main] WARN unused model\n".to_string(),
        };
        assert_eq!(
            output.combined(),
            "[main] INFO writing file\n[main] WARN unused model"
        );

        let stdout_only = GeneratorOutput {
            stdout: "done".to_string(),
            stderr: String::new(),
        };
        assert_eq!(stdout_only.combined(), "done");
    }

    #[test]
    fn test_quote_arg() {
        assert_eq!(quote_arg("-g"), "-g");
        assert_eq!(quote_arg("/my project/openapi.yaml"), "'/my project/openapi.yaml'");
        assert_eq!(quote_arg("it's"), r"'it'\''s'");
        assert_eq!(quote_arg(""), "''");
        assert_eq!(
            quote_arg("--additional-properties=srcBasePath=lib"),
            "--additional-properties=srcBasePath=lib"
        );
        assert_eq!(quote_arg("/srv/$HOME/spec.yaml"), "'/srv/$HOME/spec.yaml'");
        assert_eq!(quote_arg("a;rm -rf b"), "'a;rm -rf b'");
        assert_eq!(quote_arg("*.yaml"), "'*.yaml'");
        assert_eq!(quote_arg(r#"say"hi""#), r#"'say"hi"'"#);
    }

    #[test]
    fn test_missing_runner_is_prerequisite_error() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let toolchain = Toolchain {
            runner: temp_dir.path().join("no-npx"),
            ..Toolchain::default()
        };
        let err = GeneratorInvocation::new(
            &toolchain,
            &GenerationRequest::default(),
            Path::new("openapi.yaml"),
            Path::new("temp"),
        )
        .unwrap_err();
        assert!(matches!(err, GenerateError::PrerequisiteMissing(_)));
    }
}
