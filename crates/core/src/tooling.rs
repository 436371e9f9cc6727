//! External programs the generation run depends on.

use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use tracing::{debug, warn};

use crate::error::{GenerateError, Result};

const JAVA_REMEDIATION: &str = "Java is required for OpenAPI Generator. Please install Java:
  Ubuntu/Debian: sudo apt install default-jdk
  macOS: brew install openjdk
  Windows: Download from https://adoptium.net/";

/// Names of the external programs, resolved on `PATH` at call time.
///
/// The defaults are what the PHP client is generated with; tests point the
/// fields at stub scripts instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolchain {
    /// JVM launcher, probed with `-version`.
    pub runtime: PathBuf,
    /// Package runner that launches the generator.
    pub runner: PathBuf,
    /// Package manager used for the one-shot install.
    pub package_manager: PathBuf,
    /// npm package providing the generator CLI.
    pub generator_package: String,
}

impl Default for Toolchain {
    fn default() -> Self {
        Self {
            runtime: PathBuf::from("java"),
            runner: PathBuf::from("npx"),
            package_manager: PathBuf::from("npm"),
            generator_package: "@openapitools/openapi-generator-cli".to_string(),
        }
    }
}

impl Toolchain {
    /// Fail unless `java -version` exits successfully.
    pub fn check_runtime(&self) -> Result<()> {
        let ok = resolve_command(&self.runtime)
            .map(|mut cmd| {
                cmd.arg("-version");
                succeeded(&self.runtime, cmd)
            })
            .unwrap_or(false);

        if ok {
            Ok(())
        } else {
            Err(GenerateError::PrerequisiteMissing(JAVA_REMEDIATION.to_string()))
        }
    }

    /// Whether `npx <generator> version` works right now.
    pub fn generator_available(&self) -> bool {
        self.generator_command()
            .map(|mut cmd| {
                cmd.arg("version");
                succeeded(&self.runner, cmd)
            })
            .unwrap_or(false)
    }

    /// Install the generator globally. Attempted once, never retried.
    pub fn install_generator(&self) -> Result<()> {
        let installed = resolve_command(&self.package_manager)
            .map(|mut cmd| {
                cmd.args(["install", "-g", self.generator_package.as_str()]);
                succeeded(&self.package_manager, cmd)
            })
            .unwrap_or(false);

        if installed {
            Ok(())
        } else {
            Err(GenerateError::PrerequisiteMissing(format!(
                "Failed to install openapi-generator-cli. Please install it manually: \
                 npm install -g {}",
                self.generator_package
            )))
        }
    }

    /// `npx <generator>` with no further arguments.
    pub fn generator_command(&self) -> Option<Command> {
        let mut cmd = resolve_command(&self.runner)?;
        cmd.arg(&self.generator_package);
        Some(cmd)
    }

    /// Format the generator launcher for display/logging.
    pub fn display_generator(&self) -> String {
        format!("{} {}", self.runner.display(), self.generator_package)
    }
}

fn resolve_command(program: &Path) -> Option<Command> {
    match which::which(program) {
        Ok(resolved) => {
            debug!(program = %program.display(), resolved = %resolved.display(), "Resolved executable.");
            Some(Command::new(resolved))
        }
        Err(err) => {
            debug!(program = %program.display(), "Executable not found: {err}");
            None
        }
    }
}

/// Run `cmd` to completion with output captured and report whether it exited 0.
fn succeeded(program: &Path, mut cmd: Command) -> bool {
    cmd.stdin(Stdio::null());
    match cmd.output() {
        Ok(Output { status, stderr, .. }) if !status.success() => {
            debug!(
                program = %program.display(),
                %status,
                stderr = %String::from_utf8_lossy(&stderr).trim(),
                "Probe exited unsuccessfully."
            );
            false
        }
        Ok(_) => true,
        Err(err) => {
            warn!(program = %program.display(), "Failed to spawn: {err}");
            false
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn missing_toolchain(dir: &TempDir) -> Toolchain {
        Toolchain {
            runtime: dir.path().join("no-java"),
            runner: dir.path().join("no-npx"),
            package_manager: dir.path().join("no-npm"),
            ..Toolchain::default()
        }
    }

    #[test]
    fn test_default_toolchain() {
        let toolchain = Toolchain::default();
        assert_eq!(toolchain.runtime, PathBuf::from("java"));
        assert_eq!(
            toolchain.display_generator(),
            "npx @openapitools/openapi-generator-cli"
        );
    }

    #[test]
    fn test_missing_runtime_reports_remediation() {
        let temp_dir = TempDir::new().unwrap();
        let err = missing_toolchain(&temp_dir).check_runtime().unwrap_err();
        assert!(matches!(err, GenerateError::PrerequisiteMissing(_)));
        assert!(err.to_string().contains("sudo apt install default-jdk"));
    }

    #[test]
    fn test_runtime_remediation_lists_one_platform_per_line() {
        let lines: Vec<&str> = JAVA_REMEDIATION.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Java is required for OpenAPI Generator. Please install Java:",
                "  Ubuntu/Debian: sudo apt install default-jdk",
                "  macOS: brew install openjdk",
                "  Windows: Download from https://adoptium.net/",
            ]
        );
    }

    #[test]
    fn test_missing_runner_means_generator_unavailable() {
        let temp_dir = TempDir::new().unwrap();
        let toolchain = missing_toolchain(&temp_dir);
        assert!(!toolchain.generator_available());
        assert!(toolchain.generator_command().is_none());
    }

    #[test]
    fn test_missing_package_manager_fails_install() {
        let temp_dir = TempDir::new().unwrap();
        let err = missing_toolchain(&temp_dir).install_generator().unwrap_err();
        assert!(matches!(err, GenerateError::PrerequisiteMissing(_)));
        assert!(
            err.to_string()
                .contains("npm install -g @openapitools/openapi-generator-cli")
        );
    }
}
