//! Filesystem layout and the fixed generator parameters.

use std::path::{Path, PathBuf};

use crate::error::{GenerateError, Result};

const SPEC_DIR: &str = "rest-api-spec";
const SPEC_PRODUCT_DIR: &str = "kintone";
const OUTPUT_DIR: &str = "src";
const TEMP_DIR: &str = "temp";

/// Directory the generator writes sources into, relative to the staging dir.
pub const SRC_BASE_PATH: &str = "lib";

/// Paths used by a generation run.
///
/// Everything defaults to a location under the project root; individual
/// entries can be overridden before the run starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorPaths {
    /// Root of the project the client is generated into.
    pub project_root: PathBuf,
    /// Vendored specification root (`rest-api-spec`).
    pub spec_root: PathBuf,
    /// Final client source directory, wiped on every run.
    pub output_dir: PathBuf,
    /// Staging directory the generator writes into.
    pub temp_dir: PathBuf,
}

impl GeneratorPaths {
    /// Default layout under `project_root`.
    pub fn from_project_root(project_root: impl Into<PathBuf>) -> Self {
        let project_root = project_root.into();
        Self {
            spec_root: project_root.join(SPEC_DIR),
            output_dir: project_root.join(OUTPUT_DIR),
            temp_dir: project_root.join(TEMP_DIR),
            project_root,
        }
    }

    /// Override the spec root. Relative paths resolve against the project root.
    pub fn with_spec_root(mut self, path: impl AsRef<Path>) -> Self {
        self.spec_root = self.project_root.join(path);
        self
    }

    /// Override the output directory. Relative paths resolve against the project root.
    pub fn with_output_dir(mut self, path: impl AsRef<Path>) -> Self {
        self.output_dir = self.project_root.join(path);
        self
    }

    /// Override the staging directory. Relative paths resolve against the project root.
    pub fn with_temp_dir(mut self, path: impl AsRef<Path>) -> Self {
        self.temp_dir = self.project_root.join(path);
        self
    }

    /// Directory holding one subdirectory per spec version.
    pub fn versions_dir(&self) -> PathBuf {
        self.spec_root.join(SPEC_PRODUCT_DIR)
    }

    /// Where the generator places sources inside the staging directory.
    pub fn staged_sources_dir(&self) -> PathBuf {
        self.temp_dir.join(SRC_BASE_PATH)
    }

    /// Reject layouts where the output and staging directories nest.
    ///
    /// The staging directory is deleted before and after generation and the
    /// output directory is wiped, so either one inside the other loses data.
    /// The comparison is lexical; paths are not canonicalized.
    pub fn check_disjoint(&self) -> Result<()> {
        let nested = self.output_dir.starts_with(&self.temp_dir)
            || self.temp_dir.starts_with(&self.output_dir);
        if nested {
            return Err(GenerateError::OverlappingPaths {
                output: self.output_dir.clone(),
                staging: self.temp_dir.clone(),
            });
        }
        Ok(())
    }
}

/// Fixed parameters handed to openapi-generator.
///
/// These mirror the flags the PHP client has always been generated with and
/// must not drift, or the namespaces of the generated classes change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationRequest {
    /// Generator name (`-g`).
    pub generator: &'static str,
    /// `--package-name`
    pub package_name: &'static str,
    /// `--invoker-package`
    pub invoker_package: &'static str,
    /// `--model-package`
    pub model_package: &'static str,
    /// `--api-package`
    pub api_package: &'static str,
    /// Value for `srcBasePath` in `--additional-properties`.
    pub src_base_path: &'static str,
}

impl Default for GenerationRequest {
    fn default() -> Self {
        Self {
            generator: "php",
            package_name: "Kintone",
            invoker_package: "Kintone",
            model_package: "Model",
            api_package: "Api",
            src_base_path: SRC_BASE_PATH,
        }
    }
}

impl GenerationRequest {
    /// Arguments following `generate`, in the order the generator expects them.
    pub fn to_args(&self, input: &Path, output: &Path) -> Vec<String> {
        vec![
            "-i".to_string(),
            input.display().to_string(),
            "-g".to_string(),
            self.generator.to_string(),
            "-o".to_string(),
            output.display().to_string(),
            format!("--package-name={}", self.package_name),
            format!("--invoker-package={}", self.invoker_package),
            format!("--model-package={}", self.model_package),
            format!("--api-package={}", self.api_package),
            format!("--additional-properties=srcBasePath={}", self.src_base_path),
        ]
    }
}
