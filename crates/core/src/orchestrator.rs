//! The generation workflow, start to finish.
//!
//! Steps run strictly in order:
//! 1. resolve the newest spec version
//! 2. locate the spec document (bundled variant preferred)
//! 3. verify Java and openapi-generator, installing the latter once if needed
//! 4. wipe and recreate the output directory
//! 5. run the generator into the staging directory
//! 6. copy staged sources into the output directory and drop the staging directory
//! 7. run the post-processing hook
//!
//! The first failure stops the run and is returned as-is. Nothing is rolled
//! back, so the filesystem is left as the last completed step produced it.

use std::fmt;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::config::{GenerationRequest, GeneratorPaths};
use crate::error::{GenerateError, Result};
use crate::files::{copy_tree, recreate_dir, remove_dir_tree};
use crate::generator::{GeneratorInvocation, GeneratorOutput};
use crate::spec::{SpecLocation, SpecVersion, find_latest_version, locate_spec_document};
use crate::tooling::Toolchain;

/// Where a run currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Nothing has happened yet.
    Init,
    /// The newest spec version is known.
    VersionResolved,
    /// The spec document to generate from is known.
    SpecLocated,
    /// Java and openapi-generator are usable.
    PrereqsVerified,
    /// The output directory is empty.
    OutputCleaned,
    /// The generator exited successfully.
    Generated,
    /// Sources were copied out and the staging directory removed.
    Relocated,
    /// The post-processing hook ran.
    PostProcessed,
    /// The run completed.
    Done,
    /// A step failed; see [`Orchestrator::last_completed`].
    Failed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Init => "init",
            Self::VersionResolved => "version-resolved",
            Self::SpecLocated => "spec-located",
            Self::PrereqsVerified => "prereqs-verified",
            Self::OutputCleaned => "output-cleaned",
            Self::Generated => "generated",
            Self::Relocated => "relocated",
            Self::PostProcessed => "post-processed",
            Self::Done => "done",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Receives the human-readable progress lines of a run.
pub trait Progress {
    /// One progress line.
    fn step(&mut self, message: &str);

    /// Run a long blocking step. Implementations may decorate it, e.g. with a
    /// spinner; the default just runs it.
    fn task<T>(&mut self, description: &str, f: impl FnOnce() -> Result<T>) -> Result<T> {
        self.step(description);
        f()
    }
}

/// Summary of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    /// Spec version generated from.
    pub version: SpecVersion,
    /// Spec document generated from.
    pub spec: SpecLocation,
    /// Number of files copied into the output directory.
    pub files_copied: usize,
}

/// Drives one generation run.
#[derive(Debug)]
pub struct Orchestrator<P> {
    paths: GeneratorPaths,
    toolchain: Toolchain,
    request: GenerationRequest,
    progress: P,
    stage: Stage,
    last_completed: Stage,
}

impl<P: Progress> Orchestrator<P> {
    /// Orchestrator with the default toolchain and generator parameters.
    pub fn new(paths: GeneratorPaths, progress: P) -> Self {
        Self {
            paths,
            toolchain: Toolchain::default(),
            request: GenerationRequest::default(),
            progress,
            stage: Stage::Init,
            last_completed: Stage::Init,
        }
    }

    /// Replace the external programs used for the run.
    pub fn with_toolchain(mut self, toolchain: Toolchain) -> Self {
        self.toolchain = toolchain;
        self
    }

    /// Current stage.
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Last stage reached successfully, also after a failure.
    pub fn last_completed(&self) -> Stage {
        self.last_completed
    }

    /// Give back the progress sink.
    pub fn into_progress(self) -> P {
        self.progress
    }

    /// Execute the whole workflow.
    pub fn run(&mut self) -> Result<GenerationReport> {
        match self.run_steps() {
            Ok(report) => Ok(report),
            Err(err) => {
                warn!(after = %self.last_completed, "Generation failed: {err}");
                self.stage = Stage::Failed;
                Err(err)
            }
        }
    }

    fn run_steps(&mut self) -> Result<GenerationReport> {
        self.progress
            .step("🚀 Starting Kintone API Client generation...");
        self.paths.check_disjoint()?;

        let version = self.resolve_version()?;
        self.advance(Stage::VersionResolved);

        let spec = self.locate_spec(&version)?;
        self.advance(Stage::SpecLocated);

        self.verify_prerequisites()?;
        self.advance(Stage::PrereqsVerified);

        self.clean_output()?;
        self.advance(Stage::OutputCleaned);

        let output = self.generate(&spec.path)?;
        debug!(output = %output.combined(), "Generator output.");
        self.advance(Stage::Generated);

        let files_copied = self.relocate()?;
        self.advance(Stage::Relocated);

        self.progress.step("🔧 Post-processing generated files...");
        post_process(&self.paths.output_dir)?;
        self.progress.step("✅ Post-processing completed");
        self.advance(Stage::PostProcessed);

        self.progress.step("✅ Generation completed successfully!");
        self.progress.step(&format!(
            "📁 Generated files are in: {}",
            self.paths.output_dir.display()
        ));
        self.advance(Stage::Done);

        info!(version = %version, files_copied, "Generation finished.");
        Ok(GenerationReport {
            version,
            spec,
            files_copied,
        })
    }

    fn advance(&mut self, stage: Stage) {
        debug!(from = %self.stage, to = %stage, "Stage transition.");
        self.stage = stage;
        self.last_completed = stage;
    }

    fn resolve_version(&mut self) -> Result<SpecVersion> {
        let version = find_latest_version(&self.paths.versions_dir())?.ok_or_else(|| {
            GenerateError::SpecNotFound("No OpenAPI specification found".to_string())
        })?;

        if let Some(published) = version.timestamp() {
            debug!(version = %version, %published, "Resolved spec version.");
        }
        self.progress
            .step(&format!("📋 Found latest spec version: {version}"));
        Ok(version)
    }

    fn locate_spec(&mut self, version: &SpecVersion) -> Result<SpecLocation> {
        let spec = locate_spec_document(&self.paths.versions_dir(), version)?;
        if spec.bundled {
            self.progress.step("📦 Using bundled OpenAPI specification");
        }
        self.progress
            .step(&format!("📄 Using OpenAPI file: {}", spec.path.display()));
        Ok(spec)
    }

    fn verify_prerequisites(&mut self) -> Result<()> {
        self.toolchain.check_runtime()?;

        if !self.toolchain.generator_available() {
            self.progress.step(&format!(
                "⚠️  {} not found. Installing via npm...",
                self.toolchain.generator_package
            ));
            self.toolchain.install_generator()?;
        }

        self.progress.step("✅ OpenAPI Generator is available");
        Ok(())
    }

    fn clean_output(&mut self) -> Result<()> {
        if self.paths.output_dir.is_dir() {
            self.progress.step("🧹 Cleaning output directory...");
        }
        recreate_dir(&self.paths.output_dir)
    }

    fn generate(&mut self, spec_path: &Path) -> Result<GeneratorOutput> {
        // A staging directory left behind by a failed run must not leak into the output.
        remove_dir_tree(&self.paths.temp_dir)?;

        let invocation = GeneratorInvocation::new(
            &self.toolchain,
            &self.request,
            spec_path,
            &self.paths.temp_dir,
        )?;
        self.progress
            .step("⚙️  Generating PHP client from OpenAPI specification...");
        self.progress
            .step(&format!("Running: {}", invocation.command_line()));

        self.progress
            .task("Running openapi-generator...", || invocation.run())
    }

    fn relocate(&mut self) -> Result<usize> {
        let copied = copy_tree(&self.paths.staged_sources_dir(), &self.paths.output_dir)?;
        remove_dir_tree(&self.paths.temp_dir)?;
        Ok(copied)
    }
}

/// Hook for fix-ups applied to the generated sources after relocation.
///
/// Deliberately a no-op for now; it exists so later fix-ups have a place to
/// live without reshaping the workflow.
pub fn post_process(output_dir: &Path) -> Result<()> {
    debug!(output_dir = %output_dir.display(), "No post-processing configured.");
    Ok(())
}
