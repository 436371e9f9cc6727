//! Discovery of the vendored OpenAPI specification.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use tracing::debug;

use crate::error::{GenerateError, Result};

const SPEC_FILENAME: &str = "openapi.yaml";
const BUNDLED_DIR: &str = "bundled";
const VERSION_LEN: usize = 14;
const VERSION_FORMAT: &str = "%Y%m%d%H%M%S";

/// A spec snapshot identifier: exactly 14 ASCII digits (`YYYYMMDDhhmmss`).
///
/// Ordering is plain string ordering, which for fixed-width digit strings is
/// also chronological.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SpecVersion(String);

impl SpecVersion {
    /// Accept `name` if it is a valid version directory name.
    pub fn parse(name: &str) -> Option<Self> {
        let valid = name.len() == VERSION_LEN && name.bytes().all(|b| b.is_ascii_digit());
        valid.then(|| Self(name.to_string()))
    }

    /// The raw directory name.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Publication time, if the digits form a real calendar timestamp.
    ///
    /// Only used for diagnostics; selection never depends on it.
    pub fn timestamp(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.0, VERSION_FORMAT).ok()
    }
}

impl fmt::Display for SpecVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Resolved spec document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecLocation {
    /// Path handed to the generator.
    pub path: PathBuf,
    /// True when the self-contained `bundled/openapi.yaml` was chosen.
    pub bundled: bool,
}

/// Newest version directory under `versions_dir`.
///
/// A missing directory is treated the same as an empty one.
pub fn find_latest_version(versions_dir: &Path) -> Result<Option<SpecVersion>> {
    let entries = match fs::read_dir(versions_dir) {
        Ok(entries) => entries,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!(dir = %versions_dir.display(), "Spec directory does not exist.");
            return Ok(None);
        }
        Err(err) => return Err(GenerateError::fs("read directory", versions_dir, err)),
    };

    let mut latest: Option<SpecVersion> = None;
    for entry in entries {
        let entry = entry.map_err(|err| GenerateError::fs("read directory", versions_dir, err))?;
        let is_dir = entry
            .file_type()
            .map_err(|err| GenerateError::fs("inspect", entry.path(), err))?
            .is_dir();
        if !is_dir {
            continue;
        }
        let Some(version) = entry.file_name().to_str().and_then(SpecVersion::parse) else {
            continue;
        };
        if latest.as_ref().is_none_or(|current| version > *current) {
            latest = Some(version);
        }
    }

    debug!(
        dir = %versions_dir.display(),
        latest = ?latest.as_ref().map(SpecVersion::as_str),
        "Scanned spec versions."
    );
    Ok(latest)
}

/// Pick the document to generate from, preferring the bundled variant.
pub fn locate_spec_document(versions_dir: &Path, version: &SpecVersion) -> Result<SpecLocation> {
    let version_dir = versions_dir.join(version.as_str());
    let canonical = version_dir.join(SPEC_FILENAME);
    if !canonical.is_file() {
        return Err(GenerateError::SpecNotFound(format!(
            "OpenAPI file not found: {}",
            canonical.display()
        )));
    }

    let bundled = version_dir.join(BUNDLED_DIR).join(SPEC_FILENAME);
    if bundled.is_file() {
        return Ok(SpecLocation {
            path: bundled,
            bundled: true,
        });
    }

    Ok(SpecLocation {
        path: canonical,
        bundled: false,
    })
}
