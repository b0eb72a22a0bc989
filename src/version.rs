//! Product version read from the `VERSION` file.

use anyhow::Result;
use pep440_rs::Version;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::TcError;
use crate::runtime::Runtime;

/// A release version such as `0.6.0`, `0.6.0-alpha.15` or `0.6.0a15`.
///
/// Any PEP 440 text is accepted. `Display` renders the normalized form used
/// in wheel filenames (`0.6.0a15`, `0.7.0.dev1`, `0.6.0+build1`);
/// [`ProductVersion::raw`] keeps the text as written, which is what release
/// branches are named after.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductVersion {
    raw: String,
    version: Version,
}

impl ProductVersion {
    pub fn parse(text: &str) -> Result<Self> {
        let raw = text.trim();
        let version = Version::from_str(raw).map_err(|e| {
            TcError::InvalidArgument(format!("Invalid version '{}': {}", raw, e))
        })?;
        Ok(Self {
            raw: raw.to_string(),
            version,
        })
    }

    /// Read and parse a version file.
    pub fn read<R: Runtime>(runtime: &R, path: &Path) -> Result<Self> {
        let text = runtime.read_to_string(path)?;
        Self::parse(&text)
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Release branch for this version, e.g. `v0.6.0`.
    pub fn branch(&self) -> String {
        format!("v{}", self.raw)
    }
}

impl fmt::Display for ProductVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.version)
    }
}
