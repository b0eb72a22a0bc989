//! Command implementations behind the CLI.
//!
//! `run` validates the invocation, builds the [`Config`], takes the platform
//! snapshot and dispatches to decoder or target mode.

mod config;
pub mod decoder;
pub mod target;

use anyhow::Result;
use log::debug;
use std::path::PathBuf;

pub use config::Config;
pub use decoder::decoder_url;
pub use target::{TargetRequest, fetch_target};

use crate::{
    error::TcError,
    platform::{Arch, HostPlatform, PlatformDescriptor},
    runtime::Runtime,
    version::ProductVersion,
};

/// Branch used when none is given.
pub const DEFAULT_BRANCH: &str = "master";

/// Branch name plus whether the caller chose it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchChoice {
    name: String,
    explicit: bool,
}

impl BranchChoice {
    /// An empty flag value counts as unset.
    pub fn new(flag: Option<String>) -> Self {
        match flag.filter(|b| !b.is_empty()) {
            Some(name) => Self {
                name,
                explicit: true,
            },
            None => Self {
                name: DEFAULT_BRANCH.to_string(),
                explicit: false,
            },
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_explicit(&self) -> bool {
        self.explicit
    }

    /// The chosen branch, or the release branch of `version` when unset.
    pub fn or_release(&self, version: &ProductVersion) -> String {
        if self.explicit {
            self.name.clone()
        } else {
            version.branch()
        }
    }
}

/// Parsed command line, independent of clap.
#[derive(Debug, Clone)]
pub struct Options {
    pub target: Option<PathBuf>,
    pub decoder: bool,
    pub arch: Option<Arch>,
    pub artifact: String,
    pub source: Option<String>,
    pub branch: Option<String>,
    pub version_file: PathBuf,
    pub python: String,
    pub show_progress: bool,
}

/// Entry point shared by the binary and the tests.
pub async fn run<R: Runtime + 'static>(runtime: R, options: Options) -> Result<()> {
    if options.target.is_none() && !options.decoder {
        return Err(TcError::InvalidArgument("Pass either --target or --decoder.".to_string()).into());
    }

    let config = Config::new(runtime, options.source.as_deref())?;
    let facts = HostPlatform::new(&config.runtime, options.python.clone());
    let platform = PlatformDescriptor::detect(&facts);
    debug!("Detected platform: {:?}", platform);

    let arch = platform.arch(options.arch);
    let branch = BranchChoice::new(options.branch.clone());

    if options.decoder {
        let url = decoder_url(
            &config.runtime,
            &facts,
            &platform,
            &config.scheme,
            arch,
            &branch,
            &options.version_file,
        )?;
        println!("{}", url);
        return Ok(());
    }

    if let Some(target_dir) = options.target {
        let request = TargetRequest {
            target_dir,
            arch,
            artifact: options.artifact,
            branch: branch.name().to_string(),
            show_progress: options.show_progress,
        };
        fetch_target(&config, &request).await?;
    }

    Ok(())
}
