use anyhow::{Context, Result};
use log::debug;

use super::PlatformFacts;
use super::interpreter::{Interpreter, PROBE_SCRIPT};
use crate::runtime::Runtime;

/// Facts read from the running machine.
///
/// Machine and system names come from `uname(2)` on Unix and from
/// compile-time constants elsewhere. The interpreter is probed by running
/// the configured Python program.
pub struct HostPlatform<'a, R: Runtime> {
    runtime: &'a R,
    python: String,
}

impl<'a, R: Runtime> HostPlatform<'a, R> {
    pub fn new(runtime: &'a R, python: impl Into<String>) -> Self {
        Self {
            runtime,
            python: python.into(),
        }
    }
}

impl<R: Runtime> PlatformFacts for HostPlatform<'_, R> {
    fn machine(&self) -> String {
        match uname() {
            Some((_, machine)) => machine,
            None => std::env::consts::ARCH.to_string(),
        }
    }

    fn system(&self) -> String {
        match uname() {
            Some((sysname, _)) => sysname.to_lowercase(),
            None => match std::env::consts::OS {
                "macos" => "darwin".to_string(),
                os => os.to_string(),
            },
        }
    }

    fn is_64bit(&self) -> bool {
        cfg!(target_pointer_width = "64")
    }

    #[tracing::instrument(skip(self))]
    fn interpreter(&self) -> Result<Interpreter> {
        debug!("Probing Python interpreter {}", self.python);
        let output = self
            .runtime
            .output(&self.python, &["-c".to_string(), PROBE_SCRIPT.to_string()])
            .with_context(|| format!("Failed to query Python interpreter `{}`", self.python))?;
        Interpreter::parse(&output)
    }
}

/// `(sysname, machine)` from `uname(2)`.
#[cfg(unix)]
fn uname() -> Option<(String, String)> {
    let uts = nix::sys::utsname::uname().ok()?;
    Some((
        uts.sysname().to_string_lossy().into_owned(),
        uts.machine().to_string_lossy().into_owned(),
    ))
}

#[cfg(not(unix))]
fn uname() -> Option<(String, String)> {
    None
}
