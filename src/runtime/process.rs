//! External program execution.

use anyhow::{Context, Result, bail};
use log::debug;
use std::process::{Command, ExitStatus, Stdio};

use super::RealRuntime;

impl RealRuntime {
    #[tracing::instrument(skip(self))]
    pub(crate) fn run_impl(&self, program: &str, args: &[String]) -> Result<ExitStatus> {
        debug!("Running {} {:?}", program, args);
        Command::new(program)
            .args(args)
            .status()
            .with_context(|| format!("Failed to start `{}`", program))
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn output_impl(&self, program: &str, args: &[String]) -> Result<String> {
        debug!("Capturing output of {} {:?}", program, args);
        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stderr(Stdio::inherit())
            .output()
            .with_context(|| format!("Failed to start `{}`", program))?;

        if !output.status.success() {
            bail!("`{}` exited with {}", program, output.status);
        }

        String::from_utf8(output.stdout)
            .with_context(|| format!("`{}` produced non UTF-8 output", program))
    }
}
