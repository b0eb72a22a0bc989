//! Platform detection
//!
//! This module inspects the machine (architecture, OS, pointer width) and the
//! Python interpreter the decoder package targets. All host introspection
//! goes through [`PlatformFacts`] so tests can substitute a mock.

mod host;
mod interpreter;

use anyhow::Result;
use std::fmt;

pub use host::HostPlatform;
pub use interpreter::Interpreter;

/// Wheel platform tag for x86_64 Linux.
pub const MANYLINUX_TAG: &str = "manylinux1";

/// Wheel platform tag for macOS.
pub const MACOS_TAG: &str = "macosx_10_10";

/// Facts about the executing environment.
#[cfg_attr(test, mockall::automock)]
pub trait PlatformFacts: Send + Sync {
    /// Raw machine name as reported by the OS (e.g. `x86_64`, `aarch64`, `armv7l`).
    fn machine(&self) -> String;

    /// Lowercased OS name (e.g. `linux`, `darwin`, `windows`).
    fn system(&self) -> String;

    fn is_64bit(&self) -> bool;

    /// Probe the Python interpreter the decoder package is built for.
    fn interpreter(&self) -> Result<Interpreter>;
}

/// Artifact architecture flavour used in scheme URLs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Arch {
    /// ARMv7 (32-bit)
    Arm,
    /// ARM64
    Arm64,
    /// CUDA enabled x86_64
    Gpu,
    /// CPU-only x86_64
    Cpu,
    /// CPU-only x86_64 macOS
    Osx,
}

impl Arch {
    pub fn as_str(&self) -> &'static str {
        match self {
            Arch::Arm => "arm",
            Arch::Arm64 => "arm64",
            Arch::Gpu => "gpu",
            Arch::Cpu => "cpu",
            Arch::Osx => "osx",
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of the host, taken once per run.
#[derive(Debug, Clone, PartialEq)]
pub struct PlatformDescriptor {
    pub is_arm: bool,
    pub is_macos: bool,
    pub is_64bit: bool,
    pub os_name: String,
    pub machine: String,
}

impl PlatformDescriptor {
    pub fn detect<F: PlatformFacts + ?Sized>(facts: &F) -> Self {
        let machine = facts.machine();
        let os_name = facts.system().to_lowercase();
        Self {
            is_arm: machine.contains("arm") || machine.starts_with("aarch64"),
            is_macos: os_name == "darwin",
            is_64bit: facts.is_64bit(),
            os_name,
            machine,
        }
    }

    /// Architecture to use when `--arch` is not given.
    pub fn default_arch(&self) -> Arch {
        if self.is_arm {
            if self.is_64bit { Arch::Arm64 } else { Arch::Arm }
        } else if self.is_macos {
            Arch::Osx
        } else {
            Arch::Cpu
        }
    }

    /// Resolve the effective architecture; an explicit choice always wins.
    pub fn arch(&self, explicit: Option<Arch>) -> Arch {
        explicit.unwrap_or_else(|| self.default_arch())
    }

    /// Platform part of a wheel filename, e.g. `manylinux1_x86_64`.
    pub fn wheel_platform_tag(&self) -> String {
        let platform = if self.os_name == "linux" && self.machine == "x86_64" {
            MANYLINUX_TAG
        } else if self.os_name == "darwin" {
            MACOS_TAG
        } else {
            self.os_name.as_str()
        };
        format!("{}_{}", platform, self.machine)
    }
}
