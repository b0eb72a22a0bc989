//! Runtime abstraction for system operations.
//!
//! This module provides a trait-based abstraction over system operations,
//! enabling dependency injection and testability.
//!
//! # Structure
//!
//! - `env` - Environment variables and the working directory
//! - `fs` - File system operations (read, create, directory, permissions)
//! - `process` - External programs (archive extraction, interpreter probes)

mod env;
mod fs;
mod process;

use anyhow::Result;
use std::env as std_env;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;

#[cfg_attr(test, mockall::automock)]
pub trait Runtime: Send + Sync {
    // Environment
    fn env_var(&self, key: &str) -> Result<String, std_env::VarError>;
    fn current_dir(&self) -> Result<PathBuf>;

    // File System
    fn read_to_string(&self, path: &Path) -> Result<String>;
    fn create_dir_all(&self, path: &Path) -> Result<()>;
    fn is_file(&self, path: &Path) -> bool;
    fn is_dir(&self, path: &Path) -> bool;
    fn create_file(&self, path: &Path) -> Result<Box<dyn std::io::Write + Send>>;

    /// Current permission bits of a file. Always 0 on Windows.
    fn mode(&self, path: &Path) -> Result<u32>;

    /// Set file permissions (mode) on Unix systems. No-op on Windows.
    fn set_permissions(&self, path: &Path, mode: u32) -> Result<()>;

    // Processes
    /// Run a program with inherited stdio and wait for it.
    fn run(&self, program: &str, args: &[String]) -> Result<ExitStatus>;

    /// Run a program and capture its stdout. A non-zero exit is an error.
    fn output(&self, program: &str, args: &[String]) -> Result<String>;
}

pub struct RealRuntime;

impl Runtime for RealRuntime {
    fn env_var(&self, key: &str) -> Result<String, std_env::VarError> {
        self.env_var_impl(key)
    }

    fn current_dir(&self) -> Result<PathBuf> {
        self.current_dir_impl()
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        self.read_to_string_impl(path)
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        self.create_dir_all_impl(path)
    }

    fn is_file(&self, path: &Path) -> bool {
        self.is_file_impl(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.is_dir_impl(path)
    }

    fn create_file(&self, path: &Path) -> Result<Box<dyn std::io::Write + Send>> {
        self.create_file_impl(path)
    }

    fn mode(&self, path: &Path) -> Result<u32> {
        self.mode_impl(path)
    }

    fn set_permissions(&self, path: &Path, mode: u32) -> Result<()> {
        self.set_permissions_impl(path, mode)
    }

    fn run(&self, program: &str, args: &[String]) -> Result<ExitStatus> {
        self.run_impl(program, args)
    }

    fn output(&self, program: &str, args: &[String]) -> Result<String> {
        self.output_impl(program, args)
    }
}
