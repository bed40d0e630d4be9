//! Runtime abstraction for system operations.
//!
//! This module provides a trait-based abstraction over system operations,
//! enabling dependency injection and testability.
//!
//! # Structure
//!
//! - `env` - Environment variables and the wall clock
//! - `fs` - File system operations (read, write, directory, glob)
//! - `process` - External command execution

mod env;
mod fs;
mod process;

use anyhow::Result;
use chrono::{DateTime, Utc};
use std::env as std_env;
use std::path::{Path, PathBuf};

/// Captured result of an external command that was successfully spawned.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CommandOutput {
    pub success: bool,
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

#[cfg_attr(test, mockall::automock)]
pub trait Runtime: Send + Sync {
    // Environment
    fn env_var(&self, key: &str) -> Result<String, std_env::VarError>;
    fn now(&self) -> DateTime<Utc>;

    // File System
    fn write(&self, path: &Path, contents: &[u8]) -> Result<()>;
    fn read_to_string(&self, path: &Path) -> Result<String>;
    fn create_dir_all(&self, path: &Path) -> Result<()>;
    fn remove_dir_all(&self, path: &Path) -> Result<()>;
    fn exists(&self, path: &Path) -> bool;

    /// Expand a glob pattern. Matches are returned sorted by path.
    fn glob(&self, pattern: &str) -> Result<Vec<PathBuf>>;

    // Processes
    /// Run `program` with `args` to completion, capturing its output.
    /// Fails only when the program cannot be started; a non-zero exit is
    /// reported through [`CommandOutput::success`].
    fn run_command(&self, program: &str, args: &[String]) -> Result<CommandOutput>;
}

pub struct RealRuntime;

impl Runtime for RealRuntime {
    fn env_var(&self, key: &str) -> Result<String, std_env::VarError> {
        self.env_var_impl(key)
    }

    fn now(&self) -> DateTime<Utc> {
        self.now_impl()
    }

    fn write(&self, path: &Path, contents: &[u8]) -> Result<()> {
        self.write_impl(path, contents)
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        self.read_to_string_impl(path)
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        self.create_dir_all_impl(path)
    }

    fn remove_dir_all(&self, path: &Path) -> Result<()> {
        self.remove_dir_all_impl(path)
    }

    fn exists(&self, path: &Path) -> bool {
        self.exists_impl(path)
    }

    fn glob(&self, pattern: &str) -> Result<Vec<PathBuf>> {
        self.glob_impl(pattern)
    }

    fn run_command(&self, program: &str, args: &[String]) -> Result<CommandOutput> {
        self.run_command_impl(program, args)
    }
}

/// Remove `dir` if it exists and create it again, empty.
#[tracing::instrument(skip(runtime))]
pub fn reset_dir<R: Runtime>(runtime: &R, dir: &Path) -> Result<()> {
    if runtime.exists(dir) {
        runtime.remove_dir_all(dir)?;
    }
    runtime.create_dir_all(dir)
}
