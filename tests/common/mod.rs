//! Shared integration test helpers for backupfont.
//!
//! Include this module at the top of each test file that needs it:
//!
//! ```ignore
//! mod common;
//! use common::TestContext;
//! ```

#![allow(dead_code)]

use backupfont::cli::{Cli, run};
use backupfont_test_data::SyntheticFont;
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temp directory plus an isolated (absent) config file path.
///
/// The `TempDir` is removed when the context is dropped.
pub struct TestContext {
    pub temp_dir: TempDir,
}

impl TestContext {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.temp_dir.path().join(name)
    }

    /// Write a synthetic font covering `codepoints` and return its path.
    pub fn font(&self, name: &str, codepoints: &[u16]) -> PathBuf {
        let path = self.path(name);
        fs::write(&path, SyntheticFont::covering(codepoints).build())
            .expect("Failed to write font fixture");
        path
    }

    /// Run the CLI with the config pinned to a file that does not exist.
    pub fn run(&self, args: &[&str]) -> i32 {
        self.run_with_config(&self.path("no-config.yaml"), args)
    }

    /// Run the CLI with an explicit config file.
    pub fn run_with_config(&self, config: &Path, args: &[&str]) -> i32 {
        let mut argv: Vec<String> = vec![
            "backupfont".to_string(),
            "--config".to_string(),
            config.to_string_lossy().into_owned(),
        ];
        argv.extend(args.iter().map(|a| a.to_string()));
        run(Cli::try_parse_from(argv).expect("arguments should parse"))
    }
}
