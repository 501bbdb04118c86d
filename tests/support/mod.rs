//! Test support utilities for credkeep integration tests.
//!
//! Provides reusable test environment setup and helper commands.

#![allow(dead_code)]

pub mod assertions;
pub mod commands;
pub mod fixtures;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fixtures::*;

use tempfile::TempDir;

/// Test environment with isolated temp directories.
///
/// Each test gets its own data directory (`CREDKEEP_HOME`) and working
/// directory. No process-global state is mutated, so tests can run in
/// parallel.
pub struct Test {
    /// Working directory for file commands
    pub dir: TempDir,
    /// Data directory holding config.toml and profiles/
    pub home: TempDir,
}

impl Test {
    /// Create an empty test environment with cheap KDF settings.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let home = TempDir::new().expect("failed to create temp home");
        std::fs::write(home.path().join("config.toml"), CHEAP_CONFIG)
            .expect("failed to write config.toml");

        Self { dir, home }
    }

    /// Create a test environment with the default profile created.
    pub fn init() -> Self {
        let t = Self::new();
        let output = t.profile_new();
        assert!(
            output.status.success(),
            "Failed to create profile: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        t
    }

    /// Create a test environment with the standard sites added.
    pub fn with_sites() -> Self {
        let t = Self::init();
        for (name, fields, tags) in STANDARD_SITES {
            let output = t.add(name, fields, tags);
            assert!(
                output.status.success(),
                "Failed to add site {}: {}",
                name,
                String::from_utf8_lossy(&output.stderr)
            );
        }
        t
    }

    /// Path of a file in the working directory.
    pub fn path(&self, name: &str) -> std::path::PathBuf {
        self.dir.path().join(name)
    }

    /// Path of a profile file in the data directory.
    pub fn profile_path(&self, name: &str) -> std::path::PathBuf {
        self.home.path().join("profiles").join(format!("{}.profile", name))
    }
}
