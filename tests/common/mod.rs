#![allow(dead_code)]

mod mocks;

use std::{fs, path::PathBuf};

use tempfile::TempDir;

pub use mocks::MockOutput;

/// The sample input used throughout the usage message.
pub const NUMBERS: &str = "num,value\n1,one\n2,two\n8,eight\n";

/// Writes `content` to `name` inside a fresh temporary directory.
pub fn input_file(name: &str, content: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    (dir, path)
}
