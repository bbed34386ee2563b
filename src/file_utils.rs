use anyhow::{Context, Result};
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::tag_store;

// @module: File and directory utilities

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)?;
        }
        Ok(())
    }

    /// Find every supported lyric-bearing file under a directory
    pub fn find_lyric_files<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
        let mut result = Vec::new();

        for entry in WalkDir::new(dir.as_ref()).follow_links(true) {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();
            if path.is_file() && tag_store::supported_format(path) {
                result.push(path.to_path_buf());
            }
        }

        Ok(result)
    }

    /// Timestamped backup directory for one processing run
    pub fn backup_dir_for_run() -> PathBuf {
        PathBuf::from("lyrics").join(format!("lrc{}", Local::now().format("%Y-%m-%d %H-%M-%S")))
    }

    /// Save the original lyric text of a source file into the backup
    /// directory as `<stem>.lrc`, creating the directory on first use
    pub fn backup_original(backup_dir: &Path, source: &Path, text: &str) -> Result<PathBuf> {
        Self::ensure_dir(backup_dir)?;
        let stem = source.file_stem().unwrap_or_default();
        let target = backup_dir.join(format!("{}.lrc", stem.to_string_lossy()));
        fs::write(&target, text)
            .with_context(|| format!("Failed to write backup: {:?}", target))?;
        Ok(target)
    }

    /// Read a file to a string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Write a string to a file
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        if let Some(parent) = path.as_ref().parent() {
            Self::ensure_dir(parent)?;
        }
        fs::write(&path, content)
            .with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))?;
        Ok(())
    }
}
