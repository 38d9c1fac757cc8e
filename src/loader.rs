//! This module provides the `AutomatonLoader` struct, responsible for loading and saving
//! automaton definitions as JSON records, from files, strings, and directories.

use crate::types::{Automaton, AutomatonError};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// `AutomatonLoader` is a utility struct for moving automaton definitions
/// between disk and memory. Definitions are the same structured records the
/// persistence layer stores, so anything loaded here round-trips unchanged
/// through [`save_automaton`](AutomatonLoader::save_automaton).
pub struct AutomatonLoader;

impl AutomatonLoader {
    /// Loads a single automaton definition from the specified file path.
    ///
    /// # Arguments
    ///
    /// * `path` - A reference to the `Path` of the `.json` file to load.
    ///
    /// # Returns
    ///
    /// * `Ok(Automaton)` if the file is successfully read and parsed.
    /// * `Err(AutomatonError::File)` if the file cannot be read.
    /// * `Err(AutomatonError::Serialization)` if the content is not a valid definition.
    pub fn load_automaton(path: &Path) -> Result<Automaton, AutomatonError> {
        let content = fs::read_to_string(path).map_err(|e| {
            AutomatonError::File(format!("Failed to read file {}: {}", path.display(), e))
        })?;

        Self::load_automaton_from_string(&content)
    }

    /// Parses an automaton definition from JSON content.
    ///
    /// Useful for definitions that are not stored in files, e.g. records
    /// arriving from the persistence layer.
    pub fn load_automaton_from_string(content: &str) -> Result<Automaton, AutomatonError> {
        serde_json::from_str(content).map_err(|e| AutomatonError::Serialization(e.to_string()))
    }

    /// Serializes an automaton definition and writes it to the given path as
    /// pretty-printed JSON.
    pub fn save_automaton(path: &Path, automaton: &Automaton) -> Result<(), AutomatonError> {
        let content = serde_json::to_string_pretty(automaton)
            .map_err(|e| AutomatonError::Serialization(e.to_string()))?;

        fs::write(path, content).map_err(|e| {
            AutomatonError::File(format!("Failed to write file {}: {}", path.display(), e))
        })?;

        debug!(path = %path.display(), automaton = %automaton.id, "automaton_saved");
        Ok(())
    }

    /// Loads all automaton definition files (`.json` extension) from a directory.
    ///
    /// It iterates through the directory, attempts to load each `.json` file,
    /// and collects the results. Directories and other files are skipped.
    ///
    /// # Returns
    ///
    /// * `Vec<Result<(PathBuf, Automaton), AutomatonError>>` - one entry per
    ///   candidate file, carrying either the path and parsed definition or the
    ///   error that prevented loading it.
    pub fn load_automata(directory: &Path) -> Vec<Result<(PathBuf, Automaton), AutomatonError>> {
        if !directory.exists() {
            return vec![Err(AutomatonError::File(format!(
                "Directory {} does not exist",
                directory.display()
            )))];
        }

        let entries = match fs::read_dir(directory) {
            Ok(entries) => entries,
            Err(e) => {
                return vec![Err(AutomatonError::File(format!(
                    "Failed to read directory {}: {}",
                    directory.display(),
                    e
                )))]
            }
        };

        entries
            .filter_map(|entry| {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(e) => {
                        return Some(Err(AutomatonError::File(format!(
                            "Failed to read directory entry: {}",
                            e
                        ))))
                    }
                };

                let path = entry.path();

                // Skip directories and non-.json files
                if path.is_dir() || path.extension().is_none_or(|ext| ext != "json") {
                    return None;
                }

                match Self::load_automaton(&path) {
                    Ok(automaton) => Some(Ok((path, automaton))),
                    Err(e) => Some(Err(AutomatonError::File(format!(
                        "Failed to load automaton from {}: {}",
                        path.display(),
                        e
                    )))),
                }
            })
            .collect()
    }
}
