//! Built-in demo automata shipped with the simulator, one per machine kind,
//! for first-run exploration and the editor's "load example" menu.

use crate::loader::AutomatonLoader;
use crate::types::{Automaton, AutomatonError, AutomatonKind};

use std::sync::RwLock;

// Default embedded automata
const AUTOMATON_TEXTS: [&str; 3] = [
    include_str!("../demos/even-zeros.json"),
    include_str!("../demos/ends-with-ab.json"),
    include_str!("../demos/flip-bits.json"),
];

lazy_static::lazy_static! {
    pub static ref AUTOMATA: RwLock<Vec<Automaton>> = RwLock::new(Vec::new());
}

pub struct Catalog;

impl Catalog {
    /// Initialize the catalog from the embedded definitions
    pub fn load() -> Result<(), AutomatonError> {
        let mut automata = Vec::new();

        for text in AUTOMATON_TEXTS {
            if let Ok(automaton) = AutomatonLoader::load_automaton_from_string(text) {
                automata.push(automaton);
            } else {
                eprintln!("Failed to parse embedded automaton");
            }
        }

        if let Ok(mut write_guard) = AUTOMATA.write() {
            *write_guard = automata;
        } else {
            return Err(AutomatonError::File(
                "Failed to acquire write lock".to_string(),
            ));
        }

        Ok(())
    }

    /// Get the number of available demo automata
    pub fn count() -> usize {
        // Initialize with the embedded automata if not already initialized
        let _ = Self::load();

        AUTOMATA.read().map(|automata| automata.len()).unwrap_or(0)
    }

    /// Get a demo automaton by its index
    pub fn get_by_index(index: usize) -> Result<Automaton, AutomatonError> {
        // Initialize with the embedded automata if not already initialized
        let _ = Self::load();

        AUTOMATA
            .read()
            .map_err(|_| AutomatonError::File("Failed to acquire read lock".to_string()))?
            .get(index)
            .cloned()
            .ok_or_else(|| {
                AutomatonError::Validation(format!("Automaton index {} out of range", index))
            })
    }

    /// Get a demo automaton by its name
    pub fn get_by_name(name: &str) -> Result<Automaton, AutomatonError> {
        // Initialize with the embedded automata if not already initialized
        let _ = Self::load();

        AUTOMATA
            .read()
            .map_err(|_| AutomatonError::File("Failed to acquire read lock".to_string()))?
            .iter()
            .find(|automaton| automaton.name == name)
            .cloned()
            .ok_or_else(|| AutomatonError::Validation(format!("Automaton '{}' not found", name)))
    }

    /// List all demo automaton names
    pub fn list_names() -> Vec<String> {
        // Initialize with the embedded automata if not already initialized
        let _ = Self::load();

        AUTOMATA
            .read()
            .map(|automata| {
                automata
                    .iter()
                    .map(|automaton| automaton.name.clone())
                    .collect()
            })
            .unwrap_or_else(|_| Vec::new())
    }

    /// Get information about a demo automaton by its index
    pub fn get_info(index: usize) -> Result<AutomatonInfo, AutomatonError> {
        let automaton = Self::get_by_index(index)?;

        Ok(AutomatonInfo {
            index,
            name: automaton.name.clone(),
            kind: automaton.kind,
            state_count: automaton.states.len(),
            transition_count: automaton.transitions.len(),
        })
    }

    /// Search for demo automata by name
    pub fn search(query: &str) -> Vec<usize> {
        // Initialize with the embedded automata if not already initialized
        let _ = Self::load();

        AUTOMATA
            .read()
            .map(|automata| {
                automata
                    .iter()
                    .enumerate()
                    .filter(|(_, automaton)| {
                        automaton.name.to_lowercase().contains(&query.to_lowercase())
                    })
                    .map(|(index, _)| index)
                    .collect()
            })
            .unwrap_or_else(|_| Vec::new())
    }
}

#[derive(Debug, Clone)]
pub struct AutomatonInfo {
    pub index: usize,
    pub name: String,
    pub kind: AutomatonKind,
    pub state_count: usize,
    pub transition_count: usize,
}
