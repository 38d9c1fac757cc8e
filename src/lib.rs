//! This crate provides the core logic for a theory-of-computation simulator.
//! It includes modules for modeling automata (DFA, NFA, Turing Machines, and a
//! regex placeholder), validating their structure, simulating their execution
//! with full step traces, and managing a collection of demo automata.

pub mod catalog;
pub mod engine;
pub mod loader;
pub mod types;
pub mod validator;

/// Re-exports the `Catalog` struct and `AutomatonInfo` from the catalog module.
pub use catalog::{AutomatonInfo, Catalog};
/// Re-exports the `SimulationEngine` struct from the engine module.
pub use engine::{SimulationEngine, NO_INITIAL_STATE};
/// Re-exports the `AutomatonLoader` struct from the loader module.
pub use loader::AutomatonLoader;
/// Re-exports various types related to automaton definition and execution from the types module.
pub use types::{
    Automaton, AutomatonError, AutomatonKind, Direction, SimulationResult, SimulationStep, State,
    TapeSnapshot, Transition, DEFAULT_MAX_STEPS, MAX_INPUT_LENGTH,
};
/// Re-exports the validation entry points and `ValidationReport` from the validator module.
pub use validator::{validate, validate_input, ValidationReport};
