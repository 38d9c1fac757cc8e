//! This module defines the core data structures and types used throughout the automaton
//! simulator, including states, transitions, automata of every supported kind, simulation
//! results, and error types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::time::Duration;
use thiserror::Error;

/// The symbol read from a Turing Machine tape cell that has never been written.
pub const BLANK_SYMBOL: char = 'B';
/// The maximum number of Turing Machine steps to execute before halting.
pub const DEFAULT_MAX_STEPS: usize = 1000;
/// Input strings longer than this trigger a performance warning during validation.
pub const MAX_INPUT_LENGTH: usize = 1000;

/// A single state of an automaton.
///
/// The layout coordinates position the state in the graph editor; they carry no
/// meaning for simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct State {
    /// Identifier, unique within one automaton.
    pub id: String,
    /// Display name shown by the editor.
    pub name: String,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    /// Whether this is the start state. Exactly one state must carry this flag
    /// for simulation to be well-defined.
    #[serde(default)]
    pub is_initial: bool,
    /// Whether this is an accepting state.
    #[serde(default)]
    pub is_final: bool,
    /// Editor highlight flag; ignored by validation and simulation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// The possible directions a Turing Machine head can move.
///
/// Serialized as `"L"`, `"R"`, and `"S"` to match the stored automaton records.
/// Any other value is rejected at deserialization time, so the validator never
/// sees an out-of-range direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Move the head one cell to the left (clamped at the left tape edge).
    #[serde(rename = "L")]
    Left,
    /// Move the head one cell to the right, extending the tape as needed.
    #[serde(rename = "R")]
    Right,
    /// Keep the head in the same position.
    #[serde(rename = "S")]
    Stay,
}

/// A labeled edge between two states.
///
/// For finite automata only `symbol` matters. Turing Machine transitions
/// additionally carry the tape fields: `read_symbol` (falls back to `symbol`
/// when absent), `write_symbol` (cell left unchanged when absent), and the
/// head `direction`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transition {
    pub id: String,
    /// Source state id.
    pub from: String,
    /// Target state id.
    pub to: String,
    /// Input symbol consumed by the transition (a single character, except for
    /// the regex fallback where it holds the whole pattern).
    pub symbol: String,
    /// Display alias for `symbol`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_symbol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub write_symbol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
}

impl Transition {
    /// The symbol a Turing Machine expects under the head for this transition.
    pub fn tape_read_symbol(&self) -> Option<char> {
        self.read_symbol
            .as_deref()
            .unwrap_or(&self.symbol)
            .chars()
            .next()
    }

    /// The symbol a Turing Machine writes to the current cell, if any.
    pub fn tape_write_symbol(&self) -> Option<char> {
        self.write_symbol.as_deref().and_then(|s| s.chars().next())
    }
}

/// The closed set of machine models the simulator understands.
///
/// The kind tag selects both the validation rules and the execution strategy;
/// it is matched exhaustively, never subclassed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AutomatonKind {
    #[serde(rename = "DFA")]
    Dfa,
    #[serde(rename = "NFA")]
    Nfa,
    #[serde(rename = "TM")]
    TuringMachine,
    #[serde(rename = "REGEX")]
    Regex,
}

/// A complete automaton definition as produced by the graph editor.
///
/// Serializes to the same structured record the persistence layer stores, so
/// an automaton survives a save/load round trip unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Automaton {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: AutomatonKind,
    pub states: Vec<State>,
    pub transitions: Vec<Transition>,
    /// Declared set of legal input symbols. Order is preserved for the UI but
    /// irrelevant to semantics.
    pub alphabet: Vec<String>,
    /// Opaque timestamps owned by the persistence layer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Automaton {
    /// Returns the unique initial state, or `None` when the flag is missing.
    ///
    /// When several states carry the flag (rejected by the validator) the
    /// first one in definition order wins, matching editor behavior.
    pub fn initial_state(&self) -> Option<&State> {
        self.states.iter().find(|s| s.is_initial)
    }

    /// Looks up a state by id.
    pub fn state(&self, id: &str) -> Option<&State> {
        self.states.iter().find(|s| s.id == id)
    }

    /// Whether the state with the given id is accepting.
    pub fn is_final_state(&self, id: &str) -> bool {
        self.state(id).is_some_and(|s| s.is_final)
    }
}

/// Snapshot of a Turing Machine tape attached to one simulation step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TapeSnapshot {
    /// Full tape contents, one symbol per cell.
    pub cells: Vec<char>,
    /// Head position (0-based cell index).
    pub position: usize,
    /// Symbol currently under the head; the blank symbol past the tape's extent.
    pub head: char,
}

/// One recorded configuration during a simulation, used for visualization and replay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationStep {
    /// 0-based step number, strictly increasing within a trace.
    pub step: usize,
    /// Every state the machine may occupy after this step. A singleton for
    /// deterministic machines; the full reachable set for an NFA.
    pub states: BTreeSet<String>,
    /// Input suffix not yet consumed.
    pub remaining_input: String,
    /// True only on the terminal step of an accepted run.
    pub is_accepted: bool,
    /// The edge just taken; absent on the initial step and on stuck steps.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transition: Option<Transition>,
    /// Tape state after the step; present only for Turing Machines.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tape: Option<TapeSnapshot>,
}

impl SimulationStep {
    /// Renders the active-state set for display, e.g. `"q1, q2"`.
    ///
    /// The set itself is the source of truth; this string exists for the
    /// step-trace panel only.
    pub fn display_state(&self) -> String {
        self.states.iter().cloned().collect::<Vec<_>>().join(", ")
    }
}

/// The outcome of executing one input against an automaton.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    pub input: String,
    /// Ordered, replayable trace of every configuration reached.
    pub steps: Vec<SimulationStep>,
    pub is_accepted: bool,
    pub execution_time: Duration,
    /// Set when the automaton had no usable start configuration. A stuck or
    /// ceiling-bound machine is an ordinary rejection, not an error.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Errors raised at the I/O boundary of the simulator core.
///
/// Validation findings and simulation outcomes are data, never errors; this
/// enum only covers loading and serializing automaton definitions.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AutomatonError {
    /// The definition could not be serialized or deserialized.
    #[error("Automaton serialization error: {0}")]
    Serialization(String),
    /// The definition is structurally unusable.
    #[error("Automaton validation error: {0}")]
    Validation(String),
    /// A file system operation failed while loading or saving a definition.
    #[error("File error: {0}")]
    File(String),
}
