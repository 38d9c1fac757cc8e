//! This module checks automaton definitions for structural problems before simulation.
//! Blocking problems are reported as errors, suspicious-but-legal configurations as
//! warnings; both are plain data so the editor can surface them on every change.

use crate::types::{Automaton, AutomatonKind, MAX_INPUT_LENGTH};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The outcome of validating an automaton or an input string.
///
/// `is_valid` is true exactly when `errors` is empty; warnings never block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationReport {
    fn from_findings(errors: Vec<String>, warnings: Vec<String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
            warnings,
        }
    }
}

/// Validates an automaton definition for simulation.
///
/// Runs the universal structural checks followed by the checks specific to the
/// automaton's kind. Every finding is accumulated; the report carries the full
/// list rather than the first problem encountered. The automaton is never
/// mutated, and the same input always produces the same report.
pub fn validate(automaton: &Automaton) -> ValidationReport {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    check_states(automaton, &mut errors, &mut warnings);
    check_transitions(automaton, &mut errors, &mut warnings);

    match automaton.kind {
        AutomatonKind::Dfa => check_determinism(automaton, &mut errors, &mut warnings),
        // Multiple transitions per (state, symbol) are legal for an NFA.
        AutomatonKind::Nfa => {}
        AutomatonKind::TuringMachine => check_tape_transitions(automaton, &mut errors, &mut warnings),
        AutomatonKind::Regex => check_regex_alphabet(automaton, &mut warnings),
    }

    ValidationReport::from_findings(errors, warnings)
}

/// Checks an input string against an automaton's declared alphabet.
///
/// Emits one error per character that is not in the alphabet, citing its
/// position, and a warning for inputs long enough to make stepped playback
/// sluggish.
pub fn validate_input(input: &str, alphabet: &[String]) -> ValidationReport {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if input.chars().count() > MAX_INPUT_LENGTH {
        warnings.push("Input string is very long - this may cause performance issues".to_string());
    }

    for (position, symbol) in input.chars().enumerate() {
        if !alphabet.iter().any(|entry| {
            let mut chars = entry.chars();
            chars.next() == Some(symbol) && chars.next().is_none()
        }) {
            errors.push(format!(
                "Character '{}' at position {} is not in the alphabet",
                symbol, position
            ));
        }
    }

    ValidationReport::from_findings(errors, warnings)
}

/// Universal per-state checks: presence of states, exactly one initial state,
/// at least one final state (warning), required properties, layout sanity.
fn check_states(automaton: &Automaton, errors: &mut Vec<String>, warnings: &mut Vec<String>) {
    if automaton.states.is_empty() {
        errors.push("Automaton must have at least one state".to_string());
    }

    let initial_count = automaton.states.iter().filter(|s| s.is_initial).count();
    if initial_count != 1 {
        errors.push("Automaton must have exactly one initial state".to_string());
    }

    if !automaton.states.iter().any(|s| s.is_final) {
        warnings.push("Automaton has no final states - it will never accept any input".to_string());
    }

    for state in &automaton.states {
        if state.id.is_empty() || state.name.is_empty() {
            let id = if state.id.is_empty() { "unknown" } else { &state.id };
            errors.push(format!("State {} is missing required properties", id));
        }

        if state.x < 0.0 || state.y < 0.0 {
            warnings.push(format!("State {} has negative coordinates", state.name));
        }
    }
}

/// Universal per-transition checks: required properties, dangling state
/// references, alphabet membership.
fn check_transitions(automaton: &Automaton, errors: &mut Vec<String>, warnings: &mut Vec<String>) {
    for transition in &automaton.transitions {
        if transition.id.is_empty()
            || transition.from.is_empty()
            || transition.to.is_empty()
            || transition.symbol.is_empty()
        {
            let id = if transition.id.is_empty() {
                "unknown"
            } else {
                &transition.id
            };
            errors.push(format!("Transition {} is missing required properties", id));
        }

        if automaton.state(&transition.from).is_none() {
            errors.push(format!(
                "Transition {} references non-existent state: {}",
                transition.id, transition.from
            ));
        }

        if automaton.state(&transition.to).is_none() {
            errors.push(format!(
                "Transition {} references non-existent state: {}",
                transition.id, transition.to
            ));
        }

        if !transition.symbol.is_empty() && !automaton.alphabet.contains(&transition.symbol) {
            warnings.push(format!(
                "Transition {} uses symbol '{}' not in alphabet",
                transition.id, transition.symbol
            ));
        }
    }
}

/// DFA-specific checks: at most one outgoing transition per (state, symbol)
/// pair, and a warning for every alphabet symbol a state leaves unhandled.
///
/// Incompleteness is tolerated - the engine treats a missing transition as an
/// immediate rejection - so it is flagged, not rejected. Only states with at
/// least one outgoing transition are checked for coverage.
fn check_determinism(automaton: &Automaton, errors: &mut Vec<String>, warnings: &mut Vec<String>) {
    let mut outgoing: HashMap<&str, HashMap<&str, &str>> = HashMap::new();

    for transition in &automaton.transitions {
        let by_symbol = outgoing.entry(transition.from.as_str()).or_default();
        if by_symbol.contains_key(transition.symbol.as_str()) {
            errors.push(format!(
                "DFA violation: State {} has multiple transitions for symbol '{}'",
                transition.from, transition.symbol
            ));
        }
        by_symbol.insert(transition.symbol.as_str(), transition.to.as_str());
    }

    for state in &automaton.states {
        if let Some(by_symbol) = outgoing.get(state.id.as_str()) {
            for symbol in &automaton.alphabet {
                if !by_symbol.contains_key(symbol.as_str()) {
                    warnings.push(format!(
                        "State {} has no transition for symbol '{}'",
                        state.name, symbol
                    ));
                }
            }
        }
    }
}

/// Turing Machine checks: every transition needs a readable symbol and a head
/// direction; a missing write symbol degrades to a pure move and only warns.
///
/// An illegal direction value is unrepresentable in [`crate::types::Direction`]
/// and fails at deserialization instead.
fn check_tape_transitions(
    automaton: &Automaton,
    errors: &mut Vec<String>,
    warnings: &mut Vec<String>,
) {
    for transition in &automaton.transitions {
        if transition.tape_read_symbol().is_none() {
            errors.push(format!(
                "Turing Machine transition {} must specify read symbol",
                transition.id
            ));
        }

        if transition.tape_write_symbol().is_none() {
            warnings.push(format!(
                "Turing Machine transition {} should specify write symbol",
                transition.id
            ));
        }

        if transition.direction.is_none() {
            errors.push(format!(
                "Turing Machine transition {} must specify direction (L/R/S)",
                transition.id
            ));
        }
    }
}

fn check_regex_alphabet(automaton: &Automaton, warnings: &mut Vec<String>) {
    if automaton.alphabet.is_empty() {
        warnings.push("Regular expression has no alphabet defined".to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Automaton, AutomatonKind, Direction, State, Transition};

    fn state(id: &str, is_initial: bool, is_final: bool) -> State {
        State {
            id: id.to_string(),
            name: id.to_string(),
            x: 100.0,
            y: 100.0,
            is_initial,
            is_final,
            is_active: None,
        }
    }

    fn transition(id: &str, from: &str, to: &str, symbol: &str) -> Transition {
        Transition {
            id: id.to_string(),
            from: from.to_string(),
            to: to.to_string(),
            symbol: symbol.to_string(),
            label: None,
            read_symbol: None,
            write_symbol: None,
            direction: None,
        }
    }

    fn automaton(
        kind: AutomatonKind,
        states: Vec<State>,
        transitions: Vec<Transition>,
        alphabet: &[&str],
    ) -> Automaton {
        Automaton {
            id: "test".to_string(),
            name: "Test Automaton".to_string(),
            kind,
            states,
            transitions,
            alphabet: alphabet.iter().map(|s| s.to_string()).collect(),
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_valid_dfa() {
        let machine = automaton(
            AutomatonKind::Dfa,
            vec![state("q0", true, false), state("q1", false, true)],
            vec![
                transition("t0", "q0", "q1", "a"),
                transition("t1", "q0", "q0", "b"),
                transition("t2", "q1", "q1", "a"),
                transition("t3", "q1", "q0", "b"),
            ],
            &["a", "b"],
        );

        let report = validate(&machine);
        assert!(report.is_valid);
        assert!(report.errors.is_empty());
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_empty_automaton() {
        let machine = automaton(AutomatonKind::Dfa, Vec::new(), Vec::new(), &["a"]);

        let report = validate(&machine);
        assert!(!report.is_valid);
        assert!(report
            .errors
            .contains(&"Automaton must have at least one state".to_string()));
        // Zero states also means zero initial states.
        assert!(report
            .errors
            .contains(&"Automaton must have exactly one initial state".to_string()));
    }

    #[test]
    fn test_missing_initial_state() {
        let machine = automaton(
            AutomatonKind::Dfa,
            vec![state("q0", false, true)],
            Vec::new(),
            &["a"],
        );

        let report = validate(&machine);
        assert!(!report.is_valid);
        assert!(report
            .errors
            .contains(&"Automaton must have exactly one initial state".to_string()));
    }

    #[test]
    fn test_multiple_initial_states() {
        let machine = automaton(
            AutomatonKind::Nfa,
            vec![state("q0", true, false), state("q1", true, true)],
            Vec::new(),
            &["a"],
        );

        let report = validate(&machine);
        assert!(!report.is_valid);
        assert!(report
            .errors
            .contains(&"Automaton must have exactly one initial state".to_string()));
    }

    #[test]
    fn test_no_final_states_is_warning_only() {
        let machine = automaton(
            AutomatonKind::Dfa,
            vec![state("q0", true, false)],
            vec![transition("t0", "q0", "q0", "a")],
            &["a"],
        );

        let report = validate(&machine);
        assert!(report.is_valid);
        assert!(report
            .warnings
            .contains(&"Automaton has no final states - it will never accept any input".to_string()));
    }

    #[test]
    fn test_state_missing_properties() {
        let mut nameless = state("q0", true, true);
        nameless.name = String::new();

        let machine = automaton(AutomatonKind::Dfa, vec![nameless], Vec::new(), &["a"]);

        let report = validate(&machine);
        assert!(!report.is_valid);
        assert!(report
            .errors
            .contains(&"State q0 is missing required properties".to_string()));
    }

    #[test]
    fn test_negative_coordinates_warn() {
        let mut offscreen = state("q0", true, true);
        offscreen.y = -40.0;

        let machine = automaton(AutomatonKind::Dfa, vec![offscreen], Vec::new(), &["a"]);

        let report = validate(&machine);
        assert!(report.is_valid);
        assert!(report
            .warnings
            .contains(&"State q0 has negative coordinates".to_string()));
    }

    #[test]
    fn test_dangling_transition_reference() {
        let machine = automaton(
            AutomatonKind::Dfa,
            vec![state("q0", true, true)],
            vec![transition("t0", "q0", "ghost", "a")],
            &["a"],
        );

        let report = validate(&machine);
        assert!(!report.is_valid);
        assert!(report
            .errors
            .contains(&"Transition t0 references non-existent state: ghost".to_string()));
    }

    #[test]
    fn test_symbol_outside_alphabet_warns() {
        let machine = automaton(
            AutomatonKind::Nfa,
            vec![state("q0", true, true)],
            vec![transition("t0", "q0", "q0", "z")],
            &["a", "b"],
        );

        let report = validate(&machine);
        assert!(report.is_valid);
        assert!(report
            .warnings
            .contains(&"Transition t0 uses symbol 'z' not in alphabet".to_string()));
    }

    #[test]
    fn test_nondeterministic_dfa_rejected() {
        // Two transitions from q0 on 'a' - exactly one error mentioning the symbol.
        let machine = automaton(
            AutomatonKind::Dfa,
            vec![
                state("q0", true, false),
                state("q1", false, true),
                state("q2", false, false),
            ],
            vec![
                transition("t0", "q0", "q1", "a"),
                transition("t1", "q0", "q2", "a"),
            ],
            &["a"],
        );

        let report = validate(&machine);
        assert!(!report.is_valid);

        let determinism_errors: Vec<_> = report
            .errors
            .iter()
            .filter(|e| e.contains("multiple transitions"))
            .collect();
        assert_eq!(determinism_errors.len(), 1);
        assert!(determinism_errors[0].contains("q0"));
        assert!(determinism_errors[0].contains("'a'"));
    }

    #[test]
    fn test_incomplete_dfa_warns_per_missing_symbol() {
        let machine = automaton(
            AutomatonKind::Dfa,
            vec![state("q0", true, false), state("q1", false, true)],
            vec![transition("t0", "q0", "q1", "a")],
            &["a", "b"],
        );

        let report = validate(&machine);
        assert!(report.is_valid);
        assert!(report
            .warnings
            .contains(&"State q0 has no transition for symbol 'b'".to_string()));
        // q1 has no outgoing transitions at all and is not flagged.
        assert!(!report
            .warnings
            .iter()
            .any(|w| w.starts_with("State q1 has no transition")));
    }

    #[test]
    fn test_same_symbol_from_different_states_is_deterministic() {
        let machine = automaton(
            AutomatonKind::Dfa,
            vec![state("q0", true, false), state("q1", false, true)],
            vec![
                transition("t0", "q0", "q1", "a"),
                transition("t1", "q1", "q0", "a"),
            ],
            &["a"],
        );

        let report = validate(&machine);
        assert!(report.is_valid);
    }

    #[test]
    fn test_nfa_allows_nondeterminism() {
        let machine = automaton(
            AutomatonKind::Nfa,
            vec![
                state("q0", true, false),
                state("q1", false, false),
                state("q2", false, true),
            ],
            vec![
                transition("t0", "q0", "q1", "a"),
                transition("t1", "q0", "q2", "a"),
            ],
            &["a"],
        );

        let report = validate(&machine);
        assert!(report.is_valid);
    }

    #[test]
    fn test_tm_transition_requirements() {
        let mut read_write_move = transition("t0", "q0", "q1", "0");
        read_write_move.read_symbol = Some("0".to_string());
        read_write_move.write_symbol = Some("1".to_string());
        read_write_move.direction = Some(Direction::Right);

        // Pure move: no write symbol, still legal.
        let mut pure_move = transition("t1", "q1", "q1", "1");
        pure_move.direction = Some(Direction::Left);

        // Missing direction is a hard error.
        let no_direction = transition("t2", "q1", "q0", "0");

        let machine = automaton(
            AutomatonKind::TuringMachine,
            vec![state("q0", true, false), state("q1", false, true)],
            vec![read_write_move, pure_move, no_direction],
            &["0", "1"],
        );

        let report = validate(&machine);
        assert!(!report.is_valid);
        assert!(report
            .errors
            .contains(&"Turing Machine transition t2 must specify direction (L/R/S)".to_string()));
        assert!(report
            .warnings
            .contains(&"Turing Machine transition t1 should specify write symbol".to_string()));
        // t0 is fully specified and contributes nothing.
        assert!(!report.errors.iter().any(|e| e.contains("t0")));
        assert!(!report.warnings.iter().any(|w| w.contains("t0")));
    }

    #[test]
    fn test_tm_transition_without_readable_symbol() {
        let mut unreadable = transition("t0", "q0", "q0", "");
        unreadable.direction = Some(Direction::Stay);

        let machine = automaton(
            AutomatonKind::TuringMachine,
            vec![state("q0", true, true)],
            vec![unreadable],
            &["0"],
        );

        let report = validate(&machine);
        assert!(!report.is_valid);
        assert!(report
            .errors
            .contains(&"Turing Machine transition t0 must specify read symbol".to_string()));
    }

    #[test]
    fn test_regex_empty_alphabet_warns() {
        let machine = automaton(
            AutomatonKind::Regex,
            vec![state("q0", true, true)],
            Vec::new(),
            &[],
        );

        let report = validate(&machine);
        assert!(report.is_valid);
        assert!(report
            .warnings
            .contains(&"Regular expression has no alphabet defined".to_string()));
    }

    #[test]
    fn test_validate_is_idempotent() {
        let machine = automaton(
            AutomatonKind::Dfa,
            vec![state("q0", true, false), state("q1", false, true)],
            vec![
                transition("t0", "q0", "q1", "a"),
                transition("t1", "q0", "q2", "a"),
            ],
            &["a", "b"],
        );

        let snapshot = machine.clone();
        let first = validate(&machine);
        let second = validate(&machine);

        assert_eq!(first, second);
        assert_eq!(machine, snapshot);
    }

    #[test]
    fn test_validate_input_accepts_clean_string() {
        let alphabet = vec!["0".to_string(), "1".to_string()];
        let report = validate_input("0110", &alphabet);

        assert!(report.is_valid);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_validate_input_reports_each_bad_character() {
        let alphabet = vec!["a".to_string(), "b".to_string()];
        let report = validate_input("axbya", &alphabet);

        assert!(!report.is_valid);
        assert_eq!(report.errors.len(), 2);
        assert_eq!(
            report.errors[0],
            "Character 'x' at position 1 is not in the alphabet"
        );
        assert_eq!(
            report.errors[1],
            "Character 'y' at position 3 is not in the alphabet"
        );
    }

    #[test]
    fn test_validate_input_warns_on_long_input() {
        let alphabet = vec!["a".to_string()];
        let long_input = "a".repeat(MAX_INPUT_LENGTH + 1);

        let report = validate_input(&long_input, &alphabet);
        assert!(report.is_valid);
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("very long"));
    }
}
