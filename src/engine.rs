//! This module defines the `SimulationEngine`, which executes an input string against a
//! bound automaton and records every intermediate configuration as a replayable trace.
//! Each automaton kind has its own execution strategy behind a single `simulate` entry
//! point; the only shared machinery is trace accumulation and timing.

use crate::types::{
    Automaton, AutomatonKind, Direction, SimulationResult, SimulationStep, State, TapeSnapshot,
    Transition, BLANK_SYMBOL, DEFAULT_MAX_STEPS,
};
use std::collections::BTreeSet;
use std::time::{Duration, Instant};
use tracing::debug;

/// Message carried by [`SimulationResult::error`] when the bound automaton has
/// no state flagged as initial.
pub const NO_INITIAL_STATE: &str = "No initial state";

/// Executes inputs against one automaton.
///
/// Construction binds the automaton; `simulate` is then pure with respect to
/// that binding, holds no mutable shared state, and may be called repeatedly
/// (or from parallel callers, one engine per thread) for different inputs.
pub struct SimulationEngine {
    automaton: Automaton,
    max_steps: usize,
}

impl SimulationEngine {
    /// Creates an engine with the default step ceiling for Turing Machines.
    pub fn new(automaton: Automaton) -> Self {
        Self::with_step_limit(automaton, DEFAULT_MAX_STEPS)
    }

    /// Creates an engine with an explicit Turing Machine step ceiling.
    ///
    /// The ceiling guarantees termination for non-halting machines; tests use
    /// small limits to exercise that path quickly.
    pub fn with_step_limit(automaton: Automaton, max_steps: usize) -> Self {
        Self {
            automaton,
            max_steps,
        }
    }

    /// Returns the bound automaton.
    pub fn automaton(&self) -> &Automaton {
        &self.automaton
    }

    /// Returns the Turing Machine step ceiling.
    pub fn max_steps(&self) -> usize {
        self.max_steps
    }

    /// Runs the bound automaton against `input` and returns the full trace.
    ///
    /// Never panics and never returns an error for ordinary inputs: a missing
    /// transition, a symbol outside the alphabet, or an exhausted step ceiling
    /// all surface as a non-accepted result. The one degenerate case - no
    /// initial state - yields a single-step trace with
    /// [`SimulationResult::error`] set.
    pub fn simulate(&self, input: &str) -> SimulationResult {
        let started = Instant::now();
        debug!(
            kind = ?self.automaton.kind,
            input_len = input.len(),
            "simulation_start"
        );

        let mut result = match self.automaton.kind {
            AutomatonKind::Dfa => self.simulate_dfa(input),
            AutomatonKind::Nfa => self.simulate_nfa(input),
            AutomatonKind::TuringMachine => self.simulate_tape(input),
            AutomatonKind::Regex => self.simulate_regex(input),
        };

        result.execution_time = started.elapsed();
        debug!(
            steps = result.steps.len(),
            accepted = result.is_accepted,
            "simulation_done"
        );
        result
    }

    /// Deterministic execution: follow the unique matching transition per
    /// input symbol; a missing transition strands the machine and rejects.
    fn simulate_dfa(&self, input: &str) -> SimulationResult {
        let Some(initial) = self.automaton.initial_state() else {
            return self.missing_initial_state(input);
        };

        let mut steps = Vec::new();
        let mut current = initial;
        let mut remaining = input.to_string();

        steps.push(SimulationStep {
            step: 0,
            states: singleton(&current.id),
            remaining_input: remaining.clone(),
            is_accepted: false,
            transition: None,
            tape: None,
        });

        for symbol in input.chars() {
            let wanted = symbol.to_string();
            let transition = self
                .automaton
                .transitions
                .iter()
                .find(|t| t.from == current.id && t.symbol == wanted);

            let Some(transition) = transition else {
                // Stuck. The step records the symbol the machine could not
                // consume; the unconsumed suffix keeps the run rejected.
                debug!(state = %current.id, symbol = %symbol, "dfa_stuck");
                steps.push(SimulationStep {
                    step: steps.len(),
                    states: singleton(&current.id),
                    remaining_input: remaining[symbol.len_utf8()..].to_string(),
                    is_accepted: false,
                    transition: None,
                    tape: None,
                });
                break;
            };

            let Some(next) = self.automaton.state(&transition.to) else {
                break;
            };

            remaining = remaining[symbol.len_utf8()..].to_string();
            steps.push(SimulationStep {
                step: steps.len(),
                states: singleton(&next.id),
                remaining_input: remaining.clone(),
                is_accepted: false,
                transition: Some(transition.clone()),
                tape: None,
            });
            current = next;
        }

        // Sticking before the end is always a rejection, final state or not.
        let is_accepted = current.is_final && remaining.is_empty();
        steps.push(SimulationStep {
            step: steps.len(),
            states: singleton(&current.id),
            remaining_input: remaining,
            is_accepted,
            transition: None,
            tape: None,
        });

        finished(input, steps, is_accepted)
    }

    /// Non-deterministic execution: track the set of simultaneously reachable
    /// states, replacing it each step with the union of all matching
    /// transition targets. Equivalent to subset-construction simulation,
    /// recomputed per step rather than precompiled.
    fn simulate_nfa(&self, input: &str) -> SimulationResult {
        let Some(initial) = self.automaton.initial_state() else {
            return self.missing_initial_state(input);
        };

        let mut steps = Vec::new();
        let mut current: BTreeSet<String> = singleton(&initial.id);
        let mut remaining = input.to_string();

        steps.push(SimulationStep {
            step: 0,
            states: current.clone(),
            remaining_input: remaining.clone(),
            is_accepted: false,
            transition: None,
            tape: None,
        });

        for symbol in input.chars() {
            let wanted = symbol.to_string();
            let mut next = BTreeSet::new();

            for state_id in &current {
                for transition in self
                    .automaton
                    .transitions
                    .iter()
                    .filter(|t| t.from == *state_id && t.symbol == wanted)
                {
                    next.insert(transition.to.clone());
                }
            }

            if next.is_empty() {
                // Every branch died on this symbol.
                debug!(active = current.len(), symbol = %symbol, "nfa_stuck");
                steps.push(SimulationStep {
                    step: steps.len(),
                    states: current.clone(),
                    remaining_input: remaining[symbol.len_utf8()..].to_string(),
                    is_accepted: false,
                    transition: None,
                    tape: None,
                });
                break;
            }

            remaining = remaining[symbol.len_utf8()..].to_string();
            steps.push(SimulationStep {
                step: steps.len(),
                states: next.clone(),
                remaining_input: remaining.clone(),
                is_accepted: false,
                transition: None,
                tape: None,
            });
            current = next;
        }

        // Acceptance if any surviving branch sits in a final state with the
        // whole input consumed.
        let is_accepted = remaining.is_empty()
            && current.iter().any(|id| self.automaton.is_final_state(id));
        steps.push(SimulationStep {
            step: steps.len(),
            states: current,
            remaining_input: remaining,
            is_accepted,
            transition: None,
            tape: None,
        });

        finished(input, steps, is_accepted)
    }

    /// Turing Machine execution over a single tape seeded from the input.
    ///
    /// Cells past the tape's extent read as the blank symbol. The machine
    /// halts on a missing transition or on entering a final state; the step
    /// ceiling bounds machines that never halt, in which case the run counts
    /// as whatever the last state says - a policy, not an error.
    fn simulate_tape(&self, input: &str) -> SimulationResult {
        let Some(initial) = self.automaton.initial_state() else {
            return self.missing_initial_state(input);
        };

        let mut tape: Vec<char> = input.chars().collect();
        let mut position = 0usize;
        let mut current = initial;
        let mut steps = Vec::new();

        steps.push(SimulationStep {
            step: 0,
            states: singleton(&current.id),
            remaining_input: input.to_string(),
            is_accepted: false,
            transition: None,
            tape: Some(snapshot(&tape, position)),
        });

        while steps.len() < self.max_steps {
            let current_symbol = tape.get(position).copied().unwrap_or(BLANK_SYMBOL);

            let transition = self
                .automaton
                .transitions
                .iter()
                .find(|t| t.from == current.id && t.tape_read_symbol() == Some(current_symbol));

            let Some(transition) = transition else {
                // Halted. Acceptance is decided solely by the halting state.
                debug!(state = %current.id, symbol = %current_symbol, "tm_halt");
                steps.push(SimulationStep {
                    step: steps.len(),
                    states: singleton(&current.id),
                    remaining_input: String::new(),
                    is_accepted: current.is_final,
                    transition: None,
                    tape: Some(snapshot(&tape, position)),
                });
                break;
            };

            if let Some(write) = transition.tape_write_symbol() {
                if position >= tape.len() {
                    tape.resize(position + 1, BLANK_SYMBOL);
                }
                tape[position] = write;
            }

            match transition.direction {
                Some(Direction::Left) => position = position.saturating_sub(1),
                Some(Direction::Right) => position += 1,
                Some(Direction::Stay) | None => {}
            }

            let Some(next) = self.automaton.state(&transition.to) else {
                break;
            };
            current = next;

            steps.push(SimulationStep {
                step: steps.len(),
                states: singleton(&current.id),
                remaining_input: String::new(),
                is_accepted: current.is_final,
                transition: Some(transition.clone()),
                tape: Some(snapshot(&tape, position)),
            });

            if current.is_final {
                break;
            }
        }

        if steps.len() >= self.max_steps {
            debug!(max_steps = self.max_steps, "tm_ceiling_reached");
        }

        finished(input, steps, current.is_final)
    }

    /// Regex placeholder: degrade the bound automaton to a two-state NFA whose
    /// single transition carries the first alphabet entry as one literal
    /// symbol, then delegate to the NFA path.
    ///
    /// TODO(regex): replace with a Thompson-construction regex-to-NFA
    /// compiler; the literal fallback only ever matches single-character
    /// patterns.
    fn simulate_regex(&self, input: &str) -> SimulationResult {
        let pattern = self.automaton.alphabet.first().cloned().unwrap_or_default();
        debug!(pattern = %pattern, "regex_literal_fallback");

        let fallback = SimulationEngine::with_step_limit(literal_fallback_nfa(&pattern), self.max_steps);
        fallback.simulate(input)
    }

    fn missing_initial_state(&self, input: &str) -> SimulationResult {
        debug!(automaton = %self.automaton.id, "missing_initial_state");
        SimulationResult {
            input: input.to_string(),
            steps: vec![SimulationStep {
                step: 0,
                states: BTreeSet::new(),
                remaining_input: input.to_string(),
                is_accepted: false,
                transition: None,
                tape: None,
            }],
            is_accepted: false,
            execution_time: Duration::ZERO,
            error: Some(NO_INITIAL_STATE.to_string()),
        }
    }
}

fn singleton(id: &str) -> BTreeSet<String> {
    BTreeSet::from([id.to_string()])
}

fn snapshot(tape: &[char], position: usize) -> TapeSnapshot {
    TapeSnapshot {
        cells: tape.to_vec(),
        position,
        head: tape.get(position).copied().unwrap_or(BLANK_SYMBOL),
    }
}

fn finished(input: &str, steps: Vec<SimulationStep>, is_accepted: bool) -> SimulationResult {
    SimulationResult {
        input: input.to_string(),
        steps,
        is_accepted,
        execution_time: Duration::ZERO,
        error: None,
    }
}

/// The degraded stand-in an automaton of kind `Regex` executes as.
fn literal_fallback_nfa(pattern: &str) -> Automaton {
    Automaton {
        id: "regex-nfa".to_string(),
        name: "Regex NFA".to_string(),
        kind: AutomatonKind::Nfa,
        states: vec![
            State {
                id: "q0".to_string(),
                name: "q0".to_string(),
                x: 100.0,
                y: 100.0,
                is_initial: true,
                is_final: false,
                is_active: None,
            },
            State {
                id: "q1".to_string(),
                name: "q1".to_string(),
                x: 200.0,
                y: 100.0,
                is_initial: false,
                is_final: true,
                is_active: None,
            },
        ],
        transitions: vec![Transition {
            id: "t0".to_string(),
            from: "q0".to_string(),
            to: "q1".to_string(),
            symbol: pattern.to_string(),
            label: Some(pattern.to_string()),
            read_symbol: None,
            write_symbol: None,
            direction: None,
        }],
        alphabet: vec![pattern.to_string()],
        created_at: None,
        updated_at: None,
    }
}
