//! This module defines the core data structures used throughout the machine
//! core: states, transitions, verdicts, the execution trace, and error types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Rule;

/// The blank symbol marking unused tape cells.
pub const BLANK_SYMBOL: char = '-';
/// The maximum number of transitions to apply before a run is abandoned as a
/// possible infinite loop. Every user-facing message quoting a figure derives
/// from this constant.
pub const MAX_EXECUTION_STEPS: usize = 100_000;

/// Numeric identifier of a state, as drawn in the diagram (`q0`, `q1`, ...).
pub type StateId = usize;

/// The direction the tape head moves after a transition is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Move the head one cell to the left.
    Left,
    /// Move the head one cell to the right.
    Right,
    /// Keep the head where it is.
    Stay,
}

impl Direction {
    /// The single-letter form used by the description format and report rows.
    pub fn letter(self) -> char {
        match self {
            Direction::Left => 'L',
            Direction::Right => 'R',
            Direction::Stay => 'S',
        }
    }
}

/// A labelled edge between two states: consumed when the symbol under the
/// head equals `read`; writes `write` and moves the head in `direction`.
///
/// Immutable once decoded; owned by its source state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    /// Id of the state this edge leaves.
    pub from_state: StateId,
    /// Id of the state this edge enters.
    pub to_state: StateId,
    /// Symbol that must be under the head for the edge to apply.
    pub read: char,
    /// Symbol written over the cell under the head.
    pub write: char,
    /// Head movement after the write.
    pub direction: Direction,
}

impl std::fmt::Display for Transition {
    /// Formats the transition as a description record, e.g. `q0,q1,a,a,L`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "q{},q{},{},{},{}",
            self.from_state,
            self.to_state,
            self.read,
            self.write,
            self.direction.letter()
        )
    }
}

/// A node of the machine diagram with its outgoing edges.
///
/// A halt state never carries transitions; edges drawn on one are dropped at
/// decode time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    /// Numeric id of the state.
    pub id: StateId,
    /// Whether execution begins in this state.
    pub is_start: bool,
    /// Whether entering this state accepts the input.
    pub is_halt: bool,
    /// Outgoing edges, in diagram order. Matched first-to-last during a run.
    pub transitions: Vec<Transition>,
}

impl State {
    /// The display name of the state, e.g. `q3`.
    pub fn name(&self) -> String {
        format!("q{}", self.id)
    }
}

/// The reason a run crashed. A crash is a semantic rejection of the input,
/// not a fault: it is reported through [`Verdict::Crashed`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
pub enum CrashReason {
    /// A left move was taken while the head was already on column 0.
    #[error("the tape head moved past the left end of the tape")]
    LeftEndOfTape,
    /// The current state has no edge whose read symbol matches the tape.
    #[error("state q{state} has no edge with read parameter = '{symbol}'")]
    NoMatchingEdge { state: StateId, symbol: char },
    /// A transition entered a state id the machine does not define.
    /// Catchable ahead of time with [`crate::analyzer::analyze`].
    #[error("state q{0} is not defined in the machine")]
    UndefinedState(StateId),
}

/// Terminal classification of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    /// The machine entered a halt state.
    Accepted,
    /// The machine rejected the input; the reason names the offending state
    /// and symbol or the tape boundary.
    Crashed(CrashReason),
    /// The iteration bound was reached without a terminal state. This is a
    /// resource-exhaustion signal, not an answer about acceptance.
    PossibleInfiniteLoop,
}

impl Verdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Verdict::Accepted)
    }

    pub fn is_crashed(&self) -> bool {
        matches!(self, Verdict::Crashed(_))
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::Accepted => write!(f, "accepted"),
            Verdict::Crashed(reason) => write!(f, "crashed: {reason}"),
            Verdict::PossibleInfiniteLoop => write!(
                f,
                "possible infinite loop: {MAX_EXECUTION_STEPS} read, write and move \
                 iterations were executed; revise the machine design"
            ),
        }
    }
}

/// Outcome of a single interpreter step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// A transition was applied and the run continues.
    Continue,
    /// The run reached a terminal verdict.
    Done(Verdict),
}

/// Tape contents and head position after one applied transition, as replayed
/// cell-by-cell by an external animator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TapeSnapshot {
    /// Full tape contents, blank cells included.
    pub tape: String,
    /// Head column at the time of the snapshot (before the move).
    pub head: usize,
}

/// The ordered record of a single run, owned by the caller once the run
/// completes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionTrace {
    /// Every state the run entered, in order, including the terminal one.
    pub visited_states: Vec<StateId>,
    /// `(written symbol, head movement)` per applied transition.
    pub tape_ops: Vec<(char, Direction)>,
    /// Tape contents and head position per applied transition, plus one final
    /// snapshot at termination.
    pub tape_history: Vec<TapeSnapshot>,
    /// Every transition applied, in order.
    pub transition_log: Vec<Transition>,
    /// Terminal classification of the run.
    pub verdict: Verdict,
}

impl ExecutionTrace {
    /// The tape contents at the end of the run.
    pub fn final_tape(&self) -> Option<&str> {
        self.tape_history.last().map(|snapshot| snapshot.tape.as_str())
    }
}

/// Errors surfaced by decoding, validation, and interpreter setup.
///
/// Crashes and the iteration bound are *not* errors; they are reported as
/// [`Verdict`] values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MachineError {
    /// The description text did not match the state description grammar.
    #[error("state description {index} is malformed: {source}")]
    Malformed {
        index: usize,
        source: Box<pest::error::Error<Rule>>,
    },
    /// A non-halt description carried a bare state name instead of records.
    #[error("state description {index}: state {name} is not a halt state but defines no transitions")]
    NoTransitions { index: usize, name: String },
    /// A halt description started with a transition record instead of a name.
    #[error("state description {index}: halt state is missing its display name")]
    MissingHaltName { index: usize },
    /// Records within one description named two different source states.
    #[error("state description {index}: transition source q{found} does not match state q{expected}")]
    MixedSourceStates {
        index: usize,
        expected: StateId,
        found: StateId,
    },
    /// A state name whose digits do not form a representable id.
    #[error("state description {index}: state id in {name:?} is not a valid number")]
    InvalidStateId { index: usize, name: String },
    /// The machine has no state flagged as the start state.
    #[error("machine has no start state")]
    NoStartState,
    /// A pre-run validation check failed.
    #[error("machine validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_serialization() {
        let left_json = serde_json::to_string(&Direction::Left).unwrap();
        let stay_json = serde_json::to_string(&Direction::Stay).unwrap();

        assert_eq!(left_json, "\"Left\"");
        assert_eq!(stay_json, "\"Stay\"");

        let left: Direction = serde_json::from_str(&left_json).unwrap();
        assert_eq!(left, Direction::Left);
    }

    #[test]
    fn test_direction_letters() {
        assert_eq!(Direction::Left.letter(), 'L');
        assert_eq!(Direction::Right.letter(), 'R');
        assert_eq!(Direction::Stay.letter(), 'S');
    }

    #[test]
    fn test_transition_display() {
        let transition = Transition {
            from_state: 0,
            to_state: 1,
            read: 'a',
            write: 'b',
            direction: Direction::Right,
        };

        assert_eq!(transition.to_string(), "q0,q1,a,b,R");
    }

    #[test]
    fn test_crash_reason_messages() {
        let no_edge = CrashReason::NoMatchingEdge {
            state: 0,
            symbol: 'c',
        };
        assert_eq!(
            no_edge.to_string(),
            "state q0 has no edge with read parameter = 'c'"
        );

        assert_eq!(
            CrashReason::LeftEndOfTape.to_string(),
            "the tape head moved past the left end of the tape"
        );
    }

    #[test]
    fn test_infinite_loop_message_quotes_the_bound() {
        let message = Verdict::PossibleInfiniteLoop.to_string();
        assert!(message.contains(&MAX_EXECUTION_STEPS.to_string()));
    }

    #[test]
    fn test_state_name() {
        let state = State {
            id: 12,
            is_start: false,
            is_halt: true,
            transitions: Vec::new(),
        };
        assert_eq!(state.name(), "q12");
    }
}
