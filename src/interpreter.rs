//! This module implements the execution engine: it steps a built [`Machine`]
//! over a tape, producing a terminal [`Verdict`] and a replayable
//! [`ExecutionTrace`].

use crate::machine::Machine;
use crate::types::{
    CrashReason, Direction, ExecutionTrace, MachineError, StateId, Step, TapeSnapshot, Transition,
    Verdict, BLANK_SYMBOL, MAX_EXECUTION_STEPS,
};

/// One run of a machine over an input string.
///
/// All mutable run state (tape, head, counter, trace) lives in this value;
/// the machine itself is only read, so any number of interpreters may run
/// over the same machine at once. A run is run-to-completion: there is no
/// suspension or resumption, and the iteration bound is the only safety
/// valve against non-termination.
pub struct Interpreter<'m> {
    machine: &'m Machine,
    tape: Vec<char>,
    head: usize,
    current: StateId,
    steps: usize,
    visited_states: Vec<StateId>,
    tape_ops: Vec<(char, Direction)>,
    tape_history: Vec<TapeSnapshot>,
    transition_log: Vec<Transition>,
}

impl<'m> Interpreter<'m> {
    /// Prepares a run: locates the start state by scanning for the start
    /// flag, appends the blank sentinel marking the logical right end of the
    /// input, and places the head on column 0.
    ///
    /// # Errors
    ///
    /// Returns [`MachineError::NoStartState`] if no state carries the start
    /// flag. If several do (an upstream editor bug), the first one wins.
    pub fn new(machine: &'m Machine, input: &str) -> Result<Self, MachineError> {
        let start = machine.start_state().ok_or(MachineError::NoStartState)?;

        let mut tape: Vec<char> = input.chars().collect();
        tape.push(BLANK_SYMBOL);

        Ok(Self {
            machine,
            tape,
            head: 0,
            current: start.id,
            steps: 0,
            visited_states: Vec::new(),
            tape_ops: Vec::new(),
            tape_history: Vec::new(),
            transition_log: Vec::new(),
        })
    }

    /// Executes one step of the simulation loop: records the current state,
    /// accepts on a halt state, otherwise matches the first edge whose read
    /// symbol equals the cell under the head and applies it.
    ///
    /// A left move off column 0 still applies and logs its transition before
    /// crashing, as the replay views expect.
    pub fn step(&mut self) -> Step {
        self.visited_states.push(self.current);

        let state = match self.machine.state(self.current) {
            Some(state) => state,
            None => {
                return Step::Done(Verdict::Crashed(CrashReason::UndefinedState(self.current)))
            }
        };

        if state.is_halt {
            return Step::Done(Verdict::Accepted);
        }

        let symbol = self.tape[self.head];
        let transition = match state.transitions.iter().find(|t| t.read == symbol) {
            Some(transition) => transition.clone(),
            None => {
                return Step::Done(Verdict::Crashed(CrashReason::NoMatchingEdge {
                    state: state.id,
                    symbol,
                }))
            }
        };

        self.tape[self.head] = transition.write;
        self.tape_ops.push((transition.write, transition.direction));
        self.tape_history.push(TapeSnapshot {
            tape: self.tape.iter().collect(),
            head: self.head,
        });
        self.transition_log.push(transition.clone());
        self.steps += 1;
        self.current = transition.to_state;

        match transition.direction {
            Direction::Left => {
                if self.head == 0 {
                    return Step::Done(Verdict::Crashed(CrashReason::LeftEndOfTape));
                }
                self.head -= 1;
            }
            Direction::Right => {
                self.head += 1;
                // The tape is right-unbounded; grow it with blanks on demand.
                if self.head == self.tape.len() {
                    self.tape.push(BLANK_SYMBOL);
                }
            }
            Direction::Stay => {}
        }

        Step::Continue
    }

    /// Drives [`step`](Self::step) to a terminal verdict, abandoning the run
    /// as [`Verdict::PossibleInfiniteLoop`] once exactly
    /// [`MAX_EXECUTION_STEPS`] transitions have been applied.
    pub fn run(mut self) -> ExecutionTrace {
        for _ in 0..MAX_EXECUTION_STEPS {
            if let Step::Done(verdict) = self.step() {
                return self.into_trace(verdict);
            }
        }

        self.into_trace(Verdict::PossibleInfiniteLoop)
    }

    /// Finishes a step-wise run, appending the final tape snapshot.
    pub fn into_trace(mut self, verdict: Verdict) -> ExecutionTrace {
        self.tape_history.push(TapeSnapshot {
            tape: self.tape.iter().collect(),
            head: self.head,
        });

        ExecutionTrace {
            visited_states: self.visited_states,
            tape_ops: self.tape_ops,
            tape_history: self.tape_history,
            transition_log: self.transition_log,
            verdict,
        }
    }

    /// Current tape contents.
    pub fn tape(&self) -> &[char] {
        &self.tape
    }

    /// Current head column.
    pub fn head(&self) -> usize {
        self.head
    }

    /// Id of the state the run is in.
    pub fn current_state(&self) -> StateId {
        self.current
    }

    /// Number of transitions applied so far.
    pub fn step_count(&self) -> usize {
        self.steps
    }
}

/// Runs a machine against an input string to completion.
pub fn run(machine: &Machine, input: &str) -> Result<ExecutionTrace, MachineError> {
    Ok(Interpreter::new(machine, input)?.run())
}
