//! This module defines the `Machine` struct: the immutable collection of
//! states produced by one build request, with the lookups the interpreter and
//! the report layer need.

use serde::{Deserialize, Serialize};

use crate::types::{State, StateId, Transition};

/// A built machine: the states of the diagram in description order.
///
/// Built exactly once per build request; a previous machine is simply dropped
/// by the caller and replaced. Read-only for the lifetime of any run, so
/// concurrent runs over one machine are safe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Machine {
    states: Vec<State>,
}

impl Machine {
    /// Wraps an already-decoded list of states.
    pub fn new(states: Vec<State>) -> Self {
        Self { states }
    }

    /// All states, in the order their descriptions were given.
    pub fn states(&self) -> &[State] {
        &self.states
    }

    /// Number of states in the machine.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Looks a state up by its numeric id.
    ///
    /// A state's id is not required to equal its position, so this scans
    /// rather than indexes.
    pub fn state(&self, id: StateId) -> Option<&State> {
        self.states.iter().find(|state| state.id == id)
    }

    /// The state execution begins in. If several states carry the start flag
    /// (an upstream editor bug), the first one wins.
    pub fn start_state(&self) -> Option<&State> {
        self.states.iter().find(|state| state.is_start)
    }

    /// All halt states.
    pub fn halt_states(&self) -> impl Iterator<Item = &State> {
        self.states.iter().filter(|state| state.is_halt)
    }

    /// Every transition of every state, flattened in state order, for the
    /// report layer.
    pub fn transitions(&self) -> impl Iterator<Item = &Transition> {
        self.states.iter().flat_map(|state| state.transitions.iter())
    }

    /// Display rows for the summary table: one record per transition plus a
    /// HALT row per halt state, in state order.
    pub fn summary_rows(&self) -> Vec<String> {
        let mut rows = Vec::new();
        for state in &self.states {
            if state.is_halt {
                rows.push(format!("{},HALT", state.name()));
            } else {
                for transition in &state.transitions {
                    rows.push(transition.to_string());
                }
            }
        }
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Direction;

    fn two_state_machine() -> Machine {
        Machine::new(vec![
            State {
                id: 7,
                is_start: false,
                is_halt: true,
                transitions: Vec::new(),
            },
            State {
                id: 0,
                is_start: true,
                is_halt: false,
                transitions: vec![Transition {
                    from_state: 0,
                    to_state: 7,
                    read: 'a',
                    write: 'b',
                    direction: Direction::Right,
                }],
            },
        ])
    }

    #[test]
    fn test_lookup_is_by_id_not_position() {
        let machine = two_state_machine();

        assert_eq!(machine.state(7).unwrap().name(), "q7");
        assert_eq!(machine.state(0).unwrap().name(), "q0");
        assert!(machine.state(1).is_none());
    }

    #[test]
    fn test_start_state_found_by_flag() {
        let machine = two_state_machine();

        // The start state is second in the list; position must not matter.
        let start = machine.start_state().unwrap();
        assert_eq!(start.id, 0);
        assert!(!start.is_halt);
    }

    #[test]
    fn test_flattened_transitions() {
        let machine = two_state_machine();

        let transitions: Vec<_> = machine.transitions().collect();
        assert_eq!(transitions.len(), 1);
        assert_eq!(transitions[0].to_state, 7);
    }

    #[test]
    fn test_summary_rows() {
        let machine = two_state_machine();

        assert_eq!(
            machine.summary_rows(),
            vec!["q7,HALT".to_string(), "q0,q7,a,b,R".to_string()]
        );
    }

    #[test]
    fn test_halt_states() {
        let machine = two_state_machine();
        let halts: Vec<_> = machine.halt_states().map(|state| state.id).collect();
        assert_eq!(halts, vec![7]);
    }
}
