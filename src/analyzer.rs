//! This module provides opt-in validation of a built [`Machine`] before a
//! run: the structural checks the editor performs before requesting a build,
//! plus reachability of the diagram. The decoder itself stays permissive;
//! callers that want the editor's guarantees apply [`analyze`] explicitly.

use std::collections::HashSet;

use crate::machine::Machine;
use crate::types::{MachineError, StateId};

/// Problems found while analyzing a machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    /// The machine has no states at all.
    EmptyMachine,
    /// Two or more states share an id; id lookup would be ambiguous.
    DuplicateStateIds(Vec<StateId>),
    /// No state carries the start flag.
    NoStartState,
    /// More than one state carries the start flag.
    MultipleStartStates(Vec<StateId>),
    /// No halt state exists, so no input can ever be accepted.
    NoHaltState,
    /// Transitions enter state ids the machine does not define.
    UndefinedTargets(Vec<String>),
    /// States that no path from the start state can reach.
    UnreachableStates(Vec<StateId>),
}

impl From<AnalysisError> for MachineError {
    fn from(error: AnalysisError) -> Self {
        let msg = match error {
            AnalysisError::EmptyMachine => "machine has no states".to_string(),
            AnalysisError::DuplicateStateIds(ids) => {
                format!("duplicate state ids: {ids:?}")
            }
            AnalysisError::NoStartState => "no state is flagged as the start state".to_string(),
            AnalysisError::MultipleStartStates(ids) => {
                format!("more than one start state: {ids:?}")
            }
            AnalysisError::NoHaltState => "machine has no halt state".to_string(),
            AnalysisError::UndefinedTargets(edges) => {
                format!("transitions enter undefined states: {edges:?}")
            }
            AnalysisError::UnreachableStates(ids) => {
                format!("unreachable states detected: {ids:?}")
            }
        };
        MachineError::Validation(msg)
    }
}

/// Runs every check against the machine; the first failure wins.
pub fn analyze(machine: &Machine) -> Result<(), MachineError> {
    let checks: [fn(&Machine) -> Result<(), AnalysisError>; 5] = [
        check_structure,
        check_start_state,
        check_halt_state,
        check_undefined_targets,
        check_unreachable_states,
    ];

    for check in checks {
        check(machine)?;
    }

    Ok(())
}

/// Checks that the machine is non-empty and that state ids are unique.
fn check_structure(machine: &Machine) -> Result<(), AnalysisError> {
    if machine.is_empty() {
        return Err(AnalysisError::EmptyMachine);
    }

    let mut seen = HashSet::new();
    let mut duplicates: Vec<StateId> = machine
        .states()
        .iter()
        .filter(|state| !seen.insert(state.id))
        .map(|state| state.id)
        .collect();

    if !duplicates.is_empty() {
        duplicates.sort_unstable();
        duplicates.dedup();
        return Err(AnalysisError::DuplicateStateIds(duplicates));
    }

    Ok(())
}

/// Checks that exactly one state carries the start flag.
fn check_start_state(machine: &Machine) -> Result<(), AnalysisError> {
    let starts: Vec<StateId> = machine
        .states()
        .iter()
        .filter(|state| state.is_start)
        .map(|state| state.id)
        .collect();

    match starts.len() {
        0 => Err(AnalysisError::NoStartState),
        1 => Ok(()),
        _ => Err(AnalysisError::MultipleStartStates(starts)),
    }
}

/// Checks that at least one halt state exists.
fn check_halt_state(machine: &Machine) -> Result<(), AnalysisError> {
    if machine.halt_states().next().is_none() {
        return Err(AnalysisError::NoHaltState);
    }

    Ok(())
}

/// Checks that every transition enters a state the machine defines.
fn check_undefined_targets(machine: &Machine) -> Result<(), AnalysisError> {
    let defined: HashSet<StateId> = machine.states().iter().map(|state| state.id).collect();

    let undefined: Vec<String> = machine
        .transitions()
        .filter(|transition| !defined.contains(&transition.to_state))
        .map(|transition| transition.to_string())
        .collect();

    if !undefined.is_empty() {
        return Err(AnalysisError::UndefinedTargets(undefined));
    }

    Ok(())
}

/// Walks the diagram from the start state and flags states no input could
/// ever enter.
fn check_unreachable_states(machine: &Machine) -> Result<(), AnalysisError> {
    let start = match machine.start_state() {
        Some(state) => state.id,
        // Already reported by check_start_state.
        None => return Ok(()),
    };

    let mut visited = HashSet::new();
    let mut queue = vec![start];

    while let Some(id) = queue.pop() {
        if !visited.insert(id) {
            continue;
        }

        if let Some(state) = machine.state(id) {
            for transition in &state.transitions {
                if !visited.contains(&transition.to_state) {
                    queue.push(transition.to_state);
                }
            }
        }
    }

    let mut unreachable: Vec<StateId> = machine
        .states()
        .iter()
        .filter(|state| !visited.contains(&state.id))
        .map(|state| state.id)
        .collect();

    if !unreachable.is_empty() {
        unreachable.sort_unstable();
        return Err(AnalysisError::UnreachableStates(unreachable));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::decode;

    #[test]
    fn test_valid_machine() {
        let machine = decode(&["1_0_q0,q1,a,b,R", "0_1_q1"]).unwrap();
        assert!(analyze(&machine).is_ok());
    }

    #[test]
    fn test_empty_machine() {
        let machine = Machine::new(Vec::new());
        assert_eq!(
            check_structure(&machine),
            Err(AnalysisError::EmptyMachine)
        );
    }

    #[test]
    fn test_duplicate_state_ids() {
        let machine = decode(&["1_0_q0,q1,a,a,R", "0_0_q0,q1,b,b,R", "0_1_q1"]).unwrap();
        assert_eq!(
            check_structure(&machine),
            Err(AnalysisError::DuplicateStateIds(vec![0]))
        );
    }

    #[test]
    fn test_no_start_state() {
        let machine = decode(&["0_0_q0,q1,a,a,R", "0_1_q1"]).unwrap();
        assert_eq!(
            check_start_state(&machine),
            Err(AnalysisError::NoStartState)
        );
    }

    #[test]
    fn test_multiple_start_states() {
        let machine = decode(&["1_0_q0,q2,a,a,R", "1_0_q1,q2,b,b,R", "0_1_q2"]).unwrap();
        assert_eq!(
            check_start_state(&machine),
            Err(AnalysisError::MultipleStartStates(vec![0, 1]))
        );
    }

    #[test]
    fn test_no_halt_state() {
        let machine = decode(&["1_0_q0,q0,a,a,R"]).unwrap();
        assert_eq!(check_halt_state(&machine), Err(AnalysisError::NoHaltState));
    }

    #[test]
    fn test_undefined_targets() {
        let machine = decode(&["1_0_q0,q9,a,a,R", "0_1_q1"]).unwrap();
        assert_eq!(
            check_undefined_targets(&machine),
            Err(AnalysisError::UndefinedTargets(vec![
                "q0,q9,a,a,R".to_string()
            ]))
        );
    }

    #[test]
    fn test_unreachable_states() {
        let machine =
            decode(&["1_0_q0,q1,a,a,R", "0_1_q1", "0_0_q2,q1,b,b,R"]).unwrap();
        assert_eq!(
            check_unreachable_states(&machine),
            Err(AnalysisError::UnreachableStates(vec![2]))
        );
    }

    #[test]
    fn test_first_failure_wins() {
        // Missing halt state and an unreachable state: the halt check fires.
        let machine = decode(&["1_0_q0,q0,a,a,R", "0_0_q2,q2,b,b,R"]).unwrap();
        let error = analyze(&machine).unwrap_err();
        assert_eq!(
            error,
            MachineError::Validation("machine has no halt state".to_string())
        );
    }
}
