//! This module encodes a [`Machine`] back into the flat per-state description
//! strings the decoder consumes. The editor layer performs the same encoding
//! when a build is requested; keeping the inverse here lets the textual
//! protocol be round-trip tested.

use crate::machine::Machine;
use crate::types::State;

/// Encodes every state of a machine as one description string, in state
/// order. `decode(&encode(machine))` reproduces the machine.
pub fn encode(machine: &Machine) -> Vec<String> {
    machine.states().iter().map(encode_state).collect()
}

/// Encodes one state: start flag, halt flag, then either the display name
/// (halt states) or the `_`-separated transition records.
fn encode_state(state: &State) -> String {
    let start = if state.is_start { '1' } else { '0' };
    let halt = if state.is_halt { '1' } else { '0' };

    if state.is_halt {
        format!("{start}_{halt}_{}", state.name())
    } else {
        let records: Vec<String> = state
            .transitions
            .iter()
            .map(|transition| transition.to_string())
            .collect();
        format!("{start}_{halt}_{}", records.join("_"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::decode;

    #[test]
    fn test_encode_single_transition_state() {
        let machine = decode(&["1_0_q0,q1,a,b,R", "0_1_q1"]).unwrap();

        assert_eq!(
            encode(&machine),
            vec!["1_0_q0,q1,a,b,R".to_string(), "0_1_q1".to_string()]
        );
    }

    #[test]
    fn test_encode_joins_records_with_separators() {
        let descriptions = ["1_0_q0,q0,a,a,R_q0,q0,b,b,R_q0,q1,-,-,S", "0_1_q1"];
        let machine = decode(&descriptions).unwrap();

        assert_eq!(encode(&machine), descriptions.to_vec());
    }

    #[test]
    fn test_round_trip_preserves_transition_set() {
        let machine = decode(&[
            "1_0_q0,q1,a,$,R_q0,q4,-,-,S",
            "0_0_q1,q1,a,a,R_q1,q2,-,-,L",
            "0_0_q2,q3,b,#,L",
            "0_0_q3,q3,a,a,L_q3,q0,$,$,R",
            "0_1_q4",
        ])
        .unwrap();

        let rebuilt = decode(&encode(&machine)).unwrap();
        assert_eq!(rebuilt, machine);
    }

    #[test]
    fn test_round_trip_multi_digit_ids() {
        let machine = decode(&["1_0_q10,q11,a,a,R", "0_1_q11"]).unwrap();
        let rebuilt = decode(&encode(&machine)).unwrap();
        assert_eq!(rebuilt, machine);
    }

    #[test]
    fn test_encode_normalizes_lowercase_moves() {
        let machine = decode(&["1_0_q0,q1,a,a,r", "0_1_q1"]).unwrap();
        assert_eq!(encode(&machine)[0], "1_0_q0,q1,a,a,R");
    }
}
