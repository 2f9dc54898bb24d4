//! This module embeds a small library of ready-made machines in the state
//! description format, for demos, documentation, and tests.

use crate::decoder::decode;
use crate::machine::Machine;
use crate::types::MachineError;

/// An embedded example machine: its description strings plus an input it is
/// meant to be run against.
#[derive(Debug, Clone)]
pub struct SampleMachine {
    /// Human-readable name of the machine.
    pub name: &'static str,
    /// What the machine does.
    pub summary: &'static str,
    /// One description string per state, as the editor would emit them.
    pub descriptions: &'static [&'static str],
    /// An interesting input to run the machine against.
    pub sample_input: &'static str,
}

impl SampleMachine {
    /// Decodes the sample into a runnable [`Machine`].
    pub fn machine(&self) -> Result<Machine, MachineError> {
        decode(self.descriptions)
    }
}

lazy_static::lazy_static! {
    /// All embedded sample machines.
    pub static ref SAMPLES: Vec<SampleMachine> = vec![
        SampleMachine {
            name: "Single step",
            summary: "Replaces one 'a' with 'b' and accepts.",
            descriptions: &["1_0_q0,q1,a,b,R", "0_1_q1"],
            sample_input: "a",
        },
        SampleMachine {
            name: "Scan right",
            summary: "Scans over a's and b's and accepts at the blank.",
            descriptions: &["1_0_q0,q0,a,a,R_q0,q0,b,b,R_q0,q1,-,-,S", "0_1_q1"],
            sample_input: "abab",
        },
        SampleMachine {
            name: "a^n b^n checker",
            summary: "Accepts strings of n a's followed by n b's, crossing \
                      off one pair per pass.",
            descriptions: &[
                "1_0_q0,q1,a,$,R_q0,q4,-,-,S_q0,q4,#,#,S",
                "0_0_q1,q1,a,a,R_q1,q1,b,b,R_q1,q2,#,#,L_q1,q2,-,-,L",
                "0_0_q2,q3,b,#,L",
                "0_0_q3,q3,a,a,L_q3,q3,b,b,L_q3,q0,$,$,R",
                "0_1_q4",
            ],
            sample_input: "aabb",
        },
        SampleMachine {
            name: "Infinite loop",
            summary: "Spins in place on 'a'; only a 'b' reaches the halt \
                      state. Demonstrates the iteration bound.",
            descriptions: &["1_0_q0,q0,a,a,S_q0,q1,b,b,R", "0_1_q1"],
            sample_input: "a",
        },
    ];
}

/// Looks a sample up by name.
pub fn by_name(name: &str) -> Option<&'static SampleMachine> {
    SAMPLES.iter().find(|sample| sample.name == name)
}

/// Names of all embedded samples.
pub fn names() -> Vec<&'static str> {
    SAMPLES.iter().map(|sample| sample.name).collect()
}
