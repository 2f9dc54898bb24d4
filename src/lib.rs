//! Core model and execution engine for a diagram-built, single-tape
//! deterministic Turing machine. It includes modules for decoding the
//! editor's flat per-state description strings into a machine, running a
//! machine against an input string to a verdict and a replayable trace,
//! validating a machine before a run, and a set of embedded sample machines.

pub mod analyzer;
pub mod decoder;
pub mod encoder;
pub mod interpreter;
pub mod machine;
pub mod samples;
pub mod types;

/// Re-exports the `Rule` enum from the decoder module, used by the `pest`
/// grammar.
pub use crate::decoder::Rule;
/// Re-exports the `analyze` function and `AnalysisError` enum from the
/// analyzer module.
pub use analyzer::{analyze, AnalysisError};
/// Re-exports the `decode` function from the decoder module.
pub use decoder::decode;
/// Re-exports the `encode` function from the encoder module.
pub use encoder::encode;
/// Re-exports the `run` function and `Interpreter` struct from the
/// interpreter module.
pub use interpreter::{run, Interpreter};
/// Re-exports the `Machine` struct from the machine module.
pub use machine::Machine;
/// Re-exports the embedded sample machines.
pub use samples::{SampleMachine, SAMPLES};
/// Re-exports the data types describing machines, verdicts, and traces.
pub use types::{
    CrashReason, Direction, ExecutionTrace, MachineError, State, StateId, Step, TapeSnapshot,
    Transition, Verdict, BLANK_SYMBOL, MAX_EXECUTION_STEPS,
};
