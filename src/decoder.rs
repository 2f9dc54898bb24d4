//! This module decodes the flat per-state description strings emitted by the
//! diagram editor into a [`Machine`], using a `pest` grammar for the record
//! format. Decoding is a pure function of its input and attempts no recovery.

use pest::{
    error::{Error, ErrorVariant},
    iterators::Pair,
    Parser as PestParser, Span,
};
use pest_derive::Parser as PestParser;

use crate::machine::Machine;
use crate::types::{Direction, MachineError, State, StateId, Transition, BLANK_SYMBOL};

/// Derives a `PestParser` for the state description grammar in `grammar.pest`.
#[derive(PestParser)]
#[grammar = "grammar.pest"]
pub struct DescriptionParser;

/// Decodes one description string per state into a machine.
///
/// State order in the result matches input order; a state's id is taken from
/// its records (or its display name for halt states) and is *not* required to
/// equal its position. Whether exactly one state carries the start flag is an
/// upstream editor concern and is not enforced here; see
/// [`crate::analyzer::analyze`] for the opt-in check.
///
/// # Errors
///
/// Returns a [`MachineError`] naming the failing description when the text is
/// malformed, a non-halt state has no transition records, a halt state has no
/// display name, or records within one description disagree on their source
/// state.
pub fn decode<S: AsRef<str>>(descriptions: &[S]) -> Result<Machine, MachineError> {
    let states = descriptions
        .iter()
        .enumerate()
        .map(|(index, description)| decode_state(index, description.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Machine::new(states))
}

/// Decodes a single state description line.
fn decode_state(index: usize, text: &str) -> Result<State, MachineError> {
    let root = DescriptionParser::parse(Rule::description, text)
        .map_err(|e| MachineError::Malformed {
            index,
            source: Box::new(e),
        })?
        .next()
        .unwrap();

    let mut pairs = root.into_inner();
    let is_start = pairs.next().unwrap().as_str() == "1";
    let is_halt = pairs.next().unwrap().as_str() == "1";
    let body = pairs.next().unwrap();

    match (is_halt, body.as_rule()) {
        // Halt state: the body is its display name. Edges drawn on a halt
        // state are meaningless and any trailing records are dropped.
        (true, Rule::halt_body) => {
            let name = body.into_inner().next().unwrap();
            Ok(State {
                id: parse_state_id(index, name.as_str())?,
                is_start,
                is_halt: true,
                transitions: Vec::new(),
            })
        }
        (true, Rule::records) => Err(MachineError::MissingHaltName { index }),
        (false, Rule::records) => decode_transitions(index, is_start, body),
        (false, Rule::halt_body) => {
            let name = body.into_inner().next().unwrap();
            Err(MachineError::NoTransitions {
                index,
                name: name.as_str().to_string(),
            })
        }
        _ => unreachable!("grammar admits no other body"),
    }
}

/// Decodes the record list of a non-halt state. The state's id comes from the
/// first record; every record must leave the same state.
fn decode_transitions(
    index: usize,
    is_start: bool,
    body: Pair<Rule>,
) -> Result<State, MachineError> {
    let mut transitions: Vec<Transition> = Vec::new();

    for record in body.into_inner() {
        let transition = decode_record(index, record)?;

        if let Some(first) = transitions.first() {
            if first.from_state != transition.from_state {
                return Err(MachineError::MixedSourceStates {
                    index,
                    expected: first.from_state,
                    found: transition.from_state,
                });
            }
        }

        transitions.push(transition);
    }

    // The grammar guarantees at least one record.
    let id = transitions[0].from_state;

    Ok(State {
        id,
        is_start,
        is_halt: false,
        transitions,
    })
}

/// Decodes one `from,to,read,write,move` record.
fn decode_record(index: usize, pair: Pair<Rule>) -> Result<Transition, MachineError> {
    let mut pairs = pair.into_inner();

    let from_state = parse_state_id(index, pairs.next().unwrap().as_str())?;
    let to_state = parse_state_id(index, pairs.next().unwrap().as_str())?;
    let read = parse_symbol(pairs.next().unwrap().as_str());
    let write = parse_symbol(pairs.next().unwrap().as_str());
    let direction = parse_direction(index, pairs.next().unwrap())?;

    Ok(Transition {
        from_state,
        to_state,
        read,
        write,
        direction,
    })
}

/// Extracts the numeric id from a state name such as `q12`. The grammar
/// guarantees a leading letter followed by digits; the digits are parsed as a
/// full token, so id width is unconstrained.
fn parse_state_id(index: usize, name: &str) -> Result<StateId, MachineError> {
    name.trim_start_matches(|c: char| c.is_ascii_alphabetic())
        .parse()
        .map_err(|_| MachineError::InvalidStateId {
            index,
            name: name.to_string(),
        })
}

/// Extracts the single-character tape symbol of a record field.
fn parse_symbol(text: &str) -> char {
    text.chars().next().unwrap_or(BLANK_SYMBOL)
}

/// Parses a head movement letter. Lowercase is accepted, as the original
/// editor was case-insensitive about move labels.
fn parse_direction(index: usize, pair: Pair<Rule>) -> Result<Direction, MachineError> {
    match pair.as_str() {
        "L" | "l" => Ok(Direction::Left),
        "R" | "r" => Ok(Direction::Right),
        "S" | "s" => Ok(Direction::Stay),
        other => Err(decode_error(
            index,
            &format!("unsupported move direction: {other}"),
            pair.as_span(),
        )),
    }
}

/// Builds a [`MachineError::Malformed`] with a custom message at a span.
fn decode_error(index: usize, msg: &str, span: Span) -> MachineError {
    MachineError::Malformed {
        index,
        source: Box::new(Error::new_from_span(
            ErrorVariant::CustomError {
                message: msg.to_string(),
            },
            span,
        )),
    }
}
