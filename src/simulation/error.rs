//! Error types for the simulation core

use thiserror::Error;

/// Result type for simulation operations
pub type SimResult<T> = Result<T, SimError>;

/// Errors raised by initial-condition derivation, force evaluation,
/// integration and the driver. None of them are recovered internally.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error("invalid orbital element for `{body}`: {reason}")]
    InvalidOrbitalElement { body: String, reason: String },

    #[error("invalid step parameters: num_steps = {num_steps}, dt = {dt} (both must be positive)")]
    InvalidStepParameters { num_steps: i64, dt: f64 },

    #[error("invalid simulation constant {name} = {value}")]
    InvalidConstant { name: &'static str, value: f64 },

    #[error("degenerate configuration: `{first}` and `{second}` occupy the same position")]
    DegenerateConfiguration { first: String, second: String },

    #[error("simulation has no bodies")]
    EmptySystem,

    #[error("duplicate body name `{0}`")]
    DuplicateBody(String),
}
