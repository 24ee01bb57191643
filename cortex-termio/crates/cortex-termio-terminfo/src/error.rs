//! Error types for capability lookup and parameter expansion.

use thiserror::Error;

/// Failure while expanding a parameterized capability string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TparmError {
    /// The profile does not define the requested string capability.
    #[error("capability not defined: {0}")]
    MissingCapability(String),

    /// An operator needed more operands than the stack held.
    #[error("parameter stack underflow")]
    StackUnderflow,

    /// A numeric operator received a string operand, or the reverse.
    #[error("parameter type mismatch")]
    TypeMismatch,

    /// A `%t` or `%e` branch never reached its closing `%;`.
    #[error("unterminated conditional")]
    UnterminatedConditional,

    /// Unknown `%` directive or malformed constant.
    #[error("invalid format directive: %{0}")]
    InvalidFormat(char),

    /// `%/` or `%m` with a zero divisor.
    #[error("division by zero")]
    DivideByZero,

    /// `%p` referenced a parameter outside 1-9.
    #[error("invalid parameter index: {0}")]
    InvalidParameter(u8),
}

/// Result type alias for capability expansion.
pub type Result<T> = std::result::Result<T, TparmError>;
