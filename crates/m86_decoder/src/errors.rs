use thiserror::Error;

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Could not read {needed} byte(s) at offset {offset:#06x}, only {remaining} left")]
    OutOfBounds {
        offset: usize,
        needed: usize,
        remaining: usize,
    },

    #[error("Unknown op code ({byte:#04x}) at offset {offset:#06x}")]
    UnknownOpcode { byte: u8, offset: usize },
}

pub type Result<T> = std::result::Result<T, DecodeError>;
