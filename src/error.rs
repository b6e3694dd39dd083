//! Error types for the embedding engine.

use thiserror::Error;

/// Errors raised by the channel packer and the bitstream codec.
///
/// Every variant is returned to the immediate caller; encode and decode abort on the first
/// one they see.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StegoError {
    /// The channel code does not name red, green or blue.
    #[error("channel {0} is not supported")]
    UnsupportedChannel(u8),

    /// A bit-slot index below zero was requested.
    #[error("index {0} out of range")]
    NegativeIndex(i64),

    /// The bit-slot index maps to a row outside the image.
    #[error("image index {index} is too large for a {width}x{height} image")]
    IndexOutOfBounds { index: i64, width: u32, height: u32 },

    /// A read produced something other than 0 or 1.
    #[error("channel read at index {index} yielded {bit}, expected 0 or 1")]
    ChannelReadInvariantViolation { index: i64, bit: u8 },
}
